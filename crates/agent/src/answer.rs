use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use tracing::debug;

use orderdesk_core::config::TokenBudgets;
use orderdesk_core::OrderRecord;

use crate::intent::Intent;
use crate::llm::{GenerationParams, LlmClient};

/// Scope redirect and human handoff are identity-sensitive outcomes, so they
/// are deterministic canned text rather than backend output.
pub const OUT_OF_SCOPE_REPLY: &str = "I can help you with information about your existing or past \
     orders (status, delivery, etc.). How can I help with one of your orders?";

pub const HUMAN_HANDOFF_REPLY: &str = "Thanks for letting me know. A human support agent will take \
     over this request for you shortly.";

pub fn clarification_reply(first_name: &str) -> String {
    format!(
        "Sorry {first_name}, I couldn't tell which order you mean. \
         Could you confirm the order number?"
    )
}

pub struct AnswerComposer {
    llm: Arc<dyn LlmClient>,
    budgets: TokenBudgets,
}

impl AnswerComposer {
    pub fn new(llm: Arc<dyn LlmClient>, budgets: TokenBudgets) -> Self {
        Self { llm, budgets }
    }

    /// Produce the final reply. Only the owned-order summary path touches the
    /// generation backend; every other branch is code-level and canned.
    pub async fn compose(
        &self,
        first_name: &str,
        intent: Intent,
        order: Option<&OrderRecord>,
        needs_clarification: bool,
    ) -> Result<String> {
        let order = match intent {
            Intent::OutOfScope => return Ok(OUT_OF_SCOPE_REPLY.to_string()),
            Intent::OrderHelp => return Ok(HUMAN_HANDOFF_REPLY.to_string()),
            Intent::OrderInfo => match order {
                Some(order) if !needs_clarification => order,
                _ => return Ok(clarification_reply(first_name)),
            },
        };

        let prompt = summary_prompt(first_name, order);
        let raw = self.llm.complete(&prompt, GenerationParams::answer(self.budgets)).await?;
        let text = raw.trim();
        if text.is_empty() {
            // a silent empty reply would look like a working answer path
            bail!("generation backend returned an empty answer");
        }
        debug!(event_name = "agent.answer.generated", chars = text.len(), "generated order summary");
        Ok(text.to_string())
    }
}

fn summary_prompt(first_name: &str, order: &OrderRecord) -> String {
    format!(
        "You are an e-commerce customer support assistant.\n\
         You speak in friendly, clear, polite English.\n\
         You never mention SQL, databases, internal tooling, or other customers.\n\
         You never reveal any private data beyond what is provided here.\n\
         \n\
         User first name: {first_name}\n\
         \n\
         Order information for THIS user only:\n\
         - order number: {order_id}\n\
         - status: {status}\n\
         - purchased: {purchased}\n\
         - shipped: {shipped}\n\
         - delivered: {delivered}\n\
         \n\
         Summarize the order status in human-friendly wording (e.g. \"Your order was \
         shipped on ...\", \"It was delivered on ...\", \"It's invoiced and being prepared\"), \
         using only the fields above.\n\
         \n\
         Return ONLY the final answer text to the user, as a single concise message.\n\
         Do NOT return JSON.",
        order_id = order.order_id,
        status = order.status,
        purchased = format_date(Some(order.date_purchase)),
        shipped = format_date(order.date_shipped),
        delivered = format_date(order.date_delivered),
    )
}

fn format_date(date: Option<NaiveDateTime>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "not yet".to_string(),
    }
}
