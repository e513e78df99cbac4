use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use orderdesk_core::config::TokenBudgets;

use crate::llm::{GenerationParams, LlmClient};

/// Coarse category of a user message. Closed set: classification always
/// lands on exactly one of these, whatever the backend emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    OrderInfo,
    OrderHelp,
    OutOfScope,
}

impl Intent {
    pub fn label(self) -> &'static str {
        match self {
            Self::OrderInfo => "ORDER_INFO",
            Self::OrderHelp => "ORDER_HELP",
            Self::OutOfScope => "OUT_OF_SCOPE",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
    budgets: TokenBudgets,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>, budgets: TokenBudgets) -> Self {
        Self { llm, budgets }
    }

    /// One short-budget greedy generation call, then total normalization of
    /// whatever came back. Never errors on malformed output.
    pub async fn classify(&self, message: &str) -> Result<Intent> {
        let prompt = classification_prompt(message);
        let raw = self.llm.complete(&prompt, GenerationParams::classification(self.budgets)).await?;
        let intent = normalize_label(&raw);
        debug!(event_name = "agent.intent.normalized", raw = %raw.trim(), intent = %intent, "normalized classifier output");
        Ok(intent)
    }
}

fn classification_prompt(message: &str) -> String {
    format!(
        "You are an intent classifier for an e-commerce customer support assistant.\n\
         \n\
         Given the user's message, respond with ONLY ONE of these labels:\n\
         - ORDER_INFO      (the user asks about order status, delivery date, tracking...)\n\
         - ORDER_HELP      (the user asks for help: cancel order, change address, refund...)\n\
         - OUT_OF_SCOPE    (anything not related to support about an existing or past order)\n\
         \n\
         User message:\n\
         \"{message}\"\n\
         \n\
         Answer with ONLY ONE LABEL, nothing else."
    )
}

/// Three-tier fallback. Generation backends are not guaranteed to follow
/// formatting instructions, and an invalid or empty intent must never
/// propagate downstream.
fn normalize_label(raw: &str) -> Intent {
    // tier 1: an exact canonical label appears as a token in the output
    let upper = raw.to_ascii_uppercase();
    for token in upper.split(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_') {
        match token {
            "ORDER_INFO" => return Intent::OrderInfo,
            "ORDER_HELP" => return Intent::OrderHelp,
            "OUT_OF_SCOPE" => return Intent::OutOfScope,
            _ => {}
        }
    }

    // tier 2: keyword heuristics over the raw output
    let lower = raw.to_ascii_lowercase();
    if ["info", "status", "track"].iter().any(|keyword| lower.contains(keyword)) {
        return Intent::OrderInfo;
    }
    if ["help", "cancel", "change", "modify", "refund"].iter().any(|keyword| lower.contains(keyword))
    {
        return Intent::OrderHelp;
    }

    // tier 3: fail closed
    Intent::OutOfScope
}
