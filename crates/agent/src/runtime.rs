use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use orderdesk_core::config::TokenBudgets;
use orderdesk_core::UserContext;
use orderdesk_db::repositories::OrderRepository;

use crate::answer::AnswerComposer;
use crate::guardrails::{sanitize_user_input, verify_order_ownership};
use crate::intent::{Intent, IntentClassifier};
use crate::llm::LlmClient;
use crate::resolver::OrderResolver;

/// Sequences the pipeline for one message: sanitize, classify, early-exit for
/// non-info intents, resolve the target order, fetch + ownership-check it,
/// compose the reply. Always yields exactly one reply string; infrastructure
/// failures (store, backend transport) abort the request instead.
pub struct AgentRuntime {
    classifier: IntentClassifier,
    resolver: OrderResolver,
    composer: AnswerComposer,
    orders: Arc<dyn OrderRepository>,
}

impl AgentRuntime {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        budgets: TokenBudgets,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(llm.clone(), budgets),
            resolver: OrderResolver::new(llm.clone(), budgets),
            composer: AnswerComposer::new(llm, budgets),
            orders,
        }
    }

    pub async fn handle_message(&self, user: &UserContext, raw_message: &str) -> Result<String> {
        let correlation_id = Uuid::new_v4().to_string();
        let message = sanitize_user_input(raw_message);

        let intent = self.classifier.classify(&message).await?;
        info!(
            event_name = "agent.intent.classified",
            correlation_id = %correlation_id,
            intent = %intent,
            "intent classified"
        );

        if matches!(intent, Intent::OrderHelp | Intent::OutOfScope) {
            let answer = self.composer.compose(&user.first_name, intent, None, false).await?;
            info!(
                event_name = "agent.answer.composed",
                correlation_id = %correlation_id,
                intent = %intent,
                "composed early-exit reply"
            );
            return Ok(answer);
        }

        let candidates = self.orders.recent_orders_for_user(user.user_id).await?;
        let resolution = self.resolver.resolve(&message, &candidates).await?;
        info!(
            event_name = "agent.order.resolved",
            correlation_id = %correlation_id,
            target_order_id = resolution.target_order_id.map(|id| id.0),
            needs_clarification = resolution.needs_clarification,
            "order reference resolved"
        );

        let mut order = None;
        if let Some(target) = resolution.target_order_id {
            let fetched = self.orders.find_order_for_user(user.user_id, target).await?;
            if verify_order_ownership(user.user_id, fetched.as_ref()) {
                order = fetched;
            } else if fetched.is_some() {
                // the fetch is already user-scoped, so this firing means a
                // fetch-path regression; hide the record either way
                warn!(
                    event_name = "agent.ownership.rejected",
                    correlation_id = %correlation_id,
                    target_order_id = target.0,
                    "fetched order failed ownership re-check"
                );
            }
        }

        let needs_clarification = resolution.needs_clarification || order.is_none();
        let answer = self
            .composer
            .compose(&user.first_name, intent, order.as_ref(), needs_clarification)
            .await?;
        info!(
            event_name = "agent.answer.composed",
            correlation_id = %correlation_id,
            intent = %intent,
            needs_clarification,
            "composed reply"
        );
        Ok(answer)
    }
}
