use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use orderdesk_core::config::TokenBudgets;
use orderdesk_core::{OrderId, OrderSummary};

use crate::llm::{GenerationParams, LlmClient};

/// The only structured output ever trusted from model text. Both fields are
/// always populated after parsing; ambiguity is the fail-safe state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionResult {
    pub target_order_id: Option<OrderId>,
    pub needs_clarification: bool,
}

impl ResolutionResult {
    pub fn clarification() -> Self {
        Self { target_order_id: None, needs_clarification: true }
    }
}

pub struct OrderResolver {
    llm: Arc<dyn LlmClient>,
    budgets: TokenBudgets,
}

impl OrderResolver {
    pub fn new(llm: Arc<dyn LlmClient>, budgets: TokenBudgets) -> Self {
        Self { llm, budgets }
    }

    /// Ask the backend which of the user's own recent orders the message is
    /// about. The prompt sees only an id+status projection of the candidates;
    /// the response is parsed strictly and a target id outside the candidate
    /// set is rejected in favor of clarification.
    pub async fn resolve(
        &self,
        message: &str,
        candidates: &[OrderSummary],
    ) -> Result<ResolutionResult> {
        let prompt = resolution_prompt(message, candidates);
        let raw = self.llm.complete(&prompt, GenerationParams::extraction(self.budgets)).await?;
        let resolution = validate_against_candidates(parse_resolution(&raw), candidates);
        debug!(
            event_name = "agent.resolver.parsed",
            target_order_id = resolution.target_order_id.map(|id| id.0),
            needs_clarification = resolution.needs_clarification,
            "parsed resolver output"
        );
        Ok(resolution)
    }
}

fn resolution_prompt(message: &str, candidates: &[OrderSummary]) -> String {
    let projection = json!(candidates
        .iter()
        .map(|candidate| {
            json!({ "order_id": candidate.order_id.0, "status": candidate.status.as_str() })
        })
        .collect::<Vec<_>>());

    format!(
        "You are an order reference resolver for an e-commerce support bot.\n\
         \n\
         The user said:\n\
         \"{message}\"\n\
         \n\
         Here are the user's recent orders, most recent first (DO NOT INVENT ANYTHING ELSE):\n\
         {projection}\n\
         \n\
         Your task:\n\
         - Decide which single order_id the user is most likely talking about.\n\
         - If the user says \"my latest / my last order\", pick the FIRST one in the list.\n\
         - If it is not clear which order they mean, set \"needs_clarification\": true\n\
           and \"target_order_id\": null.\n\
         \n\
         Return ONLY a valid JSON object with exactly these keys:\n\
         {{\n\
           \"target_order_id\": <number or null>,\n\
           \"needs_clarification\": <true or false>\n\
         }}\n\
         \n\
         Example valid output:\n\
         {{\"target_order_id\": 12, \"needs_clarification\": false}}"
    )
}

#[derive(Deserialize)]
struct RawResolution {
    #[serde(default)]
    target_order_id: Option<i64>,
    #[serde(default)]
    needs_clarification: Option<bool>,
}

/// Tolerates prefix/suffix commentary by slicing from the first `{` to the
/// last `}`. Any parse failure, and any absent key, degrades to the safe
/// default for that field - never to a guessed order id.
fn parse_resolution(raw: &str) -> ResolutionResult {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return ResolutionResult::clarification();
    };
    if end < start {
        return ResolutionResult::clarification();
    }

    match serde_json::from_str::<RawResolution>(&raw[start..=end]) {
        Ok(parsed) => ResolutionResult {
            target_order_id: parsed.target_order_id.map(OrderId),
            needs_clarification: parsed.needs_clarification.unwrap_or(true),
        },
        Err(_) => ResolutionResult::clarification(),
    }
}

fn validate_against_candidates(
    resolution: ResolutionResult,
    candidates: &[OrderSummary],
) -> ResolutionResult {
    if let Some(target) = resolution.target_order_id {
        if !candidates.iter().any(|candidate| candidate.order_id == target) {
            return ResolutionResult::clarification();
        }
    }
    resolution
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use orderdesk_core::config::TokenBudgets;
    use orderdesk_core::{OrderId, OrderStatus, OrderSummary};

    use super::{parse_resolution, OrderResolver, ResolutionResult};
    use crate::testing::ScriptedLlm;

    fn candidates() -> Vec<OrderSummary> {
        [(7, OrderStatus::Shipped), (5, OrderStatus::Delivered)]
            .into_iter()
            .map(|(order_id, status)| OrderSummary {
                order_id: OrderId(order_id),
                status,
                date_purchase: NaiveDate::from_ymd_opt(2024, 6, 1)
                    .expect("valid date")
                    .and_hms_opt(12, 0, 0)
                    .expect("valid time"),
                date_shipped: None,
                date_delivered: None,
            })
            .collect()
    }

    #[test]
    fn parses_valid_object() {
        let resolution =
            parse_resolution("{\"target_order_id\": 7, \"needs_clarification\": false}");
        assert_eq!(resolution.target_order_id, Some(OrderId(7)));
        assert!(!resolution.needs_clarification);
    }

    #[test]
    fn tolerates_commentary_around_the_object() {
        let resolution = parse_resolution(
            "Sure, here you go:\n{\"target_order_id\": 5, \"needs_clarification\": false}\nLet me know!",
        );
        assert_eq!(resolution.target_order_id, Some(OrderId(5)));
        assert!(!resolution.needs_clarification);
    }

    #[test]
    fn non_json_output_degrades_to_clarification() {
        let resolution = parse_resolution("I am not sure which order.");
        assert_eq!(resolution, ResolutionResult::clarification());
    }

    #[test]
    fn absent_keys_take_safe_defaults() {
        let resolution = parse_resolution("{\"target_order_id\": 7}");
        assert_eq!(resolution.target_order_id, Some(OrderId(7)));
        assert!(resolution.needs_clarification);

        let resolution = parse_resolution("{\"needs_clarification\": false}");
        assert_eq!(resolution.target_order_id, None);
        assert!(!resolution.needs_clarification);
    }

    #[test]
    fn mismatched_braces_degrade_to_clarification() {
        assert_eq!(parse_resolution("} nope {"), ResolutionResult::clarification());
        assert_eq!(parse_resolution("{ broken"), ResolutionResult::clarification());
    }

    #[tokio::test]
    async fn resolve_passes_minimized_projection_only() {
        let llm = Arc::new(ScriptedLlm::new(&[
            "{\"target_order_id\": 7, \"needs_clarification\": false}",
        ]));
        let resolver = OrderResolver::new(llm.clone(), TokenBudgets::default());

        let resolution = resolver
            .resolve("what about my last order?", &candidates())
            .await
            .expect("resolution");
        assert_eq!(resolution.target_order_id, Some(OrderId(7)));

        let prompt = llm.prompt(0);
        assert!(prompt.contains("\"order_id\":7"));
        assert!(prompt.contains("\"status\":\"shipped\""));
        assert!(!prompt.contains("date_purchase"), "prompt must not leak date fields");
    }

    #[tokio::test]
    async fn id_outside_candidate_set_is_rejected() {
        let llm = Arc::new(ScriptedLlm::new(&[
            "{\"target_order_id\": 42, \"needs_clarification\": false}",
        ]));
        let resolver = OrderResolver::new(llm, TokenBudgets::default());

        let resolution =
            resolver.resolve("give me order 42", &candidates()).await.expect("resolution");
        assert_eq!(resolution, ResolutionResult::clarification());
    }
}
