use orderdesk_core::{OrderRecord, UserId};

/// Denylisted substrings removed from raw user text before it reaches any
/// prompt. Case-sensitive literal deletion, no regex, no other normalization.
/// Best-effort hygiene only: the real boundary is `verify_order_ownership`
/// and the parameterized queries in the repository layer.
const DENYLIST: [&str; 8] = ["SELECT", "DROP", "DELETE", "UPDATE", "--", ";", "/*", "*/"];

/// Pure function; output length is never greater than input length.
pub fn sanitize_user_input(user_input: &str) -> String {
    let mut cleaned = user_input.to_string();
    for token in DENYLIST {
        cleaned = cleaned.replace(token, "");
    }
    cleaned
}

/// Backend-independent re-check that a fetched order belongs to the
/// requesting user. Runs after every fetch even though the fetch itself is
/// user-scoped. A failure must be treated as not-found by the caller, so a
/// cross-tenant probe and a genuinely missing order read identically.
pub fn verify_order_ownership(user_id: UserId, order: Option<&OrderRecord>) -> bool {
    match order {
        Some(record) => record.user_id == user_id,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use orderdesk_core::{OrderId, OrderRecord, OrderStatus, UserId};

    use super::{sanitize_user_input, verify_order_ownership};

    fn record(order_id: i64, user_id: i64) -> OrderRecord {
        OrderRecord {
            order_id: OrderId(order_id),
            user_id: UserId(user_id),
            status: OrderStatus::Delivered,
            date_purchase: NaiveDate::from_ymd_opt(2024, 5, 17)
                .expect("valid date")
                .and_hms_opt(11, 1, 51)
                .expect("valid time"),
            date_shipped: None,
            date_delivered: None,
        }
    }

    #[test]
    fn strips_sql_injection_tokens() {
        let cleaned = sanitize_user_input("1; DROP TABLE users; --");
        assert!(!cleaned.to_ascii_lowercase().contains("drop table"));
        assert!(!cleaned.contains(';'));
        assert!(!cleaned.contains("--"));
    }

    #[test]
    fn output_is_never_longer_than_input() {
        for input in ["", "hello", "SELECT * FROM orders; --", "where is my order?"] {
            assert!(sanitize_user_input(input).len() <= input.len());
        }
    }

    #[test]
    fn matching_is_case_sensitive_and_literal() {
        assert_eq!(sanitize_user_input("please select my last order"), "please select my last order");
        assert_eq!(sanitize_user_input("an update on my delivery"), "an update on my delivery");
        assert_eq!(sanitize_user_input("an UPDATE on my delivery"), "an  on my delivery");
    }

    #[test]
    fn ownership_holds_for_matching_user() {
        assert!(verify_order_ownership(UserId(6), Some(&record(5, 6))));
    }

    #[test]
    fn ownership_fails_for_foreign_user() {
        assert!(!verify_order_ownership(UserId(6), Some(&record(5, 12))));
    }

    #[test]
    fn ownership_fails_for_absent_order() {
        assert!(!verify_order_ownership(UserId(6), None));
    }
}
