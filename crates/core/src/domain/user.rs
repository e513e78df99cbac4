use crate::domain::order::UserId;

/// Authenticated identity for one request. Supplied by the caller (session
/// or CLI flags), never read from global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: UserId,
    pub first_name: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<UserId>, first_name: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), first_name: first_name.into() }
    }
}
