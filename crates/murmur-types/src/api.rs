use serde::Deserialize;

use crate::models::AccountId;

// Absent fields stay `None` so the services can reject them as
// validation failures instead of the extractor rejecting the body.

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// -- Messages --

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMessageRequest {
    pub posted_by: Option<AccountId>,
    pub message_text: Option<String>,
    /// Unix seconds. Stamped with the current time when omitted.
    pub time_posted_epoch: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMessageRequest {
    pub message_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_request_tolerates_missing_and_extra_fields() {
        let req: AccountRequest =
            serde_json::from_str(r#"{"account_id": 3, "username": "alice"}"#).unwrap();
        assert_eq!(req.username.as_deref(), Some("alice"));
        assert!(req.password.is_none());
    }

    #[test]
    fn update_request_ignores_immutable_fields() {
        let req: UpdateMessageRequest = serde_json::from_str(
            r#"{"posted_by": 9, "message_text": "edited", "time_posted_epoch": 1}"#,
        )
        .unwrap();
        assert_eq!(req.message_text.as_deref(), Some("edited"));
    }
}
