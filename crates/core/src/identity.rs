//! Directory-owned user record, as seen by this service.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::UserId;

/// A user identity returned by the directory service.
///
/// Read-only here: the directory is the system of record. The field names
/// follow the directory's camelCase JSON so the record can be passed through
/// to callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub restriction_reason: Option<String>,
    #[serde(default)]
    pub pending_approval: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Identity {
    /// Whether a token may be minted for this identity.
    pub fn is_approved(&self) -> bool {
        !self.pending_approval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_directory_payload() {
        let body = r#"{
            "id": 12,
            "username": "alice",
            "email": "alice@example.com",
            "role": "MEMBER",
            "restricted": false,
            "restrictionReason": null,
            "pendingApproval": true,
            "createdAt": "2024-03-01T10:15:30",
            "updatedAt": "2024-03-01T10:15:30.123"
        }"#;

        let identity: Identity = serde_json::from_str(body).unwrap();
        assert_eq!(identity.id, UserId::new(12));
        assert_eq!(identity.role, "MEMBER");
        assert!(identity.pending_approval);
        assert!(!identity.is_approved());
        assert!(identity.created_at.is_some());
    }

    #[test]
    fn optional_fields_default() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":1,"username":"bob","role":"ADMIN"}"#).unwrap();
        assert!(identity.is_approved());
        assert!(!identity.restricted);
        assert_eq!(identity.email, "");
        assert!(identity.updated_at.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":1,"username":"bob","role":"ADMIN"}"#).unwrap();
        let v = serde_json::to_value(&identity).unwrap();
        assert_eq!(v["pendingApproval"], false);
        assert!(v.get("restrictionReason").is_some());
    }
}
