//! Payload carried inside every credential.

use serde::{Deserialize, Serialize};

/// Claims embedded in the `token` cookie's JWT.
///
/// `userId` keeps the wire name the admin frontend and older issuers already use.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::Claims;

    #[test]
    fn serializes_user_id_as_camel_case() {
        let claims = Claims {
            user_id: "u123".to_string(),
            iat: 10,
            exp: 20,
        };

        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["userId"], "u123");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn missing_exp_does_not_deserialize() {
        let parsed = serde_json::from_str::<Claims>(r#"{"userId":"u1","iat":1}"#);
        assert!(parsed.is_err());
    }
}
