use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub source: String,
    pub notes: String,
    /// ISO 8601 string as delivered by the backend; compared by calendar-date
    /// prefix only, never parsed into a real date.
    #[serde(default)]
    pub follow_up_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub id: i64,
    pub phone: String,
    pub message: String,
    pub sent_at: String,
}

/// Transient add-lead form contents. The backend assigns the id.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NewLeadDraft {
    pub name: String,
    pub phone: String,
    pub source: String,
    pub notes: String,
}

/// Wire body of POST /send-text.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutgoingText {
    pub to: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_accepts_null_or_missing_follow_up() {
        let with_null: Lead = serde_json::from_str(
            r#"{"id":1,"name":"Ann","phone":"555-1","source":"web","notes":"","follow_up_date":null}"#,
        )
        .unwrap();
        assert!(with_null.follow_up_date.is_none());

        let missing: Lead = serde_json::from_str(
            r#"{"id":2,"name":"Bob","phone":"555-2","source":"ad","notes":"call back"}"#,
        )
        .unwrap();
        assert!(missing.follow_up_date.is_none());
    }

    #[test]
    fn outgoing_text_serializes_to_wire_body() {
        let body = OutgoingText {
            to: "555-1".to_string(),
            message: "hello".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"to": "555-1", "message": "hello"}));
    }
}
