use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::models::{Lead, Message, NewLeadDraft, OutgoingText};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Server(StatusCode),
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
}

pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client with a short request timeout, used when probing a backend the
    /// user just typed in.
    pub fn with_timeout(base_url: &str, timeout: std::time::Duration) -> Result<Self, ApiError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let resp = self.http.get(self.endpoint(path)).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Server(resp.status()));
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    async fn post_json<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let resp = self.http.post(self.endpoint(path)).json(body).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Server(resp.status()));
        }
        // Response bodies of the mutation endpoints are ignored.
        Ok(())
    }

    /// Fetch the full lead collection, in backend order.
    pub async fn leads(&self) -> Result<Vec<Lead>, ApiError> {
        let json = self.get_json("/leads").await?;
        extract_list(json, "leads")
    }

    /// Fetch the full message collection, in backend order.
    pub async fn messages(&self) -> Result<Vec<Message>, ApiError> {
        let json = self.get_json("/messages").await?;
        extract_list(json, "messages")
    }

    /// Post a draft verbatim. No client-side validation of the fields.
    pub async fn create_lead(&self, draft: &NewLeadDraft) -> Result<(), ApiError> {
        self.post_json("/leads", draft).await
    }

    pub async fn send_text(&self, text: &OutgoingText) -> Result<(), ApiError> {
        self.post_json("/send-text", text).await
    }
}

// Backends deliver lists either as a bare array or wrapped in a "data" or
// collection-named field. Anything else is a decode error.
fn extract_list<T: DeserializeOwned>(json: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let list = if json.is_array() {
        json
    } else if let Some(arr) = json.get("data").filter(|v| v.is_array()) {
        arr.clone()
    } else if let Some(arr) = json.get(key).filter(|v| v.is_array()) {
        arr.clone()
    } else {
        json
    };
    serde_json::from_value(list).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_list_accepts_bare_array() {
        let json = json!([
            {"id": 1, "name": "Ann", "phone": "555-1", "source": "web", "notes": ""}
        ]);
        let leads: Vec<Lead> = extract_list(json, "leads").unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Ann");
    }

    #[test]
    fn extract_list_accepts_data_wrapper() {
        let json = json!({"data": [
            {"id": 7, "phone": "555-1", "message": "hi", "sent_at": "2024-01-01T10:00:00Z"}
        ]});
        let msgs: Vec<Message> = extract_list(json, "messages").unwrap();
        assert_eq!(msgs[0].id, 7);
    }

    #[test]
    fn extract_list_accepts_collection_wrapper() {
        let json = json!({"leads": [
            {"id": 2, "name": "Bob", "phone": "555-2", "source": "ad", "notes": "x"}
        ]});
        let leads: Vec<Lead> = extract_list(json, "leads").unwrap();
        assert_eq!(leads[0].phone, "555-2");
    }

    #[test]
    fn extract_list_flags_malformed_items_as_decode() {
        let json = json!([{"id": "not-a-number"}]);
        let err = extract_list::<Lead>(json, "leads").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn extract_list_flags_non_list_body_as_decode() {
        let json = json!({"error": "oops"});
        let err = extract_list::<Lead>(json, "leads").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = ApiClient::new("https://crm.example.com/");
        assert_eq!(client.endpoint("/leads"), "https://crm.example.com/leads");
    }
}
