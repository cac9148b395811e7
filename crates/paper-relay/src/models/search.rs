//! Search start and poll request bodies.

use serde::{Deserialize, Serialize};

/// Caller request to start a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,

    /// Session to run the search under, owned by the agent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Acknowledgement for a started search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAck {
    pub message: String,

    /// The caller's session id, echoed back unchanged.
    pub session_id: Option<String>,
}

impl SearchAck {
    /// Message sent once the agent accepted the search.
    pub const INITIATED: &'static str = "Search initiated";

    #[must_use]
    pub fn initiated(session_id: Option<String>) -> Self {
        Self { message: Self::INITIATED.to_string(), session_id }
    }
}

/// Body of the agent's search start endpoint.
#[derive(Debug, Serialize)]
pub struct AgentSearchRequest<'a> {
    pub user_query: &'a str,
    pub session_id: Option<&'a str>,
}

/// Body of the agent's result polling endpoint.
#[derive(Debug, Serialize)]
pub struct AgentResultRequest<'a> {
    pub session_id: &'a str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_search_request_session_optional() {
        let req: SearchRequest = serde_json::from_value(json!({"query": "llm agents"})).unwrap();
        assert_eq!(req.query, "llm agents");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn test_agent_search_request_sends_null_session() {
        let body = AgentSearchRequest { user_query: "q", session_id: None };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"user_query": "q", "session_id": null}));
    }
}
