use serde::Serialize;

/// Response payload for POST /api/chat.
#[derive(Debug, PartialEq, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
