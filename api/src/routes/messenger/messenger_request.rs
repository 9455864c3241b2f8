use serde::{Deserialize, Serialize};

/// Page webhook delivery: `{ object: "page", entry: [ { messaging: [...] } ] }`.
#[derive(Debug, Default, Deserialize)]
pub struct MessengerWebhook {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<MessengerEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessengerEntry {
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

/// One messaging event. Deliveries, reads, and postbacks carry no `message`.
#[derive(Debug, Default, Deserialize)]
pub struct MessagingEvent {
    pub sender: Option<MessengerParty>,
    pub message: Option<MessengerMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessengerParty {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessengerMessage {
    pub text: Option<String>,
    /// Set when the page itself sent the message.
    #[serde(default)]
    pub is_echo: bool,
}

/// Query of the GET verification handshake.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Send API shaped reply: `{ recipient: { id }, message: { text } }`.
#[derive(Debug, PartialEq, Serialize)]
pub struct MessengerReply {
    pub recipient: MessengerParty,
    pub message: MessengerReplyText,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MessengerReplyText {
    pub text: String,
}
