use serde::{Deserialize, Serialize};

/// Bot API update. Only `message` and `edited_message` are answered.
#[derive(Debug, Default, Deserialize)]
pub struct TelegramUpdate {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
    pub edited_message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    pub chat: TelegramChat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

/// Webhook method reply: the Bot API executes it as a `sendMessage` call.
#[derive(Debug, PartialEq, Serialize)]
pub struct TelegramReply {
    pub method: &'static str,
    pub chat_id: i64,
    pub text: String,
}
