//! Channel adapters: normalize each inbound payload shape into one
//! [`InboundMessage`] and wrap replies in the channel's envelope.
//!
//! Extraction is pure; handlers do the I/O.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::routes::chat::chat_request::ChatResponse;
use crate::routes::messenger::messenger_request::{
    MessengerParty, MessengerReply, MessengerReplyText, MessengerWebhook,
};
use crate::routes::telegram::telegram_request::{TelegramReply, TelegramUpdate};

/// 400 message for a website request without usable text.
pub const INVALID_MESSAGE: &str = "Invalid or empty 'message' in request body.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Website,
    Messenger,
    Telegram,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Website => "website",
            Channel::Messenger => "messenger",
            Channel::Telegram => "telegram",
        }
    }
}

/// A user message with the addressing needed to reply on its channel.
#[derive(Clone, Debug, PartialEq)]
pub enum InboundMessage {
    Website { text: String },
    Messenger { sender_id: String, text: String },
    Telegram { chat_id: i64, text: String },
}

impl InboundMessage {
    pub fn text(&self) -> &str {
        match self {
            InboundMessage::Website { text }
            | InboundMessage::Messenger { text, .. }
            | InboundMessage::Telegram { text, .. } => text,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            InboundMessage::Website { .. } => Channel::Website,
            InboundMessage::Messenger { .. } => Channel::Messenger,
            InboundMessage::Telegram { .. } => Channel::Telegram,
        }
    }

    /// Wraps `reply` in the envelope of the channel this message came from.
    pub fn into_reply(self, reply: String) -> ReplyEnvelope {
        match self {
            InboundMessage::Website { .. } => ReplyEnvelope::Website(ChatResponse { reply }),
            InboundMessage::Messenger { sender_id, .. } => ReplyEnvelope::Messenger(MessengerReply {
                recipient: MessengerParty { id: sender_id },
                message: MessengerReplyText { text: reply },
            }),
            InboundMessage::Telegram { chat_id, .. } => ReplyEnvelope::Telegram(TelegramReply {
                method: "sendMessage",
                chat_id,
                text: reply,
            }),
        }
    }
}

/// Website widget body `{ "message": "<text>" }`.
///
/// Returns `None` when `message` is missing, not a string, or blank.
pub fn extract_website(body: &Value) -> Option<InboundMessage> {
    let text = body.get("message")?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(InboundMessage::Website {
        text: text.to_string(),
    })
}

/// First messaging event of a page webhook that carries non-blank user text.
///
/// Echoes of the page's own messages and non-page objects are skipped.
pub fn extract_messenger(hook: &MessengerWebhook) -> Option<InboundMessage> {
    if hook.object != "page" {
        return None;
    }

    hook.entry
        .iter()
        .flat_map(|e| e.messaging.iter())
        .find_map(|ev| {
            let sender = ev.sender.as_ref()?;
            let msg = ev.message.as_ref().filter(|m| !m.is_echo)?;
            let text = msg.text.as_deref()?.trim();
            (!text.is_empty()).then(|| InboundMessage::Messenger {
                sender_id: sender.id.clone(),
                text: text.to_string(),
            })
        })
}

/// Text of a bot update's `message`, falling back to `edited_message`.
pub fn extract_telegram(update: &TelegramUpdate) -> Option<InboundMessage> {
    let msg = update
        .message
        .as_ref()
        .or(update.edited_message.as_ref())?;
    let text = msg.text.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(InboundMessage::Telegram {
        chat_id: msg.chat.id,
        text: text.to_string(),
    })
}

/// Channel-specific response body.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyEnvelope {
    Website(ChatResponse),
    Messenger(MessengerReply),
    Telegram(TelegramReply),
}

impl IntoResponse for ReplyEnvelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body returned for webhook deliveries that carry no answerable text.
pub fn ignored() -> Response {
    Json(json!({ "status": "ignored" })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messenger(v: Value) -> MessengerWebhook {
        serde_json::from_value(v).unwrap()
    }

    fn telegram(v: Value) -> TelegramUpdate {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn website_accepts_trimmed_text() {
        let m = extract_website(&json!({ "message": "  What services does Zakbot offer? " }));
        assert_eq!(
            m,
            Some(InboundMessage::Website {
                text: "What services does Zakbot offer?".into()
            })
        );
    }

    #[test]
    fn website_rejects_missing_blank_and_non_string() {
        assert_eq!(extract_website(&json!({})), None);
        assert_eq!(extract_website(&json!({ "message": "   " })), None);
        assert_eq!(extract_website(&json!({ "message": 42 })), None);
        assert_eq!(extract_website(&json!({ "message": null })), None);
        assert_eq!(extract_website(&json!("message")), None);
    }

    #[test]
    fn messenger_picks_first_event_with_text() {
        let hook = messenger(json!({
            "object": "page",
            "entry": [{
                "messaging": [
                    { "sender": { "id": "111" }, "delivery": { "watermark": 1 } },
                    { "sender": { "id": "222" }, "message": { "text": "Hi" } },
                    { "sender": { "id": "333" }, "message": { "text": "Later" } }
                ]
            }]
        }));
        assert_eq!(
            extract_messenger(&hook),
            Some(InboundMessage::Messenger {
                sender_id: "222".into(),
                text: "Hi".into()
            })
        );
    }

    #[test]
    fn messenger_ignores_echoes_attachments_and_other_objects() {
        let echo = messenger(json!({
            "object": "page",
            "entry": [{ "messaging": [{ "sender": { "id": "1" }, "message": { "text": "x", "is_echo": true } }] }]
        }));
        assert_eq!(extract_messenger(&echo), None);

        let attachment = messenger(json!({
            "object": "page",
            "entry": [{ "messaging": [{ "sender": { "id": "1" }, "message": { "attachments": [] } }] }]
        }));
        assert_eq!(extract_messenger(&attachment), None);

        let other = messenger(json!({
            "object": "instagram",
            "entry": [{ "messaging": [{ "sender": { "id": "1" }, "message": { "text": "x" } }] }]
        }));
        assert_eq!(extract_messenger(&other), None);
    }

    #[test]
    fn telegram_reads_message_then_edited_message() {
        let u = telegram(json!({
            "update_id": 10,
            "message": { "message_id": 1, "chat": { "id": 42, "type": "private" }, "text": "Pricing?" }
        }));
        assert_eq!(
            extract_telegram(&u),
            Some(InboundMessage::Telegram {
                chat_id: 42,
                text: "Pricing?".into()
            })
        );

        let edited = telegram(json!({
            "update_id": 11,
            "edited_message": { "chat": { "id": -7 }, "text": "Pricing, please" }
        }));
        assert_eq!(extract_telegram(&edited).map(|m| m.channel()), Some(Channel::Telegram));
    }

    #[test]
    fn telegram_without_text_is_ignored() {
        let sticker = telegram(json!({
            "update_id": 12,
            "message": { "chat": { "id": 42 }, "sticker": { "file_id": "abc" } }
        }));
        assert_eq!(extract_telegram(&sticker), None);
        assert_eq!(extract_telegram(&telegram(json!({ "update_id": 13 }))), None);
    }

    #[test]
    fn reply_envelopes_have_channel_shapes() {
        let web = InboundMessage::Website { text: "q".into() };
        assert_eq!(
            serde_json::to_value(web.into_reply("ok".into())).unwrap(),
            json!({ "reply": "ok" })
        );

        let fb = InboundMessage::Messenger {
            sender_id: "222".into(),
            text: "q".into(),
        };
        assert_eq!(
            serde_json::to_value(fb.into_reply("ok".into())).unwrap(),
            json!({ "recipient": { "id": "222" }, "message": { "text": "ok" } })
        );

        let tg = InboundMessage::Telegram {
            chat_id: 42,
            text: "q".into(),
        };
        assert_eq!(
            serde_json::to_value(tg.into_reply("ok".into())).unwrap(),
            json!({ "method": "sendMessage", "chat_id": 42, "text": "ok" })
        );
    }
}
