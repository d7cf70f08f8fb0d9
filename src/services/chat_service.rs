use chrono::Utc;
use validator::Validate;

use crate::{
    constants::defaults::simulated_chat_reply,
    errors::{AppError, AppResult},
    models::dto::{
        request::ChatRequest,
        response::{ChatExchange, ChatMessage, ChatSender},
    },
};

/// Study assistant chat. Replies come from a fixed template; nothing is stored.
#[derive(Default)]
pub struct ChatService;

impl ChatService {
    pub fn new() -> Self {
        Self
    }

    pub fn reply(&self, request: ChatRequest) -> AppResult<ChatExchange> {
        request.validate()?;
        let text = request.message.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError("Message must not be blank".to_string()));
        }

        let now = Utc::now();
        log::debug!("Answering a chat message of {} characters", text.chars().count());
        Ok(ChatExchange {
            reply: ChatMessage {
                sender: ChatSender::Assistant,
                text: simulated_chat_reply(text),
                sent_at: now,
            },
            message: ChatMessage {
                sender: ChatSender::Learner,
                text: text.to_string(),
                sent_at: now,
            },
        })
    }
}
