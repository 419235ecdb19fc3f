mod handlers;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

use crate::prelude::*;
use async_trait::async_trait;
use std::fmt;
use teloxide::types::{ChatId, MessageId};

pub(crate) use handlers::schema;
pub(crate) use transport::TelegramTransport;

/// The subset of the Bot API the bot relies on. It's passed around explicitly
/// so that tests can record the calls instead of talking to Telegram.
#[async_trait]
pub(crate) trait Transport: fmt::Debug + Send + Sync {
    /// Sends a text message, optionally as a reply to another message.
    async fn send_text(
        &self,
        chat: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> Result<MessageId>;

    async fn edit_text(&self, chat: ChatId, message: MessageId, text: &str) -> Result;

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result;

    /// Resolves the file by its id and writes its contents to `dest`.
    /// Returns the number of bytes written.
    async fn download(&self, file_id: &str, dest: &Utf8Path) -> Result<u64>;

    async fn send_video(&self, chat: ChatId, video: &Utf8Path, caption: &str) -> Result;
}
