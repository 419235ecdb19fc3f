use super::Transport;
use crate::prelude::*;
use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ReplyParameters};
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub(crate) struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub(crate) fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(
        &self,
        chat: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> Result<MessageId> {
        let mut request = self.bot.send_message(chat, text);

        if let Some(reply_to) = reply_to {
            request = request.reply_parameters(ReplyParameters::new(reply_to));
        }

        let message = request.await.context("Failed to send a message")?;

        Ok(message.id)
    }

    async fn edit_text(&self, chat: ChatId, message: MessageId, text: &str) -> Result {
        self.bot
            .edit_message_text(chat, message, text)
            .await
            .context("Failed to edit a message")?;

        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result {
        self.bot
            .delete_message(chat, message)
            .await
            .context("Failed to delete a message")?;

        Ok(())
    }

    async fn download(&self, file_id: &str, dest: &Utf8Path) -> Result<u64> {
        // Telegram rejects files bigger than 20 MB already at this step
        let file = self
            .bot
            .get_file(file_id)
            .await
            .context("Failed to get the file info")?;

        let mut output = fs::File::create(dest).await?;

        self.bot
            .download_file(&file.path, &mut output)
            .await
            .context("Failed to download the file")?;

        output.flush().await?;

        Ok(fs::metadata(dest).await?.len())
    }

    async fn send_video(&self, chat: ChatId, video: &Utf8Path, caption: &str) -> Result {
        self.bot
            .send_video(chat, InputFile::file(video.as_std_path().to_owned()))
            .caption(caption)
            .await
            .context("Failed to upload the video")?;

        Ok(())
    }
}
