use super::TRIM_SECONDS;
use crate::prelude::*;
use crate::telegram::Transport;
use teloxide::types::{ChatId, MessageId};

/// Progress of a single task as shown to the user
#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Stage {
    Created,
    Downloading,
    Trimming,
    Uploading,
    Done,
    TooShort,
    Failed,
}

impl Stage {
    fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::TooShort | Self::Failed)
    }

    fn can_advance_to(self, next: Self) -> bool {
        use Stage::*;

        if next == Failed {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Created, Downloading)
                | (Downloading, Trimming)
                | (Trimming, Uploading)
                | (Trimming, TooShort)
                | (Uploading, Done)
        )
    }

    fn render(self) -> Render {
        match self {
            Self::Created => Render::Keep,
            Self::Downloading => {
                Render::Show("Video received! Preparing to process... ⏳".to_owned())
            }
            Self::Trimming => {
                Render::Show("Download complete. Trimming the video... ✂️".to_owned())
            }
            Self::Uploading => Render::Show("Processing complete! Uploading... 🚀".to_owned()),
            Self::TooShort => Render::Show(format!(
                "Video is too short to trim! It must be longer than {TRIM_SECONDS} seconds."
            )),
            Self::Done => Render::Delete,
            // The error is reported with a separate reply
            Self::Failed => Render::Keep,
        }
    }
}

enum Render {
    Show(String),
    Delete,
    Keep,
}

/// The single message that is edited in place while the task progresses.
/// It's posted as a reply to the video on the first transition.
pub(crate) struct StatusMessage<'a> {
    transport: &'a dyn Transport,
    chat: ChatId,
    reply_to: MessageId,
    id: Option<MessageId>,
    stage: Stage,
}

impl<'a> StatusMessage<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, chat: ChatId, reply_to: MessageId) -> Self {
        Self {
            transport,
            chat,
            reply_to,
            id: None,
            stage: Stage::Created,
        }
    }

    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) async fn advance(&mut self, next: Stage) -> Result {
        if !self.stage.can_advance_to(next) {
            bail!("BUG: invalid status transition {} -> {next}", self.stage);
        }

        debug!(from = %self.stage, to = %next, "Status transition");

        self.stage = next;

        match (next.render(), self.id) {
            (Render::Show(text), None) => {
                let id = self
                    .transport
                    .send_text(self.chat, Some(self.reply_to), &text)
                    .await?;
                self.id = Some(id);
            }
            (Render::Show(text), Some(id)) => {
                self.transport.edit_text(self.chat, id, &text).await?;
            }
            (Render::Delete, Some(id)) => {
                self.transport.delete_message(self.chat, id).await?;
                self.id = None;
            }
            (Render::Delete, None) | (Render::Keep, _) => {}
        }

        Ok(())
    }

    /// Marks the task as failed unless it has already finished
    pub(crate) fn fail(&mut self) {
        if !self.stage.is_terminal() {
            debug!(from = %self.stage, "Status transition to failed");
            self.stage = Stage::Failed;
        }
    }
}
