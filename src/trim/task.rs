use super::files::TaskFiles;
use super::status::{Stage, StatusMessage};
use super::TrimPlan;
use crate::display;
use crate::ffmpeg::Ffmpeg;
use crate::prelude::*;
use crate::telegram::Transport;
use std::sync::Arc;
use teloxide::types::{ChatId, Message, MessageId};

const CAPTION: &str = "Here is your trimmed video! ✨";

/// A video message the bot was asked to trim
#[derive(Debug, Clone)]
pub(crate) struct VideoRequest {
    pub(crate) chat: ChatId,
    pub(crate) message: MessageId,
    pub(crate) file_id: String,
    pub(crate) file_unique_id: String,
}

impl VideoRequest {
    /// Returns `None` if the message has no video attached
    pub(crate) fn from_message(msg: &Message) -> Option<Self> {
        let video = msg.video()?;

        Some(Self {
            chat: msg.chat.id,
            message: msg.id,
            file_id: video.file.id.to_string(),
            file_unique_id: video.file.unique_id.to_string(),
        })
    }
}

/// Everything the tasks share. None of it is mutable.
#[derive(Debug)]
pub(crate) struct TaskContext {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) ffmpeg: Arc<dyn Ffmpeg>,
    pub(crate) work_dir: Utf8PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Trimmed,
    /// The video wasn't longer than the trimmed part. Not an error.
    TooShort,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum TaskError {
    #[error("{0:#}")]
    Transport(anyhow::Error),

    #[error("{0:#}")]
    Encode(anyhow::Error),
}

pub(crate) struct TrimTask {
    ctx: Arc<TaskContext>,
    request: VideoRequest,
}

impl TrimTask {
    pub(crate) fn new(ctx: Arc<TaskContext>, request: VideoRequest) -> Self {
        Self { ctx, request }
    }

    /// Runs the whole pipeline. Failures are reported to the user and never
    /// escape, temporary files are removed on every path.
    pub(crate) async fn run(self) -> Outcome {
        let start = std::time::Instant::now();

        let files = TaskFiles::new(&self.ctx.work_dir, &self.request);
        let mut status =
            StatusMessage::new(&*self.ctx.transport, self.request.chat, self.request.message);

        let result = self.process(&files, &mut status).await;

        files.remove().await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                status.fail();
                error!(
                    err = &err as &dyn std::error::Error,
                    kind = err.kind(),
                    "Failed to process the video"
                );
                self.notify_failure(&err).await;
                Outcome::Failed
            }
        };

        info!(
            ?outcome,
            stage = %status.stage(),
            "🏁 Task finished in {}",
            display::elapsed(start)
        );

        outcome
    }

    async fn process(
        &self,
        files: &TaskFiles,
        status: &mut StatusMessage<'_>,
    ) -> Result<Outcome, TaskError> {
        let transport = &*self.ctx.transport;

        status
            .advance(Stage::Downloading)
            .await
            .map_err(TaskError::Transport)?;

        let size = transport
            .download(&self.request.file_id, files.source())
            .await
            .map_err(TaskError::Transport)?;

        info!("📥 Downloaded {}", display::human_size(size));

        status
            .advance(Stage::Trimming)
            .await
            .map_err(TaskError::Transport)?;

        let duration = self
            .ctx
            .ffmpeg
            .probe_duration(files.source())
            .await
            .map_err(TaskError::Encode)?;

        let Some(plan) = TrimPlan::new(duration) else {
            info!(?duration, "Video is too short to trim");

            status
                .advance(Stage::TooShort)
                .await
                .map_err(TaskError::Transport)?;

            return Ok(Outcome::TooShort);
        };

        plan.encode(&*self.ctx.ffmpeg, files.source(), files.trimmed())
            .await
            .map_err(TaskError::Encode)?;

        status
            .advance(Stage::Uploading)
            .await
            .map_err(TaskError::Transport)?;

        transport
            .send_video(self.request.chat, files.trimmed(), CAPTION)
            .await
            .map_err(TaskError::Transport)?;

        status
            .advance(Stage::Done)
            .await
            .map_err(TaskError::Transport)?;

        Ok(Outcome::Trimmed)
    }

    /// Best effort. If even this fails, the failure is only logged.
    async fn notify_failure(&self, err: &TaskError) {
        let text =
            format!("Oops! Something went wrong. Please try another video.\n\n(Error: {err})");

        let notified = self
            .ctx
            .transport
            .send_text(self.request.chat, Some(self.request.message), &text)
            .await;

        if let Err(notify_err) = notified {
            warn!(
                original = %err,
                notify_err = format_args!("{notify_err:#}"),
                "Couldn't deliver the error reply to the user"
            );
        }
    }
}

impl TaskError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Encode(_) => "encode",
        }
    }
}
