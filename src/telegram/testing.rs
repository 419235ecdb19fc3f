use super::Transport;
use crate::prelude::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use teloxide::types::{ChatId, MessageId};

/// Contents of every file the fake "downloads"
pub(crate) const SOURCE_BYTES: &[u8] = b"source video";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SendText {
        chat: ChatId,
        reply_to: Option<MessageId>,
        text: String,
    },
    EditText {
        chat: ChatId,
        message: MessageId,
        text: String,
    },
    DeleteMessage {
        chat: ChatId,
        message: MessageId,
    },
    Download {
        file_id: String,
    },
    SendVideo {
        chat: ChatId,
        caption: String,
        /// Whether the file was present on disk at the time of the upload
        existed: bool,
    },
}

/// Records the calls and fails on demand
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    log: Mutex<Vec<Call>>,
    next_message_id: AtomicI32,
    fail_download: Option<&'static str>,
    fail_send_text: Option<&'static str>,
    fail_send_video: Option<&'static str>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(100),
            ..Default::default()
        }
    }

    pub(crate) fn failing_download(mut self, err: &'static str) -> Self {
        self.fail_download = Some(err);
        self
    }

    pub(crate) fn failing_send_text(mut self, err: &'static str) -> Self {
        self.fail_send_text = Some(err);
        self
    }

    pub(crate) fn failing_send_video(mut self, err: &'static str) -> Self {
        self.fail_send_video = Some(err);
        self
    }

    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn render_log(&self) -> String {
        self.calls().iter().map(render_call).join("\n")
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

fn render_call(call: &Call) -> String {
    match call {
        Call::SendText {
            chat,
            reply_to,
            text,
        } => {
            let reply_to = reply_to.map_or_else(|| "-".to_owned(), |id| id.0.to_string());
            format!("send_text chat={} reply_to={reply_to}\n{}", chat.0, indent(text))
        }
        Call::EditText {
            chat,
            message,
            text,
        } => format!(
            "edit_text chat={} message={}\n{}",
            chat.0,
            message.0,
            indent(text)
        ),
        Call::DeleteMessage { chat, message } => {
            format!("delete_message chat={} message={}", chat.0, message.0)
        }
        Call::Download { file_id } => format!("download file={file_id}"),
        Call::SendVideo {
            chat,
            caption,
            existed,
        } => format!("send_video chat={} caption={caption:?} existed={existed}", chat.0),
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .join("\n")
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send_text(
        &self,
        chat: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> Result<MessageId> {
        self.record(Call::SendText {
            chat,
            reply_to,
            text: text.to_owned(),
        });

        if let Some(err) = self.fail_send_text {
            bail!("{err}");
        }

        Ok(MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn edit_text(&self, chat: ChatId, message: MessageId, text: &str) -> Result {
        self.record(Call::EditText {
            chat,
            message,
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result {
        self.record(Call::DeleteMessage { chat, message });
        Ok(())
    }

    async fn download(&self, file_id: &str, dest: &Utf8Path) -> Result<u64> {
        self.record(Call::Download {
            file_id: file_id.to_owned(),
        });

        if let Some(err) = self.fail_download {
            bail!("{err}");
        }

        fs::write(dest, SOURCE_BYTES).await?;

        Ok(SOURCE_BYTES.len() as u64)
    }

    async fn send_video(&self, chat: ChatId, video: &Utf8Path, caption: &str) -> Result {
        self.record(Call::SendVideo {
            chat,
            caption: caption.to_owned(),
            existed: video.exists(),
        });

        if let Some(err) = self.fail_send_video {
            bail!("{err}");
        }

        Ok(())
    }
}
