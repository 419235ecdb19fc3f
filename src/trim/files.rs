use super::VideoRequest;
use crate::prelude::*;
use std::io;

/// Temporary files owned by a single task. They are removed when this value
/// is dropped, so they can't outlive the task even if it panics.
#[derive(Debug)]
pub(crate) struct TaskFiles {
    source: Utf8PathBuf,
    trimmed: Utf8PathBuf,
}

impl TaskFiles {
    /// The names are unique per request, so concurrent tasks never touch
    /// each other's files.
    pub(crate) fn new(work_dir: &Utf8Path, request: &VideoRequest) -> Self {
        let key = file_key(request);

        Self {
            source: work_dir.join(format!("source_{key}.mp4")),
            trimmed: work_dir.join(format!("trimmed_{key}.mp4")),
        }
    }

    pub(crate) fn source(&self) -> &Utf8Path {
        &self.source
    }

    pub(crate) fn trimmed(&self) -> &Utf8Path {
        &self.trimmed
    }

    /// Removes whichever of the files exist. Calling it again is a no-op.
    pub(crate) async fn remove(&self) {
        for path in [&self.source, &self.trimmed] {
            log_removal(path, fs::remove_file(path).await);
        }
    }

    /// Blocking version of [`Self::remove`] for `Drop`
    fn remove_blocking(&self) {
        for path in [&self.source, &self.trimmed] {
            log_removal(path, fs_err::remove_file(path));
        }
    }
}

fn log_removal(path: &Utf8Path, result: io::Result<()>) {
    match result {
        Ok(()) => debug!(%path, "Removed temporary file"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            err = &err as &dyn std::error::Error,
            "Failed to remove temporary file"
        ),
    }
}

impl Drop for TaskFiles {
    fn drop(&mut self) {
        self.remove_blocking();
    }
}

fn file_key(request: &VideoRequest) -> String {
    // Telegram file ids are url-safe base64, but be strict about what lands
    // in a file name anyway
    let file: String = request
        .file_unique_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();

    format!("{}_{}_{file}", request.chat.0, request.message.0)
}
