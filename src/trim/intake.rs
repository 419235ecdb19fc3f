use super::task::{Outcome, TaskContext, TrimTask};
use super::VideoRequest;
use crate::ffmpeg::Ffmpeg;
use crate::prelude::*;
use crate::telegram::Transport;
use buildstructor::buildstructor;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Starts one task per incoming video.
///
/// Without a concurrency limit every video starts processing right away. With
/// the limit, extra tasks are still spawned immediately, but wait for a free
/// slot before doing anything.
#[derive(Debug)]
pub(crate) struct Intake {
    ctx: Arc<TaskContext>,
    limiter: Option<Arc<Semaphore>>,
    next_id: AtomicU64,
}

#[buildstructor]
impl Intake {
    #[builder]
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        ffmpeg: Option<Arc<dyn Ffmpeg>>,
        work_dir: Utf8PathBuf,
        concurrency: Option<NonZeroUsize>,
    ) -> Self {
        let ctx = TaskContext {
            transport,
            ffmpeg: ffmpeg.unwrap_or_else(|| Arc::new(crate::ffmpeg::FfmpegProcess)),
            work_dir,
        };

        Self {
            ctx: Arc::new(ctx),
            limiter: concurrency.map(|limit| Arc::new(Semaphore::new(limit.get()))),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Intake {
    /// Never waits for the task, the returned handle may be dropped.
    pub(crate) fn spawn(&self, request: VideoRequest) -> JoinHandle<Outcome> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let span = info_span!("task", id, chat = request.chat.0);

        let limiter = self.limiter.clone();
        let task = TrimTask::new(self.ctx.clone(), request);

        let task = async move {
            // The semaphore is never closed, so acquiring can't fail
            let _permit = match limiter {
                Some(limiter) => limiter.acquire_owned().await.ok(),
                None => None,
            };

            task.run().await
        };

        tokio::spawn(task.instrument(span))
    }
}
