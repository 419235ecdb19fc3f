use crate::prelude::*;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// The video processing capability. The real implementation shells out to
/// `ffmpeg` and `ffprobe`, tests substitute a mock.
#[async_trait]
pub(crate) trait Ffmpeg: fmt::Debug + Send + Sync {
    /// Total duration of the media container at the given path.
    async fn probe_duration(&self, input: &Utf8Path) -> Result<Duration>;

    /// Invoke ffmpeg process with the given arguments.
    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>>;
}

#[derive(Debug)]
pub(crate) struct FfmpegProcess;

#[async_trait]
impl Ffmpeg for FfmpegProcess {
    async fn probe_duration(&self, input: &Utf8Path) -> Result<Duration> {
        crate::util::cmd::get_media_duration(input).await
    }

    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>> {
        crate::util::cmd::ffmpeg(args).await
    }
}
