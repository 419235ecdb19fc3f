mod files;
mod intake;
mod status;
mod task;

#[cfg(test)]
mod testing;

use crate::display;
use crate::ffmpeg::Ffmpeg;
use crate::prelude::*;
use crate::util::iter;
use std::time::Duration;

pub(crate) use intake::Intake;
pub(crate) use task::VideoRequest;

/// How much is cut off the start of every video
pub(crate) const TRIM_SECONDS: u64 = 20;
pub(crate) const TRIM_START: Duration = Duration::from_secs(TRIM_SECONDS);

const VIDEO_CODEC: &str = "libx264";
const AUDIO_CODEC: &str = "aac";

/// What is going to be produced from a source video of a known duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrimPlan {
    pub(crate) start: Duration,
    pub(crate) output_duration: Duration,
}

impl TrimPlan {
    /// Returns `None` if the video is too short to trim. A video that lasts
    /// exactly [`TRIM_START`] is too short, because nothing would be left.
    pub(crate) fn new(duration: Duration) -> Option<Self> {
        if duration <= TRIM_START {
            return None;
        }

        Some(Self {
            start: TRIM_START,
            output_duration: duration - TRIM_START,
        })
    }

    fn ffmpeg_args(&self, input: &Utf8Path, output: &Utf8Path) -> Vec<String> {
        // `-ss` goes after the input to make ffmpeg decode and discard the
        // leading frames instead of snapping to the nearest keyframe
        iter::strs(["-y", "-i", input.as_str(), "-ss"])
            .chain([self.start.as_secs_f64().to_string()])
            .chain(iter::strs([
                "-c:v",
                VIDEO_CODEC,
                "-c:a",
                AUDIO_CODEC,
                "-movflags",
                "+faststart",
                output.as_str(),
            ]))
            .collect()
    }

    /// Encodes the part of `input` after [`Self::start`] into `output`.
    #[instrument(skip_all, fields(input = %input))]
    pub(crate) async fn encode(
        &self,
        ffmpeg: &dyn Ffmpeg,
        input: &Utf8Path,
        output: &Utf8Path,
    ) -> Result {
        let start = std::time::Instant::now();

        ffmpeg.run(self.ffmpeg_args(input, output)).await?;

        let size = fs::metadata(output)
            .await
            .context("ffmpeg finished, but didn't produce the output file")?
            .len();

        let duration = format!("{:.1?}", self.output_duration);

        info!(
            "✂️ Trimmed to {} ({}) in {}",
            display::bold(&duration),
            display::human_size(size),
            display::elapsed(start),
        );

        Ok(())
    }
}
