use crate::ffmpeg::{Ffmpeg, FfmpegProcess};
use crate::prelude::*;
use crate::trim::{TrimPlan, TRIM_SECONDS};
use async_trait::async_trait;
use clap::Parser;

/// Cut the first seconds off a local video file, the same way the bot does
///
/// Useful to check that ffmpeg on this machine can handle the videos
/// without going through Telegram.
#[derive(Parser, Debug)]
pub struct Trim {
    /// Path to the input video file
    input: Utf8PathBuf,

    /// Path to the output. By default, the output will be put into the same
    /// directory under the name `{input_stem}-trimmed.mp4`.
    output: Option<Utf8PathBuf>,
}

#[async_trait]
impl crate::cmd::Cmd for Trim {
    async fn run(self) -> Result {
        let output = self.out_file()?;
        let ffmpeg = FfmpegProcess;

        let duration = ffmpeg.probe_duration(&self.input).await?;

        let Some(plan) = TrimPlan::new(duration) else {
            bail!(
                "The video is too short to trim ({duration:.1?}). \
                It must be longer than {TRIM_SECONDS} seconds."
            );
        };

        plan.encode(&ffmpeg, &self.input, &output).await?;

        let out_file = nu_ansi_term::Color::Magenta.bold().paint(output.as_str());

        info!("🔥 Saved output at {out_file}");

        Ok(())
    }
}

impl Trim {
    fn out_file(&self) -> Result<Utf8PathBuf> {
        if let Some(output) = &self.output {
            return Ok(output.clone());
        }

        let input = &self.input;

        let file_name = input
            .file_stem()
            .with_context(|| format!("Input must have a file name, but got `{input}`"))?;

        Ok(input.with_file_name(format!("{file_name}-trimmed.mp4")))
    }
}
