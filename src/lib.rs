mod cmd;
mod config;
mod display;
mod ffmpeg;
mod prelude;
mod telegram;
mod trim;
mod util;

use clap::Parser;
use cmd::Cmd;

/// A Telegram bot that cuts the first seconds off every video it receives
#[derive(Parser, Debug)]
#[command(version)]
enum Args {
    Bot(cmd::Bot),
    Trim(cmd::Trim),
}

pub async fn run() -> anyhow::Result<()> {
    match Args::parse() {
        Args::Bot(cmd) => cmd.run().await,
        Args::Trim(cmd) => cmd.run().await,
    }
}
