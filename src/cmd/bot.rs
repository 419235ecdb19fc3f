use crate::config::{self, BotConfig};
use crate::prelude::*;
use crate::telegram::{self, TelegramTransport, Transport};
use crate::trim::Intake;
use async_trait::async_trait;
use clap::Parser;
use std::num::NonZeroUsize;
use std::sync::Arc;
use teloxide::dispatching::Dispatcher;
use teloxide::dptree;

/// Run the Telegram bot that trims the videos it receives
///
/// The bot token is read from the `BOT_TOKEN` environment variable. A `.env`
/// file with it is picked up too.
#[derive(Parser, Debug)]
pub struct Bot {
    /// Directory where the videos are stored while they are processed.
    /// By default, a `tgtrim` directory in the system's temp directory.
    #[clap(long)]
    work_dir: Option<Utf8PathBuf>,

    /// Maximum number of videos processed at the same time.
    /// Unlimited by default.
    #[clap(long)]
    concurrency: Option<NonZeroUsize>,
}

#[async_trait]
impl crate::cmd::Cmd for Bot {
    async fn run(self) -> Result {
        let config = BotConfig::from_env()?;

        let work_dir = match self.work_dir {
            Some(work_dir) => work_dir,
            None => config::default_work_dir()?,
        };

        fs::create_dir_all(&work_dir).await?;

        let bot = teloxide::Bot::new(config.token);

        let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));

        let intake = Intake::builder()
            .transport(transport.clone())
            .work_dir(work_dir.clone())
            .and_concurrency(self.concurrency)
            .build();

        let concurrency = self
            .concurrency
            .map_or_else(|| "unlimited".to_owned(), |limit| limit.to_string());

        info!(%work_dir, %concurrency, "🤖 Bot is starting up...");

        Dispatcher::builder(bot, telegram::schema())
            .dependencies(dptree::deps![Arc::new(intake), transport])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Bot stopped");

        Ok(())
    }
}
