use super::Transport;
use crate::prelude::*;
use crate::trim::{Intake, VideoRequest, TRIM_SECONDS};
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub(crate) enum Command {
    #[command(description = "explain what this bot does.")]
    Start,
    #[command(description = "explain what this bot does.")]
    Help,
}

/// Routes commands and videos, everything else is ignored.
pub(crate) fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| VideoRequest::from_message(&msg))
                .endpoint(handle_video),
        )
}

async fn handle_command(transport: Arc<dyn Transport>, msg: Message, cmd: Command) -> Result {
    debug!(?cmd, chat = %msg.chat.id, "Received a command");
    reply_help(&*transport, msg.chat.id, msg.id).await
}

async fn handle_video(intake: Arc<Intake>, request: VideoRequest) -> Result {
    info!(chat = %request.chat, file = %request.file_unique_id, "Received a video");

    // The task is detached, the receive loop never waits for it
    intake.spawn(request);

    Ok(())
}

pub(crate) async fn reply_help(
    transport: &dyn Transport,
    chat: ChatId,
    reply_to: MessageId,
) -> Result {
    transport.send_text(chat, Some(reply_to), &help_text()).await?;

    Ok(())
}

fn help_text() -> String {
    format!(
        "Hello! I am the Lecture Trimmer Bot. 🚀\n\n\
        Send me any video, and I will cut the first {TRIM_SECONDS} seconds \
        from it and send it back.\n\n\
        Please note: Telegram bots have a 20MB file size limit for processing."
    )
}
