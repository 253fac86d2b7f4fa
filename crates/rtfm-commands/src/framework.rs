//! Poise framework setup: shared data, prefix options and error routing.

use crate::error_sink::ErrorSink;
use crate::plugins::LoadReport;
use crate::prefix;
use crate::state::BotState;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Shared resources opened at startup.
    pub state: Arc<BotState>,
    /// Sink for errors escaping handlers.
    pub error_sink: ErrorSink,
    /// Outcome of plugin loading.
    pub plugins: Arc<LoadReport>,
    /// When the bot process finished starting.
    pub started_at: Instant,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("state", &self.state)
            .field("plugins", &self.plugins.loaded)
            .field("errors_reported", &self.error_sink.reported())
            .finish()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Command type registered by plugins.
pub type Command = poise::Command<Data, Error>;

/// Framework options for the given plugin commands.
pub fn framework_options(commands: Vec<Command>) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands,
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: None,
            stripped_dynamic_prefix: Some(prefix::strip_dynamic_prefix),
            mention_as_prefix: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Global error handler for the framework.
///
/// Every error is logged through the [`ErrorSink`] and swallowed; nothing is
/// sent back to the user.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    let sink = match &error {
        poise::FrameworkError::EventHandler { framework, .. } => {
            framework.user_data.error_sink.clone()
        }
        other => other
            .ctx()
            .map(|ctx| ctx.data().error_sink.clone())
            .unwrap_or_default(),
    };

    match error {
        poise::FrameworkError::Setup { error, .. } => {
            sink.report("setup", error.as_ref());
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            sink.report(event.snake_case_name(), error.as_ref());
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let context = format!("command '{}'", ctx.command().qualified_name);
            sink.report(&context, error.as_ref());
        }
        poise::FrameworkError::CommandPanic { payload, ctx, .. } => {
            let context = format!("command '{}'", ctx.command().qualified_name);
            let payload = payload.unwrap_or_else(|| "<no payload>".to_string());
            sink.report_message(&context, &format!("panicked: {payload}"));
        }
        poise::FrameworkError::DynamicPrefix { error, msg, .. } => {
            let context = format!("prefix resolution for message {}", msg.id);
            sink.report(&context, error.as_ref());
        }
        poise::FrameworkError::ArgumentParse { error, input, ctx, .. } => {
            warn!(
                "Invalid arguments for '{}' ({:?}): {}",
                ctx.command().qualified_name,
                input,
                error
            );
        }
        other => {
            debug!("Unhandled framework error: {:?}", other);
        }
    }
}

/// Central event handler for Discord events.
///
/// Each event runs under [`ErrorSink::guard`], so a failing or panicking
/// handler is logged and the next event is still processed.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    data.error_sink
        .guard(event.snake_case_name(), handle_event(ctx, event, data))
        .await;
    Ok(())
}

async fn handle_event(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(
                "Logged in as {} ({}) in {} guild(s)",
                data_about_bot.user.name,
                data_about_bot.user.id,
                data_about_bot.guilds.len()
            );
            info!("Ready {:.1?} after startup", data.started_at.elapsed());
        }
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            if is_new.unwrap_or(false) {
                info!("Joined guild: {} (ID: {})", guild.name, guild.id);
            }
        }
        _ => {}
    }
    Ok(())
}
