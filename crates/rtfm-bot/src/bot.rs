//! Bot wiring: resources, framework and gateway client.

use crate::error::BotResult;
use crate::lifecycle::ResourceLifecycle;
use poise::serenity_prelude as serenity;
use rtfm_commands::{builtin_catalog, framework_options, Data, ErrorSink, PluginCatalog};
use rtfm_config::Config;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Gateway intents the bot connects with.
pub fn gateway_intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// The RTFM bot process.
pub struct RtfmBot {
    config: Arc<Config>,
    catalog: PluginCatalog,
}

impl RtfmBot {
    /// Creates a bot offering the built-in plugins.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            catalog: builtin_catalog(),
        }
    }

    /// Replaces the plugin catalog manifests are resolved against.
    pub fn with_catalog(mut self, catalog: PluginCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Opens every resource, connects to Discord and runs until the gateway
    /// stops. Resources are released on every exit path.
    pub async fn run(self) -> BotResult<()> {
        let lifecycle = Arc::new(ResourceLifecycle::new(self.config.clone()));

        let plugins = match lifecycle.init(&self.catalog).await {
            Ok(plugins) => plugins,
            Err(e) => {
                error!("Startup failed: {}", e);
                lifecycle.teardown().await;
                return Err(e);
            }
        };
        if !plugins.report.is_clean() {
            warn!(
                "{} plugin(s) failed to load, continuing without them",
                plugins.report.failed.len()
            );
        }

        let data = Data {
            state: lifecycle.state().clone(),
            error_sink: ErrorSink::new(),
            plugins: Arc::new(plugins.report),
            started_at: Instant::now(),
        };

        let framework = poise::Framework::builder()
            .options(framework_options(plugins.commands))
            .setup(move |_ctx, ready, _framework| {
                Box::pin(async move {
                    info!("Connected as {}", ready.user.name);
                    Ok(data)
                })
            })
            .build();

        let client = serenity::ClientBuilder::new(&self.config.discord.token, gateway_intents())
            .framework(framework)
            .await;
        let mut client = match client {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create Discord client: {}", e);
                lifecycle.teardown().await;
                return Err(e.into());
            }
        };

        lifecycle.attach_shard_manager(client.shard_manager.clone());

        let signal_lifecycle = lifecycle.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            info!("Received shutdown signal, shutting down gracefully...");
            signal_lifecycle.teardown().await;
        });

        info!("Connecting to Discord...");
        let result = client.start().await;
        if let Err(ref e) = result {
            error!("Client error: {}", e);
        }

        lifecycle.teardown().await;
        result.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_intents_include_message_content() {
        let intents = gateway_intents();
        assert!(intents.contains(serenity::GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(serenity::GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(serenity::GatewayIntents::DIRECT_MESSAGES));
        assert!(!intents.contains(serenity::GatewayIntents::GUILD_PRESENCES));
    }
}
