use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use heckler::commands::{
    default_handler_table, run_reload_loop, CommandContext, CommandWatcher, DeployReport,
    Deployer, DiscordRegistrar, Dispatcher, SharedRegistry,
};
use heckler::core::config::{self, Config};
use heckler::discord::{SerenityCommandEvent, SerenityMessage};
use heckler::features::{MessageStore, ResponseStore};

struct Handler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let bot_id = ctx.cache.current_user_id().0;
        let event = SerenityMessage::new(&ctx, &msg);
        self.dispatcher.handle_message(&event, bot_id).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 Ready! Logged in as {}", ready.user.tag());
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                let event = SerenityCommandEvent::new(&ctx, &command);
                self.dispatcher.dispatch_command(&event).await;
            }
            other => {
                debug!("Ignoring {:?} interaction", other.kind());
            }
        }
    }
}

/// Log a startup failure and exit with status 1
fn fatal(message: &str, err: anyhow::Error) -> ! {
    error!("❌ {message}: {err:#}");
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let env = env_logger::Env::default().default_filter_or(config::log_level());
    env_logger::Builder::from_env(env).init();

    info!("Starting heckler...");

    let config = Config::from_env().unwrap_or_else(|e| fatal("Invalid configuration", e));

    let responses = ResponseStore::open(config.responses_path())
        .await
        .unwrap_or_else(|e| fatal("Could not open the response lists", e));
    let messages = MessageStore::open(config.messages_path())
        .await
        .unwrap_or_else(|e| fatal("Could not open the saved messages", e));
    info!("💾 Data directory: {}", config.data_dir.display());

    let context = Arc::new(CommandContext::new(
        Arc::new(responses),
        Arc::new(messages),
        config.owner_id,
    ));
    if config.owner_id.is_none() {
        warn!("⚠️ OWNER_ID is not set, /add will refuse every user");
    }

    let registry = SharedRegistry::default();
    let dispatcher = Arc::new(Dispatcher::new(
        registry.clone(),
        context,
        config.mention_policy.clone(),
    ));

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .application_id(config.application_id)
        .event_handler(Handler { dispatcher })
        .await
        .unwrap_or_else(|e| fatal("Failed to create Discord client", e.into()));

    let registrar = Arc::new(DiscordRegistrar::new(client.cache_and_http.http.clone()));
    let deployer = Arc::new(Deployer::new(
        config.commands_dir.clone(),
        Arc::new(default_handler_table()),
        registry,
        registrar,
    ));

    if let DeployReport::LoadFailed(reason) = deployer.deploy().await {
        fatal(
            "Could not load commands",
            anyhow::anyhow!("{}: {reason}", config.commands_dir.display()),
        );
    }

    // Held for the life of the process; dropping it stops the poller
    let _watcher = if config.watch_commands {
        match CommandWatcher::start(&config.commands_dir, config.watch_interval) {
            Ok((watcher, events)) => {
                tokio::spawn(run_reload_loop(events, Arc::clone(&deployer)));
                Some(watcher)
            }
            Err(e) => {
                error!("❌ Failed to watch {}: {e}", config.commands_dir.display());
                None
            }
        }
    } else {
        info!("👀 Command hot reload disabled");
        None
    };

    info!("Connecting to Discord gateway...");
    if let Err(why) = client.start().await {
        fatal("Client error", why.into());
    }

    Ok(())
}
