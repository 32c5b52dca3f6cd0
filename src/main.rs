use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::{broadcast, mpsc};

use relay_bot::application::autoreply::AutoReplyClassifier;
use relay_bot::application::errors::{BotError, ConfigError};
use relay_bot::application::messaging::MessageDispatcher;
use relay_bot::application::services::{CommandService, MessageService, VideoService};
use relay_bot::domain::entities::SenderId;
use relay_bot::domain::traits::OutboundGateway;
use relay_bot::infrastructure::adapters::console::{self, ConsoleGateway};
use relay_bot::infrastructure::api::{self, ApiState};
use relay_bot::infrastructure::config::Config;
use relay_bot::infrastructure::fetch::FetchClient;
use relay_bot::infrastructure::hub::NotificationHub;

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Chat relay bot with commands, auto-replies and video link downloads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to start runtime: {}", e);
                    std::process::exit(1);
                }
            };
            let result = rt.block_on(run_bot(load_config(&cli.config)));
            // stdin reads block a worker thread until the next line; don't wait on them
            rt.shutdown_timeout(Duration::from_secs(1));
            if let Err(e) = result {
                tracing::error!("Bot stopped with error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("relay-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config() {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_config(path: &str) -> Config {
    if !std::path::Path::new(path).exists() {
        return Config::load_env();
    }

    match Config::load(path) {
        Ok(mut config) => {
            config.apply_env();
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        }
    }
}

async fn run_bot(config: Config) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);

    let console_sender = SenderId::parse(&config.bot.console_sender)
        .map_err(|e| ConfigError::InvalidValue(format!("bot.console-sender: {}", e)))?;

    let gateway: Arc<dyn OutboundGateway> = Arc::new(ConsoleGateway::new());

    let mut commands = CommandService::new();
    commands.register_defaults();
    let registry = commands.build();
    tracing::info!("Registered {} commands", registry.len());

    let mut dispatcher = MessageDispatcher::new(registry, AutoReplyClassifier::new(config.video.enabled));
    if config.video.enabled {
        let fetcher = FetchClient::new(config.video.clone())?;
        tracing::info!("Video downloads enabled, temp dir {}", fetcher.temp_dir().display());
        let videos = VideoService::new(fetcher, Arc::clone(&gateway), config.video.cleanup_after_send);
        dispatcher = dispatcher.with_video_service(Arc::new(videos));
    }

    let (hub, _hub_task) = NotificationHub::spawn(config.hub.observer_buffer);
    let service = Arc::new(
        MessageService::new(Arc::new(dispatcher), Arc::clone(&gateway), hub.clone())
            .with_instance_user_id(config.bot.instance_user_id.clone()),
    );

    let (shutdown_tx, mut stop_requested) = broadcast::channel::<()>(1);

    let api_task = if config.api.enabled {
        let state = ApiState::new(
            Arc::clone(&gateway),
            hub.clone(),
            &config.api,
            config.video.temp_dir.clone(),
            shutdown_tx.clone(),
        )?
        .with_instance_user_id(config.bot.instance_user_id.clone());
        let addr = config.api.addr.clone();
        let shutdown = shutdown_tx.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = api::serve(&addr, state, shutdown).await {
                tracing::error!("Control API failed: {}", e);
            }
        }))
    } else {
        None
    };

    let (tx, mut inbound) = mpsc::channel(64);
    tokio::spawn(console::read_stdin(console_sender, tx));
    tracing::info!("Bot running, type messages below (Ctrl+C to stop)");

    let mut inbound_open = true;
    loop {
        tokio::select! {
            message = inbound.recv(), if inbound_open => match message {
                Some(message) => {
                    let service = Arc::clone(&service);
                    tokio::spawn(async move {
                        if let Err(e) = service.handle(message).await {
                            tracing::warn!("Message handling failed: {}", e);
                        }
                    });
                }
                None => {
                    inbound_open = false;
                    if api_task.is_none() {
                        break;
                    }
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received");
                break;
            }
            _ = stop_requested.recv() => {
                tracing::info!("Stop requested");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(());
    if let Some(task) = api_task {
        let _ = task.await;
    }

    tracing::info!("Bot stopped");
    Ok(())
}

fn init_config() -> Result<(), ConfigError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
