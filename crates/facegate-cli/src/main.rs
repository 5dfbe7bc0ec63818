use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facegate_client::HttpBackend;
use facegate_core::Backend;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

#[derive(Parser)]
#[command(name = "facegate", about = "Face-recognition kiosk client")]
struct Cli {
    /// Recognition server URL (overrides FACEGATE_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive kiosk (default)
    Kiosk,
    /// Ask the server to recognize the face in front of the camera
    Recognize,
    /// Register the face in front of the camera
    Register {
        /// Name to register the face under
        name: String,
    },
    /// Ask the server to release the camera
    StopCamera,
    /// Print a fresh live-stream URL
    FeedUrl,
    /// Print the resolved configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the kiosk display.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = config::Config::from_env();
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    match cli.command.unwrap_or(Commands::Kiosk) {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Kiosk => {
            let backend = connect(&config)?;
            terminal::run(backend, config.kiosk_settings()).await?;
        }
        Commands::Recognize => {
            let result = connect(&config)?
                .recognize()
                .await
                .context("recognize request failed")?;
            match (result.success, result.name) {
                (true, name) => {
                    let name = name.unwrap_or_default();
                    match result.confidence {
                        Some(c) => println!("Recognized {name} (confidence {c:.2})"),
                        None => println!("Recognized {name}"),
                    }
                }
                (false, _) => println!(
                    "Not recognized: {}",
                    result.message.as_deref().unwrap_or("no match")
                ),
            }
        }
        Commands::Register { name } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("name must not be empty");
            }
            let result = connect(&config)?
                .register(name)
                .await
                .context("register request failed")?;
            if result.success {
                println!("Registered {name}");
            } else {
                println!(
                    "Registration failed: {}",
                    result.message.as_deref().unwrap_or("no reason given")
                );
            }
        }
        Commands::StopCamera => {
            connect(&config)?
                .stop_camera()
                .await
                .context("stop_camera request failed")?;
            println!("Camera released");
        }
        Commands::FeedUrl => {
            let backend = connect(&config)?;
            println!("{}", backend.feed_url(chrono::Utc::now().timestamp_millis()));
        }
    }

    Ok(())
}

fn connect(config: &config::Config) -> Result<HttpBackend> {
    let backend = HttpBackend::new(&config.server_url, config.request_timeout())
        .with_context(|| format!("cannot use server url {}", config.server_url))?;
    tracing::info!(server = %backend.base_url(), "using recognition server");
    Ok(backend)
}
