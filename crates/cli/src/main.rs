mod config_commands;
mod place_commands;
mod playlist_commands;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "shelve", about = "Resolve catalog URLs and file them into library playlists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom config directory (overrides default ~/.config/shelve/).
    #[arg(long, global = true, env = "SHELVE_CONFIG_DIR")]
    config_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL and print the catalog descriptor as JSON.
    Resolve { url: String },
    /// Resolve a URL and add the item to a library playlist.
    Place {
        url: String,
        /// Playlist to add to; must exist. Defaults to the configured playlist.
        #[arg(short, long)]
        playlist: Option<String>,
        /// Local audio file for the item, when already downloaded.
        #[arg(short, long)]
        file: Option<std::path::PathBuf>,
    },
    /// Library playlist management.
    Playlist {
        #[command(subcommand)]
        action: playlist_commands::PlaylistAction,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
    /// Print the version.
    Version,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for command output.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "shelve starting");

    if let Some(ref dir) = cli.config_dir {
        shelve_config::set_config_dir(dir.clone());
    }

    match cli.command {
        Commands::Resolve { url } => place_commands::handle_resolve(&url).await,
        Commands::Place {
            url,
            playlist,
            file,
        } => place_commands::handle_place(&url, playlist.as_deref(), file.as_deref()).await,
        Commands::Playlist { action } => playlist_commands::handle_playlist(action).await,
        Commands::Config { action } => config_commands::handle_config(action),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        },
    }
}
