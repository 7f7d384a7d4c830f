mod commands;
mod reader;
mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use byteblog_config::Config;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "byteblog", version, about = "Read and manage ByteAndBlog content")]
struct Cli {
    /// Config file to use instead of ~/.config/byteblog/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Html,
    Json,
    Text,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse content from a file (or stdin) and print it
    Render {
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
        /// Let markup in paragraph text through unescaped
        #[arg(long)]
        trusted: bool,
    },
    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Subcommands that talk to the API or serve on its behalf.
#[derive(Debug, Subcommand)]
pub enum RemoteCommand {
    /// List blog posts
    Posts {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Fetch one post and render its body
    Post {
        id: i64,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List portfolio items
    Portfolio {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Top headlines
    News {
        #[arg(long, default_value = "technology")]
        category: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Comments on a post
    Comments { post_id: i64 },
    /// Dashboard totals
    Stats,
    /// Sign in and remember the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BYTEBLOG_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Fetch the full profile from the API
        #[arg(long)]
        refresh: bool,
    },
    /// Browse posts in a full-screen reader
    Read {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Run the image proxy
    ServeProxy {
        #[arg(long)]
        bind: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_path(path)?
                .with_context(|| format!("Config file not found: {}", path.display()))?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => Config::load_or_default()?,
    };

    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    log::debug!("Using API at {}", config.api_url);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    commands::run(cli.command, &config).await
}
