use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "filedrop",
    about = "filedrop: minimal file upload and download service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the upload server
    Serve(ServeArgs),
    /// List stored files
    Ls(LsArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Settings shared by every command that reads the server configuration.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigSource {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding uploaded files
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: ConfigSource,
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Base URL used in download links instead of the request host
    #[arg(long)]
    pub public_url: Option<String>,
    /// Upload ceiling in bytes for both upload routes
    #[arg(long)]
    pub max_upload_size: Option<usize>,
}

#[derive(Args)]
pub struct LsArgs {
    #[command(flatten)]
    pub source: ConfigSource,
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}
