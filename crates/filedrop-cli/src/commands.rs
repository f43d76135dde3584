use anyhow::Context;
use chrono::{DateTime, Utc};
use colored::Colorize;
use filedrop_server::{FiledropServer, ServerConfig};
use filedrop_store::{BlobStore, StoredBlob};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Ls(args) => cmd_ls(args).await,
        Command::Config(args) => cmd_config(args),
    }
}

/// Defaults, then the config file, then the environment, then flags.
fn resolve_config(source: &ConfigSource) -> anyhow::Result<ServerConfig> {
    let mut config = ServerConfig::load(source.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(root) = &source.root {
        config.storage_root = root.clone();
    }
    Ok(config)
}

fn apply_serve_flags(config: &mut ServerConfig, args: &ServeArgs) {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(url) = &args.public_url {
        config.public_base_url = Some(url.clone());
    }
    if let Some(size) = args.max_upload_size {
        config.max_upload_size = size;
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = resolve_config(&args.source)?;
    apply_serve_flags(&mut config, &args);
    config.validate()?;
    info!(
        bind = %config.bind_addr,
        root = %config.storage_root.display(),
        public_base_url = config.public_base_url.as_deref().unwrap_or("<from Host header>"),
        "starting filedrop"
    );

    FiledropServer::new(config)
        .serve()
        .await
        .context("server terminated with an error")
}

async fn cmd_ls(args: LsArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.source)?;
    let store = BlobStore::new(config.storage_root);
    let blobs = if store.root().is_dir() {
        store
            .list()
            .await
            .with_context(|| format!("failed to list {}", store.root().display()))?
    } else {
        debug!(root = %store.root().display(), "storage root does not exist yet");
        Vec::new()
    };
    debug!(count = blobs.len(), root = %store.root().display(), "listed stored files");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing_json(&blobs)?)?),
        OutputFormat::Text => print!("{}", listing_text(&blobs)),
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.source)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// A stored file plus the fields decoded from its name.
#[derive(Serialize)]
struct ListingEntry<'a> {
    #[serde(flatten)]
    blob: &'a StoredBlob,
    original_name: Option<&'a str>,
    uploaded_at: Option<DateTime<Utc>>,
}

fn listing_json(blobs: &[StoredBlob]) -> serde_json::Result<serde_json::Value> {
    let entries: Vec<ListingEntry<'_>> = blobs
        .iter()
        .map(|blob| ListingEntry {
            blob,
            original_name: blob.original_name(),
            uploaded_at: blob.uploaded_at(),
        })
        .collect();
    serde_json::to_value(entries)
}

fn listing_text(blobs: &[StoredBlob]) -> String {
    if blobs.is_empty() {
        return "No files stored.\n".into();
    }
    let total: u64 = blobs.iter().map(|b| b.size).sum();
    let mut out = String::new();
    for blob in blobs {
        let when = blob
            .uploaded_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{:>10}  {}  {}\n",
            blob.size,
            when.dimmed(),
            blob.filename.yellow()
        ));
    }
    out.push_str(&format!("{} files, {} bytes\n", blobs.len().to_string().bold(), total));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn blob(filename: &str, size: u64) -> StoredBlob {
        StoredBlob { filename: filename.into(), size, modified: None }
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::parse_from([
            "filedrop",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--public-url",
            "https://drop.example.com",
        ]);
        let Command::Serve(args) = cli.command else { panic!("expected serve") };
        let mut config = ServerConfig::default();
        apply_serve_flags(&mut config, &args);
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.public_base_url.as_deref(), Some("https://drop.example.com"));
        assert_eq!(config.max_upload_size, ServerConfig::default().max_upload_size);
    }

    #[test]
    fn text_listing() {
        colored::control::set_override(false);
        let text = listing_text(&[blob("0-a.txt", 3), blob("manual.bin", 7)]);
        assert!(text.contains("1970-01-01 00:00:00  0-a.txt"));
        assert!(text.contains("-  manual.bin"));
        assert!(text.ends_with("2 files, 10 bytes\n"));
        assert_eq!(listing_text(&[]), "No files stored.\n");
    }

    #[test]
    fn json_listing() {
        let value = listing_json(&[blob("1700000000000-a.txt", 3)]).unwrap();
        assert_eq!(value[0]["filename"], "1700000000000-a.txt");
        assert_eq!(value[0]["original_name"], "a.txt");
        assert_eq!(value[0]["size"], 3);
        assert!(value[0]["modified"].is_null());
        assert!(value[0]["uploaded_at"].as_str().unwrap().starts_with("2023-11-14"));
    }

    #[test]
    fn root_flag_overrides_storage_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = ConfigSource { config: None, root: Some(dir.path().to_path_buf()) };
        let config = resolve_config(&source).unwrap();
        assert_eq!(config.storage_root, dir.path());
    }
}
