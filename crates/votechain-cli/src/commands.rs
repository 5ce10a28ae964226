use anyhow::Context;
use colored::Colorize;
use votechain_crypto::EntryHasher;
use votechain_server::{ServerConfig, VoteServer};
use votechain_types::{EntryHash, Timestamp};

use crate::cli::{Cli, Command, HashArgs, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    tracing::info!("starting votechain on {}", config.bind_addr());

    let server = VoteServer::new(config);
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Config file values, overridden by command-line flags.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    Ok(config)
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    let hash = derive_from_args(&args)?;
    println!("{}", hash.to_hex().bold());
    Ok(())
}

fn derive_from_args(args: &HashArgs) -> anyhow::Result<EntryHash> {
    let timestamp = Timestamp::parse(&args.timestamp).context("invalid --timestamp")?;
    let prev_hash = match args.prev_hash.as_deref() {
        None | Some("") => None,
        Some(hex) => Some(EntryHash::from_hex(hex).context("invalid --prev-hash")?),
    };
    Ok(EntryHasher::derive(
        args.index,
        &timestamp,
        &args.value,
        prev_hash.as_ref(),
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const GENESIS_HASH: &str = "c03b4f5da00468d801978ae5a52c71039d89b8dab4b6b666dcda86a11b757823";

    fn hash_args(index: u64, timestamp: &str, value: &str, prev: Option<&str>) -> HashArgs {
        HashArgs {
            index,
            timestamp: timestamp.into(),
            value: value.into(),
            prev_hash: prev.map(String::from),
        }
    }

    #[test]
    fn derives_genesis_hash() {
        let args = hash_args(0, "2024-01-02T03:04:05.123456789Z", "", None);
        assert_eq!(derive_from_args(&args).unwrap().to_hex(), GENESIS_HASH);
    }

    #[test]
    fn empty_prev_hash_means_genesis() {
        let args = hash_args(0, "2024-01-02T03:04:05.123456789Z", "", Some(""));
        assert_eq!(derive_from_args(&args).unwrap().to_hex(), GENESIS_HASH);
    }

    #[test]
    fn derives_linked_hash() {
        let args = hash_args(1, "2024-01-02T03:04:06Z", "yes", Some(GENESIS_HASH));
        assert_eq!(
            derive_from_args(&args).unwrap().to_hex(),
            "cc9d12c3f888f6863d077904a1cc08b60c18a7f210d78e02967ecc813abd44d0"
        );
    }

    #[test]
    fn bad_inputs_are_errors() {
        assert!(derive_from_args(&hash_args(0, "soon", "", None)).is_err());
        assert!(derive_from_args(&hash_args(1, "2024-01-02T03:04:06Z", "", Some("xyz"))).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"127.0.0.1\"\nport = 7000").unwrap();
        let args = ServeArgs {
            config: Some(file.path().to_path_buf()),
            port: Some(7100),
            host: None,
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.port, 7100);
        assert_eq!(config.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn missing_config_file_is_error() {
        let args = ServeArgs {
            config: Some("/nonexistent/votechain.toml".into()),
            port: None,
            host: None,
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn defaults_without_config() {
        let args = ServeArgs {
            config: None,
            port: None,
            host: None,
        };
        assert_eq!(resolve_config(&args).unwrap(), ServerConfig::default());
    }
}
