use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "votechain",
    about = "Append-only, hash-linked vote ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the vote chain HTTP server
    Serve(ServeArgs),
    /// Derive the hash of an entry from its fields
    Hash(HashArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML file with `host` and `port`
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Listening port (default 9000)
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Listening address (default 0.0.0.0)
    #[arg(long)]
    pub host: Option<IpAddr>,
}

#[derive(Args)]
pub struct HashArgs {
    #[arg(long)]
    pub index: u64,
    /// RFC 3339 timestamp; normalized to the canonical UTC form before hashing
    #[arg(long)]
    pub timestamp: String,
    #[arg(long, default_value = "")]
    pub value: String,
    /// Previous entry hash; omit for genesis
    #[arg(long)]
    pub prev_hash: Option<String>,
}
