use clap::Parser;
use memory_card_cli::{Command, Runner};
use std::fmt::Debug;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Card name (resolved inside the card directory)
    #[arg(
        short,
        long,
        env = "MEMORY_CARD_NAME",
        default_value = "default",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    name: String,
    /// Card directory (default: <config dir>/memory-card)
    #[arg(long, env = "MEMORY_CARD_DIR")]
    dir: Option<PathBuf>,
    /// Debug print
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(Runner::new(args.name, args.dir, args.debug).await?.run(args.command).await?)
}
