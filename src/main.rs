use std::path::PathBuf;
use std::process;

use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;

use flat_sync::config::SyncConfig;
use flat_sync::sync::Syncer;

#[derive(Parser)]
#[command(version, about = "Downloads new daily flat files from an S3 bucket", long_about = None)]
struct Cli {
    /// Local directory holding previously downloaded flat files.
    dir: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase debug level (use -d for debug, -dd for trace, etc.)")]
    debug: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    dotenv().ok();

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("error: {:#}", e);
            process::exit(1);
        }
    };

    let store = match config.build_store() {
        Ok(store) => store,
        Err(e) => {
            log::error!("error: {:#}", e);
            process::exit(1);
        }
    };

    let syncer = Syncer::new(store, &config.prefix, cli.dir);
    match syncer.run().await {
        Ok(count) => println!("Total files downloaded: {}", count),
        Err(e) => {
            log::error!("error: {:#}", e);
            process::exit(1);
        }
    }
}
