//! Command-line driver for the web3 bridge.
//!
//! Builds the alloy-backed native module from configuration, wraps it in a
//! [`Web3Client`] and runs one operation, printing the result as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use web3_bridge::config::{load_config, BridgeConfig};
use web3_bridge::observability::init_logging;
use web3_bridge::{AlloyModule, Web3Client};

#[derive(Parser)]
#[command(name = "web3-bridge")]
#[command(about = "Wallet and balance operations against an Ethereum node", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node endpoint; the configured default is used when omitted.
    #[arg(short, long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the node and print its client version
    Init,
    /// List wallets in the keystore directory
    Wallets,
    /// Create a new password-protected wallet
    CreateWallet {
        #[arg(long, env = "WEB3_BRIDGE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Query the balance of an address
    Balance {
        address: String,
        /// Denomination (wei, gwei, ether, ...)
        #[arg(short, long)]
        unit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::info!(
        data_dir = %config.native.data_dir.display(),
        default_rpc_url = %config.native.default_rpc_url,
        "Configuration loaded"
    );

    let client = Web3Client::new(AlloyModule::new(config.native)?);
    let rpc_url = cli.rpc_url.as_deref();

    match cli.command {
        Commands::Init => {
            let version = client.init_client(rpc_url).await?;
            print_json(&version)?;
        }
        Commands::Wallets => {
            let wallets = client.list_wallets().await?;
            print_json(&wallets)?;
        }
        Commands::CreateWallet { password } => {
            let wallet = client.create_wallet(&password).await?;
            print_json(&wallet)?;
        }
        Commands::Balance { address, unit } => {
            client.init_client(rpc_url).await?;
            let balance = client.get_balance(&address, unit.as_deref()).await?;
            print_json(&balance)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
