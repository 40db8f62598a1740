use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{Network, SortOrder, UtxoSort};

#[derive(Parser)]
#[command(name = "bitindex")]
#[command(about = "BitIndex blockchain API client", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the configuration file",
        default_value = "data/config.toml"
    )]
    pub config: PathBuf,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(
        long,
        global = true,
        env = "BITINDEX_API_KEY",
        hide_env_values = true,
        help = "BitIndex API key"
    )]
    pub api_key: Option<String>,
    #[arg(short, long, global = true, help = "Network to query: main, test or stn")]
    pub network: Option<Network>,
    #[arg(long, global = true, help = "Override the API base URL")]
    pub base_url: Option<String>,
    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, global = true, help = "Retries for transient failures")]
    pub max_retries: Option<u32>,
}

pub trait ApplyArgs {
    fn apply_connection(&mut self, args: &ConnectionArgs);
    fn apply_webhook(&mut self, args: &WebhookListenArgs);
}

#[derive(Subcommand)]
pub enum Commands {
    /// Address balances, UTXOs and history
    Address {
        #[command(subcommand)]
        command: AddressCommand,
    },
    /// Fetch or broadcast transactions
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },
    /// Block hashes, headers and blocks
    Block {
        #[command(subcommand)]
        command: BlockCommand,
    },
    /// Chain status
    Chain {
        #[command(subcommand)]
        command: ChainCommand,
    },
    /// Addresses, balance and history of an xpub
    Xpub {
        #[command(subcommand)]
        command: XpubCommand,
    },
    /// Webhook endpoint and monitored addresses
    Webhook {
        #[command(subcommand)]
        command: WebhookCommand,
    },
}

#[derive(Subcommand)]
pub enum AddressCommand {
    /// Show balance and transaction ids of an address
    Info { address: String },
    /// List unspent outputs of an address
    Utxos { address: String },
    /// List transactions of one or more addresses
    Transactions {
        #[arg(required = true, num_args = 1..)]
        addresses: Vec<String>,
        #[arg(long)]
        from_index: Option<u64>,
        #[arg(long)]
        to_index: Option<u64>,
        #[arg(long)]
        after_height: Option<String>,
        #[arg(long)]
        after_block_hash: Option<String>,
        #[arg(long, help = "Include script asm")]
        include_asm: bool,
        #[arg(long, help = "Include raw transaction hex")]
        include_hex: bool,
    },
    /// List unspent outputs of one or more addresses
    UnspentTransactions {
        #[arg(required = true, num_args = 1..)]
        addresses: Vec<String>,
        #[arg(long, help = "Sort as field:order, e.g. value:desc")]
        sort: Option<UtxoSort>,
    },
}

#[derive(Subcommand)]
pub enum TxCommand {
    /// Show a transaction
    Get {
        txid: String,
        #[arg(long, help = "Return the raw hex instead of the decoded transaction")]
        raw: bool,
    },
    /// Broadcast a raw transaction (hex)
    Send { raw_tx: String },
}

#[derive(Subcommand)]
pub enum BlockCommand {
    /// Block hash at a height
    Hash { height: u64 },
    /// Block header by hash
    Header { hash: String },
    /// Block by hash
    Get {
        hash: String,
        #[arg(long, help = "Return the raw block hex")]
        raw: bool,
    },
}

#[derive(Subcommand)]
pub enum ChainCommand {
    Info,
    Difficulty,
    BestBlockHash,
    LastBlockHash,
}

#[derive(Subcommand)]
pub enum XpubCommand {
    /// Next unused receive address, optionally reserving it
    NextAddress {
        xpub: String,
        #[arg(long, help = "Seconds to reserve the address for", default_value_t = 0)]
        reserve_time: u64,
    },
    /// Derived addresses
    Addresses {
        xpub: String,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, help = "asc or desc")]
        order: Option<SortOrder>,
        #[arg(long, help = "Only return this derived address")]
        address: Option<String>,
    },
    /// Total balance
    Balance { xpub: String },
    /// Unspent outputs across derived addresses
    Utxos {
        xpub: String,
        #[arg(long, help = "Sort as field:order, e.g. value:desc")]
        sort: Option<UtxoSort>,
    },
    /// Transaction history
    Transactions { xpub: String },
}

#[derive(Subcommand)]
pub enum WebhookCommand {
    /// Show the registered webhook endpoint
    Config,
    /// Update the registered webhook endpoint
    Update {
        #[arg(long, help = "Callback URL; keeps the current one when omitted")]
        url: Option<String>,
        #[arg(long, help = "Secret echoed back in every callback")]
        secret: Option<String>,
        #[arg(long, help = "Disable callbacks instead of enabling them")]
        disable: bool,
    },
    /// List monitored addresses
    Monitored,
    /// Add addresses to monitor
    Monitor {
        #[arg(required = true, num_args = 1..)]
        addresses: Vec<String>,
    },
    /// Receive webhook callbacks and print them
    Listen(WebhookListenArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct WebhookListenArgs {
    #[arg(long, help = "Address to bind, e.g. 0.0.0.0:8080")]
    pub listen_address: Option<String>,
    #[arg(long, help = "Path callbacks are posted to")]
    pub path: Option<String>,
    #[arg(long, help = "Reject callbacks that do not carry this secret")]
    pub secret: Option<String>,
}
