use anyhow::{Context, anyhow};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use bitindex::cli::{
    AddressCommand, ApplyArgs, BlockCommand, ChainCommand, Cli, Commands, TxCommand, WebhookCommand, XpubCommand,
};
use bitindex::config::{ClientConfig, client_config, load_configuration};
use bitindex::http::BitIndexClient;
use bitindex::log::init_logging;
use bitindex::models::{
    GetTransactionsRequest, GetUnspentTransactionsRequest, MonitoredAddress, WebhookUpdateConfig, XpubAddressesQuery,
};
use bitindex::webhooks::{create_router, serve_webhooks};

const NOTIFICATION_BUFFER: usize = 64;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;

    let cli = Cli::parse();
    let cfg = load_configuration(&cli.config, cli.connection.network)?;
    let mut config = client_config(&cfg)?;
    config.apply_connection(&cli.connection);

    if let Commands::Webhook {
        command: WebhookCommand::Listen(args),
    } = &cli.command
    {
        config.apply_webhook(args);
        return listen(&config).await;
    }

    let client = BitIndexClient::with_config(&config)
        .context("Could not create BitIndex client (set --api-key or BITINDEX_API_KEY)")?;

    match cli.command {
        Commands::Address { command } => match command {
            AddressCommand::Info { address } => print_json(&client.address_info(&address).await?),
            AddressCommand::Utxos { address } => print_json(&client.address_unspent_transactions(&address).await?),
            AddressCommand::Transactions {
                addresses,
                from_index,
                to_index,
                after_height,
                after_block_hash,
                include_asm,
                include_hex,
            } => {
                let request = GetTransactionsRequest {
                    from_index,
                    to_index,
                    after_height,
                    after_block_hash,
                    include_asm,
                    include_hex,
                    ..GetTransactionsRequest::for_addresses(addresses)
                };
                print_json(&client.get_transactions(&request).await?)
            },
            AddressCommand::UnspentTransactions { addresses, sort } => {
                let mut request = GetUnspentTransactionsRequest::for_addresses(addresses);
                request.sort = sort;
                print_json(&client.get_unspent_transactions(&request).await?)
            },
        },
        Commands::Tx { command } => match command {
            TxCommand::Get { txid, raw: false } => print_json(&client.get_transaction(&txid).await?),
            TxCommand::Get { txid, raw: true } => print_json(&client.get_transaction_raw(&txid).await?),
            TxCommand::Send { raw_tx } => print_json(&client.send_transaction(&raw_tx).await?),
        },
        Commands::Block { command } => match command {
            BlockCommand::Hash { height } => print_json(&client.get_block_hash_by_height(height).await?),
            BlockCommand::Header { hash } => print_json(&client.get_block_header(&hash).await?),
            BlockCommand::Get { hash, raw: false } => print_json(&client.get_block(&hash).await?),
            BlockCommand::Get { hash, raw: true } => print_json(&client.get_block_raw(&hash).await?),
        },
        Commands::Chain { command } => match command {
            ChainCommand::Info => print_json(&client.chain_info().await?),
            ChainCommand::Difficulty => print_json(&client.chain_difficulty().await?),
            ChainCommand::BestBlockHash => print_json(&client.chain_best_block_hash().await?),
            ChainCommand::LastBlockHash => print_json(&client.chain_last_block_hash().await?),
        },
        Commands::Xpub { command } => match command {
            XpubCommand::NextAddress { xpub, reserve_time } => {
                print_json(&client.get_xpub_next_address(&xpub, reserve_time).await?)
            },
            XpubCommand::Addresses {
                xpub,
                offset,
                limit,
                order,
                address,
            } => {
                let query = XpubAddressesQuery {
                    offset,
                    limit,
                    order,
                    address,
                };
                print_json(&client.get_xpub_addresses(&xpub, &query).await?)
            },
            XpubCommand::Balance { xpub } => print_json(&client.get_xpub_balance(&xpub).await?),
            XpubCommand::Utxos { xpub, sort } => {
                print_json(&client.get_xpub_unspent_transactions(&xpub, sort.as_ref()).await?)
            },
            XpubCommand::Transactions { xpub } => print_json(&client.get_xpub_transactions(&xpub).await?),
        },
        Commands::Webhook { command } => match command {
            WebhookCommand::Config => print_json(&client.get_webhook_config().await?),
            WebhookCommand::Update { url, secret, disable } => {
                let update = WebhookUpdateConfig {
                    url,
                    secret,
                    enabled: !disable,
                };
                print_json(&client.update_webhook_config(&update).await?)
            },
            WebhookCommand::Monitored => print_json(&client.get_monitored_addresses().await?),
            WebhookCommand::Monitor { addresses } => {
                let addresses: Vec<MonitoredAddress> = addresses.into_iter().map(MonitoredAddress::new).collect();
                print_json(&client.add_monitored_addresses(&addresses).await?)
            },
            WebhookCommand::Listen(_) => Err(anyhow!("webhook listen is handled before the client is created")),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn listen(config: &ClientConfig) -> Result<(), anyhow::Error> {
    let webhook = &config.webhook;
    if webhook.secret.as_deref().is_none_or(str::is_empty) {
        warn!("No webhook secret configured, accepting every callback");
    }

    let listener = TcpListener::bind(&webhook.listen_address)
        .await
        .with_context(|| format!("Failed to bind webhook receiver to {}", webhook.listen_address))?;

    let (tx, mut rx) = mpsc::channel(NOTIFICATION_BUFFER);
    let router = create_router(&webhook.path, webhook.secret.clone(), tx);

    let printer = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            match serde_json::to_string(&notification.redacted()) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error:% = e; "Could not print notification"),
            }
        }
    });

    serve_webhooks(listener, router, async {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("Could not listen for Ctrl+C, stopping receiver");
        }
        info!("Received shutdown signal, stopping webhook receiver...");
    })
    .await?;

    printer.await.context("Notification printer panicked")?;
    Ok(())
}
