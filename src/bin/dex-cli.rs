use clap::{Args, Parser, Subcommand};
use gateway_sdk::{
    from_base_units, to_base_units, GatewayClient, PriceRequest, QuoteForm, QuoteParams,
    QuoteRefresher, QuoteState, SwapParams,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use dex_gateway::blockchain::{BlockchainClient, SwapExecutor, SwapOrder, Wallet};
use dex_gateway::config::GatewayConfig;
use dex_gateway::registry::{usdc_address, Registry, NATIVE_TOKEN_ADDRESS};
use dex_gateway::router::RouterClient;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "dex-cli")]
#[command(about = "Command line client for the DEX gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct PairArgs {
    /// Router chain key, e.g. `arbitrum`.
    #[arg(long, default_value = "ethereum")]
    chain: String,
    /// Input token: symbol from the chain's token list or an address.
    #[arg(long, default_value = "ETH")]
    from: String,
    /// Output token: symbol from the chain's token list or an address.
    #[arg(long, default_value = "USDC")]
    to: String,
    /// Decimals for tokens given by an unlisted address.
    #[arg(long, default_value_t = 18)]
    decimals: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// List supported chains
    Chains,
    /// List tokens on a chain
    Tokens { chain: String },
    /// Look up prices for the pairs in a JSON file (array of price requests)
    Prices { file: PathBuf },
    /// Quote a swap
    Quote {
        #[command(flatten)]
        pair: PairArgs,
        /// Human-readable input amount, e.g. `0.5`.
        #[arg(long)]
        amount: String,
        #[arg(long)]
        user: String,
    },
    /// Quote amounts typed on stdin, one per line, with debouncing
    Watch {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = 500)]
        debounce_ms: u64,
    },
    /// Quote then execute through the gateway (key from PRIVATE_KEY)
    Swap {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long)]
        amount: String,
    },
    /// Quote 0.01 native coin to USDC from the router and execute locally.
    /// Reads RPC_URL, GLUEX_API_KEY and PRIVATE_KEY.
    DirectSwap {
        /// Native amount in wei.
        #[arg(long, default_value = "10000000000000000")]
        amount_wei: String,
    },
}

/// A token resolved against the gateway's list.
struct ResolvedToken {
    symbol: String,
    address: String,
    decimals: u8,
}

async fn resolve_token(
    client: &GatewayClient,
    chain: &str,
    token: &str,
    fallback_decimals: u8,
) -> CliResult<ResolvedToken> {
    let listed = client.supported_tokens(chain).await?;
    let found = listed.into_iter().find(|t| {
        t.symbol.eq_ignore_ascii_case(token) || t.address.eq_ignore_ascii_case(token)
    });

    match found {
        Some(t) => Ok(ResolvedToken {
            symbol: t.symbol,
            address: t.address,
            decimals: t.decimals,
        }),
        None if token.starts_with("0x") => Ok(ResolvedToken {
            symbol: token.to_string(),
            address: token.to_string(),
            decimals: fallback_decimals,
        }),
        None => Err(format!("Token {} is not listed on {}", token, chain).into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("{} at {}", health.status, health.timestamp);
        }
        Commands::Chains => {
            for chain in client.supported_chains().await? {
                println!(
                    "{:>9}  {:<10} {:<20} {}",
                    chain.id, chain.chain_id, chain.name, chain.native_currency
                );
            }
        }
        Commands::Tokens { chain } => {
            for token in client.supported_tokens(&chain).await? {
                println!(
                    "{:<6} {:<3} {}  {}",
                    token.symbol, token.decimals, token.address, token.name
                );
            }
        }
        Commands::Prices { file } => {
            let content = tokio::fs::read_to_string(&file).await?;
            let requests: Vec<PriceRequest> = serde_json::from_str(&content)?;
            let prices = client.prices(&requests).await?;
            for p in prices {
                println!(
                    "{}:{} -> {}:{} = {}",
                    p.domestic_blockchain,
                    p.domestic_token,
                    p.foreign_blockchain,
                    p.foreign_token,
                    p.price
                );
            }
        }
        Commands::Quote { pair, amount, user } => {
            let input = resolve_token(&client, &pair.chain, &pair.from, pair.decimals).await?;
            let output = resolve_token(&client, &pair.chain, &pair.to, pair.decimals).await?;

            let params = QuoteParams {
                input_token: input.address.clone(),
                output_token: output.address.clone(),
                input_amount: to_base_units(&amount, input.decimals)?,
                user_address: user,
                chain_id: pair.chain,
            };
            let quote = client.get_quote(&params).await?;
            println!(
                "{} {} -> {} {}",
                amount,
                input.symbol,
                from_base_units(&quote.output_amount, output.decimals)?,
                output.symbol
            );
            print_json(&serde_json::json!({
                "router": quote.router,
                "calldataBytes": quote.calldata.trim_start_matches("0x").len() / 2,
            }))?;
        }
        Commands::Watch { pair, user, debounce_ms } => {
            let input = resolve_token(&client, &pair.chain, &pair.from, pair.decimals).await?;
            let output = resolve_token(&client, &pair.chain, &pair.to, pair.decimals).await?;

            let debounce = Duration::from_millis(debounce_ms);
            let refresher = QuoteRefresher::spawn(client.clone(), debounce);
            let mut state = refresher.subscribe();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            eprintln!("Type amounts of {} (Ctrl-D to stop)", input.symbol);
            loop {
                tokio::select! {
                    line = lines.next_line() => match line? {
                        Some(amount) => refresher.update(QuoteForm {
                            chain_key: pair.chain.clone(),
                            user_address: user.clone(),
                            input_token: input.address.clone(),
                            output_token: output.address.clone(),
                            amount,
                            decimals: input.decimals,
                        }),
                        None => break,
                    },
                    changed = state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let current = state.borrow_and_update().clone();
                        match current {
                            QuoteState::Idle => println!("-"),
                            QuoteState::Loading => println!("quoting..."),
                            QuoteState::Ready { form, quote } => println!(
                                "{} {} -> {} {}",
                                form.amount,
                                input.symbol,
                                from_base_units(&quote.output_amount, output.decimals)?,
                                output.symbol
                            ),
                            QuoteState::Failed { form, error } => {
                                println!("{} {}: {}", form.amount, input.symbol, error)
                            }
                        }
                    }
                }
            }
        }
        Commands::Swap { pair, amount } => {
            let wallet = Wallet::from_env()?;
            let user = wallet.address().to_string();

            let chain_id = client
                .supported_chains()
                .await?
                .into_iter()
                .find(|c| c.chain_id == pair.chain)
                .map(|c| c.id)
                .ok_or_else(|| format!("Unsupported chain {}", pair.chain))?;

            let input = resolve_token(&client, &pair.chain, &pair.from, pair.decimals).await?;
            let output = resolve_token(&client, &pair.chain, &pair.to, pair.decimals).await?;
            let input_amount = to_base_units(&amount, input.decimals)?;

            let quote = client
                .get_quote(&QuoteParams {
                    input_token: input.address.clone(),
                    output_token: output.address.clone(),
                    input_amount: input_amount.clone(),
                    user_address: user.clone(),
                    chain_id: pair.chain.clone(),
                })
                .await?;
            println!(
                "Quoted {} {} -> {} {}",
                amount,
                input.symbol,
                from_base_units(&quote.output_amount, output.decimals)?,
                output.symbol
            );

            let value = if input.address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS) {
                input_amount
            } else {
                "0".to_string()
            };
            let private_key = std::env::var("PRIVATE_KEY")?;
            let result = client
                .execute_swap(&SwapParams {
                    calldata: quote.calldata,
                    router_address: quote.router,
                    value,
                    chain_id,
                    user_address: user,
                    private_key,
                })
                .await?;

            println!("Tx hash: {}", result.transaction_hash);
            println!("Status: {}", if result.status { "success" } else { "reverted" });
            if let Some(url) = result.explorer_url {
                println!("Explorer: {}", url);
            }
        }
        Commands::DirectSwap { amount_wei } => direct_swap(&amount_wei).await?,
    }

    Ok(())
}

/// Quote native -> USDC straight from the router and execute it with the
/// local key, without a running gateway.
async fn direct_swap(amount_wei: &str) -> CliResult<()> {
    let rpc_url = std::env::var("RPC_URL").map_err(|_| "RPC_URL missing")?;
    let config = GatewayConfig::from_env()?;
    if config.router.api_key.is_empty() {
        return Err("GLUEX_API_KEY missing".into());
    }
    let wallet = Wallet::from_env()?;

    let rpc = BlockchainClient::connect(
        &rpc_url,
        Duration::from_secs(config.blockchain.rpc_timeout_secs),
    )?;
    let chain_id = rpc.get_chain_id().await?;
    let registry = Registry::builtin();
    let chain_key = registry.api_chain_key(chain_id);
    let usdc = usdc_address(&chain_key);
    println!("Chain {} ({}), account {}", chain_id, chain_key, wallet.address());

    let router = RouterClient::new(&config.router, &config.retries)?;
    let account = wallet.address().to_string();
    let request =
        router.quote_request(&chain_key, &account, NATIVE_TOKEN_ADDRESS, usdc, amount_wei);
    let route = router.fetch_quote(&request).await?.into_route()?;
    println!("Quoted {} wei -> {} USDC base units", amount_wei, route.output_amount());

    let order = SwapOrder::parse(&route.router, &route.calldata, amount_wei)?;
    let receipt = SwapExecutor::new(rpc, wallet, chain_id)
        .with_gas_limit(config.blockchain.gas_limit)
        .with_receipt_timeout(Duration::from_secs(config.blockchain.receipt_timeout_secs))
        .execute(order)
        .await?;

    let tx_hash = format!("{:#x}", receipt.transaction_hash);
    println!("Tx hash: {}", tx_hash);
    println!("Status: {}", if receipt.status { "success" } else { "reverted" });
    match registry.chain_by_id(chain_id) {
        Some(chain) => {
            println!("Explorer: {}", chain.tx_url(&tx_hash));
            println!("USDC balance: {}", chain.token_holder_url(usdc, &account));
        }
        None => println!("Chain ID {} - check your preferred explorer", chain_id),
    }
    Ok(())
}
