//! Command Line Interface for the lp-desk pool price tools.
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use dotenv::dotenv;
use lp_desk_domain::entities::TransactionRecord;
use lp_desk_domain::enums::SwapDirection;
use lp_desk_domain::math::liquidity_ratio::{RatioValidator, parse_amount};
use lp_desk_domain::math::swap::quote_exact_input;
use lp_desk_domain::value_objects::{LiquidityRatioCheck, Percentage, PoolPriceQuote, QuoteSource};
use lp_desk_execution::prelude::*;
use lp_desk_protocols::balances::BalanceReader;
use lp_desk_protocols::evm::{EvmClient, RouterClient};
use lp_desk_protocols::history::TransactionHistory;
use lp_desk_protocols::pool_info::PoolInfoLoader;
use lp_desk_protocols::resolver::PoolPriceResolver;
use lp_desk_protocols::{Address, RouterReader, parse_address};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const PRICE_TASK: &str = "pool-price";

#[derive(Parser)]
#[command(name = "lp-desk")]
#[command(about = "Pool price, liquidity ratio and swap quote tools", long_about = None)]
struct Cli {
    /// Pool address, overriding LP_DESK_POOL_ADDRESS
    #[arg(long, global = true)]
    pool: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current pool price
    Price,
    /// Check a deposit's token ratio against the pool price
    CheckRatio {
        /// token0 amount
        amount0: String,
        /// token1 amount
        amount1: String,
        /// Allowed relative deviation (0.05 = 5%)
        #[arg(long)]
        tolerance: Option<Decimal>,
    },
    /// Quote an exact-input swap at the pool price
    SwapQuote {
        /// Input amount
        amount: String,
        /// Sell token1 for token0 instead of token0 for token1
        #[arg(long)]
        reverse: bool,
        /// Slippage tolerance in percent, overriding LP_DESK_SLIPPAGE_PERCENT
        #[arg(long)]
        slippage: Option<Decimal>,
    },
    /// Show pool figures reported by the router
    PoolInfo,
    /// Show token and native balances of a wallet
    Balances {
        /// Wallet address
        owner: String,
    },
    /// List a wallet's swap and liquidity history
    History {
        /// Wallet address
        owner: String,
    },
    /// Check whether a wallet can add liquidity, without sending anything
    Preflight {
        /// Wallet address
        owner: String,
        /// token0 amount
        amount0: String,
        /// token1 amount
        amount1: String,
        /// Gas estimate to pad; the fixed limit is used when absent
        #[arg(long)]
        gas_estimate: Option<u64>,
    },
    /// Refresh the pool price periodically until interrupted
    Watch {
        /// Seconds between refreshes, overriding LP_DESK_REFRESH_SECS
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(pool) = &cli.pool {
        config.pool = Some(parse_address(pool).context("--pool")?);
    }

    let chain = Arc::new(EvmClient::connect(&config.rpc_url)?);
    let router: Option<Arc<dyn RouterReader>> = config
        .router
        .map(|address| Arc::new(RouterClient::new(address, &chain)) as Arc<dyn RouterReader>);

    match &cli.command {
        Commands::Price => {
            let quote = resolver(&config, &chain, &router).resolve().await;
            print_quote(&config, &quote);
        }
        Commands::CheckRatio {
            amount0,
            amount1,
            tolerance,
        } => {
            let validator = match tolerance {
                Some(t) => RatioValidator::with_tolerance(*t),
                None => RatioValidator::default(),
            };
            let monitor = PriceMonitor::new(
                Arc::new(resolver(&config, &chain, &router)),
                MonitorConfig::default(),
            )
            .with_validator(validator);

            let quote = monitor.refresh().await;
            print_quote(&config, &quote);
            let check = monitor.check_ratio(amount0, amount1).await?;
            print_ratio_check(&config, &check);
        }
        Commands::SwapQuote {
            amount,
            reverse,
            slippage,
        } => {
            let quote = resolver(&config, &chain, &router).resolve().await;
            print_quote(&config, &quote);

            let direction = if *reverse {
                SwapDirection::Token1ToToken0
            } else {
                SwapDirection::Token0ToToken1
            };
            let slippage = slippage.map(Percentage::new).unwrap_or(config.slippage);
            let swap =
                quote_exact_input(parse_amount(amount)?, direction, quote.price(), slippage)?;

            let (input, output) = match direction {
                SwapDirection::Token0ToToken1 => (&config.pair.base, &config.pair.quote),
                SwapDirection::Token1ToToken0 => (&config.pair.quote, &config.pair.base),
            };
            println!("\n🔁 Swap Quote");
            println!("════════════════════════════════════");
            println!("You pay:          {} {}", swap.input_amount, input.symbol);
            println!("You receive:      {} {}", swap.output_amount, output.symbol);
            println!(
                "Rate:             1 {} = {} {}",
                input.symbol,
                swap.rate.round_dp(6),
                output.symbol
            );
            println!("Price impact:     {}%", swap.price_impact_percent);
            println!(
                "Minimum received: {} {} ({}% slippage)",
                swap.minimum_received, output.symbol, slippage.0
            );
            println!("════════════════════════════════════");
        }
        Commands::PoolInfo => {
            let router = router.context("LP_DESK_ROUTER_ADDRESS must be set for pool-info")?;
            let pool = config.pool.context("a pool address is required for pool-info")?;
            let info = PoolInfoLoader::new(router, pool).load().await;

            if info.is_unavailable() {
                println!("❌ Pool info unavailable.");
                return Ok(());
            }
            let show = |value: Option<String>| value.unwrap_or_else(|| "n/a".to_string());
            let (sym0, sym1) = (&config.pair.base.symbol, &config.pair.quote.symbol);
            println!("\n📊 Pool {pool:#x}");
            println!("════════════════════════════════════");
            println!("sqrtPriceX96:     {}", show(info.sqrt_price_x96.clone()));
            println!("Tick:             {}", show(info.tick.map(|t| t.to_string())));
            println!("Liquidity:        {}", show(info.liquidity.map(|l| l.to_string())));
            println!("{sym0} balance: {}", show(info.token0_balance.map(|b| b.to_string())));
            println!("{sym1} balance: {}", show(info.token1_balance.map(|b| b.to_string())));
            println!("1 {sym0} = {} {sym1}", show(info.token0_price.map(|p| p.to_string())));
            println!("1 {sym1} = {} {sym0}", show(info.token1_price.map(|p| p.to_string())));
            println!("════════════════════════════════════");
        }
        Commands::Balances { owner } => {
            let owner = parse_address(owner).context("owner")?;
            let reader = BalanceReader::new(chain.clone(), config.pair.clone())?;
            let balances = reader.load(owner).await?;

            println!("\n👛 Balances of {owner:#x}");
            println!("{:<10} {}", config.pair.base.symbol, balances.token0);
            println!("{:<10} {}", config.pair.quote.symbol, balances.token1);
            println!("{:<10} {}", "native", balances.native);
        }
        Commands::History { owner } => {
            let owner = parse_address(owner).context("owner")?;
            let router = router.context("LP_DESK_ROUTER_ADDRESS must be set for history")?;
            let records = TransactionHistory::new(router, config.registry())
                .fetch(owner)
                .await?;

            if records.is_empty() {
                println!("No transactions found.");
                return Ok(());
            }
            print_history(&records);
        }
        Commands::Preflight {
            owner,
            amount0,
            amount1,
            gas_estimate,
        } => {
            let owner = parse_address(owner).context("owner")?;
            let spender: Address = config
                .router
                .context("LP_DESK_ROUTER_ADDRESS must be set for preflight")?;
            let (amount0, amount1) = (parse_amount(amount0)?, parse_amount(amount1)?);

            let quote = resolver(&config, &chain, &router).resolve().await;
            print_quote(&config, &quote);
            let check = RatioValidator::default().check(amount0, amount1, quote.price())?;
            print_ratio_check(&config, &check);

            let reader = BalanceReader::new(chain.clone(), config.pair.clone())?;
            let gate = ActionGate::new("add liquidity");
            let plan = gate
                .run(reader.prepare_deposit(owner, spender, amount0, amount1, *gas_estimate))
                .await?;
            let plan = match plan {
                Ok(plan) => plan,
                Err(e) => {
                    println!("❌ {}", e.user_message("add liquidity"));
                    return Ok(());
                }
            };

            println!("\n✅ Deposit preflight passed");
            println!("Approve {}: {}", config.pair.base.symbol, yes_no(plan.approve_token0));
            println!("Approve {}: {}", config.pair.quote.symbol, yes_no(plan.approve_token1));
            println!("Gas limit:  {}", plan.gas_limit);
        }
        Commands::Watch { interval } => {
            let interval = interval
                .map(Duration::from_secs)
                .unwrap_or(config.refresh_interval)
                .max(Duration::from_secs(1));
            let monitor = PriceMonitor::new(
                Arc::new(resolver(&config, &chain, &router)),
                MonitorConfig {
                    max_quote_age: interval * 2,
                    task_name: PRICE_TASK.to_string(),
                },
            );

            let mut scheduler = Scheduler::new();
            scheduler.add_task(
                ScheduledTask::new(PRICE_TASK, ScheduleBuilder::every(interval)).immediately(),
            );
            let events = scheduler
                .take_receiver()
                .context("scheduler receiver already taken")?;
            let stop = scheduler.stop_handle();
            let handle = tokio::spawn(async move { scheduler.start().await });

            println!("👀 Watching pool price every {}s (Ctrl-C to stop)", interval.as_secs());
            tokio::select! {
                _ = monitor.run(events, |quote| print_quote(&config, quote)) => {}
                _ = tokio::signal::ctrl_c() => info!("Interrupted, stopping"),
            }
            stop.stop();
            handle.await?;
        }
    }

    Ok(())
}

fn resolver(
    config: &AppConfig,
    chain: &Arc<EvmClient>,
    router: &Option<Arc<dyn RouterReader>>,
) -> PoolPriceResolver {
    let resolver =
        PoolPriceResolver::new(config.pool, config.pair.clone(), chain.clone(), chain.clone());
    match router {
        Some(router) => resolver.with_router(router.clone()),
        None => resolver,
    }
}

fn describe_source(source: &QuoteSource) -> String {
    match source {
        QuoteSource::Live { tick } => format!("pool slot0 (tick {tick})"),
        QuoteSource::Router { tick } => format!("router (tick {tick})"),
        QuoteSource::Fallback(reason) => format!("initial ratio ({reason})"),
    }
}

fn print_quote(config: &AppConfig, quote: &PoolPriceQuote) {
    println!(
        "💱 [{}] 1 {} = {} {}  via {}",
        quote.fetched_at().format("%Y-%m-%d %H:%M:%S"),
        config.pair.base.symbol,
        quote.price().round_dp(6),
        config.pair.quote.symbol,
        describe_source(quote.source())
    );
    if quote.is_initial_ratio() {
        println!("⚠️  The pool may not exist yet; amounts follow the initial ratio.");
    }
}

fn print_ratio_check(config: &AppConfig, check: &LiquidityRatioCheck) {
    let (sym0, sym1) = (&config.pair.base.symbol, &config.pair.quote.symbol);
    if check.is_valid_ratio {
        println!("✅ Ratio {} {sym1}/{sym0} is within tolerance", check.ratio.round_dp(6));
    } else {
        println!(
            "❌ Ratio {} {sym1}/{sym0} differs from the pool price by {}%",
            check.ratio.round_dp(6),
            check.price_difference_percent
        );
        println!("   Suggested {sym1} for your {sym0}: {}", check.suggested_amounts.token1);
        println!("   Suggested {sym0} for your {sym1}: {}", check.suggested_amounts.token0);
    }
}

fn print_history(records: &[TransactionRecord]) {
    let mut table = Table::new();
    table.set_titles(row!["#", "Type", "Sent", "Received", "Time", "Status", "Hash"]);
    for record in records {
        table.add_row(row![
            record.id,
            record.kind,
            format!("{} {}", record.token0_amount, record.token0_symbol),
            format!("{} {}", record.token1_amount, record.token1_symbol),
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.status,
            record.hash
        ]);
    }
    table.printstd();
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
