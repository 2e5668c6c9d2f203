//! Breadfund - Demo Binary
//!
//! Seeds the demo pool and walks one withdrawal request from vote to payout,
//! printing each view as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin breadfund-demo
//!
//! BREADFUND_LOG_FORMAT=json BREADFUND_CONNECT_DELAY_MS=0 cargo run --bin breadfund-demo
//! ```
//!
//! # Environment Variables
//!
//! * `BREADFUND_MOCK_ADDRESS` - Address returned by wallet connect
//! * `BREADFUND_MOCK_NAME` - Name returned by wallet connect (default: Alice)
//! * `BREADFUND_CONNECT_DELAY_MS` - Simulated connect latency (default: 500)
//! * `BREADFUND_CLAIM_CAP_MULTIPLIER` - Claim cap as a multiple of personal saving (default: 10)
//! * `BREADFUND_QUORUM_RATIO` - Yes votes needed, as a share of eligible voters (default: 0.66)
//! * `BREADFUND_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `BREADFUND_LOG_FORMAT` - pretty or json (default: pretty)
//! * `BREADFUND_SEED_DEMO_DATA` - Load the demo pool (default: true)

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Address, SystemClock, Token};
use domain_claims::Vote;
use domain_pool::PoolConfig;
use infra_store::{seed_demo_data, LedgerStore};
use interface_app::{AppConfig, BreadfundApp, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level, config.log_format);

    tracing::info!(mock = %config.mock_name, "Starting Breadfund demo");

    let store = Arc::new(LedgerStore::new());
    let app = BreadfundApp::from_config(&config, Arc::clone(&store), Arc::new(SystemClock))?;

    let identity = app.connect_identity().await;
    print_json("identity", &identity)?;
    print_json("allowed_tokens", &app.allowed_tokens())?;

    if !config.seed_demo_data {
        let pool_id = app
            .create_pool(PoolConfig::new("Neighbourhood Fund", Token::Usdc))
            .await?;
        print_json("created_pool", &app.pool(pool_id).await?)?;
        return Ok(());
    }

    let pool_id = seed_demo_data(&store).await?;
    print_json("pools", &app.list_pools().await)?;
    print_json("premium_overview", &app.premium_overview(&identity.address).await?)?;

    let actions = app.pending_actions(&identity.address).await;
    print_json("pending_actions", &actions)?;

    let request_id = actions
        .first()
        .map(|action| action.request.id)
        .context("demo pool has no pending request")?;
    let member2 = Address::parse("0xMember2")?;
    let member3 = Address::parse("0xMember3")?;

    let receipt = app
        .cast_vote(pool_id, request_id, &identity.address, Vote::Yes)
        .await?;
    print_json("vote_alice", &receipt)?;

    // 0xMember3 catches up on their premium of 130
    app.record_deposit(pool_id, &member3, dec!(130)).await?;
    let receipt = app.cast_vote(pool_id, request_id, &member3, Vote::Yes).await?;
    print_json("vote_member3", &receipt)?;

    print_json("pending_actions_member2", &app.pending_actions(&member2).await)?;

    match app.process_payout(pool_id, request_id).await {
        Ok(balance) => print_json("remaining_balance", &balance)?,
        Err(e) => tracing::warn!(code = e.code(), error = %e, "Payout failed"),
    }

    print_json("pool", &app.pool(pool_id).await?)?;
    app.disconnect_identity().await;

    tracing::info!("Demo complete");
    Ok(())
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    println!("== {} ==\n{}", label, serde_json::to_string_pretty(value)?);
    Ok(())
}
