//! triarb — triangular arbitrage detection engine
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the pair catalog and a replay quote gateway, runs one scan
//! pass, and reports every opportunity found.

use anyhow::Result;
use tracing::{debug, info};

use triarb::catalog::PairCatalog;
use triarb::config::AppConfig;
use triarb::engine::TriangleScanner;
use triarb::gateway::snapshot::SnapshotGateway;

const BANNER: &str = r#"
 _        _            _
| |_ _ __(_) __ _ _ __| |__
| __| '__| |/ _` | '__| '_ \
| |_| |  | | (_| | |  | |_) |
 \__|_|  |_|\__,_|_|  |_.__/

  Triangular Arbitrage Scanner
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        pairs_file = %cfg.catalog.pairs_file,
        snapshot_file = %cfg.quotes.snapshot_file,
        skip_capped = cfg.scan.skip_capped,
        "triarb starting up"
    );

    let catalog = PairCatalog::load(&cfg.catalog.pairs_file)?;
    let gateway = SnapshotGateway::load(&cfg.quotes.snapshot_file)?;

    let scanner = TriangleScanner::new(cfg.scan.skip_capped);
    let opportunities = scanner.scan(&catalog, &gateway).await?;

    for opp in &opportunities {
        if opp.profitable {
            info!(
                ordering = ?opp.ordering,
                funding = %opp.funding_asset,
                net = %opp.net_funding,
                ratio = %opp.profit_ratio(),
                "Profitable cycle"
            );
        } else {
            debug!(
                ordering = ?opp.ordering,
                funding = %opp.funding_asset,
                net = %opp.net_funding,
                "Unprofitable cycle"
            );
        }
    }

    let profitable = opportunities.iter().filter(|o| o.profitable).count();
    info!(
        opportunities = opportunities.len(),
        profitable, "Scan finished"
    );

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("triarb=info"));

    let json_logging = std::env::var("TRIARB_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }
}
