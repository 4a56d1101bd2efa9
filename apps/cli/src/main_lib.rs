use std::sync::Arc;

use stockboard_market_data::{HttpStockGateway, StockStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Command;
use crate::config::Config;
use crate::render::View;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_store(config: &Config) -> anyhow::Result<StockStore> {
    let gateway = HttpStockGateway::new(config.gateway())?;
    tracing::info!("Backend base URL: {}", gateway.base_url());
    Ok(StockStore::new(Arc::new(gateway), config.timeouts()))
}

/// Run one command against the store and report which view it fills.
pub async fn run(store: &StockStore, command: Command) -> View {
    match command {
        Command::Series { symbol, range } => {
            store.load_series(symbol, range.as_str()).await;
            View::Series
        }
        Command::Refresh { symbol, range } => {
            if store.select_query(symbol, range.as_str()).is_ok() {
                let report = store.refresh_stock_data().await;
                if let Ok(receipt) = &report.refresh {
                    tracing::info!("Refresh added {} new records", receipt.new_records);
                }
            }
            View::Series
        }
        Command::Recommend { range } => {
            let _ = store.load_recommendations(range).await;
            View::Recommendations
        }
    }
}
