use std::path::Path;
use std::sync::Arc;

use sync_sims::config::{ShopConfig, SimConfig, TableConfig};
use sync_sims::framework::{EventLog, RandomPacing};
use sync_sims::lifecycle::tracing::setup_tracing;
use sync_sims::lifecycle::{BarberShop, DiningTable};
use tracing::info;

const USAGE: &str = "usage: sync-sims <barbershop|dining> [config.toml]";

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let mut args = std::env::args().skip(1);
    let simulation = args.next().ok_or_else(|| USAGE.to_string())?;
    let config = match args.next() {
        Some(path) => SimConfig::load(Path::new(&path)).map_err(|e| e.to_string())?,
        None => SimConfig::default(),
    };

    let (log, mut events) = EventLog::channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{event}");
        }
    });

    match simulation.as_str() {
        "barbershop" => run_barbershop(config.barbershop, log).await?,
        "dining" => run_dining(config.dining, log).await?,
        other => return Err(format!("unknown simulation '{other}'\n{USAGE}")),
    }

    // Every actor dropped its log handle on the way out; flush what is left.
    printer.await.map_err(|e| e.to_string())?;
    info!("Simulation finished");
    Ok(())
}

async fn run_barbershop(config: ShopConfig, log: EventLog) -> Result<(), String> {
    let stop_when_drained = config.stop_when_drained;
    let mut shop = BarberShop::open(config, Arc::new(RandomPacing), log)
        .await
        .map_err(|e| e.to_string())?;

    if stop_when_drained {
        tokio::select! {
            drained = shop.wait_until_idle() => drained.map_err(|e| e.to_string())?,
            _ = tokio::signal::ctrl_c() => info!("Interrupted"),
        }
    } else {
        tokio::signal::ctrl_c().await.map_err(|e| e.to_string())?;
        info!("Interrupted");
    }

    shop.shutdown().await.map_err(|e| e.to_string())
}

async fn run_dining(config: TableConfig, log: EventLog) -> Result<(), String> {
    let table = DiningTable::seat(config, Arc::new(RandomPacing), log).map_err(|e| e.to_string())?;

    tokio::signal::ctrl_c().await.map_err(|e| e.to_string())?;
    info!("Interrupted");

    table.shutdown().await.map_err(|e| e.to_string())
}
