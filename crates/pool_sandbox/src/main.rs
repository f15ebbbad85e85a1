//! Pool sandbox
//!
//! Usage: `pool_sandbox [config.toml|config.ron] [--save-config <path>]`
//!
//! `--save-config` writes the effective configuration (the loaded file, or the
//! defaults when none is given) to `<path>` before the simulation starts. The
//! format follows the path's extension.

mod config;
mod entities;
mod simulation;

use config::SandboxConfig;
use entity_pool::config::Config;
use entity_pool::foundation::logging;
use entity_pool::PoolManager;
use simulation::Simulation;

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config_path: Option<String>,
    save_path: Option<String>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        
        while let Some(arg) = args.next() {
            if arg == "--save-config" {
                let path = args.next().ok_or("--save-config needs a path")?;
                parsed.save_path = Some(path);
            } else if parsed.config_path.is_none() {
                parsed.config_path = Some(arg);
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    
    let args = Args::parse(std::env::args().skip(1))?;
    let config = SandboxConfig::load(args.config_path.as_deref())?;
    log::info!("Loaded sandbox config from {}", args.config_path.as_deref().unwrap_or("defaults"));
    
    if let Some(path) = &args.save_path {
        config.save_to_file(path)?;
        log::info!("Wrote effective config to {}", path);
    }
    
    let ticks = config.simulation.ticks;
    let pools = PoolManager::new(config.pools.clone());
    let mut sim = Simulation::new(config.simulation, pools);
    
    let warmed = sim.prewarm()?;
    log::info!("Prewarmed {} pools", warmed);
    
    sim.run(ticks)?;
    log::info!("{} bullets in flight after {} ticks", sim.in_flight(), ticks);
    
    let released = sim.shutdown();
    let stats = sim.stats();
    let pools = sim.pool_stats();
    log::info!(
        "Done: fired {}, exploded {}, timed out {}, released {} on shutdown",
        stats.fired, stats.exploded, stats.timed_out, released
    );
    log::info!(
        "Pools: {} pools, {} instances, {} acquisitions, {} growths",
        pools.pools, pools.total_capacity, pools.total_acquisitions, pools.total_growths
    );
    Ok(())
}
