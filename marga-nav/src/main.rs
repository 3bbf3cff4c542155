//! MargaNav - Maze navigator for a differential-drive robot
//!
//! Runs the two-pass brightest dead-end search against a recorded sensor
//! trace.
//!
//! ```text
//! marga-nav [config.toml] --trace <trace.toml>
//! ```

use marga_nav::devices::{ReplayDevice, Trace};
use marga_nav::{MargaConfig, MargaError, NavOutcome, Navigator, NavigatorConfig, Result};

use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marga_nav=info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 && !args[1].starts_with("--") {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        MargaConfig::load(config_path)?
    } else if Path::new("marga.toml").exists() {
        info!("Loading configuration from marga.toml");
        MargaConfig::load(Path::new("marga.toml"))?
    } else {
        info!("Using default configuration");
        MargaConfig::default()
    };

    let trace_path = args
        .iter()
        .position(|a| a == "--trace")
        .and_then(|i| args.get(i + 1))
        .ok_or_else(|| {
            MargaError::Config("usage: marga-nav [config.toml] --trace <trace.toml>".into())
        })?;

    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Thresholds: proximity {:.1}, right {:.1}; max speed {:.2} rad/s",
        config.sensing.proximity_threshold,
        config.sensing.right_sensor_threshold,
        config.robot.max_speed
    );

    let trace = Trace::load(Path::new(trace_path))?;
    info!(
        "Replaying {} frames ({} ticks) from {}",
        trace.frames().len(),
        trace.total_ticks(),
        trace_path
    );

    let device = ReplayDevice::new(&trace, config.time_step());
    let mut navigator = Navigator::new(
        NavigatorConfig::from(&config),
        device.clock(),
        device.sensors(),
        device.motors(),
    );

    match navigator.run() {
        NavOutcome::Stopped { light, summary } => {
            info!(
                "Stopped at brightest dead end (light {:.6}, pass 1 max {:.6}) after {:?}",
                light,
                summary.max_light_intensity,
                device.elapsed()
            );
        }
        NavOutcome::Terminated { phase, summary } => {
            warn!(
                "Trace ended during {:?}: {} dead ends recorded, {} revisited",
                phase, summary.recorded, summary.revisited
            );
        }
    }

    Ok(())
}
