//! D1Q2 diffusion on the state-vector simulator
//!
//! Runs the quantum path next to the classical reference and prints both
//! density profiles with their RMSE.
//!
//! Usage:
//! ```bash
//! # Defaults: L = 4, 8192 shots, one step
//! RUST_LOG=info cargo run --example diffusion_d1q2 --release
//!
//! # Lattice length, shots, steps, seed
//! cargo run --example diffusion_d1q2 --release -- 8 16384 3 42
//!
//! # Configuration from a JSON file
//! cargo run --example diffusion_d1q2 --release -- --config run.json
//! ```

use anyhow::{bail, Context};
use qlbm_engine::prelude::*;

fn parse_config(args: &[String]) -> anyhow::Result<SimulationConfig> {
    if let Some(position) = args.iter().position(|a| a == "--config") {
        let path = args
            .get(position + 1)
            .context("--config needs a file path")?;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path))?;
        return Ok(SimulationConfig::from_json(&json)?);
    }

    let length: usize = match args.first() {
        Some(s) => s.parse().context("lattice length must be an integer")?,
        None => 4,
    };
    let mut config = SimulationConfig::new(length).with_seed(42);
    if let Some(s) = args.get(1) {
        config = config.with_shots(s.parse().context("shots must be an integer")?);
    }
    if let Some(s) = args.get(2) {
        config = config.with_time_steps(s.parse().context("steps must be an integer")?);
    }
    if let Some(s) = args.get(3) {
        config = config.with_seed(s.parse().context("seed must be an integer")?);
    }
    if args.len() > 4 {
        bail!("expected at most 4 positional arguments, got {}", args.len());
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_config(&args)?;

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              QLBM D1Q2 Diffusion - Simulator Run             ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let mut driver =
        SimulationDriver::with_simulator(config).context("building simulation driver")?;
    println!("Swap network: {}\n", driver.swap_network());

    let report = driver.run().context("running simulation")?;

    println!("┌──────┬────────────┬────────────┬────────────┐");
    println!("│ Site │ Quantum    │ Classical  │ |Δ|        │");
    println!("├──────┼────────────┼────────────┼────────────┤");
    for (k, (q, c)) in report
        .quantum_density
        .iter()
        .zip(&report.classical_density)
        .enumerate()
    {
        println!("│ {:4} │ {:10.6} │ {:10.6} │ {:10.6} │", k, q, c, (q - c).abs());
    }
    println!("└──────┴────────────┴────────────┴────────────┘\n");

    println!("{}", report);

    if std::env::var_os("QLBM_REPORT_JSON").is_some() {
        println!("\n{}", report.to_json()?);
    }

    Ok(())
}
