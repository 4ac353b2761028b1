//! phasegen - emit the compand and phase lookup tables
//!
//! **Usage:**
//! ```text
//! phasegen [-o <outfile>] [--format c|binary] [--scale <k>]
//! ```

use std::fs;
use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use iq_tables::render::write_tables;
use iq_tables::{CompandTable, PhaseTable, PhasegenConfig};

fn main() -> Result<()> {
    iq_tables::init_tracing();

    let config = PhasegenConfig::parse();

    let curve = match config.curve() {
        Ok(curve) => curve,
        Err(e) => {
            error!("phasegen: {}", e);
            process::exit(1);
        }
    };

    info!("Configuration:");
    info!("  Scale constant: {}", curve.scale());
    info!("  com_fac: {:.6}", curve.com_fac());
    info!("  Format: {:?}", config.format);
    match &config.output {
        Some(path) => info!("  Output: {}", path.display()),
        None => info!("  Output: stdout"),
    }

    let compand = CompandTable::new(curve);
    let phase = PhaseTable::new(&compand);

    // Render fully before touching the destination
    let mut rendered = Vec::new();
    write_tables(&mut rendered, config.format, &compand, &phase)
        .context("Failed to render tables")?;

    match &config.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&rendered)
                .and_then(|_| stdout.flush())
                .context("Failed to write tables to stdout")?;
        }
    }

    info!("Wrote {} bytes", rendered.len());
    Ok(())
}
