//! `auid`: mint, parse and inspect identifiers from a shell.
//!
//! ```bash
//! auid --origin-id 7 mint -n 3
//! auid inspect 000004Zr3GJ
//! auid inspect --raw 4194347015
//! AUID_TICK_MS=10 auid marker --extended
//! ```

mod config;
mod telemetry;

use anyhow::Context;
use auid::{
    Auid, AuidFactory, ConstantOriginId, MonotonicClock, NetworkOriginId, OriginIdProvider,
};
use clap::Parser;
use config::{CliArgs, CliConfig, Command};
use telemetry::init_telemetry;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;
    debug!(?config, "starting");

    // Returned errors are printed once, by the runtime.
    run(config)
}

fn run(config: CliConfig) -> anyhow::Result<()> {
    match config.command {
        Command::Mint { count } => {
            let factory = build_factory(&config, true)?;
            for _ in 0..count {
                println!("{}", factory.new_id()?);
            }
        }
        Command::Parse { ref id } => {
            let id = Auid::parse(id).with_context(|| format!("cannot parse {id:?}"))?;
            println!("{}", id.value());
        }
        Command::Inspect { ref id, raw } => {
            // Extraction only needs the layout and the clock.
            let factory = build_factory(&config, false)?;
            let info = if raw {
                let value: u64 = id.parse().with_context(|| format!("not an integer: {id:?}"))?;
                factory.extract_raw(value)?
            } else {
                factory.parse_info(id)?
            };
            println!("{info}");
            println!("minted at {:?}", info.timestamp());
        }
        Command::Marker { extended } => {
            let factory = build_factory(&config, true)?;
            let marker = if extended {
                factory.timestamp_ex()?
            } else {
                factory.timestamp()?
            };
            println!("{marker}");
        }
        Command::Encode { value } => {
            println!("{}", Auid::try_from(value)?);
        }
    }
    Ok(())
}

fn build_factory(
    config: &CliConfig,
    needs_origin: bool,
) -> anyhow::Result<AuidFactory<MonotonicClock>> {
    let clock = MonotonicClock::new(config.epoch, config.tick).context("cannot start clock")?;
    let origin: Box<dyn OriginIdProvider> = match config.origin_id {
        Some(origin_id) => Box::new(ConstantOriginId::new(origin_id)),
        None if needs_origin => Box::new(NetworkOriginId::new()),
        None => Box::new(ConstantOriginId::new(0)),
    };
    AuidFactory::new(config.layout, origin.as_ref(), clock).context("cannot build factory")
}
