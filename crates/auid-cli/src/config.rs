use core::time::Duration;

use anyhow::{Context, bail};
use auid::{BitLayout, DEFAULT_EPOCH};
use clap::{Parser, Subcommand};

/// Default epoch in milliseconds since 1970-01-01 UTC.
const DEFAULT_EPOCH_MS: u64 = DEFAULT_EPOCH.as_millis() as u64;

/// Settings shared by every subcommand.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file in the working directory is loaded first). A deployment minting ids
/// must use the same layout, epoch and tick size everywhere, and a distinct
/// origin id per process.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "auid",
    version,
    about = "Mint, parse and inspect compact sortable identifiers"
)]
pub struct CliArgs {
    /// Width of the timestamp field.
    ///
    /// Environment variable: `AUID_TIMESTAMP_BITS`
    #[arg(long, global = true, env = "AUID_TIMESTAMP_BITS", default_value_t = 41)]
    pub timestamp_bits: u8,

    /// Width of the origin id field.
    ///
    /// Environment variable: `AUID_ORIGIN_BITS`
    #[arg(long, global = true, env = "AUID_ORIGIN_BITS", default_value_t = 12)]
    pub origin_bits: u8,

    /// Width of the sequence field. The three widths must add up to 63.
    ///
    /// Environment variable: `AUID_SEQUENCE_BITS`
    #[arg(long, global = true, env = "AUID_SEQUENCE_BITS", default_value_t = 10)]
    pub sequence_bits: u8,

    /// Origin id stamped into minted ids. When unset, it is derived from the
    /// host's primary network address.
    ///
    /// Environment variable: `AUID_ORIGIN_ID`
    #[arg(long, global = true, env = "AUID_ORIGIN_ID")]
    pub origin_id: Option<u64>,

    /// Clock epoch in milliseconds since 1970-01-01 UTC.
    ///
    /// Environment variable: `AUID_EPOCH_MS`
    #[arg(long, global = true, env = "AUID_EPOCH_MS", default_value_t = DEFAULT_EPOCH_MS)]
    pub epoch_ms: u64,

    /// Duration of one clock tick in milliseconds.
    ///
    /// Environment variable: `AUID_TICK_MS`
    #[arg(long, global = true, env = "AUID_TICK_MS", default_value_t = 1)]
    pub tick_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mint new identifiers, one per line.
    Mint {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print the raw integer of an identifier.
    Parse { id: String },
    /// Print the fields of an identifier under the configured layout.
    Inspect {
        id: String,
        /// Treat ID as a raw integer instead of its text form.
        #[arg(long)]
        raw: bool,
    },
    /// Print a sortable moment marker (not unique).
    Marker {
        /// 9 characters including sequence and origin bits, instead of 7.
        #[arg(long)]
        extended: bool,
    },
    /// Print the text form of a raw integer.
    Encode { value: i64 },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub layout: BitLayout,
    pub origin_id: Option<u64>,
    pub epoch: Duration,
    pub tick: Duration,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let layout = BitLayout::new(args.timestamp_bits, args.origin_bits, args.sequence_bits)
            .context("invalid AUID_TIMESTAMP_BITS/AUID_ORIGIN_BITS/AUID_SEQUENCE_BITS")?;

        if args.tick_ms == 0 {
            bail!("AUID_TICK_MS must be greater than 0");
        }

        if let Some(origin_id) = args.origin_id {
            if origin_id > layout.max_origin_id() {
                bail!(
                    "AUID_ORIGIN_ID ({}) exceeds the origin id space (max = {})",
                    origin_id,
                    layout.max_origin_id()
                );
            }
        }

        if args.command == (Command::Mint { count: 0 }) {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            layout,
            origin_id: args.origin_id,
            epoch: Duration::from_millis(args.epoch_ms),
            tick: Duration::from_millis(args.tick_ms),
            command: args.command,
        })
    }
}
