use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bridgescope — audit printer for bridge-authored Bitcoin transactions.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Server config file. Defaults to `server.toml` next to the executable.
    #[arg(long, global = true, env = "BRIDGESCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the audit snapshot of an authored transaction bundle (or any JSON).
    PrintTx {
        /// JSON input file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// Indent the output.
        #[arg(long)]
        pretty: bool,

        /// Decimal precision used for amounts in log output.
        #[arg(long, default_value = "8")]
        decimals: u8,
    },

    /// Load and validate the server config, then print it without credentials.
    CheckConfig {
        /// Indent the output.
        #[arg(long)]
        pretty: bool,
    },
}
