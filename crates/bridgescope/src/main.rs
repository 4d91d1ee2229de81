mod cli;

use std::io::Read;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;

use bridgescope_core::config::ConfigCell;
use bridgescope_core::json::{to_json, JsonStyle};
use bridgescope_core::TxSnapshot;

use cli::Command;

/// Process-wide config. Only `check-config` loads it; the first load wins.
static CONFIG: ConfigCell = ConfigCell::new();

fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so stdout carries only the JSON document.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    match args.command {
        Command::PrintTx {
            input,
            pretty,
            decimals,
        } => print_tx(&input, JsonStyle::from_pretty_flag(pretty), decimals),
        Command::CheckConfig { pretty } => {
            check_config(args.config.as_deref(), JsonStyle::from_pretty_flag(pretty))
        }
    }
}

fn print_tx(input: &Path, style: JsonStyle, decimals: u8) -> eyre::Result<()> {
    let text = read_input(input)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("input is not valid JSON")?;

    let snapshot = TxSnapshot::from_json_value(value);
    match &snapshot {
        TxSnapshot::Known(authored) => {
            let tx = authored.tx.as_ref();
            let txid = tx.map(|tx| tx.compute_txid().to_string()).unwrap_or_default();
            tracing::info!(
                txid = %txid,
                inputs = tx.map_or(0, |tx| tx.input.len()),
                outputs = tx.map_or(0, |tx| tx.output.len()),
                total_input = %authored.total_input.to_unit_string(decimals),
                change_index = authored.change_index,
                "decoded authored transaction"
            );
            if tx.is_some() && authored.has_change() && authored.change_output().is_none() {
                tracing::warn!(
                    change_index = authored.change_index,
                    "change index does not point at an output"
                );
            }
        }
        TxSnapshot::Opaque(_) => {
            tracing::info!("input is not an authored transaction bundle, printing as-is");
        }
    }

    let encoded = snapshot.encode(style).context("encode snapshot")?;
    println!("{encoded}");
    Ok(())
}

fn check_config(path: Option<&Path>, style: JsonStyle) -> eyre::Result<()> {
    let config = CONFIG
        .get_or_load(path)
        .context("server config is invalid")?;

    tracing::info!(
        api_port = config.api_port(),
        src = %config.src_token.symbol,
        dest = %config.dest_token.symbol,
        "server config is valid"
    );

    println!("{}", to_json(config, style).context("encode config")?);
    Ok(())
}

fn read_input(input: &Path) -> eyre::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(input).with_context(|| format!("read {}", input.display()))
}
