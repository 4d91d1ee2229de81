use std::path::PathBuf;
use std::process::{Command, Output};

use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode;
use bitcoin::hashes::Hash;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness};

fn bridgescope() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bridgescope"));
    cmd.env_remove("BRIDGESCOPE_CONFIG").env("RUST_LOG", "info");
    cmd
}

fn scratch_dir(tag: &str) -> PathBuf {
    let unique = format!(
        "bridgescope-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos()
    );
    let dir = std::env::temp_dir().join(unique);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be a JSON document")
}

const SERVER_TOML: &str = r#"
[MongoDB]
DbURL = "localhost:27017"
DbName = "bridge"
Password = "hunter2"

[SrcToken]
BlockChain = "Bitcoin"
NetID = "TestNet3"
Symbol = "BTC"
Decimals = 8
DcrmAddress = "mfwanCuVSSQ5nNBExSVoZ4npVHi5bRfFxQ"
Confirmations = 1
MaximumSwap = 10.0
MinimumSwap = 0.001
SwapFeeRate = 0.001

[SrcGateway]
ApiAddress = "http://127.0.0.1:8332"

[DestToken]
BlockChain = "Fusion"
NetID = "testnet"
Symbol = "mBTC"
Decimals = 8
ContractAddress = "0x61b8c9652c2a5b1b5e1d6b0d8a0a3b5c8b0f0d4e"
Confirmations = 1
MaximumSwap = 10.0
MinimumSwap = 0.001
SwapFeeRate = 0.001

[DestGateway]
ApiAddress = "http://127.0.0.1:40415"

[ApiServer]
Port = 12000
"#;

#[test]
fn print_tx_passes_non_bundle_json_through() {
    let dir = scratch_dir("opaque");
    let input = dir.join("input.json");
    std::fs::write(&input, r#"{ "memo": "not a transaction", "n": [1, 2] }"#)
        .expect("write input");

    let output = bridgescope()
        .args(["print-tx", "--input"])
        .arg(&input)
        .output()
        .expect("run bridgescope");

    assert_eq!(
        stdout_json(&output),
        serde_json::json!({ "memo": "not a transaction", "n": [1, 2] })
    );
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}

#[test]
fn print_tx_decodes_bundled_transaction() {
    let mut script_bytes = vec![0x00, 0x14];
    script_bytes.extend(1u8..=20);
    let tx = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::new(Txid::from_byte_array([0u8; 32]), 0),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_sat(100_000),
            script_pubkey: ScriptBuf::from_bytes(script_bytes),
        }],
    };
    let bundle = serde_json::json!({
        "tx": encode::serialize_hex(&tx),
        "prevInputValues": [150_000],
        "totalInputValue": 150_000,
        "changeIndex": 1,
    });

    let dir = scratch_dir("bundle");
    let input = dir.join("bundle.json");
    std::fs::write(&input, bundle.to_string()).expect("write input");

    let output = bridgescope()
        .args(["print-tx", "--input"])
        .arg(&input)
        .output()
        .expect("run bridgescope");

    let doc = stdout_json(&output);
    assert_eq!(doc["tx"]["txid"], tx.compute_txid().to_string());
    assert_eq!(doc["tx"]["inputs"][0]["value"], 150_000);
    assert_eq!(doc["tx"]["outputs"][0]["value"], 100_000);
    assert_eq!(doc["totalInputValue"], 150_000);
    assert_eq!(doc["changeIndex"], 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("decoded authored transaction"));
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}

#[test]
fn print_tx_without_transaction_prints_bookkeeping() {
    let dir = scratch_dir("bookkeeping");
    let input = dir.join("bundle.json");
    std::fs::write(&input, r#"{ "totalInputValue": 150000, "changeIndex": -1 }"#)
        .expect("write input");

    let output = bridgescope()
        .args(["print-tx", "--pretty", "--input"])
        .arg(&input)
        .output()
        .expect("run bridgescope");

    assert!(String::from_utf8_lossy(&output.stdout).contains("\n  \"totalInputValue\": 150000"));
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({ "totalInputValue": 150000, "changeIndex": -1 })
    );
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}

#[test]
fn print_tx_rejects_invalid_json() {
    let dir = scratch_dir("invalid");
    let input = dir.join("broken.json");
    std::fs::write(&input, "{ not json").expect("write input");

    let output = bridgescope()
        .args(["print-tx", "--input"])
        .arg(&input)
        .output()
        .expect("run bridgescope");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not valid JSON"));
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}

#[test]
fn check_config_prints_config_without_credentials() {
    let dir = scratch_dir("config");
    let config = dir.join("server.toml");
    std::fs::write(&config, SERVER_TOML).expect("write config");

    let output = bridgescope()
        .arg("check-config")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("run bridgescope");

    let doc = stdout_json(&output);
    assert_eq!(doc["MongoDB"]["DbName"], "bridge");
    assert_eq!(doc["ApiServer"]["Port"], 12000);
    assert!(doc["MongoDB"].get("Password").is_none());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("hunter2"));
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}

#[test]
fn check_config_aborts_when_mongodb_is_missing() {
    let dir = scratch_dir("no-mongo");
    let config = dir.join("server.toml");
    let without_mongo = SERVER_TOML.replace(
        "[MongoDB]\nDbURL = \"localhost:27017\"\nDbName = \"bridge\"\nPassword = \"hunter2\"\n",
        "",
    );
    std::fs::write(&config, without_mongo).expect("write config");

    let output = bridgescope()
        .arg("check-config")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("run bridgescope");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("server must config 'MongoDB'"));
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}

#[test]
fn check_config_aborts_when_file_is_missing() {
    let dir = scratch_dir("absent");
    let config = dir.join("absent.toml");

    let output = bridgescope()
        .arg("check-config")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("run bridgescope");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    std::fs::remove_dir_all(&dir).expect("cleanup test dir");
}
