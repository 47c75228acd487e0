//! Scriptmeter CLI.
//!
//! Takes one mempool-API transaction document as its sole argument,
//! decodes it and verifies every input's script, printing one cycle-count
//! line per input.
//!
//! Exit codes: 0 success, 1 usage error, 2 decode failure, 3 script
//! verification failure, 4 no script engine compiled in.

use clap::Parser;
use std::process::ExitCode;

use scriptmeter::{decode_tx, Error, SpentOutputs, Transaction, TxOut};

#[derive(Parser)]
#[command(name = "scriptmeter")]
#[command(about = "Decode a mempool-API transaction and meter script verification", long_about = None)]
#[command(version)]
struct Cli {
    /// Transaction document in the mempool REST API JSON format.
    #[arg(value_name = "TX_JSON")]
    tx_json: String,

    /// Print the decoded transaction and spent outputs as JSON instead
    /// of verifying.
    #[arg(long)]
    decode_only: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::from(1),
            };
        }
    };

    let (tx, spent_outputs) = match decode_tx(cli.tx_json.as_bytes()) {
        Ok(decoded) => decoded,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            return ExitCode::from(2);
        }
    };

    if cli.decode_only {
        return dump(&tx, &spent_outputs);
    }

    verify(&tx, &spent_outputs)
}

/// Print the decode result as JSON.
fn dump(tx: &Transaction, spent_outputs: &SpentOutputs) -> ExitCode {
    #[derive(serde::Serialize)]
    struct Dump<'a> {
        transaction: &'a Transaction,
        spent_outputs: &'a [TxOut],
    }

    let dump = Dump {
        transaction: tx,
        spent_outputs,
    };
    match serde_json::to_string_pretty(&dump) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(feature = "consensus")]
fn verify(tx: &Transaction, spent_outputs: &SpentOutputs) -> ExitCode {
    use scriptmeter::{verify_inputs, ConsensusVerifier, WallClockMeter};

    let verifier = ConsensusVerifier::new();
    let meter = WallClockMeter::new();
    match verify_inputs(tx, spent_outputs, &verifier, &meter) {
        Ok(reports) => {
            for report in reports {
                println!("vin {}: {} cycles", report.input, report.cycles);
            }
            ExitCode::SUCCESS
        }
        Err(err @ Error::Script { .. }) => {
            eprintln!("error[{}]: {err}", err.code());
            ExitCode::from(3)
        }
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            ExitCode::from(2)
        }
    }
}

#[cfg(not(feature = "consensus"))]
fn verify(_tx: &Transaction, _spent_outputs: &SpentOutputs) -> ExitCode {
    let err = Error::EngineUnavailable;
    eprintln!("error[{}]: {err}", err.code());
    ExitCode::from(4)
}
