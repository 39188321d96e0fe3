//! Checkout Example - terminal checkout lane
//!
//! Scan barcodes (or type them and press Enter), type weights like `0,450`,
//! Escape cancels, F1..F12 are logged as hotkeys, Ctrl+C quits.
//!
//! Run with: RUST_LOG=debug cargo run --example checkout
//!
//! Set PDV_SCANNER_MAX_WEIGHT_KG / PDV_SCANNER_IDLE_RESET_MS to tune the
//! classifier.

use std::io::Write;
use std::time::Duration;

use pdv_scanner::{
    pump, ClassifierConfig, CheckoutSession, ScanEntry, ScannerAdapter, format_weight,
};
use tracing_subscriber::EnvFilter;

fn main() -> pdv_scanner::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClassifierConfig::from_env()?;
    let session = CheckoutSession::builder(config)
        .on_entry(|entry| {
            let line = match entry {
                ScanEntry::Unit { code } => format!("+ 1 x {code}"),
                ScanEntry::Weighed { code, kg } => format!("+ {} {code}", format_weight(*kg)),
            };
            print!("\r\x1b[2K{line}\r\n");
        })
        .on_hotkey(|key| {
            print!("\r\x1b[2K[{key}]\r\n");
            true
        })
        .start()?;

    let mut scanner = ScannerAdapter::open()?;
    let mut last_status = String::new();

    while session.is_running() {
        pump(&mut scanner, Duration::from_millis(50))?;

        let status = session.status_line();
        if status != last_status {
            print!("\r\x1b[2K{status}");
            std::io::stdout().flush()?;
            last_status = status;
        }
    }

    let items = session.entries().len();
    session.end();
    drop(scanner);
    println!("\n{items} item(s) scanned");
    Ok(())
}
