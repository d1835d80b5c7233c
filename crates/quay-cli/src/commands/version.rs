//! `quay version` command implementation.

use miette::Result;

pub fn run() -> Result<()> {
    println!("quay {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
