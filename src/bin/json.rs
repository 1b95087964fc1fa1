//! Utility to print a HYSPLIT CONTROL file from stdin as JSON, along with any
//! warnings found while decoding.

use std::{error, io};

fn main() -> Result<(), Box<dyn error::Error>> {
    let decoded = hycs::ControlFile::from_reader(io::stdin().lock())?;
    let stdout = io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &decoded)?;
    println!();
    Ok(())
}
