//! Utility to normalize a HYSPLIT CONTROL file from stdin to stdout.
//!
//! Warnings found while decoding are printed to stderr. Pass `--annotate` to
//! append field descriptions to the output.

use std::{
    env, error,
    io::{self, BufWriter},
};

fn main() -> Result<(), Box<dyn error::Error>> {
    let annotate = env::args().skip(1).any(|x| x == "--annotate");
    let decoded = hycs::ControlFile::from_reader(io::stdin().lock())?;
    for warning in &decoded.warnings {
        eprintln!("warning: {}", warning);
    }

    let stdout = io::stdout().lock();
    let writer = BufWriter::new(stdout);
    let mut writer = hycs::ControlWriterBuilder::new()
        .annotate(annotate)
        .from_writer(writer);
    writer.write_control(&decoded.control)?;
    Ok(())
}
