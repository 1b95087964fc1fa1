/*!

A reader and writer for the CONTROL, SETUP.CFG, and ASCDATA.CFG input files of
the [HYSPLIT](https://www.ready.noaa.gov/HYSPLIT.php) atmospheric dispersion
model.

A CONTROL file is a flat sequence of lines with no delimiters between its
records. Where one record ends is only known from the counts written earlier
in the same file (number of release locations, meteorological files,
pollutant species, and concentration grids), so decoding walks a
[LineCursor](crate::text::LineCursor) through the lines, and encoding derives
every count from the lists it writes. The simulator reads some fields by
column, so numbers are written with the exact widths it expects.

## Features

- ✔ Faithful: Encoding reproduces the simulator's fixed width layout byte for byte
- ✔ Forgiving: A bad content field becomes a [FieldWarning], not a failed decode
- ✔ Strict where it matters: A bad count or a short file is an [Error] with the offending line
- ✔ Annotated output: Optionally append a `#` description to the first line of each kind

## Quick Start

```rust
use hycs::{ConcentrationGrid, ControlFile, ControlWriterBuilder, ReleaseLocation, Species};
use hycs::common::StartDate;
# fn main() -> Result<(), Box<dyn std::error::Error>> {

let mut control = ControlFile::new(StartDate::parse("95 10 16 00")?);
control.add_location(ReleaseLocation::new(40.0, -90.0, 10.0).with_rate(1.0));
control.add_met_file("/data/met/", "oct1618.BIN");
control.add_species(Species::new("TEST"));
control.add_grid(ConcentrationGrid::new(vec![50.0]));

let mut out: Vec<u8> = Vec::new();
ControlWriterBuilder::new()
    .annotate(true)
    .from_writer(&mut out)
    .write_control(&control)?;

let decoded = ControlFile::from_reader(out.as_slice())?;
assert!(decoded.warnings.is_empty());
assert_eq!(decoded.control, control);
# Ok(())
# }
```

## Recoverable problems

Decoding only fails for structural problems. Everything else is reported
alongside the decoded file and logged through the [log](https://docs.rs/log)
facade:

```rust
use hycs::{ControlFile, WarningKind};

let lines = [
    "95 10 16 00",
    "1",
    "40.0 -90.0 10.0",
    "24", "0", "10000.0",
    "0",
    "1",
    "TEST", "lots", "-1.00", "00 00 00 00 00",
    "0",
    "1",
    "099.0 2.5 01.0", "0.0 0.0 0.0 0.0 0.0", "0.0 4.0E+04 5.0E-06", "0.0", "0.0",
];

let decoded = ControlFile::decode(&lines).unwrap();
assert_eq!(decoded.warnings.len(), 1);
assert_eq!(decoded.warnings[0].kind(), &WarningKind::NotANumber);
assert_eq!(decoded.warnings[0].line(), Some(9));
assert_eq!(decoded.control.species()[0].rate(), 1.0);
```

## SETUP.CFG and ASCDATA.CFG

[NameList] reads and writes the `key=value,` namelists that tune the model,
and [write_landuse_file] writes the fixed ASCDATA.CFG that points the model at
its land use data.

*/

pub mod common;
mod control;
mod errors;
pub mod format;
mod grid;
mod landuse;
mod location;
mod namelist;
mod scalar;
mod species;
pub mod text;

pub use self::control::{ControlFile, Decoded, MetFile};
pub use self::errors::*;
pub use self::grid::{ConcentrationGrid, SampleKind, GRID_LINES, UNKNOWN_LEVEL};
pub use self::landuse::{landuse_lines, write_landuse, write_landuse_file, LANDUSE_FILE};
pub use self::location::{ReleaseLocation, DEFAULT_ALTITUDE, UNKNOWN_COORDINATE};
pub use self::namelist::{NameList, NameListError, NameListHeader};
pub use self::scalar::{Scalar, ScalarError};
pub use self::species::{
    EmissionStart, ShapeFormulation, Species, DEFAULT_WET_DEPOSITION, DEPOSITION_LINES,
    EMISSION_LINES, NO_WET_DEPOSITION, RUN_START,
};
pub use self::text::{ControlWriter, ControlWriterBuilder, EncodeOptions};
