use crate::common::StartDate;
use crate::format::{annotate, integer, repr};
use crate::grid::GRID_LINES;
use crate::species::{DEPOSITION_LINES, EMISSION_LINES};
use crate::text::{read_lines, ControlWriterBuilder, EncodeOptions, LineCursor};
use crate::{
    ConcentrationGrid, Error, ErrorKind, FieldWarning, ReleaseLocation, Scalar, Species,
    WarningKind,
};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const DATE_PAD: usize = 18;
const SCALAR_PAD: usize = 28;
const LOCATION_PAD: usize = 15;
const MET_PAD: usize = 2;

/// Marks the start of a trailing annotation on a data line
const NOTE_MARKER: &str = "  #";

/// A meteorological data file: the directory and filename lines
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetFile {
    directory: String,
    filename: String,
}

impl MetFile {
    pub fn new(directory: impl Into<String>, filename: impl Into<String>) -> Self {
        MetFile {
            directory: directory.into(),
            filename: filename.into(),
        }
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// A HYSPLIT CONTROL file.
///
/// The counts written ahead of each block are always derived from the
/// lengths of the lists held here.
///
/// ```
/// use hycs::{ConcentrationGrid, ControlFile, EncodeOptions, ReleaseLocation, Species};
/// use hycs::common::StartDate;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut control = ControlFile::new(StartDate::parse("95 10 16 00")?);
/// control.add_location(ReleaseLocation::new(40.0, -90.0, 10.0));
/// control.add_met_file("/data/met/", "oct1618.BIN");
/// control.add_species(Species::new("TEST"));
/// control.add_grid(ConcentrationGrid::new(vec![50.0]));
///
/// let lines = control.encode(&EncodeOptions::new());
/// let decoded = ControlFile::decode(&lines)?;
/// assert!(decoded.warnings.is_empty());
/// assert_eq!(decoded.control, control);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlFile {
    start: StartDate,
    locations: Vec<ReleaseLocation>,
    run_duration: i64,
    vertical_motion: i64,
    model_top: f64,
    met_files: Vec<MetFile>,
    species: Vec<Species>,
    grids: Vec<ConcentrationGrid>,
}

/// The result of decoding a CONTROL file: the file and every recoverable
/// problem found along the way
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoded {
    pub control: ControlFile,
    pub warnings: Vec<FieldWarning>,
}

impl ControlFile {
    /// An empty 24 hour forward run using the input vertical motion and a
    /// 10 km model top
    pub fn new(start: StartDate) -> Self {
        ControlFile {
            start,
            locations: Vec::new(),
            run_duration: 24,
            vertical_motion: 0,
            model_top: 10000.0,
            met_files: Vec::new(),
            species: Vec::new(),
            grids: Vec::new(),
        }
    }

    /// Decode a CONTROL file from its lines.
    ///
    /// The counts read along the way decide how many of the following lines
    /// make up each block. A count that is not a non-negative integer, a
    /// start date that is not four integer fields, or running out of lines
    /// mid block fails the whole decode. Bad content fields are recorded as
    /// warnings and decoding carries on.
    ///
    /// Trailing annotations (two spaces then `#`) are ignored.
    pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<Decoded, Error> {
        let lines: Vec<&str> = lines.iter().map(|x| strip_note(x.as_ref())).collect();
        let mut cursor = LineCursor::new(&lines);
        let mut warnings = Vec::new();

        let line = cursor.position();
        let text = cursor.next_line()?;
        let start = StartDate::parse(text).map_err(|_| {
            Error::new(ErrorKind::InvalidStartDate {
                line,
                value: text.trim().to_string(),
            })
        })?;
        let mut control = ControlFile::new(start);

        let count = cursor.read_count("number of locations")?;
        for line in cursor.take(count)? {
            control.locations.push(ReleaseLocation::decode(line));
        }

        let line = cursor.position();
        let scalars = cursor.take(3)?;
        let duration = Scalar::new(scalars[0]);
        match duration.to_i64() {
            Ok(x) => control.run_duration = x,
            Err(_) => FieldWarning::new("run duration", duration.as_str(), WarningKind::NotAnInteger)
                .at(line)
                .push_to(&mut warnings),
        }

        let motion = Scalar::new(scalars[1]);
        match motion.to_i64() {
            Ok(x) => control.vertical_motion = x,
            Err(_) => FieldWarning::new("vertical motion", motion.as_str(), WarningKind::NotAnInteger)
                .at(line + 1)
                .push_to(&mut warnings),
        }

        let top = Scalar::new(scalars[2]);
        match top.to_f64() {
            Ok(x) => control.model_top = x,
            Err(_) => FieldWarning::new("model top", top.as_str(), WarningKind::NotANumber)
                .at(line + 2)
                .push_to(&mut warnings),
        }

        let count = cursor.read_count("number of met files")?;
        for pair in cursor.take(count.saturating_mul(2))?.chunks(2) {
            control.met_files.push(MetFile::new(pair[0].trim(), pair[1].trim()));
        }

        let species_count = cursor.read_count("number of species")?;
        for _ in 0..species_count {
            let base = cursor.position();
            let block = cursor.take(EMISSION_LINES)?;
            let mut found = Vec::new();
            let mut species = Species::new("");
            species.decode_emission(block, &mut found);
            absorb(&mut warnings, found, base);
            control.species.push(species);
        }

        let count = cursor.read_count("number of grids")?;
        for idx in 0..count {
            let base = cursor.position();
            let block = cursor.take(GRID_LINES)?;
            let mut found = Vec::new();
            let mut grid = ConcentrationGrid::default();
            let result = grid.decode(block, &mut found);
            absorb(&mut warnings, found, base);
            match result {
                Ok(()) => control.grids.push(grid),
                Err(warning) => {
                    log::debug!("dropping concentration grid {} at line {}", idx + 1, base + 1);
                    warnings.push(warning.offset(base));
                }
            }
        }

        let line = cursor.position();
        let deposition = cursor.read_count("number of deposition species")?;
        if deposition != species_count {
            FieldWarning::new(
                "number of deposition species",
                deposition.to_string(),
                WarningKind::DepositionCountMismatch {
                    species: species_count,
                    deposition,
                },
            )
            .at(line)
            .push_to(&mut warnings);
        }

        for (idx, species) in control.species.iter_mut().enumerate() {
            if idx >= deposition && cursor.remaining() < DEPOSITION_LINES {
                log::debug!(
                    "no deposition block for species {} of {}",
                    idx + 1,
                    species_count
                );
                break;
            }

            let base = cursor.position();
            let block = cursor.take(DEPOSITION_LINES)?;
            let mut found = Vec::new();
            species.decode_deposition(block, &mut found);
            absorb(&mut warnings, found, base);
        }

        if !cursor.is_empty() {
            log::debug!(
                "ignoring {} trailing lines from line {}",
                cursor.remaining(),
                cursor.position() + 1
            );
        }

        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Ok(Decoded { control, warnings })
    }

    /// Encode the file as lines, ready to be written.
    ///
    /// ```
    /// use hycs::{ControlFile, EncodeOptions, ReleaseLocation};
    /// use hycs::common::StartDate;
    ///
    /// let mut control = ControlFile::new(StartDate::default());
    /// control.add_location(ReleaseLocation::new(40.0, -90.0, 10.0));
    ///
    /// let options = EncodeOptions { location_count_skew: 1, ..EncodeOptions::new() };
    /// let lines = control.encode(&options);
    /// assert_eq!(lines[1], "2");
    /// assert_eq!(lines[2], "40.00 -90.00 10.0");
    /// assert_eq!(lines[3], "24");
    /// ```
    pub fn encode(&self, options: &EncodeOptions) -> Vec<String> {
        for warning in self.validate() {
            log::warn!("{}", warning);
        }

        let note = |line: String, pad: usize, text: &str| {
            if options.annotate {
                annotate(line, pad, text)
            } else {
                line
            }
        };

        let mut result = Vec::with_capacity(self.line_count());
        result.push(note(
            self.start.to_string(),
            DATE_PAD,
            "Start date of simulation",
        ));

        let location_count =
            (self.locations.len() as i64).saturating_add(options.location_count_skew);
        if options.location_count_skew != 0 {
            log::debug!(
                "writing location count {} for {} locations",
                location_count,
                self.locations.len()
            );
        }
        result.push(note(
            integer(location_count),
            SCALAR_PAD,
            "Number of source locations",
        ));
        for (idx, location) in self.locations.iter().enumerate() {
            if idx == 0 {
                result.push(note(location.encode(), LOCATION_PAD, "Lat Lon Altitude"));
            } else {
                result.push(location.encode());
            }
        }

        result.push(note(
            integer(self.run_duration),
            SCALAR_PAD,
            "Duration of run",
        ));
        result.push(note(
            integer(self.vertical_motion),
            SCALAR_PAD,
            "Vertical Motion",
        ));
        result.push(note(
            repr(self.model_top),
            SCALAR_PAD,
            "Top of Model Domain",
        ));

        result.push(note(
            integer(self.met_files.len() as i64),
            SCALAR_PAD,
            "Number of Meteorological Data Files",
        ));
        for (idx, met) in self.met_files.iter().enumerate() {
            if idx == 0 {
                result.push(note(
                    met.directory.clone(),
                    MET_PAD,
                    "Meteorological Data Directory",
                ));
                result.push(note(
                    met.filename.clone(),
                    MET_PAD,
                    "Meteorological Data Filename",
                ));
            } else {
                result.push(met.directory.clone());
                result.push(met.filename.clone());
            }
        }

        let species_count = integer(self.species.len() as i64);
        result.push(note(
            species_count.clone(),
            SCALAR_PAD,
            "Number of Pollutant Species",
        ));
        for (idx, species) in self.species.iter().enumerate() {
            result.extend(species.encode_emission(options.annotate && idx == 0));
        }

        result.push(integer(self.grids.len() as i64));
        for grid in &self.grids {
            result.extend(grid.encode(options.annotate));
        }

        result.push(note(
            species_count,
            SCALAR_PAD,
            "Number of Pollutant Species",
        ));
        for (idx, species) in self.species.iter().enumerate() {
            result.extend(species.encode_deposition(options.annotate && idx == 0));
        }

        result
    }

    fn line_count(&self) -> usize {
        9 + self.locations.len()
            + self.met_files.len() * 2
            + self.species.len() * (EMISSION_LINES + DEPOSITION_LINES)
            + self.grids.len() * GRID_LINES
    }

    /// Problems that will not stop the file from being written but that
    /// the simulator may reject
    pub fn validate(&self) -> Vec<FieldWarning> {
        self.grids.iter().filter_map(|grid| grid.check()).collect()
    }

    /// A short human readable overview
    ///
    /// ```
    /// use hycs::ControlFile;
    /// use hycs::common::StartDate;
    ///
    /// let control = ControlFile::new(StartDate::parse("95 10 16 00").unwrap());
    /// assert!(control.summary().contains("release start date 95 10 16 00"));
    /// ```
    pub fn summary(&self) -> String {
        let mut result = String::from("CONTROL FILE\n");
        let _ = writeln!(result, "release start date {}", self.start);
        let _ = writeln!(
            result,
            "number of release locations {}",
            self.locations.len()
        );
        let _ = writeln!(result, "run time {}", self.run_duration);
        let _ = writeln!(result, "Num of met grids {}", self.met_files.len());
        let _ = writeln!(result, "Num of species {}", self.species.len());
        let _ = writeln!(result, "Num of concentration grids {}", self.grids.len());
        result
    }

    /// Decode from a line oriented reader
    pub fn from_reader<R>(reader: R) -> Result<Decoded, Error>
    where
        R: BufRead,
    {
        let lines = read_lines(reader)?;
        Self::decode(&lines)
    }

    /// Read and decode a CONTROL file from disk
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Decoded, Error> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Encode and write to any sink
    pub fn write_to<W>(&self, writer: W, options: &EncodeOptions) -> Result<(), Error>
    where
        W: Write,
    {
        let mut writer = ControlWriterBuilder::from_options(*options).from_writer(writer);
        writer.write_control(self)
    }

    /// Encode and write a CONTROL file to disk, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(&self, path: P, options: &EncodeOptions) -> Result<(), Error> {
        let path = path.as_ref();
        log::debug!("writing {}", path.display());
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), options)
    }

    pub fn add_location(&mut self, location: ReleaseLocation) {
        self.locations.push(location);
    }

    /// Add a meteorological data file. Directories and filenames are always
    /// added in pairs.
    pub fn add_met_file(&mut self, directory: impl Into<String>, filename: impl Into<String>) {
        self.met_files.push(MetFile::new(directory, filename));
    }

    pub fn add_species(&mut self, species: Species) {
        self.species.push(species);
    }

    pub fn add_grid(&mut self, grid: ConcentrationGrid) {
        self.grids.push(grid);
    }

    pub fn start(&self) -> StartDate {
        self.start
    }

    pub fn set_start(&mut self, start: StartDate) {
        self.start = start;
    }

    pub fn locations(&self) -> &[ReleaseLocation] {
        &self.locations
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Run length in hours. Negative runs backward in time.
    pub fn run_duration(&self) -> i64 {
        self.run_duration
    }

    pub fn set_run_duration(&mut self, hours: i64) {
        self.run_duration = hours;
    }

    /// Vertical motion method code (0 uses the meteorological data)
    pub fn vertical_motion(&self) -> i64 {
        self.vertical_motion
    }

    pub fn set_vertical_motion(&mut self, code: i64) {
        self.vertical_motion = code;
    }

    /// Top of the model domain (m agl)
    pub fn model_top(&self) -> f64 {
        self.model_top
    }

    pub fn set_model_top(&mut self, top: f64) {
        self.model_top = top;
    }

    pub fn met_files(&self) -> &[MetFile] {
        &self.met_files
    }

    pub fn met_file_count(&self) -> usize {
        self.met_files.len()
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn species_mut(&mut self) -> &mut [Species] {
        &mut self.species
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn grids(&self) -> &[ConcentrationGrid] {
        &self.grids
    }

    pub fn grids_mut(&mut self) -> &mut [ConcentrationGrid] {
        &mut self.grids
    }

    pub fn grid_count(&self) -> usize {
        self.grids.len()
    }
}

fn strip_note(line: &str) -> &str {
    match line.find(NOTE_MARKER) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn absorb(warnings: &mut Vec<FieldWarning>, found: Vec<FieldWarning>, base: usize) {
    warnings.extend(found.into_iter().map(|x| x.offset(base)));
}
