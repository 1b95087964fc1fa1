use crate::scalar::Scalar;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// An error reading or writing a namelist
#[derive(Debug)]
pub enum NameListError {
    /// A key requested in the write order has no value
    MissingKey(String),

    /// An error occurred when reading or writing the backing text
    Io(io::Error),
}

impl std::error::Error for NameListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NameListError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for NameListError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NameListError::MissingKey(key) => write!(f, "no value for namelist key: {}", key),
            NameListError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<io::Error> for NameListError {
    fn from(error: io::Error) -> Self {
        NameListError::Io(error)
    }
}

/// The group name that opens a namelist file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameListHeader {
    /// `&SETUP`, for SETUP.CFG
    Setup,

    /// `&GEMPARM`, for GEMPARM.CFG used by the global eulerian model
    GemParm,
}

impl NameListHeader {
    /// The header line as written
    pub fn line(&self) -> &'static str {
        match self {
            NameListHeader::Setup => "&SETUP",
            NameListHeader::GemParm => "&GEMPARM ",
        }
    }
}

impl Default for NameListHeader {
    fn default() -> Self {
        NameListHeader::Setup
    }
}

/// Descriptions of the commonly tuned SETUP.CFG keys
const DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "ichem",
        "Chemistry conversion modules. 0:none, 1:matrix , 2:convert, 3:dust",
    ),
    ("qcycle", "Cycling of emission hours"),
    (
        "delt",
        "integration time step (0=autoset, >0= constant ,<0=minimum)",
    ),
    (
        "kmixd",
        "mixed layer obtained from 0:input, 1:temperature, 2: TKE",
    ),
    ("kmix0", "mixing depth. 250 minimum"),
    (
        "kzmis",
        "Vertical mixing profile. 0:No adjustments. 1: vertical diffusivity in PBL single average value",
    ),
    (
        "kbls",
        "Stability computed by (1) Heat and momentum fluxes, 2: Wind and temperature profiles",
    ),
    (
        "kblt",
        "Flag to set vertical turbulence computational method. 1:Beljaars/Holtslag (2):Kanthar/Clayson 3:TKE field 4:Velocity Variances",
    ),
    ("initd", "defines particle or puff mode"),
];

/// A `key=value,` namelist such as SETUP.CFG:
///
/// ```plain
/// &SETUP
/// ichem=3,
/// qcycle=3,
/// /
/// ```
///
/// Keys keep the order they were first set in.
///
/// ```
/// use hycs::NameList;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut setup = NameList::new();
/// setup.set_dust();
/// setup.set("initd", "3");
///
/// let mut out = Vec::new();
/// setup.write(&mut out, None)?;
/// assert_eq!(std::str::from_utf8(&out)?, "&SETUP\nichem=3,\nqcycle=3,\ninitd=3,\n/\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameList {
    header: NameListHeader,
    entries: Vec<(String, String)>,
}

impl NameList {
    /// An empty SETUP.CFG namelist
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty namelist with the given header
    pub fn with_header(header: NameListHeader) -> Self {
        NameList {
            header,
            entries: Vec::new(),
        }
    }

    pub fn header(&self) -> NameListHeader {
        self.header
    }

    pub fn set_header(&mut self, header: NameListHeader) {
        self.header = header;
    }

    /// Read `key=value,` lines into this namelist.
    ///
    /// Every line holding an `=` is split at the first `=`. Keys are trimmed,
    /// values are trimmed and lose their commas. A key seen again replaces
    /// the earlier value in place. A `&GEMPARM` line switches the header.
    pub fn read<R>(&mut self, reader: R) -> Result<(), NameListError>
    where
        R: BufRead,
    {
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.starts_with("&GEMPARM") {
                self.header = NameListHeader::GemParm;
            }

            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches(',').trim();
                self.set(key.trim(), value);
            }
        }

        Ok(())
    }

    /// Read a namelist file from disk
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, NameListError> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        let file = File::open(path)?;
        let mut result = NameList::new();
        result.read(BufReader::new(file))?;
        Ok(result)
    }

    /// Write the namelist. With an `order`, exactly those keys are written
    /// in that order; otherwise every key in insertion order.
    pub fn write<W>(&self, mut writer: W, order: Option<&[&str]>) -> Result<(), NameListError>
    where
        W: Write,
    {
        writeln!(writer, "{}", self.header.line())?;
        match order {
            Some(keys) => {
                for key in keys {
                    let value = self
                        .get(key)
                        .ok_or_else(|| NameListError::MissingKey(key.to_string()))?;
                    writeln!(writer, "{}={},", key, value)?;
                }
            }
            None => {
                for (key, value) in &self.entries {
                    writeln!(writer, "{}={},", key, value)?;
                }
            }
        }
        writeln!(writer, "/")?;
        writer.flush()?;
        Ok(())
    }

    /// Write a namelist file to disk, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        order: Option<&[&str]>,
    ) -> Result<(), NameListError> {
        let path = path.as_ref();
        log::debug!("writing {}", path.display());
        let file = File::create(path)?;
        self.write(BufWriter::new(file), order)
    }

    /// Set a value, keeping the key's position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Keys and values in order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Switch on the dust emission module with 3 hour emission cycling
    pub fn set_dust(&mut self) {
        self.set("ichem", "3");
        self.set("qcycle", "3");
    }

    /// A description of a well known key
    ///
    /// ```
    /// use hycs::NameList;
    /// assert_eq!(NameList::describe("kmix0"), Some("mixing depth. 250 minimum"));
    /// assert_eq!(NameList::describe("numpar"), None);
    /// ```
    pub fn describe(key: &str) -> Option<&'static str> {
        DESCRIPTIONS
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, desc)| *desc)
    }

    /// The particle or puff mode selected by `initd`, if set to an integer
    pub fn particle_mode(&self) -> Option<&'static str> {
        let mode = Scalar::new(self.get("initd")?).to_i64().ok()?;
        let desc = match mode {
            1 => "Gaussian horizontal and Top-Hat vertical puff",
            2 => "Top-Hat horizontal and vertical puff",
            3 => "Gaussian horizontal puff and vertical particle distribution",
            4 => "Top-Hat horizontal puff and vertical particle distribution",
            _ => "3D particle horizontal and vertical",
        };
        Some(desc)
    }
}
