use std::fmt;
use std::io;

/// A fatal error that aborts decoding (or writing) of a whole file
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Returns the zero based line index where the error was detected (if
    /// available)
    pub fn line(&self) -> Option<usize> {
        self.0.line()
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// Fewer lines remain in the input than the current block requires
    Eof {
        line: usize,
        needed: usize,
        remaining: usize,
    },

    /// A count field (locations, met files, species, grids, deposition
    /// species) was not a non-negative integer
    InvalidCount {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The run start date did not consist of four integer tokens
    InvalidStartDate { line: usize, value: String },

    /// An error occurred when reading or writing the backing text
    Io(io::Error),
}

impl ErrorKind {
    pub fn line(&self) -> Option<usize> {
        match *self {
            ErrorKind::Eof { line, .. } => Some(line),
            ErrorKind::InvalidCount { line, .. } => Some(line),
            ErrorKind::InvalidStartDate { line, .. } => Some(line),
            ErrorKind::Io(_) => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Eof {
                line,
                needed,
                remaining,
            } => write!(
                f,
                "unexpected end of file (line: {}, needed: {} lines, remaining: {})",
                line + 1,
                needed,
                remaining
            ),
            ErrorKind::InvalidCount {
                line,
                field,
                ref value,
            } => write!(
                f,
                "{} is not a non-negative integer (line: {}, value: {:?})",
                field,
                line + 1,
                value
            ),
            ErrorKind::InvalidStartDate { line, ref value } => write!(
                f,
                "start date is not four integer fields (line: {}, value: {:?})",
                line + 1,
                value
            ),
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}

/// The kind of problem a [FieldWarning] reports
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WarningKind {
    /// Field expected a float
    NotANumber,

    /// Field expected an integer
    NotAnInteger,

    /// Field expected a `yy mm dd hh mm` timestamp
    InvalidDate,

    /// A grid's declared level count disagrees with its level list
    LevelCountMismatch { declared: usize, actual: usize },

    /// The deposition block count disagrees with the emission species count
    DepositionCountMismatch { species: usize, deposition: usize },
}

/// A recoverable problem with a single field.
///
/// The affected field keeps its default (or previously decoded) value and
/// decoding continues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldWarning {
    line: Option<usize>,
    field: &'static str,
    value: String,
    kind: WarningKind,
}

impl FieldWarning {
    pub(crate) fn new(field: &'static str, value: impl Into<String>, kind: WarningKind) -> Self {
        FieldWarning {
            line: None,
            field,
            value: value.into(),
            kind,
        }
    }

    pub(crate) fn at(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Shift a record relative line index into an absolute file line index
    pub(crate) fn offset(mut self, base: usize) -> Self {
        self.line = self.line.map(|x| x + base);
        self
    }

    /// Record the warning. Logging is left to the caller that knows the
    /// absolute line.
    pub(crate) fn push_to(self, warnings: &mut Vec<FieldWarning>) {
        warnings.push(self);
    }

    /// The zero based line index of the offending field (if known)
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Name of the field that failed
    pub fn field(&self) -> &str {
        self.field
    }

    /// The raw text that was rejected
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> &WarningKind {
        &self.kind
    }
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            WarningKind::NotANumber => write!(f, "{} not a float: {:?}", self.field, self.value)?,
            WarningKind::NotAnInteger => {
                write!(f, "{} not an integer: {:?}", self.field, self.value)?
            }
            WarningKind::InvalidDate => write!(f, "{} not valid: {:?}", self.field, self.value)?,
            WarningKind::LevelCountMismatch { declared, actual } => write!(
                f,
                "{} declares {} levels but {} are listed",
                self.field, declared, actual
            )?,
            WarningKind::DepositionCountMismatch {
                species,
                deposition,
            } => write!(
                f,
                "{} is {} but {} species are defined",
                self.field, deposition, species
            )?,
        }

        if let Some(line) = self.line {
            write!(f, " (line: {})", line + 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_one_based() {
        let err = Error::new(ErrorKind::Eof {
            line: 4,
            needed: 10,
            remaining: 3,
        });
        assert_eq!(err.line(), Some(4));
        assert_eq!(
            err.to_string(),
            "unexpected end of file (line: 5, needed: 10 lines, remaining: 3)"
        );
    }

    #[test]
    fn warning_offset_and_display() {
        let warning = FieldWarning::new("rate", "abc", WarningKind::NotANumber)
            .at(1)
            .offset(10);
        assert_eq!(warning.line(), Some(11));
        assert_eq!(warning.to_string(), "rate not a float: \"abc\" (line: 12)");
    }
}
