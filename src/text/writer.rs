use crate::{ControlFile, Error};
use std::io::Write;

/// Options that control how a [ControlFile] is rendered.
///
/// Instantiated directly or via [ControlWriterBuilder]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Append a trailing `#` comment describing the field to the first line
    /// of each kind
    pub annotate: bool,

    /// Deliberately write a location count that is off by this amount while
    /// still writing every location line. Used to exercise error handling in
    /// downstream readers. Zero writes a correct file.
    pub location_count_skew: i64,
}

impl EncodeOptions {
    /// Options for a plain, correct file
    pub fn new() -> Self {
        Self::default()
    }
}

/// Write CONTROL file lines to any [Write] sink.
///
/// Instantiated via `ControlWriterBuilder`
#[derive(Debug)]
pub struct ControlWriter<W> {
    writer: W,
    options: EncodeOptions,
}

/// Construct a customized CONTROL writer
///
/// ```
/// use hycs::{ControlFile, ControlWriterBuilder, ReleaseLocation, common::StartDate};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut control = ControlFile::new(StartDate::parse("95 10 16 00")?);
/// control.add_location(ReleaseLocation::new(40.0, -90.0, 10.0));
///
/// let mut out: Vec<u8> = Vec::new();
/// let mut writer = ControlWriterBuilder::new()
///     .location_count_skew(1)
///     .from_writer(&mut out);
/// writer.write_control(&control)?;
///
/// let text = std::str::from_utf8(&out)?;
/// assert!(text.starts_with("95 10 16 00\n2\n40.00 -90.00 10.0\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ControlWriterBuilder {
    options: EncodeOptions,
}

impl<W> ControlWriter<W>
where
    W: Write,
{
    /// Get inner writer, keeping ownership
    pub fn inner(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes this Writer, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// The options this writer renders with
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Write a single line followed by a line terminator
    ///
    /// ```
    /// use hycs::ControlWriterBuilder;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut out: Vec<u8> = Vec::new();
    /// let mut writer = ControlWriterBuilder::new().from_writer(&mut out);
    /// writer.write_line("cdump")?;
    /// assert_eq!(&out, b"cdump\n");
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write each line in order
    pub fn write_lines<I, S>(&mut self, lines: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref())?;
        }

        Ok(())
    }

    /// Encode and write a complete CONTROL file
    pub fn write_control(&mut self, control: &ControlFile) -> Result<(), Error> {
        let lines = control.encode(&self.options);
        self.write_lines(&lines)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl ControlWriterBuilder {
    /// Create a new builder
    pub fn new() -> ControlWriterBuilder {
        ControlWriterBuilder::default()
    }

    /// Start from existing options
    pub fn from_options(options: EncodeOptions) -> ControlWriterBuilder {
        ControlWriterBuilder { options }
    }

    /// Annotate the written file with trailing field descriptions
    pub fn annotate(&mut self, annotate: bool) -> &mut ControlWriterBuilder {
        self.options.annotate = annotate;
        self
    }

    /// Skew the written location count (deliberately corrupt output)
    pub fn location_count_skew(&mut self, skew: i64) -> &mut ControlWriterBuilder {
        self.options.location_count_skew = skew;
        self
    }

    /// The options configured so far
    pub fn build(&self) -> EncodeOptions {
        self.options
    }

    /// Create a writer from the given sink
    pub fn from_writer<W>(&self, writer: W) -> ControlWriter<W>
    where
        W: Write,
    {
        ControlWriter {
            writer,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::StartDate;
    use std::error::Error;

    #[test]
    fn write_lines_in_order() -> Result<(), Box<dyn Error>> {
        let mut out: Vec<u8> = Vec::new();
        let mut writer = ControlWriterBuilder::new().from_writer(&mut out);
        writer.write_lines(vec!["a", "b c", ""])?;
        assert_eq!(std::str::from_utf8(&out)?, "a\nb c\n\n");
        Ok(())
    }

    #[test]
    fn builder_options() {
        let options = ControlWriterBuilder::new()
            .annotate(true)
            .location_count_skew(-1)
            .build();
        assert!(options.annotate);
        assert_eq!(options.location_count_skew, -1);
        assert_eq!(EncodeOptions::new(), EncodeOptions::default());
    }

    #[test]
    fn write_empty_control() -> Result<(), Box<dyn Error>> {
        let control = ControlFile::new(StartDate::from_parts(1, 2, 3, 4).unwrap());
        let mut out: Vec<u8> = Vec::new();
        let mut writer = ControlWriterBuilder::new().from_writer(&mut out);
        writer.write_control(&control)?;
        let written = std::str::from_utf8(&out)?;
        assert!(written.starts_with("01 02 03 04\n0\n"));
        assert_eq!(written.lines().count(), control.encode(&EncodeOptions::new()).len());
        Ok(())
    }
}
