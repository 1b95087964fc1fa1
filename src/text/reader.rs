use crate::{Error, ErrorKind, Scalar};
use std::io::{self, BufRead};

/// A cursor over the flat line sequence of a CONTROL file.
///
/// Every read advances the cursor. Reads that need more lines than remain
/// fail with [ErrorKind::Eof] and leave the cursor untouched.
///
/// ```
/// use hycs::text::LineCursor;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let lines = ["2", "40.0 -90.0 10.0", "41.0 -91.0 10.0", "24"];
/// let mut cursor = LineCursor::new(&lines);
/// let count = cursor.read_count("number of locations")?;
/// let block = cursor.take(count)?;
/// assert_eq!(block.len(), 2);
/// assert_eq!(cursor.next_line()?, "24");
/// assert!(cursor.take(1).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LineCursor<'data, S> {
    lines: &'data [S],
    line_ind: usize,
}

impl<'data, S> LineCursor<'data, S>
where
    S: AsRef<str>,
{
    pub fn new(lines: &'data [S]) -> Self {
        LineCursor { lines, line_ind: 0 }
    }

    /// The zero based index of the next line to be read
    #[inline]
    pub fn position(&self) -> usize {
        self.line_ind
    }

    /// Number of lines not yet consumed
    #[inline]
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.line_ind
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume the next `n` lines as a block
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'data [S], Error> {
        let start = self.line_ind;
        let lines = self.lines;
        let block = start
            .checked_add(n)
            .and_then(|end| lines.get(start..end))
            .ok_or_else(|| {
                Error::new(ErrorKind::Eof {
                    line: start,
                    needed: n,
                    remaining: self.remaining(),
                })
            })?;
        self.line_ind += n;
        Ok(block)
    }

    /// Consume a single line
    #[inline]
    pub fn next_line(&mut self) -> Result<&'data str, Error> {
        let block = self.take(1)?;
        Ok(block[0].as_ref())
    }

    /// Consume a line holding a count that gates how many of the following
    /// lines belong to the next block.
    pub fn read_count(&mut self, field: &'static str) -> Result<usize, Error> {
        let line = self.line_ind;
        let text = self.next_line()?;
        let count = Scalar::new(text).to_usize().map_err(|_| {
            Error::new(ErrorKind::InvalidCount {
                line,
                field,
                value: text.to_string(),
            })
        })?;
        log::debug!("line {}: {} = {}", line + 1, field, count);
        Ok(count)
    }
}

/// Read every line of a text source, without line terminators
pub fn read_lines<R>(reader: R) -> io::Result<Vec<String>>
where
    R: BufRead,
{
    reader
        .lines()
        .map(|line| line.map(|x| x.trim_end_matches('\r').to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_position() -> Result<(), Box<dyn std::error::Error>> {
        let lines = vec![String::from("a"), String::from("b"), String::from("c")];
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_line()?, "a");
        assert_eq!(cursor.take(2)?.len(), 2);
        assert_eq!(cursor.position(), 3);
        assert!(cursor.is_empty());
        Ok(())
    }

    #[test]
    fn cursor_underrun_does_not_advance() {
        let lines = ["a", "b"];
        let mut cursor = LineCursor::new(&lines);
        cursor.next_line().unwrap();
        let err = cursor.take(4).unwrap_err();
        match err.kind() {
            ErrorKind::Eof {
                line,
                needed,
                remaining,
            } => {
                assert_eq!((*line, *needed, *remaining), (1, 4, 1));
            }
            _ => panic!("unexpected error: {}", err),
        }
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn cursor_take_zero_at_end() {
        let lines: [&str; 0] = [];
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.take(0).unwrap().len(), 0);
        assert!(cursor.next_line().is_err());
    }

    #[test]
    fn read_count_rejects_non_integers() {
        let lines = ["  3 ", "x", "-1"];
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.read_count("number of grids").unwrap(), 3);

        let err = cursor.read_count("number of grids").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidCount { line: 1, .. }));
        assert!(cursor.read_count("number of grids").is_err());
    }

    #[test]
    fn read_lines_strips_terminators() {
        let data = "95 10 16 00\r\n1\n";
        let lines = read_lines(data.as_bytes()).unwrap();
        assert_eq!(lines, vec![String::from("95 10 16 00"), String::from("1")]);
    }
}
