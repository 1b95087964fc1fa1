use crate::format::{annotate, fixed, int2, repr};
use crate::scalar::{field, fields, Scalar};
use crate::species::{line_at, RUN_START};
use crate::{FieldWarning, WarningKind};
use std::fmt::Write;

/// Number of lines in a concentration grid block
pub const GRID_LINES: usize = 10;

const NOTE_PAD: usize = 2;

/// Level recorded for a level token that is not a number
pub const UNKNOWN_LEVEL: f64 = -1.0;

/// How a grid aggregates concentrations over its output interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Average over each output interval (code 0)
    Average,

    /// Instantaneous value at each output interval (code 1)
    Snapshot,

    /// Maximum over each output interval (code 2)
    Maximum,

    /// Average over the given number of hours, output at the interval
    /// (negative codes)
    RollingAverage(u32),
}

impl SampleKind {
    /// Interpret a sample type code. Codes above 2 have no defined meaning.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SampleKind::Average),
            1 => Some(SampleKind::Snapshot),
            2 => Some(SampleKind::Maximum),
            x if x < 0 => Some(SampleKind::RollingAverage(x.unsigned_abs())),
            _ => None,
        }
    }
}

/// An output concentration grid, 10 lines in a CONTROL file:
///
/// ```plain
/// 0.0 0.0                   center (lat lon)
/// 0.1 0.1                   spacing (degrees)
/// 90.00 360.00              span (degrees)
/// ./                        output directory
/// cdump                     output file
/// 1                         number of levels
/// 50.0                      levels (m agl)
/// 00 00 00 00 00            sampling start
/// 00 00 00 00 00            sampling stop
/// 00 01 00                  sample type, interval hours, interval minutes
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcentrationGrid {
    center: (f64, f64),
    spacing: (f64, f64),
    span: (f64, f64),
    outdir: String,
    outfile: String,
    level_count: usize,
    levels: Vec<f64>,
    sample_start: String,
    sample_stop: String,
    sample_type: i32,
    interval: (i32, i32),
}

impl Default for ConcentrationGrid {
    fn default() -> Self {
        ConcentrationGrid::new(Vec::new())
    }
}

impl ConcentrationGrid {
    /// A global grid at the given heights. The level count follows the
    /// level list.
    pub fn new(levels: Vec<f64>) -> Self {
        ConcentrationGrid {
            center: (0.0, 0.0),
            spacing: (0.1, 0.1),
            span: (90.0, 360.0),
            outdir: String::from("./"),
            outfile: String::from("cdump"),
            level_count: levels.len(),
            levels,
            sample_start: String::from(RUN_START),
            sample_stop: String::from(RUN_START),
            sample_type: 0,
            interval: (1, 0),
        }
    }

    /// Decode a 10 line grid block.
    ///
    /// Levels are appended to any levels already present. A center, spacing,
    /// span, or level count that is not a number aborts the decode of this
    /// record with the returned warning; fields decoded before the failure
    /// keep their new values. Other bad fields only add to `warnings`.
    ///
    /// ```
    /// use hycs::ConcentrationGrid;
    ///
    /// let block = [
    ///     "35.0 -106.0", "0.05 0.05", "10.0 10.0", "./", "cdump",
    ///     "3", "100 500", "00 00 00 00 00", "00 00 00 00 00", "00 01 00",
    /// ];
    /// let mut grid = ConcentrationGrid::default();
    /// let mut warnings = Vec::new();
    /// assert!(grid.decode(&block, &mut warnings).is_ok());
    /// assert_eq!(grid.level_count(), 3);
    /// assert_eq!(grid.levels(), &[100.0, 500.0]);
    /// assert_eq!(warnings.len(), 1);
    /// ```
    pub fn decode<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        warnings: &mut Vec<FieldWarning>,
    ) -> Result<(), FieldWarning> {
        self.center = pair(lines, 0, ("center latitude", "center longitude"))?;
        self.spacing = pair(lines, 1, ("spacing of latitude", "spacing of longitude"))?;
        self.span = pair(lines, 2, ("span of latitude", "span of longitude"))?;
        self.outdir = line_at(lines, 3).trim().to_string();
        self.outfile = line_at(lines, 4).trim().to_string();

        let count = Scalar::new(line_at(lines, 5));
        match count.to_usize() {
            Ok(x) => self.level_count = x,
            Err(_) => {
                self.level_count = 0;
                return Err(
                    FieldWarning::new("number of levels", count.as_str(), WarningKind::NotAnInteger)
                        .at(5),
                );
            }
        }

        for level in fields(line_at(lines, 6)) {
            match level.to_f64() {
                Ok(x) => self.levels.push(x),
                Err(_) => {
                    FieldWarning::new("level", level.as_str(), WarningKind::NotANumber)
                        .at(6)
                        .push_to(warnings);
                    self.levels.push(UNKNOWN_LEVEL);
                }
            }
        }

        if let Some(warning) = self.check() {
            warning.at(6).push_to(warnings);
        }

        self.sample_start = line_at(lines, 7).trim().to_string();
        self.sample_stop = line_at(lines, 8).trim().to_string();

        let kind = line_at(lines, 9);
        let code = field(kind, 0);
        match code.to_i32() {
            Ok(x) => self.sample_type = x,
            Err(_) => FieldWarning::new("sample type", code.as_str(), WarningKind::NotAnInteger)
                .at(9)
                .push_to(warnings),
        }

        let hours = field(kind, 1);
        let minutes = field(kind, 2);
        match (hours.to_i32(), minutes.to_i32()) {
            (Ok(h), Ok(m)) => self.interval = (h, m),
            _ => FieldWarning::new(
                "interval",
                format!("{} {}", hours, minutes),
                WarningKind::NotAnInteger,
            )
            .at(9)
            .push_to(warnings),
        }

        Ok(())
    }

    /// Encode the 10 line grid block.
    ///
    /// The declared level count is written even when it disagrees with the
    /// level list; see [ConcentrationGrid::check].
    pub fn encode(&self, annotate_lines: bool) -> Vec<String> {
        let mut levels = String::new();
        for level in &self.levels {
            let _ = write!(levels, "{} ", repr(*level));
        }

        let sample = format!(
            "{} {} {}",
            int2(i64::from(self.sample_type)),
            int2(i64::from(self.interval.0)),
            int2(i64::from(self.interval.1))
        );
        let sample_note = format!(" {}", self.classify_or_code());

        let lines = [
            (
                format!("{} {}", repr(self.center.0), repr(self.center.1)),
                "Concentration Grid Center (latitude longitude)",
            ),
            (
                format!("{} {}", repr(self.spacing.0), repr(self.spacing.1)),
                "Concentration grid spacing (degrees latitude longitude)",
            ),
            (
                format!("{} {}", fixed(self.span.0, 0, 2), fixed(self.span.1, 0, 2)),
                "Concentration grid span (degrees latitude longitude)",
            ),
            (
                self.outdir.clone(),
                "Directory to write concentration output file",
            ),
            (
                self.outfile.trim().to_string(),
                "Filename for concentration output file",
            ),
            (
                self.level_count.to_string(),
                "Number of vertical levels for concentration grid",
            ),
            (levels, "List of vertical levels for concentration grid"),
            (
                self.sample_start.clone(),
                "Sampling start time of concentration grid",
            ),
            (
                self.sample_stop.clone(),
                "Sampling stop time of concentration grid",
            ),
            (sample, sample_note.as_str()),
        ];

        lines
            .iter()
            .map(|(line, note)| {
                if annotate_lines {
                    annotate(line.clone(), NOTE_PAD, note)
                } else {
                    line.clone()
                }
            })
            .collect()
    }

    /// Describe the sampling of this grid, eg: "snapshot every 03:00".
    ///
    /// Returns `None` for sample type codes above 2, which have no defined
    /// meaning.
    ///
    /// ```
    /// use hycs::ConcentrationGrid;
    ///
    /// let mut grid = ConcentrationGrid::default();
    /// grid.set_sample_type(-3);
    /// grid.set_interval(1, 0);
    /// assert_eq!(
    ///     grid.classify_interval().as_deref(),
    ///     Some("average over 3 hours with output every 01:00")
    /// );
    /// ```
    pub fn classify_interval(&self) -> Option<String> {
        let every = format!("{:02}:{:02}", self.interval.0, self.interval.1);
        let kind = SampleKind::from_code(self.sample_type)?;
        let desc = match kind {
            SampleKind::Average => format!("average over {} with output every {}", every, every),
            SampleKind::Snapshot => format!("snapshot every {}", every),
            SampleKind::Maximum => format!("maximum every {}", every),
            SampleKind::RollingAverage(hours) => {
                format!("average over {} hours with output every {}", hours, every)
            }
        };
        Some(desc)
    }

    fn classify_or_code(&self) -> String {
        self.classify_interval()
            .unwrap_or_else(|| format!("sample type {}", self.sample_type))
    }

    /// A multi-line human readable description of the grid
    pub fn describe(&self) -> String {
        let mut result = String::new();
        let levels: Vec<String> = self.levels.iter().map(|x| repr(*x)).collect();
        let _ = writeln!(
            result,
            "Center of Lat and Lon: {} {}",
            repr(self.center.0),
            repr(self.center.1)
        );
        let _ = writeln!(
            result,
            "Spacing (deg) Lat, Lon: {} {}",
            repr(self.spacing.0),
            repr(self.spacing.1)
        );
        let _ = writeln!(
            result,
            "Span (deg) Lat, Lon: {} {}",
            repr(self.span.0),
            repr(self.span.1)
        );
        let _ = writeln!(result, "Output grid directory: {}", self.outdir);
        let _ = writeln!(result, "Output grid file name: {}", self.outfile);
        let _ = writeln!(result, "Num of vertical levels: {}", self.level_count);
        let _ = writeln!(result, "Height of levels (M Agl) : {}", levels.join(" "));
        let _ = writeln!(
            result,
            "Sampling start (yy mm dd hh min) : {}",
            self.sample_start
        );
        let _ = writeln!(
            result,
            "Sampling stop (yy mm dd hh min) : {}",
            self.sample_stop
        );
        let _ = writeln!(result, "Sampling: {}", self.classify_or_code());
        let _ = writeln!(
            result,
            "Interval (hh min) {} {}",
            self.interval.0, self.interval.1
        );
        result
    }

    /// A warning if the declared level count differs from the level list
    pub fn check(&self) -> Option<FieldWarning> {
        if self.level_count == self.levels.len() {
            None
        } else {
            Some(FieldWarning::new(
                "number of levels",
                self.level_count.to_string(),
                WarningKind::LevelCountMismatch {
                    declared: self.level_count,
                    actual: self.levels.len(),
                },
            ))
        }
    }

    /// Center (latitude, longitude)
    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn set_center(&mut self, latitude: f64, longitude: f64) {
        self.center = (latitude, longitude);
    }

    /// Spacing in degrees (latitude, longitude)
    pub fn spacing(&self) -> (f64, f64) {
        self.spacing
    }

    pub fn set_spacing(&mut self, latitude: f64, longitude: f64) {
        self.spacing = (latitude, longitude);
    }

    /// Span in degrees (latitude, longitude)
    pub fn span(&self) -> (f64, f64) {
        self.span
    }

    pub fn set_span(&mut self, latitude: f64, longitude: f64) {
        self.span = (latitude, longitude);
    }

    pub fn outdir(&self) -> &str {
        &self.outdir
    }

    pub fn outfile(&self) -> &str {
        &self.outfile
    }

    pub fn set_output(&mut self, outdir: impl Into<String>, outfile: impl Into<String>) {
        self.outdir = outdir.into();
        self.outfile = outfile.into();
    }

    /// The declared number of levels
    pub fn level_count(&self) -> usize {
        self.level_count
    }

    /// Override the declared number of levels without touching the list
    pub fn set_level_count(&mut self, count: usize) {
        self.level_count = count;
    }

    /// Level heights (m agl)
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Replace the levels, updating the declared count to match
    pub fn set_levels(&mut self, levels: Vec<f64>) {
        self.level_count = levels.len();
        self.levels = levels;
    }

    pub fn sample_start(&self) -> &str {
        &self.sample_start
    }

    pub fn sample_stop(&self) -> &str {
        &self.sample_stop
    }

    /// Set the sampling window (`yy mm dd hh mm` or the all-zero sentinel)
    pub fn set_sampling(&mut self, start: impl Into<String>, stop: impl Into<String>) {
        self.sample_start = start.into();
        self.sample_stop = stop.into();
    }

    pub fn sample_type(&self) -> i32 {
        self.sample_type
    }

    pub fn set_sample_type(&mut self, code: i32) {
        self.sample_type = code;
    }

    /// Output interval (hours, minutes)
    pub fn interval(&self) -> (i32, i32) {
        self.interval
    }

    pub fn set_interval(&mut self, hours: i32, minutes: i32) {
        self.interval = (hours, minutes);
    }
}

fn pair<S: AsRef<str>>(
    lines: &[S],
    idx: usize,
    names: (&'static str, &'static str),
) -> Result<(f64, f64), FieldWarning> {
    let line = line_at(lines, idx);
    let first = field(line, 0);
    let first = first
        .to_f64()
        .map_err(|_| FieldWarning::new(names.0, first.as_str(), WarningKind::NotANumber).at(idx))?;
    let second = field(line, 1);
    let second = second
        .to_f64()
        .map_err(|_| FieldWarning::new(names.1, second.as_str(), WarningKind::NotANumber).at(idx))?;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn block() -> Vec<&'static str> {
        vec![
            "35.0 -106.0",
            "0.05 0.05",
            "10.0 10.0",
            "/home/output/",
            "cdump.ash",
            "2",
            "100 5000",
            "00 00 00 00 00",
            "00 00 00 00 00",
            "00 03 00",
        ]
    }

    #[test]
    fn test_decode() {
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        grid.decode(&block(), &mut warnings).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(grid.center(), (35.0, -106.0));
        assert_eq!(grid.spacing(), (0.05, 0.05));
        assert_eq!(grid.span(), (10.0, 10.0));
        assert_eq!(grid.outdir(), "/home/output/");
        assert_eq!(grid.outfile(), "cdump.ash");
        assert_eq!(grid.level_count(), 2);
        assert_eq!(grid.levels(), &[100.0, 5000.0]);
        assert_eq!(grid.sample_type(), 0);
        assert_eq!(grid.interval(), (3, 0));
    }

    #[test]
    fn test_decode_level_count_mismatch() {
        let mut lines = block();
        lines[5] = "3";
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        assert!(grid.decode(&lines, &mut warnings).is_ok());
        assert_eq!(grid.level_count(), 3);
        assert_eq!(grid.levels().len(), 2);
        assert_eq!(
            warnings[0].kind(),
            &WarningKind::LevelCountMismatch {
                declared: 3,
                actual: 2
            }
        );
        assert_eq!(warnings[0].line(), Some(6));
    }

    #[test]
    fn test_decode_appends_levels() {
        let mut grid = ConcentrationGrid::new(vec![50.0]);
        let mut warnings = Vec::new();
        grid.decode(&block(), &mut warnings).unwrap();
        assert_eq!(grid.levels(), &[50.0, 100.0, 5000.0]);
        assert_eq!(grid.level_count(), 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_decode_bad_level_token() {
        let mut lines = block();
        lines[6] = "100 high";
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        grid.decode(&lines, &mut warnings).unwrap();
        assert_eq!(grid.levels(), &[100.0, UNKNOWN_LEVEL]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field(), "level");
    }

    #[rstest]
    #[case(0, "north -106.0", "center latitude")]
    #[case(1, "0.05 wide", "spacing of longitude")]
    #[case(2, "", "span of latitude")]
    #[case(5, "two", "number of levels")]
    fn test_decode_aborts(#[case] idx: usize, #[case] line: &'static str, #[case] field: &str) {
        let mut lines = block();
        lines[idx] = line;
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        let err = grid.decode(&lines, &mut warnings).unwrap_err();
        assert_eq!(err.field(), field);
        assert_eq!(err.line(), Some(idx));
    }

    #[test]
    fn test_decode_abort_keeps_parsed_fields() {
        let mut lines = block();
        lines[2] = "ten ten";
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        assert!(grid.decode(&lines, &mut warnings).is_err());
        assert_eq!(grid.center(), (35.0, -106.0));
        assert_eq!(grid.spacing(), (0.05, 0.05));
        assert_eq!(grid.span(), (90.0, 360.0));
    }

    #[test]
    fn test_decode_bad_sample_line_continues() {
        let mut lines = block();
        lines[9] = "avg 03 xx";
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        assert!(grid.decode(&lines, &mut warnings).is_ok());
        assert_eq!(grid.sample_type(), 0);
        assert_eq!(grid.interval(), (1, 0));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_decode_out_of_range_sample_line() {
        let mut lines = block();
        lines[9] = "4294967293 4294967297 00";
        let mut grid = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        assert!(grid.decode(&lines, &mut warnings).is_ok());
        assert_eq!(grid.sample_type(), 0);
        assert_eq!(grid.interval(), (1, 0));

        let fields: Vec<_> = warnings.iter().map(|x| (x.field(), x.line())).collect();
        assert_eq!(fields, vec![("sample type", Some(9)), ("interval", Some(9))]);
        assert!(warnings.iter().all(|x| x.kind() == &WarningKind::NotAnInteger));
        assert_eq!(grid.encode(false)[9], "00 01 00");
    }

    #[test]
    fn test_encode() {
        let mut grid = ConcentrationGrid::new(vec![100.0, 5000.0]);
        grid.set_center(35.0, -106.0);
        grid.set_spacing(0.05, 0.05);
        grid.set_span(10.0, 12.5);
        grid.set_sample_type(-3);
        grid.set_interval(1, 0);
        assert_eq!(
            grid.encode(false),
            vec![
                "35.0 -106.0",
                "0.05 0.05",
                "10.00 12.50",
                "./",
                "cdump",
                "2",
                "100.0 5000.0 ",
                "00 00 00 00 00",
                "00 00 00 00 00",
                "-3 01 00",
            ]
        );
    }

    #[test]
    fn test_encode_declared_count_wins() {
        let mut grid = ConcentrationGrid::new(vec![100.0]);
        grid.set_level_count(4);
        let lines = grid.encode(false);
        assert_eq!(lines[5], "4");
        assert_eq!(lines[6], "100.0 ");
        assert!(grid.check().is_some());
    }

    #[test]
    fn test_encode_annotated() {
        let grid = ConcentrationGrid::new(vec![50.0]);
        let plain = grid.encode(true);
        assert_eq!(plain[6], "50.0   #List of vertical levels for concentration grid");
        assert_eq!(plain[9], "00 01 00  # average over 01:00 with output every 01:00");
    }

    #[rstest]
    #[case(0, (1, 0), Some("average over 01:00 with output every 01:00"))]
    #[case(1, (3, 30), Some("snapshot every 03:30"))]
    #[case(2, (24, 0), Some("maximum every 24:00"))]
    #[case(-3, (1, 0), Some("average over 3 hours with output every 01:00"))]
    #[case(-12, (6, 0), Some("average over 12 hours with output every 06:00"))]
    #[case(3, (1, 0), None)]
    fn test_classify_interval(
        #[case] code: i32,
        #[case] interval: (i32, i32),
        #[case] expected: Option<&str>,
    ) {
        let mut grid = ConcentrationGrid::default();
        grid.set_sample_type(code);
        grid.set_interval(interval.0, interval.1);
        assert_eq!(grid.classify_interval().as_deref(), expected);
    }

    #[test]
    fn test_roundtrip() {
        let mut grid = ConcentrationGrid::new(vec![0.0, 100.0, 1500.5]);
        grid.set_center(-37.75, 144.875);
        grid.set_spacing(0.25, 0.25);
        grid.set_span(30.0, 40.0);
        grid.set_output("/tmp/run/", "cdump_melb");
        grid.set_sampling("11 03 12 00 00", "11 03 14 00 00");
        grid.set_sample_type(1);
        grid.set_interval(6, 30);

        let mut decoded = ConcentrationGrid::default();
        let mut warnings = Vec::new();
        decoded.decode(&grid.encode(false), &mut warnings).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_describe() {
        let grid = ConcentrationGrid::new(vec![50.0]);
        let desc = grid.describe();
        assert!(desc.contains("Num of vertical levels: 1\n"));
        assert!(desc.contains("Height of levels (M Agl) : 50.0\n"));
        assert!(desc.contains("Sampling: average over 01:00"));
    }
}
