use crate::common::ControlDate;
use crate::format::{annotate, fixed, repr};
use crate::scalar::{field, Scalar};
use crate::{FieldWarning, WarningKind};
use std::fmt;

/// Number of lines in a species emission block
pub const EMISSION_LINES: usize = 4;

/// Number of lines in a species deposition block
pub const DEPOSITION_LINES: usize = 5;

/// Wet deposition parameters written when wet deposition is enabled but
/// never set
pub const DEFAULT_WET_DEPOSITION: &str = "0.0 4.0E+04 5.0E-06";

/// Wet deposition parameters written when wet deposition is disabled
pub const NO_WET_DEPOSITION: &str = "0.0 0.0 0.0";

/// Emission start that means "same as the run start date"
pub const RUN_START: &str = "00 00 00 00 00";

const NOTE_PAD: usize = 20;

#[inline]
pub(crate) fn line_at<S: AsRef<str>>(lines: &[S], idx: usize) -> &str {
    lines.get(idx).map_or("", |x| x.as_ref())
}

/// When a species starts emitting
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmissionStart {
    /// An all-zero sentinel (kept verbatim) meaning the run start date
    RunStart(String),

    /// An explicit timestamp
    At(ControlDate),

    /// Text that was neither the sentinel nor a valid timestamp, kept
    /// verbatim
    Literal(String),
}

impl EmissionStart {
    fn decode(line: &str, warnings: &mut Vec<FieldWarning>) -> Self {
        let text = Scalar::new(line);
        if text.is_zero_date() {
            return EmissionStart::RunStart(text.as_str().to_string());
        }

        match ControlDate::parse(text.as_str()) {
            Ok(date) => EmissionStart::At(date),
            Err(_) => {
                FieldWarning::new("emission start date", text.as_str(), WarningKind::InvalidDate)
                    .at(3)
                    .push_to(warnings);
                EmissionStart::Literal(text.as_str().to_string())
            }
        }
    }
}

impl Default for EmissionStart {
    fn default() -> Self {
        EmissionStart::RunStart(String::from(RUN_START))
    }
}

impl fmt::Display for EmissionStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionStart::RunStart(x) | EmissionStart::Literal(x) => write!(f, "{}", x.trim()),
            EmissionStart::At(date) => write!(f, "{}", date),
        }
    }
}

/// Gravitational settling formulation selected by the sign of the shape
/// factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeFormulation {
    Stokes,
    Ganser,
}

impl fmt::Display for ShapeFormulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeFormulation::Stokes => write!(f, "Stokes Formulation"),
            ShapeFormulation::Ganser => write!(f, "Ganser Formulation"),
        }
    }
}

/// A pollutant: its emission block and its deposition block.
///
/// The two blocks live at different places in a CONTROL file and are decoded
/// and encoded separately.
///
/// ```
/// use hycs::Species;
///
/// let mut species = Species::new("PM10");
/// species.set_rate(2.0);
/// assert_eq!(
///     species.encode_emission(false),
///     vec!["PM10", "2.0", "-1.00", "00 00 00 00 00"]
/// );
/// assert_eq!(species.encode_deposition(false)[2], "0.0 4.0E+04 5.0E-06");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Species {
    name: String,
    rate: f64,
    duration: f64,
    start: EmissionStart,
    diameter: f64,
    density: f64,
    shape: f64,
    dry_deposition: String,
    wet_deposition: Option<String>,
    wet_deposition_enabled: bool,
    decay: String,
    resuspension: String,
}

impl Species {
    /// A species with the simulator's customary defaults: a 99 um particle
    /// of density 2.5 g/cc emitting 1 unit once from the run start.
    pub fn new(name: impl Into<String>) -> Self {
        Species {
            name: name.into(),
            rate: 1.0,
            duration: -1.0,
            start: EmissionStart::default(),
            diameter: 99.0,
            density: 2.5,
            shape: 1.0,
            dry_deposition: String::from("0.0 0.0 0.0 0.0 0.0"),
            wet_deposition: None,
            wet_deposition_enabled: true,
            decay: String::from("0.0"),
            resuspension: String::from("0.0"),
        }
    }

    /// Decode a 4 line emission block: identifier, rate, duration, start.
    ///
    /// Fields that fail to parse keep their current value and a warning is
    /// recorded.
    pub fn decode_emission<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        warnings: &mut Vec<FieldWarning>,
    ) {
        self.name = line_at(lines, 0).trim().to_string();

        let rate = Scalar::new(line_at(lines, 1));
        match rate.to_f64() {
            Ok(x) => self.rate = x,
            Err(_) => FieldWarning::new("rate", rate.as_str(), WarningKind::NotANumber)
                .at(1)
                .push_to(warnings),
        }

        let duration = Scalar::new(line_at(lines, 2));
        match duration.to_f64() {
            Ok(x) => self.duration = x,
            Err(_) => FieldWarning::new("duration", duration.as_str(), WarningKind::NotANumber)
                .at(2)
                .push_to(warnings),
        }

        self.start = EmissionStart::decode(line_at(lines, 3), warnings);
    }

    /// Decode a 5 line deposition block. This enables wet deposition; the
    /// default wet deposition line is recorded as no explicit parameters.
    pub fn decode_deposition<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        warnings: &mut Vec<FieldWarning>,
    ) {
        let particle = line_at(lines, 0);
        let mut particle_field = |idx, name: &'static str, slot: &mut f64| {
            let value = field(particle, idx);
            match value.to_f64() {
                Ok(x) => *slot = x,
                Err(_) => FieldWarning::new(name, value.as_str(), WarningKind::NotANumber)
                    .at(0)
                    .push_to(warnings),
            }
        };
        particle_field(0, "diameter", &mut self.diameter);
        particle_field(1, "density", &mut self.density);
        particle_field(2, "shape", &mut self.shape);

        self.dry_deposition = line_at(lines, 1).trim().to_string();
        let wet = line_at(lines, 2).trim();
        self.wet_deposition = if wet.is_empty() || wet == DEFAULT_WET_DEPOSITION {
            None
        } else {
            Some(wet.to_string())
        };
        self.wet_deposition_enabled = true;
        self.decay = line_at(lines, 3).trim().to_string();
        self.resuspension = line_at(lines, 4).trim().to_string();
    }

    /// Encode the 4 line emission block
    pub fn encode_emission(&self, annotate_lines: bool) -> Vec<String> {
        let lines = [
            (self.name.clone(), "Species identifier"),
            (repr(self.rate), "Rate of emission"),
            (fixed(self.duration, 0, 2), "Duration of emission"),
            (self.start.to_string(), "Start date of emission"),
        ];

        lines
            .iter()
            .map(|(line, note)| note_line(line.clone(), annotate_lines, note))
            .collect()
    }

    /// Encode the 5 line deposition block
    pub fn encode_deposition(&self, annotate_lines: bool) -> Vec<String> {
        let particle = format!(
            "{} {} {}",
            fixed(self.diameter, 5, 1),
            fixed(self.density, 2, 1),
            fixed(self.shape, 4, 1)
        );
        let particle_note = format!(
            "Particle diameter(um)   Density (g/cc),  Shape {}",
            self.shape_formulation()
        );

        vec![
            note_line(particle, annotate_lines, &particle_note),
            note_line(
                self.dry_deposition.clone(),
                annotate_lines,
                "Dry Deposition for gas or using resistance method ",
            ),
            note_line(
                self.wet_deposition_text().to_string(),
                annotate_lines,
                "Wet deposition parameters",
            ),
            note_line(
                self.decay.clone(),
                annotate_lines,
                "radioactive decay parameters",
            ),
            note_line(
                self.resuspension.clone(),
                annotate_lines,
                "resuspension from deposit",
            ),
        ]
    }

    /// The wet deposition line as it will be written
    pub fn wet_deposition_text(&self) -> &str {
        if !self.wet_deposition_enabled {
            NO_WET_DEPOSITION
        } else {
            self.wet_deposition
                .as_deref()
                .unwrap_or(DEFAULT_WET_DEPOSITION)
        }
    }

    pub fn shape_formulation(&self) -> ShapeFormulation {
        if self.shape < 0.0 {
            ShapeFormulation::Ganser
        } else {
            ShapeFormulation::Stokes
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    /// Emission duration in hours. Negative means emit once.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, hours: f64) {
        self.duration = hours;
    }

    pub fn start(&self) -> &EmissionStart {
        &self.start
    }

    pub fn set_start(&mut self, start: EmissionStart) {
        self.start = start;
    }

    /// Particle diameter (um)
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Particle density (g/cc)
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn set_particle(&mut self, diameter: f64, density: f64, shape: f64) {
        self.diameter = diameter;
        self.density = density;
        self.shape = shape;
    }

    /// Dry deposition parameters, kept verbatim
    pub fn dry_deposition(&self) -> &str {
        &self.dry_deposition
    }

    pub fn set_dry_deposition(&mut self, params: impl Into<String>) {
        self.dry_deposition = params.into();
    }

    /// Explicitly set wet deposition parameters, if any
    pub fn wet_deposition(&self) -> Option<&str> {
        self.wet_deposition.as_deref()
    }

    pub fn set_wet_deposition(&mut self, params: impl Into<String>) {
        self.wet_deposition = Some(params.into());
        self.wet_deposition_enabled = true;
    }

    pub fn wet_deposition_enabled(&self) -> bool {
        self.wet_deposition_enabled
    }

    pub fn set_wet_deposition_enabled(&mut self, enabled: bool) {
        self.wet_deposition_enabled = enabled;
    }

    /// Radioactive decay half-life, kept verbatim
    pub fn decay(&self) -> &str {
        &self.decay
    }

    pub fn set_decay(&mut self, half_life: impl Into<String>) {
        self.decay = half_life.into();
    }

    /// Resuspension factor, kept verbatim
    pub fn resuspension(&self) -> &str {
        &self.resuspension
    }

    pub fn set_resuspension(&mut self, factor: impl Into<String>) {
        self.resuspension = factor.into();
    }
}

fn note_line(line: String, annotate_lines: bool, note: &str) -> String {
    if annotate_lines {
        annotate(line, NOTE_PAD, note)
    } else {
        line
    }
}
