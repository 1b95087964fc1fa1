use crate::format::{fixed, sci2};
use crate::scalar::field;

/// Latitude and longitude recorded when a location line has an unreadable
/// coordinate
pub const UNKNOWN_COORDINATE: f64 = -1.0;

/// Altitude recorded when a location line has an unreadable altitude
pub const DEFAULT_ALTITUDE: f64 = 10.0;

/// A single release location line: `lat lon alt [rate [area]]`
///
/// ```
/// use hycs::ReleaseLocation;
///
/// let loc = ReleaseLocation::decode("40.00 -90.00 10.0 100");
/// assert_eq!(loc.rate(), Some(100.0));
/// assert_eq!(loc.area(), None);
/// assert_eq!(loc.encode(), "40.00 -90.00 10.0 100");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseLocation {
    latitude: f64,
    longitude: f64,
    altitude: f64,
    rate: Option<f64>,
    area: Option<f64>,
}

impl ReleaseLocation {
    /// A location without an emission rate or area override
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        ReleaseLocation {
            latitude,
            longitude,
            altitude,
            rate: None,
            area: None,
        }
    }

    /// Set the emission rate. A rate of zero is still written.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the emission area (m^2)
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    /// Decode a location line.
    ///
    /// Never fails: unreadable coordinates become [UNKNOWN_COORDINATE], an
    /// unreadable altitude becomes [DEFAULT_ALTITUDE], and an unreadable or
    /// missing rate or area is recorded as absent.
    pub fn decode(line: &str) -> Self {
        let num = |idx| field(line, idx).to_f64().ok();
        ReleaseLocation {
            latitude: num(0).unwrap_or(UNKNOWN_COORDINATE),
            longitude: num(1).unwrap_or(UNKNOWN_COORDINATE),
            altitude: num(2).unwrap_or(DEFAULT_ALTITUDE),
            rate: num(3),
            area: num(4),
        }
    }

    /// Encode as a single line. Absent fields are omitted, never written as
    /// placeholders.
    pub fn encode(&self) -> String {
        let mut result = format!(
            "{} {} {}",
            fixed(self.latitude, 0, 2),
            fixed(self.longitude, 0, 2),
            fixed(self.altitude, 0, 1)
        );

        if let Some(rate) = self.rate {
            result.push(' ');
            result.push_str(&fixed(rate, 0, 0));
        }

        if let Some(area) = self.area {
            result.push(' ');
            result.push_str(&sci2(area));
        }

        result
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Release height (meters above ground level)
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn area(&self) -> Option<f64> {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("40.00 -90.00 10.0", (40.0, -90.0, 10.0, None, None))]
    #[case("40.0  -90.0  500.0 ", (40.0, -90.0, 500.0, None, None))]
    #[case("40 -90 10 5 1.0E+06", (40.0, -90.0, 10.0, Some(5.0), Some(1.0e6)))]
    #[case("40 -90 10 0", (40.0, -90.0, 10.0, Some(0.0), None))]
    #[case("north -90 10", (-1.0, -90.0, 10.0, None, None))]
    #[case("40 west high", (40.0, -1.0, 10.0, None, None))]
    #[case("40 -90 10 lots 2.0", (40.0, -90.0, 10.0, None, Some(2.0)))]
    #[case("", (-1.0, -1.0, 10.0, None, None))]
    fn test_decode(
        #[case] line: &str,
        #[case] expected: (f64, f64, f64, Option<f64>, Option<f64>),
    ) {
        let loc = ReleaseLocation::decode(line);
        let actual = (
            loc.latitude(),
            loc.longitude(),
            loc.altitude(),
            loc.rate(),
            loc.area(),
        );
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_encode_area_without_rate() {
        let loc = ReleaseLocation::new(40.0, -90.0, 10.0).with_area(1000.0);
        let line = loc.encode();
        assert_eq!(line, "40.00 -90.00 10.0 1.00E+03");
        assert_eq!(line.split_whitespace().count(), 4);
    }

    #[test]
    fn test_encode_zero_rate_is_present() {
        let loc = ReleaseLocation::new(40.0, -90.0, 10.0).with_rate(0.0);
        assert_eq!(loc.encode(), "40.00 -90.00 10.0 0");
    }

    #[test]
    fn test_encode_rate_and_area() {
        let loc = ReleaseLocation::new(35.26, -106.5, 1500.0)
            .with_rate(2.0)
            .with_area(5.0e6);
        assert_eq!(loc.encode(), "35.26 -106.50 1500.0 2 5.00E+06");
    }

    #[test]
    fn test_roundtrip_preserves_presence() {
        let loc = ReleaseLocation::new(40.0, -90.0, 10.0)
            .with_rate(100.0)
            .with_area(2.5e4);
        assert_eq!(ReleaseLocation::decode(&loc.encode()), loc);

        let loc = ReleaseLocation::new(40.0, -90.0, 10.0);
        assert_eq!(ReleaseLocation::decode(&loc.encode()), loc);
    }
}
