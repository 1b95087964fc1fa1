use std::fmt::{self, Debug, Display};
use std::str::FromStr;

/// A date error.
#[derive(Debug, PartialEq, Eq)]
pub struct DateError;

impl std::error::Error for DateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unable to decode date")
    }
}

const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Two digit years below this pivot are in the 2000s, the rest in the 1900s
const CENTURY_PIVOT: u8 = 69;

/// Parse up to `N` whitespace separated fields of one or two ascii digits.
/// Returns none if the token count differs from `N`.
fn parse_fields<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut result = [0u8; N];
    let mut tokens = s.split_whitespace();
    for slot in result.iter_mut() {
        let token = tokens.next()?;
        if token.is_empty() || token.len() > 2 || !token.bytes().all(|x| x.is_ascii_digit()) {
            return None;
        }

        *slot = token.bytes().fold(0, |acc, x| acc * 10 + (x - b'0'));
    }

    if tokens.next().is_some() {
        None
    } else {
        Some(result)
    }
}

fn is_leap_year(yy: u8) -> bool {
    let year = if yy < CENTURY_PIVOT {
        2000 + u16::from(yy)
    } else {
        1900 + u16::from(yy)
    };
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(yy: u8, month: u8) -> u8 {
    if month == 2 && is_leap_year(yy) {
        29
    } else {
        DAYS_PER_MONTH[usize::from(month)]
    }
}

/// A calendar validated `yy mm dd hh mm` timestamp as used for emission
/// start times.
///
/// The year is kept as its two digit form. For leap year validation years
/// below 69 belong to the 2000s.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlDate {
    year: u8,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
}

impl Debug for ControlDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ControlDate {}", self)
    }
}

impl ControlDate {
    /// Create a timestamp from its parts.
    ///
    /// Will return `None` if the date does not exist
    ///
    /// ```
    /// use hycs::common::ControlDate;
    /// assert!(ControlDate::from_parts(95, 10, 16, 0, 0).is_some());
    /// assert!(ControlDate::from_parts(100, 1, 1, 0, 0).is_none());
    /// assert!(ControlDate::from_parts(95, 13, 1, 0, 0).is_none());
    /// assert!(ControlDate::from_parts(95, 2, 29, 0, 0).is_none());
    /// assert!(ControlDate::from_parts(96, 2, 29, 0, 0).is_some());
    /// assert!(ControlDate::from_parts(95, 1, 1, 24, 0).is_none());
    /// ```
    pub fn from_parts(year: u8, month: u8, day: u8, hour: u8, minute: u8) -> Option<Self> {
        if year < 100
            && month != 0
            && month < 13
            && day != 0
            && day <= days_in_month(year, month)
            && hour < 24
            && minute < 60
        {
            Some(ControlDate {
                year,
                month,
                day,
                hour,
                minute,
            })
        } else {
            None
        }
    }

    /// Parses a timestamp of exactly five whitespace separated fields:
    /// `yy mm dd hh mm`.
    ///
    /// ```
    /// use hycs::common::ControlDate;
    /// let date = ControlDate::parse("95 10 16 00 00").unwrap();
    /// assert_eq!(date.month(), 10);
    /// assert_eq!(date.to_string(), "95 10 16 00 00");
    /// assert!(ControlDate::parse("95 10 16 00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        parse_fields::<5>(s)
            .and_then(|[y, m, d, h, min]| Self::from_parts(y, m, d, h, min))
            .ok_or(DateError)
    }

    pub fn year(&self) -> u8 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl Display for ControlDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02} {:02} {:02} {:02} {:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

impl FromStr for ControlDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The run start date on the first line of a CONTROL file.
///
/// Written as `yy mm dd hh`. When read, the line must hold exactly four
/// integer fields of at most two digits; no calendar meaning is checked since
/// files in the wild disagree on whether the second field is a month.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartDate {
    fields: [u8; 4],
}

impl Debug for StartDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StartDate {}", self)
    }
}

impl StartDate {
    /// Create a start date from its parts. Returns `None` if any part has
    /// more than two digits.
    ///
    /// ```
    /// use hycs::common::StartDate;
    /// let date = StartDate::from_parts(95, 10, 16, 0).unwrap();
    /// assert_eq!(date.to_string(), "95 10 16 00");
    /// assert!(StartDate::from_parts(195, 10, 16, 0).is_none());
    /// ```
    pub fn from_parts(year: u8, month: u8, day: u8, hour: u8) -> Option<Self> {
        let fields = [year, month, day, hour];
        if fields.iter().all(|&x| x < 100) {
            Some(StartDate { fields })
        } else {
            None
        }
    }

    /// Parses exactly four whitespace separated integer fields
    ///
    /// ```
    /// use hycs::common::StartDate;
    /// assert!(StartDate::parse("95 10 16 00").is_ok());
    /// assert!(StartDate::parse("95 10 16 00 00").is_err());
    /// assert!(StartDate::parse("95 oct 16 00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        parse_fields::<4>(s)
            .map(|fields| StartDate { fields })
            .ok_or(DateError)
    }

    pub fn year(&self) -> u8 {
        self.fields[0]
    }

    pub fn month(&self) -> u8 {
        self.fields[1]
    }

    pub fn day(&self) -> u8 {
        self.fields[2]
    }

    pub fn hour(&self) -> u8 {
        self.fields[3]
    }
}

impl Default for StartDate {
    fn default() -> Self {
        StartDate { fields: [0; 4] }
    }
}

impl From<ControlDate> for StartDate {
    fn from(date: ControlDate) -> Self {
        StartDate {
            fields: [date.year, date.month, date.day, date.hour],
        }
    }
}

impl Display for StartDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [y, m, d, h] = self.fields;
        write!(f, "{:02} {:02} {:02} {:02}", y, m, d, h)
    }
}

impl FromStr for StartDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
mod datederive {
    use super::{ControlDate, StartDate};
    use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;
    use std::str::FromStr;

    struct DateVisitor<T>(PhantomData<T>);

    impl<'de, T: FromStr> Visitor<'de> for DateVisitor<T> {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a space separated date")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::from_str(v).map_err(|_e| de::Error::custom(format!("invalid date: {}", v)))
        }
    }

    impl Serialize for ControlDate {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.to_string().as_str())
        }
    }

    impl<'de> Deserialize<'de> for ControlDate {
        fn deserialize<D>(deserializer: D) -> Result<ControlDate, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(DateVisitor(PhantomData))
        }
    }

    impl Serialize for StartDate {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.to_string().as_str())
        }
    }

    impl<'de> Deserialize<'de> for StartDate {
        fn deserialize<D>(deserializer: D) -> Result<StartDate, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(DateVisitor(PhantomData))
        }
    }
}
