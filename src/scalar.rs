use std::error;
use std::fmt;

/// An error that can occur when converting a scalar into the requested type.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarError {
    /// The given string was empty after trimming
    Empty,

    /// The given string was not a valid float
    InvalidFloat(String),

    /// The given string was not a valid integer (or overflowed)
    InvalidInteger(String),
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarError::Empty => write!(f, "is empty"),
            ScalarError::InvalidFloat(x) => write!(f, "is not a valid float: {}", x),
            ScalarError::InvalidInteger(x) => write!(f, "is not a valid integer: {}", x),
        }
    }
}

impl error::Error for ScalarError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// A single whitespace trimmed field from a CONTROL line.
///
/// ```
/// use hycs::Scalar;
///
/// let v1 = Scalar::new("  45.5 ");
/// assert_eq!(v1.as_str(), "45.5");
/// assert_eq!(v1.to_f64(), Ok(45.5));
/// ```
#[derive(PartialEq, Copy, Clone)]
pub struct Scalar<'a> {
    data: &'a str,
}

impl<'a> Scalar<'a> {
    /// Create a new scalar, trimming surrounding whitespace
    pub fn new(data: &'a str) -> Scalar<'a> {
        Scalar { data: data.trim() }
    }

    /// View the trimmed text
    pub fn as_str(&self) -> &'a str {
        self.data
    }

    /// Try converting the scalar to f64
    ///
    /// ```
    /// use hycs::Scalar;
    ///
    /// assert_eq!(Scalar::new("4.0E+04").to_f64(), Ok(40000.0));
    /// assert!(Scalar::new("north").to_f64().is_err());
    /// ```
    pub fn to_f64(&self) -> Result<f64, ScalarError> {
        to_f64(self.data)
    }

    /// Try converting the scalar to i64
    pub fn to_i64(&self) -> Result<i64, ScalarError> {
        to_i64(self.data)
    }

    /// Try converting the scalar to i32. Values outside the i32 range are
    /// rejected rather than wrapped.
    ///
    /// ```
    /// use hycs::Scalar;
    ///
    /// assert_eq!(Scalar::new("-3").to_i32(), Ok(-3));
    /// assert!(Scalar::new("4294967293").to_i32().is_err());
    /// ```
    pub fn to_i32(&self) -> Result<i32, ScalarError> {
        to_i32(self.data)
    }

    /// Try converting the scalar to a non-negative count
    ///
    /// ```
    /// use hycs::Scalar;
    ///
    /// assert_eq!(Scalar::new("3").to_usize(), Ok(3));
    /// assert!(Scalar::new("-1").to_usize().is_err());
    /// ```
    pub fn to_usize(&self) -> Result<usize, ScalarError> {
        to_usize(self.data)
    }

    /// Returns true if this field starts with the all-zero date sentinel
    pub fn is_zero_date(&self) -> bool {
        self.data.starts_with("00")
    }
}

impl<'a> fmt::Debug for Scalar<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar {{ {} }}", self)
    }
}

impl<'a> fmt::Display for Scalar<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// Iterate over the whitespace separated fields of a line
pub(crate) fn fields(line: &str) -> impl Iterator<Item = Scalar<'_>> {
    line.split_whitespace().map(Scalar::new)
}

/// The `idx`th whitespace separated field of a line, or an empty scalar
pub(crate) fn field(line: &str, idx: usize) -> Scalar<'_> {
    fields(line).nth(idx).unwrap_or(Scalar { data: "" })
}

#[inline]
fn to_f64(d: &str) -> Result<f64, ScalarError> {
    if d.is_empty() {
        return Err(ScalarError::Empty);
    }

    d.parse::<f64>()
        .map_err(|_| ScalarError::InvalidFloat(d.to_string()))
}

#[inline]
fn to_i64(d: &str) -> Result<i64, ScalarError> {
    if d.is_empty() {
        return Err(ScalarError::Empty);
    }

    d.parse::<i64>()
        .map_err(|_| ScalarError::InvalidInteger(d.to_string()))
}

#[inline]
fn to_i32(d: &str) -> Result<i32, ScalarError> {
    if d.is_empty() {
        return Err(ScalarError::Empty);
    }

    d.parse::<i32>()
        .map_err(|_| ScalarError::InvalidInteger(d.to_string()))
}

#[inline]
fn to_usize(d: &str) -> Result<usize, ScalarError> {
    if d.is_empty() {
        return Err(ScalarError::Empty);
    }

    d.parse::<usize>()
        .map_err(|_| ScalarError::InvalidInteger(d.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[test]
    fn scalar_trims() {
        assert_eq!(Scalar::new(" cdump \n").as_str(), "cdump");
        assert_eq!(Scalar::new("\t").as_str(), "");
    }

    #[rstest]
    #[case("0", Ok(0.0))]
    #[case("-1", Ok(-1.0))]
    #[case("99.0", Ok(99.0))]
    #[case("1.00E+03", Ok(1000.0))]
    #[case("5.0E-06", Ok(0.000005))]
    #[case(" 0.504 ", Ok(0.504))]
    #[case("", Err(ScalarError::Empty))]
    #[case("1.0.0", Err(ScalarError::InvalidFloat(String::from("1.0.0"))))]
    fn scalar_to_f64(#[case] input: &str, #[case] expected: Result<f64, ScalarError>) {
        assert_eq!(Scalar::new(input).to_f64(), expected);
    }

    #[rstest]
    #[case("0", Ok(0))]
    #[case("-24", Ok(-24))]
    #[case("+3", Ok(3))]
    #[case("3.0", Err(ScalarError::InvalidInteger(String::from("3.0"))))]
    #[case("", Err(ScalarError::Empty))]
    fn scalar_to_i64(#[case] input: &str, #[case] expected: Result<i64, ScalarError>) {
        assert_eq!(Scalar::new(input).to_i64(), expected);
    }

    #[rstest]
    #[case("-3", Ok(-3))]
    #[case("2147483647", Ok(i32::MAX))]
    #[case("2147483648", Err(ScalarError::InvalidInteger(String::from("2147483648"))))]
    #[case("4294967293", Err(ScalarError::InvalidInteger(String::from("4294967293"))))]
    fn scalar_to_i32(#[case] input: &str, #[case] expected: Result<i32, ScalarError>) {
        assert_eq!(Scalar::new(input).to_i32(), expected);
    }

    #[test]
    fn scalar_to_usize() {
        assert_eq!(Scalar::new("12").to_usize(), Ok(12));
        assert!(Scalar::new("-1").to_usize().is_err());
        assert!(Scalar::new("two").to_usize().is_err());
    }

    #[test]
    fn field_indexing() {
        let line = "40.00  -90.00 10.0";
        assert_eq!(field(line, 1).as_str(), "-90.00");
        assert_eq!(field(line, 3).as_str(), "");
        assert_eq!(fields(line).count(), 3);
    }

    #[test]
    fn zero_date_sentinel() {
        assert!(Scalar::new("00 00 00 00 00").is_zero_date());
        assert!(!Scalar::new("95 10 16 00 00").is_zero_date());
    }

    #[quickcheck]
    fn integer_text_parses_as_float(x: i32) -> bool {
        Scalar::new(&x.to_string()).to_f64() == Ok(f64::from(x))
    }
}
