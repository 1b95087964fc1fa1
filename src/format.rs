//! Fixed width number rendering shared by the CONTROL file records.
//!
//! The simulator reads some fields by column, so the exact text produced here
//! is part of the file format.

use std::fmt::Write;

/// Shortest text that reads back as the same float, always with a decimal
/// point or exponent (`1.0`, `0.1`, `1e-05`, `1.5e+16`).
///
/// ```
/// assert_eq!(hycs::format::repr(45.0), "45.0");
/// assert_eq!(hycs::format::repr(-90.25), "-90.25");
/// assert_eq!(hycs::format::repr(0.00001), "1e-05");
/// ```
pub fn repr(x: f64) -> String {
    let s = format!("{:?}", x);
    match s.find('e') {
        Some(idx) => {
            let (mantissa, exp) = s.split_at(idx);
            let exp = &exp[1..];
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

/// Scientific notation with two decimal digits and a signed exponent of at
/// least two digits (`1.00E+03`).
///
/// ```
/// assert_eq!(hycs::format::sci2(1000.0), "1.00E+03");
/// assert_eq!(hycs::format::sci2(0.0000052), "5.20E-06");
/// ```
pub fn sci2(x: f64) -> String {
    let s = format!("{:.2E}", x);
    match s.find('E') {
        Some(idx) => {
            let (mantissa, exp) = s.split_at(idx);
            let exp = &exp[1..];
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }

        // inf and NaN have no exponent
        None => s,
    }
}

/// Zero padded fixed precision (`%0{width}.{precision}f`)
///
/// ```
/// assert_eq!(hycs::format::fixed(1.0, 5, 1), "001.0");
/// assert_eq!(hycs::format::fixed(-2.0, 4, 1), "-2.0");
/// assert_eq!(hycs::format::fixed(89.999, 0, 2), "90.00");
/// ```
pub fn fixed(x: f64, width: usize, precision: usize) -> String {
    format!("{:0width$.precision$}", x, width = width, precision = precision)
}

/// Zero padded two digit integer (`%02d`)
pub fn int2(x: i64) -> String {
    format!("{:02}", x)
}

/// Plain decimal integer, used for counts and scalar lines
#[cfg(feature = "faster_writer")]
pub fn integer(x: i64) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(x).to_string()
}

/// Plain decimal integer, used for counts and scalar lines
#[cfg(not(feature = "faster_writer"))]
pub fn integer(x: i64) -> String {
    x.to_string()
}

/// Append a trailing annotation to a data line. The data portion is never
/// altered; the note is separated by `pad` spaces.
pub(crate) fn annotate(mut line: String, pad: usize, note: &str) -> String {
    for _ in 0..pad {
        line.push(' ');
    }
    let _ = write!(line, "#{}", note);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(1.0, "1.0")]
    #[case(0.1, "0.1")]
    #[case(10000.0, "10000.0")]
    #[case(-1.0, "-1.0")]
    #[case(0.0001, "0.0001")]
    #[case(0.00001, "1e-05")]
    #[case(1.5e16, "1.5e+16")]
    #[case(2.5e-300, "2.5e-300")]
    fn test_repr(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(repr(input), expected);
    }

    #[rstest]
    #[case(1000.0, "1.00E+03")]
    #[case(1.0, "1.00E+00")]
    #[case(0.0, "0.00E+00")]
    #[case(-250.0, "-2.50E+02")]
    #[case(1.5e-10, "1.50E-10")]
    #[case(3.0e120, "3.00E+120")]
    fn test_sci2(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(sci2(input), expected);
    }

    #[rstest]
    #[case(99.0, 5, 1, "099.0")]
    #[case(2.5, 2, 1, "2.5")]
    #[case(1.0, 4, 1, "01.0")]
    #[case(-1.0, 4, 1, "-1.0")]
    #[case(360.0, 0, 2, "360.00")]
    fn test_fixed(
        #[case] input: f64,
        #[case] width: usize,
        #[case] precision: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(fixed(input, width, precision), expected);
    }

    #[test]
    fn test_int2() {
        assert_eq!(int2(0), "00");
        assert_eq!(int2(1), "01");
        assert_eq!(int2(12), "12");
        assert_eq!(int2(-3), "-3");
    }

    #[rstest]
    #[case(0, "0")]
    #[case(24, "24")]
    #[case(-48, "-48")]
    #[case(i64::MIN, "-9223372036854775808")]
    fn test_integer(#[case] input: i64, #[case] expected: &str) {
        assert_eq!(integer(input), expected);
    }

    #[test]
    fn test_annotate_keeps_data() {
        let line = annotate(String::from("24"), 3, "Duration of run");
        assert_eq!(line, "24   #Duration of run");
    }
}
