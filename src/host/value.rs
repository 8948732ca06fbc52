use super::{HostError, HostValue};

impl HostValue {
    /// String conversion, `String(value)`.
    ///
    /// # Errors
    ///
    /// Returns error raised by the host when converting an object.
    pub fn to_host_string(&self) -> Result<String, HostError> {
        match self {
            Self::Undefined => Ok(String::from("undefined")),
            Self::Null => Ok(String::from("null")),
            Self::Bool(true) => Ok(String::from("true")),
            Self::Bool(false) => Ok(String::from("false")),
            Self::Number(n) => Ok(number_to_string(*n)),
            Self::String(s) => Ok(s.clone()),
            Self::Object(object) => object.to_host_string(),
        }
    }
}

/// Integral values below this are printed without exponent.
const MAX_PLAIN_INTEGER: f64 = 1e21;

/// Number to string conversion.
///
/// Integral values, the common case for header values, are printed through `itoa`. Other
/// finite values use the shortest digits that round trip, laid out with the same exponent
/// thresholds as ECMAScript `Number::toString`.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return String::from("NaN");
    }
    if n.is_infinite() {
        return String::from(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    // also covers `-0`
    if n == 0.0 {
        return String::from("0");
    }
    if n.fract() == 0.0 && n.abs() < MAX_PLAIN_INTEGER {
        if n.abs() < i64::MAX as f64 {
            let mut buf = itoa::Buffer::new();
            return buf.format(n as i64).to_owned();
        }
        // between 2^63 and 1e21 the value is exactly representable as u128
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(n.abs() as u128);
        return if n < 0.0 { format!("-{digits}") } else { digits.to_owned() };
    }

    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }

    // shortest round trip digits, `d.ddde<exp>`
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exp: i32 = exp.parse().unwrap_or(0);

    // decimal point position relative to the digits
    let k = digits.len() as i32;
    let point = exp + 1;

    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (point - k) as usize));
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', -point as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(exp.unsigned_abs()));
    }

    out
}
