//! Canonical Encoder Module
//!
//! Renders a `CanonicalValue` as compact JSON-style text with mapping keys
//! sorted by byte value, so equal inputs always produce equal bytes.
//! Non-finite floats render as `NaN`, `+Inf` and `-Inf`, which is the only
//! output that is not valid JSON.

use std::fmt::Write;

use crate::canonical::CanonicalValue;

/// Decimal exponents in `[PLAIN_EXP_MIN, PLAIN_EXP_MAX)` render without
/// scientific notation.
const PLAIN_EXP_MIN: i32 = -4;
const PLAIN_EXP_MAX: i32 = 6;

// == Encode ==
/// Encodes a value into its canonical byte form.
///
/// Every value of the variant has exactly one encoding.
pub fn encode(value: &CanonicalValue) -> Vec<u8> {
    let mut buf = String::new();
    write_value(&mut buf, value);
    buf.into_bytes()
}

fn write_value(buf: &mut String, value: &CanonicalValue) {
    match value {
        CanonicalValue::Null => buf.push_str("null"),
        CanonicalValue::Bool(true) => buf.push_str("true"),
        CanonicalValue::Bool(false) => buf.push_str("false"),
        CanonicalValue::Int(i) => push_display(buf, i),
        CanonicalValue::UInt(u) => push_display(buf, u),
        CanonicalValue::Float(f) => buf.push_str(&format_float(*f)),
        CanonicalValue::String(s) => write_string(buf, s),
        CanonicalValue::List(items) => {
            buf.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                write_value(buf, item);
            }
            buf.push(']');
        }
        CanonicalValue::Map(fields) => {
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort_unstable();

            buf.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                write_string(buf, key);
                buf.push(':');
                write_value(buf, &fields[key]);
            }
            buf.push('}');
        }
    }
}

fn push_display(buf: &mut String, n: impl std::fmt::Display) {
    // Writing into a String cannot fail
    let _ = write!(buf, "{}", n);
}

// == Strings ==
fn write_string(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

// == Numbers ==
/// Formats a float with the shortest digits that round-trip.
///
/// Plain decimal when the decimal exponent is in `[-4, 6)`, otherwise
/// `<digits>e<sign><exp>` with at least two exponent digits (`1e+06`,
/// `1.5e-07`). Integral values carry no fractional part, `-0.0` becomes `0`,
/// every NaN is `NaN` and infinities are `+Inf` / `-Inf`.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }

    // LowerExp yields the shortest round-trip digits, e.g. "1.5e-7"
    let sci = format!("{:e}", f);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (PLAIN_EXP_MIN..PLAIN_EXP_MAX).contains(&exp) {
        // Display never uses an exponent and omits ".0" for integral values
        format!("{}", f)
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
    }
}
