//! Version precedence: turns the version part of a protocol id into a sortable number.
//!
//! The scheme is deliberately simple and must stay byte-for-byte identical to
//! what peers compute: only the first `.` of the version is removed and the
//! remainder is read as a float, so `2.10.9` ranks as `210.9`.

/// Separator between the protocol name and its version.
pub const VERSION_SEPARATOR: char = '@';

/// Marker placed before the version separator for binary protocols.
pub const BINARY_MARKER: &str = ":b";

/// Compute the precedence value of a protocol id such as `foo:b@1.2.3`.
///
/// Ids without an `@` are treated as a bare version. Input without a leading
/// numeric literal yields `NaN`; this never panics.
pub fn precedence(id: &str) -> f64 {
    let version = id.rsplit(VERSION_SEPARATOR).next().unwrap_or(id);
    let collapsed = version.replacen('.', "", 1);
    parse_float_prefix(&collapsed)
}

/// Parse the longest leading float literal of `input`, ignoring trailing garbage.
///
/// Mirrors the lenient number reading peers use: leading whitespace is
/// skipped, an optional sign, digits with an optional fraction and exponent,
/// or `Infinity`. Returns `NaN` when no literal is present.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Whether the id text carries the binary marker.
pub fn is_binary_id(id: &str) -> bool {
    id.contains(BINARY_MARKER)
}
