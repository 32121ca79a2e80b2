//! Numeric literals.
//!
//! Accepted forms: `3`, `-2.5`, `3,5` (comma as decimal separator), `1e-3`,
//! imaginary literals with an `i`/`I`/`j`/`J` suffix (`3i`, `-0.5j`), the bare
//! unit with an optional sign (`i`, `-i`), and `a±bi` (`4-3i`, `1+i`).

use rhizome_helix_complex::Complex;

/// Parses a whole string as one numeric literal, ignoring surrounding
/// whitespace. Returns `None` if anything is left over.
pub fn parse_number(text: &str) -> Option<Complex<f64>> {
    let (first, rest) = signed_part(text.trim())?;
    if rest.is_empty() {
        return Some(first.into_complex());
    }

    let Part::Real(re) = first else {
        return None;
    };
    if !rest.starts_with(['+', '-']) {
        return None;
    }
    match signed_part(rest)? {
        (Part::Imag(im), "") => Some(Complex::new(re, im)),
        _ => None,
    }
}

pub(crate) fn is_unit(c: char) -> bool {
    matches!(c, 'i' | 'I' | 'j' | 'J')
}

/// Byte length of the unsigned real at the start of `s`.
///
/// Digits with at most one `.` or `,` separator, then an optional exponent.
/// The exponent is only taken when at least one digit follows `e`.
pub(crate) fn scan_unsigned(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut pos = 0;

    let int_digits = skip_digits(bytes, &mut pos);
    let mut frac_digits = 0;
    if matches!(bytes.get(pos), Some(b'.' | b',')) {
        let save = pos;
        pos += 1;
        frac_digits = skip_digits(bytes, &mut pos);
        if int_digits == 0 && frac_digits == 0 {
            pos = save;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let save = pos;
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        if skip_digits(bytes, &mut pos) == 0 {
            pos = save;
        }
    }
    pos
}

/// Converts a span accepted by [`scan_unsigned`] to `f64`.
pub(crate) fn unsigned_value(span: &str) -> Option<f64> {
    span.replace(',', ".").parse().ok()
}

fn skip_digits(bytes: &[u8], pos: &mut usize) -> usize {
    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    *pos - start
}

enum Part {
    Real(f64),
    Imag(f64),
}

impl Part {
    fn into_complex(self) -> Complex<f64> {
        match self {
            Part::Real(v) => Complex::real(v),
            Part::Imag(v) => Complex::imag(v),
        }
    }
}

fn signed_part(s: &str) -> Option<(Part, &str)> {
    let (sign, s) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };

    let len = scan_unsigned(s);
    let magnitude = if len == 0 {
        None
    } else {
        Some(unsigned_value(&s[..len])?)
    };
    let rest = &s[len..];

    match rest.chars().next() {
        Some(c) if is_unit(c) => {
            let im = sign * magnitude.unwrap_or(1.0);
            Some((Part::Imag(im), &rest[c.len_utf8()..]))
        }
        _ => magnitude.map(|m| (Part::Real(sign * m), rest)),
    }
}
