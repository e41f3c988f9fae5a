//! Allocation free primitives over byte sequences.
//!
//! Every sequence handled here is bounded either by the end of the slice or by a NUL byte,
//! whichever comes first.  The shared request buffer is zero filled before each receive, so
//! a NUL marks the end of the bytes actually written into a region.

pub(crate) const CR: u8 = 13;
pub(crate) const LF: u8 = 10;
pub(crate) const SP: u8 = 32;
pub(crate) const COLON: u8 = 58;
pub(crate) const ZERO: u8 = 48;
pub(crate) const NUL: u8 = 0;
pub(crate) const SLASH: u8 = 47;
pub(crate) const EQUALS: u8 = 61;

/// Number of bytes in `s` before the first `delim`, NUL, or the end of the sequence.
///
/// ```
/// use restlite::ascii::length_until;
///
/// assert_eq!(length_until("users/42", b'/'), 5);
/// assert_eq!(length_until("users", b'/'), 5);
/// assert_eq!(length_until(b"ab\0cd".as_slice(), b'/'), 2);
/// ```
pub fn length_until(s: impl AsRef<[u8]>, delim: u8) -> usize {
    let s = s.as_ref();
    s.iter()
        .position(|b| *b == delim || *b == NUL)
        .unwrap_or(s.len())
}

/// Compare `a` and `b` up to the first `delim` (or terminator) in each.  The two are equal
/// only when every byte before the stop matches and both stop at the same offset.
///
/// ```
/// use restlite::ascii::equal_until;
///
/// assert!(equal_until("Host: x", "Host", b':'));
/// assert!(equal_until("q=foo", "q", b'='));
/// assert!(!equal_until("Hostname: x", "Host", b':'));
/// assert!(!equal_until("Ho", "Host", b':'));
/// ```
pub fn equal_until(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>, delim: u8) -> bool {
    until(a.as_ref(), delim) == until(b.as_ref(), delim)
}

/// The prefix of `s` that `length_until` counts.
pub(crate) fn until(s: &[u8], delim: u8) -> &[u8] {
    &s[..length_until(s, delim)]
}

/// Strip a trailing `\r\n` (or a bare `\n` / `\r`) from a line.
pub(crate) fn trim_line_end(mut line: &[u8]) -> &[u8] {
    if let [rest @ .., LF] = line {
        line = rest;
    }
    if let [rest @ .., CR] = line {
        line = rest;
    }
    line
}

pub(crate) fn trim_spaces(mut s: &[u8]) -> &[u8] {
    while let [SP, rest @ ..] = s {
        s = rest;
    }
    while let [rest @ .., SP] = s {
        s = rest;
    }
    s
}

pub(crate) fn atoi(data: &[u8]) -> Option<u32> {
    if data.is_empty() {
        return None;
    }

    let mut val: u32 = 0;
    for digit in data {
        if !digit.is_ascii_digit() {
            return None;
        }
        val = val.checked_mul(10)?.checked_add((digit - ZERO).into())?;
    }

    Some(val)
}

/// Decimal rendering of an integer without an allocator.
pub(crate) struct AsciiInt([u8; 20]);

impl AsciiInt {
    pub(crate) fn as_str(&self) -> &str {
        // only ever holds ASCII digits and spaces
        core::str::from_utf8(&self.0).unwrap_or_default().trim()
    }
}

impl From<u64> for AsciiInt {
    fn from(value: u64) -> Self {
        let mut round = 0;
        let mut int = value;

        let mut ret_array = [SP; 20];
        loop {
            ret_array[19 - round] = (int % 10) as u8 + ZERO;
            int /= 10;
            if int == 0 {
                break;
            }
            round += 1;
        }

        AsciiInt(ret_array)
    }
}
