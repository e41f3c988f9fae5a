use crate::ascii::{AsciiInt, COLON, CR, LF, NUL, equal_until, length_until, trim_line_end, trim_spaces};

/// Host
pub const REQ_HEAD_HOST: &str = "Host";
/// User-Agent
pub const REQ_HEAD_USER_AGENT: &str = "User-Agent";
/// Accept
pub const REQ_HEAD_ACCEPT: &str = "Accept";
/// Connection
pub const REQ_HEAD_CONNECTION: &str = "Connection";
/// Authorization
pub const REQ_HEAD_AUTHORIZATION: &str = "Authorization";
/// Content-Length
pub const REQ_HEAD_CONTENT_LENGTH: &str = "Content-Length";
/// Content-Type
pub const REQ_HEAD_CONTENT_TYPE: &str = "Content-Type";

/// Access-Control-Allow-Origin
pub const RESP_HEAD_ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// Cache-Control
pub const RESP_HEAD_CACHE_CONTROL: &str = "Cache-Control";
/// Connection
pub const RESP_HEAD_CONNECTION: &str = "Connection";
/// Location
pub const RESP_HEAD_LOCATION: &str = "Location";
/// Server
pub const RESP_HEAD_SERVER: &str = "Server";
/// Set-Cookie
pub const RESP_HEAD_SET_COOKIE: &str = "Set-Cookie";
/// Content-Length
pub const RESP_HEAD_CONTENT_LENGTH: &str = "Content-Length";
/// Content-Type
pub const RESP_HEAD_CONTENT_TYPE: &str = "Content-Type";

/// Bytes added around a key and value when stored: `": "` and `"\r\n"`.
const LINE_OVERHEAD: usize = 4;

/// Returned when content does not fit the space left in its buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InsufficientCapacity {
    /// Bytes the rejected write needed
    pub needed: usize,
    /// Bytes that were left
    pub remaining: usize,
}

/// Returned by [`HeaderStore::try_set`] when a line is refused.  The store is left untouched.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderError {
    /// The line does not fit the space left in the store
    Full(InsufficientCapacity),
    /// The key or value holds CR, LF or NUL, or the key holds a `:`
    InvalidCharacter,
}

/// An append only store of `key: value\r\n` lines kept inside a borrowed byte range.
///
/// The server uses two of these per request: one over the header block of the received
/// request, and one over the region of the shared buffer reserved for response headers.
/// Nothing is ever allocated; a line that does not fit is refused as a whole so the content
/// is always a sequence of complete lines.
#[derive(Debug, Default)]
pub struct HeaderStore<'a> {
    buf: Option<&'a mut [u8]>,
    pos: usize,
}

impl<'a> HeaderStore<'a> {
    /// Bind the store to `buf`.  Content already in the range (up to the first NUL byte) is
    /// kept and new lines are appended after it.
    pub fn attach(buf: &'a mut [u8]) -> Self {
        let pos = length_until(&*buf, NUL);
        Self { buf: Some(buf), pos }
    }

    /// A store with no backing range.  Every write is refused and every lookup misses.
    pub fn detached() -> Self {
        Self { buf: None, pos: 0 }
    }

    /// True when attached to a non empty range, regardless of content.
    pub fn available(&self) -> bool {
        self.capacity() != 0
    }

    /// True when attached and holding at least one byte of content.
    pub fn transmissible(&self) -> bool {
        self.available() && self.pos != 0
    }

    /// Total size of the backing range.
    pub fn capacity(&self) -> usize {
        self.buf.as_deref().map_or(0, <[u8]>::len)
    }

    /// Bytes of content currently stored.
    pub fn len(&self) -> usize {
        self.pos
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// The stored lines exactly as they will go on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        match self.buf.as_deref() {
            Some(buf) => &buf[..self.pos],
            None => &[],
        }
    }

    /// Append `key: value\r\n`.  If the line does not fit in the space left, or the key or
    /// value would break the line structure, the write is dropped and the existing content is
    /// left untouched.  Use [`HeaderStore::try_set`] to find out whether the line was stored.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.try_set(key, value) {
            Ok(()) => {}
            Err(HeaderError::Full(e)) => debug!(
                "header store full, dropped {=str} ({=usize}/{=usize} bytes)",
                key,
                e.needed,
                e.remaining
            ),
            Err(HeaderError::InvalidCharacter) => {
                debug!("header {=str} holds a line break or NUL, dropped", key)
            }
        }
    }

    /// Append `key: value\r\n`, reporting a refused line instead of dropping it.
    pub fn try_set(&mut self, key: &str, value: &str) -> Result<(), HeaderError> {
        if !storable(key.as_bytes(), true) || !storable(value.as_bytes(), false) {
            return Err(HeaderError::InvalidCharacter);
        }

        let needed = key.len() + value.len() + LINE_OVERHEAD;
        let remaining = self.capacity() - self.pos;

        let buf = match self.buf.as_deref_mut() {
            Some(buf) if needed <= remaining => buf,
            _ => return Err(HeaderError::Full(InsufficientCapacity { needed, remaining })),
        };

        let parts: [&[u8]; 4] = [key.as_bytes(), b": ", value.as_bytes(), b"\r\n"];
        let mut at = self.pos;
        for part in parts {
            buf[at..at + part.len()].copy_from_slice(part);
            at += part.len();
        }
        self.pos = at;

        Ok(())
    }

    /// Append a header with an unsigned decimal value, e.g. `Content-Length`.
    pub fn set_number(&mut self, key: &str, value: u64) {
        let value = AsciiInt::from(value);
        self.set(key, value.as_str());
    }

    /// Value of the first line whose key is exactly `key`.  Leading and trailing spaces around
    /// the value are not part of it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| equal_until(k, key, COLON))
            .map(|(_, v)| v)
    }

    /// Iterate the stored `(key, value)` pairs in the order they were written.  Lines without
    /// a `:` or that are not valid UTF-8 are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.as_bytes()
            .split_inclusive(|b| *b == LF)
            .map(trim_line_end)
            .filter_map(|line| {
                let colon = line.iter().position(|b| *b == COLON)?;
                let key = core::str::from_utf8(&line[..colon]).ok()?;
                let value = core::str::from_utf8(trim_spaces(&line[colon + 1..])).ok()?;
                Some((key, value))
            })
    }
}

/// True when `s` can go into a line without ending it early or hiding the rest from `attach`.
fn storable(s: &[u8], key: bool) -> bool {
    !s.iter()
        .any(|b| matches!(*b, CR | LF | NUL) || (key && *b == COLON))
}
