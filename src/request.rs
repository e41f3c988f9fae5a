use crate::ascii::{EQUALS, SLASH, atoi, equal_until, trim_line_end};
use crate::header::{HeaderStore, REQ_HEAD_CONTENT_LENGTH};

const HTTP_MARKER: &str = "HTTP/";

/// Request contains the details of the request parsed out of the shared buffer.  Every
/// string it hands out borrows from that buffer; nothing is copied.
#[derive(Debug)]
pub struct Request<'a> {
    method: &'a str,
    url: &'a str,
    query: Option<&'a str>,
    protocol_version: &'a str,
    failed: bool,
    header: HeaderStore<'a>,
    route: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// Tokenize a request line such as `GET /users/42?verbose=1 HTTP/1.1` (a trailing `\r\n`
    /// is ignored) and pair it with the store over the request's header block.
    ///
    /// Parsing never fails outright.  A request line with a missing method, path or protocol
    /// version, or a version token without `HTTP/`, produces a request for which
    /// [`Request::failed`] is true.  Text after the version token is ignored.
    ///
    /// ```
    /// use restlite::header::HeaderStore;
    /// use restlite::request::Request;
    ///
    /// let req = Request::parse(b"GET /search?q=foo HTTP/1.1\r\n", HeaderStore::detached());
    /// assert!(!req.failed());
    /// assert_eq!(req.method(), "GET");
    /// assert_eq!(req.url(), "/search");
    /// assert_eq!(req.query("q"), Some("foo"));
    /// ```
    pub fn parse(raw: &'a [u8], header: HeaderStore<'a>) -> Self {
        let mut req = Request {
            method: "",
            url: "",
            query: None,
            protocol_version: "",
            failed: true,
            header,
            route: None,
        };

        match req.parse_request_line(raw) {
            Ok(()) => req.failed = false,
            Err(e) => debug!("malformed request line: {=str}", e),
        }

        req
    }

    fn parse_request_line(&mut self, raw: &'a [u8]) -> Result<(), &'static str> {
        let line = core::str::from_utf8(trim_line_end(raw))
            .or(Err("request line is not valid utf8"))?;

        let (method, rest) = next_token(line);
        if method.is_empty() {
            return Err("missing method");
        }
        self.method = method;

        let (target, rest) = next_token(rest);
        if target.is_empty() {
            return Err("missing path");
        }
        (self.url, self.query) = match target.split_once('?') {
            Some((url, query)) => (url, Some(query).filter(|q| !q.is_empty())),
            None => (target, None),
        };

        let (version, _) = next_token(rest);
        if version.is_empty() {
            return Err("missing protocol version");
        }
        self.protocol_version = version;

        if !version.contains(HTTP_MARKER) {
            return Err("protocol version is not HTTP");
        }

        Ok(())
    }

    /// True when the request line could not be parsed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Method exactly as sent, e.g. `GET`.
    pub fn method(&self) -> &'a str {
        self.method
    }

    /// URL path without the query string, e.g. `/search` for `/search?q=foo`.
    pub fn url(&self) -> &'a str {
        self.url
    }

    /// Raw query string after the `?`, if there is one.
    pub fn query_string(&self) -> Option<&'a str> {
        self.query
    }

    /// Protocol version token, e.g. `HTTP/1.1`.
    pub fn protocol_version(&self) -> &'a str {
        self.protocol_version
    }

    /// Headers received with the request.
    pub fn header(&self) -> &HeaderStore<'a> {
        &self.header
    }

    /// Path template of the route this request was matched to, e.g. `/users/:id`.
    pub fn matched_route(&self) -> Option<&'a str> {
        self.route
    }

    pub(crate) fn set_matched_route(&mut self, template: &'a str) {
        self.route = Some(template);
    }

    /// Value of `key` in the query string.  `flag` in `?flag&a=1` has the value `""`.
    pub fn query(&self, key: &str) -> Option<&'a str> {
        if self.failed {
            return None;
        }

        self.query?
            .split('&')
            .find(|pair| equal_until(pair, key, EQUALS))
            .map(|pair| pair.split_once('=').map_or("", |(_, value)| value))
    }

    /// Value of the named path segment `key` for the matched route.  For the template
    /// `/users/:id` and the path `/users/42`, `parameter("id")` is `Some("42")`.  Always
    /// `None` before the request has been routed.
    pub fn parameter(&self, key: &str) -> Option<&'a str> {
        if self.failed {
            return None;
        }

        self.route?
            .split('/')
            .zip(self.url.split('/'))
            .find(|(segment, _)| {
                segment
                    .strip_prefix(':')
                    .is_some_and(|name| equal_until(name, key, SLASH))
            })
            .map(|(_, value)| value)
    }

    /// Content length from the `Content-Length` header, if present and numeric.  Any body is
    /// left unread in the client for the handler to consume.
    pub fn content_length(&self) -> Option<usize> {
        let value = self.header.get(REQ_HEAD_CONTENT_LENGTH)?;
        atoi(value.as_bytes()).map(|n| n as usize)
    }
}

/// Split off the first space delimited token, skipping leading spaces.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start_matches(' ');
    s.split_once(' ').unwrap_or((s, ""))
}
