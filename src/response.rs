use embedded_io_async::Write;
use heapless::String;

use crate::ascii::{CR, LF, SP};
use crate::header::{HeaderStore, InsufficientCapacity};
use crate::{HttpWrite, WriteError};

const HTTP_PROTO: &str = "HTTP/1.1";

/// HTTP status sent on the status line of a response
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum StatusCode {
    Continue,
    SwitchingProtocols,
    OK,
    Created,
    Accepted,
    NonAuthoritativeInformation,
    NoContent,
    ResetContent,
    PartialContent,
    MultipleChoices,
    MovedPermanently,
    Found,
    SeeOther,
    NotModified,
    UseProxy,
    TemporaryRedirect,
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    ProxyAuthenticationRequired,
    RequestTimeout,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    RequestEntityTooLarge,
    RequestUriTooLarge,
    UnsupportedMediaType,
    RequestedRangeNotSatisfiable,
    ExpectationFailed,
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    HttpVersionNotSupported,
}

impl StatusCode {
    /// Numeric status code, e.g. `404`
    #[rustfmt::skip]
    pub fn code(self) -> u16 {
        match self {
            Self::Continue                     => 100,
            Self::SwitchingProtocols           => 101,
            Self::OK                           => 200,
            Self::Created                      => 201,
            Self::Accepted                     => 202,
            Self::NonAuthoritativeInformation  => 203,
            Self::NoContent                    => 204,
            Self::ResetContent                 => 205,
            Self::PartialContent               => 206,
            Self::MultipleChoices              => 300,
            Self::MovedPermanently             => 301,
            Self::Found                        => 302,
            Self::SeeOther                     => 303,
            Self::NotModified                  => 304,
            Self::UseProxy                     => 305,
            Self::TemporaryRedirect            => 307,
            Self::BadRequest                   => 400,
            Self::Unauthorized                 => 401,
            Self::PaymentRequired              => 402,
            Self::Forbidden                    => 403,
            Self::NotFound                     => 404,
            Self::MethodNotAllowed             => 405,
            Self::NotAcceptable                => 406,
            Self::ProxyAuthenticationRequired  => 407,
            Self::RequestTimeout               => 408,
            Self::Conflict                     => 409,
            Self::Gone                         => 410,
            Self::LengthRequired               => 411,
            Self::PreconditionFailed           => 412,
            Self::RequestEntityTooLarge        => 413,
            Self::RequestUriTooLarge           => 414,
            Self::UnsupportedMediaType         => 415,
            Self::RequestedRangeNotSatisfiable => 416,
            Self::ExpectationFailed            => 417,
            Self::InternalServerError          => 500,
            Self::NotImplemented               => 501,
            Self::BadGateway                   => 502,
            Self::ServiceUnavailable           => 503,
            Self::GatewayTimeout               => 504,
            Self::HttpVersionNotSupported      => 505,
        }
    }

    /// Code and reason phrase as they appear after `HTTP/1.1 ` on the status line
    #[rustfmt::skip]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continue                     => "100 Continue",
            Self::SwitchingProtocols           => "101 Switching Protocols",
            Self::OK                           => "200 OK",
            Self::Created                      => "201 Created",
            Self::Accepted                     => "202 Accepted",
            Self::NonAuthoritativeInformation  => "203 Non-Authoritative Information",
            Self::NoContent                    => "204 No Content",
            Self::ResetContent                 => "205 Reset Content",
            Self::PartialContent               => "206 Partial Content",
            Self::MultipleChoices              => "300 Multiple Choices",
            Self::MovedPermanently             => "301 Moved Permanently",
            Self::Found                        => "302 Found",
            Self::SeeOther                     => "303 See Other",
            Self::NotModified                  => "304 Not Modified",
            Self::UseProxy                     => "305 Use Proxy",
            Self::TemporaryRedirect            => "307 Temporary Redirect",
            Self::BadRequest                   => "400 Bad Request",
            Self::Unauthorized                 => "401 Unauthorized",
            Self::PaymentRequired              => "402 Payment Required",
            Self::Forbidden                    => "403 Forbidden",
            Self::NotFound                     => "404 Not Found",
            Self::MethodNotAllowed             => "405 Method Not Allowed",
            Self::NotAcceptable                => "406 Not Acceptable",
            Self::ProxyAuthenticationRequired  => "407 Proxy Authentication Required",
            Self::RequestTimeout               => "408 Request Time-out",
            Self::Conflict                     => "409 Conflict",
            Self::Gone                         => "410 Gone",
            Self::LengthRequired               => "411 Length Required",
            Self::PreconditionFailed           => "412 Precondition Failed",
            Self::RequestEntityTooLarge        => "413 Request Entity Too Large",
            Self::RequestUriTooLarge           => "414 Request-URI Too Large",
            Self::UnsupportedMediaType         => "415 Unsupported Media Type",
            Self::RequestedRangeNotSatisfiable => "416 Requested range not satisfiable",
            Self::ExpectationFailed            => "417 Expectation Failed",
            Self::InternalServerError          => "500 Internal Server Error",
            Self::NotImplemented               => "501 Not Implemented",
            Self::BadGateway                   => "502 Bad Gateway",
            Self::ServiceUnavailable           => "503 Service Unavailable",
            Self::GatewayTimeout               => "504 Gateway Time-out",
            Self::HttpVersionNotSupported      => "505 HTTP Version not supported",
        }
    }

    /// Reason phrase alone, e.g. `Not Found`
    pub fn reason(self) -> &'static str {
        // as_str() is always "NNN <reason>"
        &self.as_str()[4..]
    }
}

impl HttpWrite for StatusCode {
    #[rustfmt::skip]
    async fn write<T: Write>(self, writer: &mut T) -> Result<(), WriteError> {
        writer.write_all(HTTP_PROTO.as_bytes()).await
            .and(writer.write_all(&[SP]).await
            .and(writer.write_all(self.as_str().as_bytes()).await
            .and(writer.write_all(&[CR, LF]).await
        ))).or(Err(WriteError::NetworkError))
    }
}

/// Response is built up by a handler and written to the client by the server once the
/// handler returns.
///
/// It starts out as `404 Not Found` with no headers and an empty body.  The server sets the
/// status to `200 OK` before calling the handler of a matched route.  Headers are written
/// into the region of the shared buffer reserved for them; the body is either a constant
/// `&'static str` or a dynamic body of at most `N` bytes.
#[derive(Debug)]
pub struct Response<'a, const N: usize> {
    status: StatusCode,
    constbody: &'static str,
    body: String<N>,
    use_constbody: bool,
    header: HeaderStore<'a>,
}

impl<'a, const N: usize> Response<'a, N> {
    /// Create a response writing its headers into `header`
    pub fn new(header: HeaderStore<'a>) -> Self {
        Self {
            status: StatusCode::NotFound,
            constbody: "",
            body: String::new(),
            use_constbody: false,
            header,
        }
    }

    /// Status that will be sent
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Set the status to send.  `None` leaves the current status in place, so the last
    /// `Some` status set wins.
    pub fn set_status(&mut self, status: impl Into<Option<StatusCode>>) {
        if let Some(status) = status.into() {
            self.status = status;
        }
    }

    /// Response headers
    pub fn header(&self) -> &HeaderStore<'a> {
        &self.header
    }

    /// Response headers.  A header that does not fit the reserved region is dropped.
    pub fn header_mut(&mut self) -> &mut HeaderStore<'a> {
        &mut self.header
    }

    /// The constant body
    pub fn constbody(&self) -> &'static str {
        self.constbody
    }

    /// Set the constant body.  It is only sent once selected with
    /// [`Response::use_constbody`].
    pub fn set_constbody(&mut self, body: &'static str) {
        self.constbody = body;
    }

    /// The dynamic body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The dynamic body, for appending to.  It implements `core::fmt::Write`.
    pub fn body_mut(&mut self) -> &mut String<N> {
        &mut self.body
    }

    /// Replace the dynamic body.  If `body` is longer than `N` the current body is kept.
    pub fn set_body(&mut self, body: &str) -> Result<(), InsufficientCapacity> {
        self.body = String::try_from(body).or(Err(InsufficientCapacity {
            needed: body.len(),
            remaining: N,
        }))?;

        Ok(())
    }

    /// True when the constant body is the one that will be sent
    pub fn uses_constbody(&self) -> bool {
        self.use_constbody
    }

    /// Select the constant body (`true`) or the dynamic body (`false`, the default)
    pub fn use_constbody(&mut self, use_constbody: bool) {
        self.use_constbody = use_constbody;
    }

    fn selected_body(&self) -> &str {
        if self.use_constbody {
            self.constbody
        } else {
            &self.body
        }
    }
}

impl<'a, const N: usize> HttpWrite for &Response<'a, N> {
    async fn write<T: Write>(self, writer: &mut T) -> Result<(), WriteError> {
        self.status.write(writer).await?;

        if self.header.transmissible() {
            writer
                .write_all(self.header.as_bytes())
                .await
                .or(Err(WriteError::NetworkError))?;
        }

        writer
            .write_all(&[CR, LF])
            .await
            .and(writer.write_all(self.selected_body().as_bytes()).await)
            .or(Err(WriteError::NetworkError))
    }
}
