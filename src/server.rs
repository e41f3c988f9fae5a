use core::pin::Pin;
use core::task::{Context, Poll};

use embedded_io_async::{Read, ReadReady, Write};

use crate::HttpWrite;
use crate::WriteError;
use crate::ascii::{CR, LF};
use crate::clock::Clock;
use crate::config::{Config, ConfigError};
use crate::header::{HeaderError, HeaderStore, InsufficientCapacity};
use crate::request::Request;
use crate::response::{Response, StatusCode};
use crate::router::{Route, Router};

/// HandlerError is returned by `Handler` implementations.  The server answers a request whose
/// handler failed with `500 Internal Server Error`.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandlerError {
    /// Writing directly to the client failed
    NetworkError,
    /// A header or body did not fit its buffer
    Capacity(InsufficientCapacity),
    /// A header key or value would have broken the header block
    InvalidHeader,
    /// Custom errors as specified by the `Handler` implementation author
    CustomError(&'static str),
}

impl From<InsufficientCapacity> for HandlerError {
    fn from(value: InsufficientCapacity) -> Self {
        Self::Capacity(value)
    }
}

impl From<HeaderError> for HandlerError {
    fn from(value: HeaderError) -> Self {
        match value {
            HeaderError::Full(e) => Self::Capacity(e),
            HeaderError::InvalidCharacter => Self::InvalidHeader,
        }
    }
}

impl From<&'static str> for HandlerError {
    fn from(value: &'static str) -> Self {
        Self::CustomError(value)
    }
}

/// Trait implemented by route handlers.
///
/// A handler is called with the parsed request, the response being built, and the client.
/// It reads what it needs from the request and fills in the response; the server sends the
/// response once the handler returns.  The client is there for handlers that need to read a
/// request body or stream data of their own: anything written to it goes out ahead of the
/// response.
///
/// ```
/// use embedded_io_async::{Read, Write};
///
/// use restlite::request::Request;
/// use restlite::response::Response;
/// use restlite::server::{Handler, HandlerError};
///
/// enum Api {
///     Upload,
/// }
///
/// impl Handler<64> for Api {
///     async fn handle<C: Read + Write>(
///         &self,
///         req: &Request<'_>,
///         resp: &mut Response<'_, 64>,
///         client: &mut C,
///     ) -> Result<(), HandlerError> {
///         match self {
///             Api::Upload => {
///                 let mut body = [0u8; 32];
///                 let len = req.content_length().unwrap_or(0).min(body.len());
///                 client
///                     .read_exact(&mut body[..len])
///                     .await
///                     .or(Err(HandlerError::NetworkError))?;
///                 resp.set_body("stored")?;
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
///
/// Plain functions are handlers too, see [`HandlerFn`].
pub trait Handler<const N: usize> {
    /// Handle a request that matched this handler's route.  The response status is already
    /// `200 OK`.
    fn handle<C: Read + Write>(
        &self,
        req: &Request<'_>,
        resp: &mut Response<'_, N>,
        client: &mut C,
    ) -> impl Future<Output = Result<(), HandlerError>>;
}

/// A handler that only needs the request and the response.
///
/// ```
/// use restlite::request::Request;
/// use restlite::response::Response;
/// use restlite::router::Route;
/// use restlite::server::HandlerFn;
///
/// fn hello(_req: &Request<'_>, resp: &mut Response<'_, 32>) {
///     let _ = resp.set_body("hi");
/// }
///
/// static ROUTES: [Route<'static, HandlerFn<32>>; 1] =
///     [Route::new("GET", "/hello", hello as HandlerFn<32>)];
/// ```
pub type HandlerFn<const N: usize> = fn(&Request<'_>, &mut Response<'_, N>);

impl<const N: usize> Handler<N> for HandlerFn<N> {
    async fn handle<C: Read + Write>(
        &self,
        req: &Request<'_>,
        resp: &mut Response<'_, N>,
        _client: &mut C,
    ) -> Result<(), HandlerError> {
        (self)(req, resp);
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// ServerError is returned by the restlite::server::Server:serve() method when the response
/// could not be delivered.
pub enum ServerError {
    /// Network error writing the response to the client.  The client should be dropped.
    NetworkError,
}

impl From<WriteError> for ServerError {
    fn from(value: WriteError) -> Self {
        match value {
            WriteError::NetworkError => Self::NetworkError,
        }
    }
}

/// Why a request could not be received in full
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ReceiveError {
    /// Nothing arrived within the idle timeout
    Timeout,
    /// The inbound region filled up before the end of the headers
    BufferFull,
    /// The client went away
    Disconnected,
}

/// Server is the main struct to be used by users of the crate.  It is constructed over the
/// shared buffer and a static route table, and provides a serve() method to be called on each
/// new client connection.
///
/// The shared buffer is split in two.  The front, inbound, part receives the request line and
/// headers which are parsed in place.  The last `Config::reserved` bytes hold the response
/// headers set by handlers.  The dynamic response body lives in the response itself and
/// holds up to `N` bytes.
pub struct Server<'b, 'r, H, K, const N: usize> {
    buffer: &'b mut [u8],
    inbound: usize,
    router: Router<'r, H>,
    clock: K,
    timeout_ms: u64,
}

impl<'b, 'r, H, K, const N: usize> Server<'b, 'r, H, K, N>
where
    H: Handler<N>,
    K: Clock,
{
    /// Construct a Server.  Fails if the header reserve in `config` is larger than `buffer`.
    pub fn new(
        buffer: &'b mut [u8],
        routes: &'r [Route<'r, H>],
        clock: K,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate(buffer.len())?;

        Ok(Self {
            inbound: buffer.len() - config.reserved,
            buffer,
            router: Router::new(routes),
            clock,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Bytes of the shared buffer available to receive a request
    pub fn buffer_size(&self) -> usize {
        self.inbound
    }

    /// Bytes of the shared buffer reserved for response headers
    pub fn reserved_buffer_size(&self) -> usize {
        self.buffer.len() - self.inbound
    }

    /// Idle receive timeout in milliseconds
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Receive one request from the client, dispatch it to the matching route's handler and
    /// send the response.  Returns the status that was sent.
    ///
    /// A request that cannot be received (timeout, disconnect, or headers larger than the
    /// buffer) or whose request line is malformed is answered with `400 Bad Request`.  A
    /// request no route matches is answered with `404 Not Found`.  Only a failure to write the
    /// response is returned as an error, in which case the client should be dropped.
    ///
    /// Bytes following the headers, such as a request body, are left unread for the handler.
    pub async fn serve<C>(&mut self, client: &mut C) -> Result<StatusCode, ServerError>
    where
        C: Read + Write + ReadReady,
    {
        let (inbound, reserved) = self.buffer.split_at_mut(self.inbound);
        inbound.fill(0);
        reserved.fill(0);

        let received = match receive(client, inbound, &self.clock, self.timeout_ms).await {
            Ok(n) => n,
            Err(e) => {
                warn!("receive failed: {}", e);
                return bad_request(client).await;
            }
        };

        let (line, headers) = split_request(inbound, received);
        let mut req = Request::parse(line, HeaderStore::attach(headers));
        if req.failed() {
            return bad_request(client).await;
        }
        trace!("request {=str} {=str}", req.method(), req.url());

        let header = match reserved.is_empty() {
            true => HeaderStore::detached(),
            false => HeaderStore::attach(reserved),
        };
        let mut resp = Response::<N>::new(header);

        match self.router.route(&mut req, &mut resp) {
            Some(route) => {
                if let Err(e) = route.handler.handle(&req, &mut resp, client).await {
                    warn!("handler for {=str} failed: {}", route.path, e);
                    resp.set_status(StatusCode::InternalServerError);
                }
            }
            None => debug!("no route for {=str} {=str}", req.method(), req.url()),
        }

        (&resp).write(client).await?;

        Ok(resp.status())
    }
}

/// Read the request line and headers into `buf` one byte at a time, stopping right after
/// the blank line that ends them.  Returns the number of bytes received.
async fn receive<C, K>(
    client: &mut C,
    buf: &mut [u8],
    clock: &K,
    timeout_ms: u64,
) -> Result<usize, ReceiveError>
where
    C: Read + ReadReady,
    K: Clock,
{
    let mut received = 0;
    let mut blank_line = true;
    let mut last_byte_at = clock.now_ms();

    while received < buf.len() {
        match client.read_ready() {
            Ok(true) => {}
            Ok(false) => {
                if clock.elapsed_ms(last_byte_at) >= timeout_ms {
                    return Err(ReceiveError::Timeout);
                }
                yield_now().await;
                continue;
            }
            Err(_) => return Err(ReceiveError::Disconnected),
        }

        match client.read(&mut buf[received..received + 1]).await {
            Ok(0) | Err(_) => return Err(ReceiveError::Disconnected),
            Ok(_) => {}
        }

        let byte = buf[received];
        received += 1;

        if byte == LF && blank_line {
            return Ok(received);
        }

        // a line holding nothing but CRs still counts as blank
        blank_line = match byte {
            LF => true,
            CR => blank_line,
            _ => false,
        };
        last_byte_at = clock.now_ms();
    }

    Err(ReceiveError::BufferFull)
}

/// Split the received bytes into the request line and the header block.  The blank line
/// ending the header block is zeroed so the block holds only complete header lines.
fn split_request(inbound: &mut [u8], received: usize) -> (&[u8], &mut [u8]) {
    let line_end = inbound[..received]
        .iter()
        .position(|b| *b == LF)
        .map_or(received, |i| i + 1);

    let mut end = received;
    if end > line_end && inbound[end - 1] == LF {
        end -= 1;
        while end > line_end && inbound[end - 1] == CR {
            end -= 1;
        }
    }
    inbound[end..received].fill(0);

    let (line, headers) = inbound.split_at_mut(line_end);
    (&*line, headers)
}

async fn bad_request<C: Write>(client: &mut C) -> Result<StatusCode, ServerError> {
    StatusCode::BadRequest.write(client).await?;
    client
        .write_all(&[CR, LF])
        .await
        .or(Err(ServerError::NetworkError))?;

    Ok(StatusCode::BadRequest)
}

/// Give other tasks on the executor a chance to run while waiting for data.
fn yield_now() -> impl Future<Output = ()> {
    struct YieldNow {
        yielded: bool,
    }

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.yielded {
                return Poll::Ready(());
            }
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    YieldNow { yielded: false }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use core::cell::Cell;
    use core::fmt::Write as _;
    use std::string::{String, ToString};
    use std::vec::Vec;

    use embedded_io_async::{ErrorKind, ErrorType};

    use super::*;
    use crate::header::RESP_HEAD_CONTENT_TYPE;

    const BODY: usize = 64;

    /// Hands out `inner` one byte per read.  Once drained it either reports nothing
    /// available (an idle client) or end of stream (a disconnected client).
    struct TestClient<'a> {
        inner: &'a [u8],
        hang_up: bool,
        written: Vec<u8>,
    }

    impl<'a> TestClient<'a> {
        fn new(inner: &'a [u8]) -> Self {
            Self {
                inner,
                hang_up: false,
                written: Vec::new(),
            }
        }

        fn hanging_up(inner: &'a [u8]) -> Self {
            Self {
                hang_up: true,
                ..Self::new(inner)
            }
        }

        fn output(&self) -> &str {
            core::str::from_utf8(&self.written).unwrap()
        }
    }

    impl<'a> ErrorType for TestClient<'a> {
        type Error = ErrorKind;
    }

    impl<'a> ReadReady for TestClient<'a> {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.inner.is_empty() || self.hang_up)
        }
    }

    impl<'a> Read for TestClient<'a> {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            match self.inner.split_first() {
                Some((byte, rest)) if !buf.is_empty() => {
                    buf[0] = *byte;
                    self.inner = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    impl<'a> Write for TestClient<'a> {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        async fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(buf);
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// A clock that moves forward 100ms every time it is read.
    fn ticking(now: &Cell<u64>) -> impl Fn() -> u64 + '_ {
        move || {
            now.set(now.get() + 100);
            now.get()
        }
    }

    fn hello(_req: &Request<'_>, resp: &mut Response<'_, BODY>) {
        resp.set_status(StatusCode::OK);
        resp.set_body("hi").unwrap();
    }

    fn user(req: &Request<'_>, resp: &mut Response<'_, BODY>) {
        resp.header_mut().set(RESP_HEAD_CONTENT_TYPE, "application/json");
        write!(
            resp.body_mut(),
            "{{\"id\":\"{}\",\"verbose\":\"{}\"}}",
            req.parameter("id").unwrap_or(""),
            req.query("verbose").unwrap_or("")
        )
        .unwrap();
    }

    fn index(_req: &Request<'_>, resp: &mut Response<'_, BODY>) {
        resp.set_constbody("<html>index</html>");
        resp.use_constbody(true);
    }

    fn created(req: &Request<'_>, resp: &mut Response<'_, BODY>) {
        resp.set_status(StatusCode::Created);
        resp.header_mut()
            .set("Location", req.header().get("X-Next").unwrap_or("/"));
    }

    static ROUTES: [Route<'static, HandlerFn<BODY>>; 4] = [
        Route::new("GET", "/hello", hello as HandlerFn<BODY>),
        Route::new("GET", "/users/:id", user as HandlerFn<BODY>),
        Route::new("GET", "/", index as HandlerFn<BODY>),
        Route::new("POST", "/items", created as HandlerFn<BODY>),
    ];

    async fn serve(request: &[u8], buffer_size: usize, reserved: usize) -> (String, StatusCode) {
        let mut buffer = std::vec![0u8; buffer_size];
        let now = Cell::new(0);
        let mut server = Server::<_, _, BODY>::new(
            &mut buffer[..],
            &ROUTES,
            ticking(&now),
            Config::default().with_reserved(reserved),
        )
        .unwrap();

        let mut client = TestClient::new(request);
        let status = server.serve(&mut client).await.unwrap();
        (client.output().to_string(), status)
    }

    #[tokio::test]
    async fn test_hello() {
        let (output, status) =
            serve(b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n", 256, 64).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(output, "HTTP/1.1 200 OK\r\n\r\nhi");
    }

    #[tokio::test]
    async fn test_named_parameter_query_and_headers() {
        let (output, status) = serve(
            b"GET /users/42?verbose=1 HTTP/1.1\r\nHost: x\r\n\r\n",
            256,
            64,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            output,
            "HTTP/1.1 200 OK\r
Content-Type: application/json\r
\r
{\"id\":\"42\",\"verbose\":\"1\"}"
        );
    }

    #[tokio::test]
    async fn test_constbody() {
        let (output, _) = serve(b"GET / HTTP/1.1\r\n\r\n", 128, 0).await;
        assert_eq!(output, "HTTP/1.1 200 OK\r\n\r\n<html>index</html>");
    }

    #[tokio::test]
    async fn test_handler_reads_request_headers() {
        let (output, status) = serve(
            b"POST /items HTTP/1.1\r\nHost: x\r\nX-Next: /items/9\r\n\r\n",
            256,
            64,
        )
        .await;

        assert_eq!(status, StatusCode::Created);
        assert_eq!(output, "HTTP/1.1 201 Created\r\nLocation: /items/9\r\n\r\n");
    }

    #[tokio::test]
    async fn test_not_found() {
        let (output, status) = serve(b"GET /nowhere HTTP/1.1\r\n\r\n", 128, 32).await;
        assert_eq!(status, StatusCode::NotFound);
        assert_eq!(output, "HTTP/1.1 404 Not Found\r\n\r\n");

        // method must match too
        let (_, status) = serve(b"DELETE /hello HTTP/1.1\r\n\r\n", 128, 32).await;
        assert_eq!(status, StatusCode::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_request_line() {
        for request in [
            &b"GET /hello\r\n\r\n"[..],
            &b"GET /hello FTP/1.1\r\n\r\n"[..],
            &b"GET /hello bogus HTTP/1.1\r\n\r\n"[..],
            &b"\r\n"[..],
        ] {
            let (output, status) = serve(request, 128, 32).await;
            assert_eq!(status, StatusCode::BadRequest);
            assert_eq!(output, "HTTP/1.1 400 Bad Request\r\n\r\n");
        }
    }

    #[tokio::test]
    async fn test_idle_timeout() {
        let (output, status) = serve(b"", 128, 32).await;
        assert_eq!(status, StatusCode::BadRequest);
        assert_eq!(output, "HTTP/1.1 400 Bad Request\r\n\r\n");

        // a partial request that stalls times out the same way
        let (output, _) = serve(b"GET /hello HTTP/1.1\r\nHost:", 128, 32).await;
        assert_eq!(output, "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[tokio::test]
    async fn test_timeout_resets_on_every_byte() {
        // the clock moves 100ms per reading, so this request takes far longer than the
        // timeout in total while no single gap comes close to it
        let request = b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n";
        let mut buffer = [0u8; 128];
        let now = Cell::new(0);
        let mut server = Server::<_, _, BODY>::new(
            &mut buffer[..],
            &ROUTES,
            ticking(&now),
            Config::default().with_timeout_ms(500),
        )
        .unwrap();

        let mut client = TestClient::new(request);
        assert_eq!(server.serve(&mut client).await, Ok(StatusCode::OK));
        assert!(now.get() > 500);
    }

    #[tokio::test]
    async fn test_disconnect() {
        let mut buffer = [0u8; 128];
        let now = Cell::new(0);
        let mut server =
            Server::<_, _, BODY>::new(&mut buffer[..], &ROUTES, ticking(&now), Config::default())
                .unwrap();

        let mut client = TestClient::hanging_up(b"GET /hello HTTP/1.1\r\n");
        assert_eq!(server.serve(&mut client).await, Ok(StatusCode::BadRequest));
        assert_eq!(client.output(), "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[tokio::test]
    async fn test_headers_larger_than_buffer() {
        let (output, status) = serve(
            b"GET /hello HTTP/1.1\r\nHost: a-rather-long-host-name.example\r\n\r\n",
            48,
            16,
        )
        .await;

        assert_eq!(status, StatusCode::BadRequest);
        assert_eq!(output, "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[tokio::test]
    async fn test_no_reserve_drops_response_headers() {
        let (output, status) = serve(b"GET /users/7 HTTP/1.1\r\n\r\n", 128, 0).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            output,
            "HTTP/1.1 200 OK\r\n\r\n{\"id\":\"7\",\"verbose\":\"\"}"
        );
    }

    #[tokio::test]
    async fn test_serve_reuses_buffer() {
        let mut buffer = [0u8; 128];
        let now = Cell::new(0);
        let mut server = Server::<_, _, BODY>::new(
            &mut buffer[..],
            &ROUTES,
            ticking(&now),
            Config::default().with_reserved(48),
        )
        .unwrap();

        let mut client = TestClient::new(b"POST /items HTTP/1.1\r\nX-Next: /items/1\r\n\r\n");
        assert_eq!(server.serve(&mut client).await, Ok(StatusCode::Created));

        // nothing from the previous request leaks into this one
        let mut client = TestClient::new(b"POST /items HTTP/1.1\r\n\r\n");
        assert_eq!(server.serve(&mut client).await, Ok(StatusCode::Created));
        assert_eq!(
            client.output(),
            "HTTP/1.1 201 Created\r\nLocation: /\r\n\r\n"
        );
    }

    #[test]
    fn test_buffer_partition() {
        let mut buffer = [0u8; 100];
        let server = Server::<_, _, BODY>::new(
            &mut buffer[..],
            &ROUTES,
            || 0u64,
            Config::default().with_reserved(30),
        )
        .unwrap();

        assert_eq!(server.buffer_size(), 70);
        assert_eq!(server.reserved_buffer_size(), 30);
        assert_eq!(server.timeout_ms(), 7000);

        let mut buffer = [0u8; 100];
        let res = Server::<_, _, BODY>::new(
            &mut buffer[..],
            &ROUTES,
            || 0u64,
            Config::default().with_reserved(101),
        );
        assert!(matches!(
            res,
            Err(ConfigError::ReserveExceedsBuffer {
                reserved: 101,
                capacity: 100
            })
        ));
    }

    #[test]
    fn test_split_request() {
        let mut buf = [0u8; 64];
        let received = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n";
        buf[..received.len()].copy_from_slice(received);

        let (line, headers) = split_request(&mut buf[..], received.len());
        assert_eq!(line, b"GET / HTTP/1.1\r\n".as_slice());
        assert_eq!(HeaderStore::attach(headers).as_bytes(), b"Host: x\r\n".as_slice());

        let mut buf = [0u8; 64];
        let received = b"GET / HTTP/1.1\r\n\r\n";
        buf[..received.len()].copy_from_slice(received);

        let (_, headers) = split_request(&mut buf[..], received.len());
        assert!(!HeaderStore::attach(headers).transmissible());
    }

    enum Api {
        Stream,
        Echo,
        Broken,
        Redirect,
    }

    impl Handler<BODY> for Api {
        async fn handle<C: Read + Write>(
            &self,
            req: &Request<'_>,
            resp: &mut Response<'_, BODY>,
            client: &mut C,
        ) -> Result<(), HandlerError> {
            match self {
                Api::Stream => {
                    client
                        .write_all(b"raw")
                        .await
                        .or(Err(HandlerError::NetworkError))?;
                    resp.set_status(StatusCode::NoContent);
                }
                Api::Echo => {
                    let mut body = [0u8; BODY];
                    let len = req.content_length().unwrap_or(0).min(BODY);
                    client
                        .read_exact(&mut body[..len])
                        .await
                        .or(Err(HandlerError::NetworkError))?;
                    resp.set_body(core::str::from_utf8(&body[..len]).or(Err("body is not utf8"))?)?;
                }
                Api::Broken => return Err(HandlerError::CustomError("broken")),
                Api::Redirect => {
                    resp.set_status(StatusCode::Found);
                    resp.header_mut()
                        .try_set("Location", req.query("to").unwrap_or("/"))?;
                }
            }
            Ok(())
        }
    }

    static API: [Route<'static, Api>; 4] = [
        Route::new("GET", "/stream", Api::Stream),
        Route::new("POST", "/echo", Api::Echo),
        Route::new("GET", "/broken", Api::Broken),
        Route::new("GET", "/redirect", Api::Redirect),
    ];

    async fn serve_api(request: &[u8]) -> (String, StatusCode) {
        let mut buffer = [0u8; 256];
        let now = Cell::new(0);
        let mut server = Server::<_, _, BODY>::new(
            &mut buffer[..],
            &API,
            ticking(&now),
            Config::default().with_reserved(64),
        )
        .unwrap();

        let mut client = TestClient::new(request);
        let status = server.serve(&mut client).await.unwrap();
        (client.output().to_string(), status)
    }

    #[tokio::test]
    async fn test_handler_writes_to_client() {
        let (output, status) = serve_api(b"GET /stream HTTP/1.1\r\n\r\n").await;
        assert_eq!(status, StatusCode::NoContent);
        assert_eq!(output, "rawHTTP/1.1 204 No Content\r\n\r\n");
    }

    #[tokio::test]
    async fn test_handler_reads_body_from_client() {
        let (output, status) =
            serve_api(b"POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(output, "HTTP/1.1 200 OK\r\n\r\nhello");
    }

    #[tokio::test]
    async fn test_handler_error() {
        let (output, status) = serve_api(b"GET /broken HTTP/1.1\r\n\r\n").await;
        assert_eq!(status, StatusCode::InternalServerError);
        assert_eq!(output, "HTTP/1.1 500 Internal Server Error\r\n\r\n");
    }

    #[tokio::test]
    async fn test_handler_header_error() {
        let (output, status) = serve_api(b"GET /redirect?to=/home HTTP/1.1\r\n\r\n").await;
        assert_eq!(status, StatusCode::Found);
        assert_eq!(output, "HTTP/1.1 302 Found\r\nLocation: /home\r\n\r\n");

        let (output, status) =
            serve_api(b"GET /redirect?to=/\x00x HTTP/1.1\r\n\r\n").await;
        assert_eq!(status, StatusCode::InternalServerError);
        assert_eq!(output, "HTTP/1.1 500 Internal Server Error\r\n\r\n");
    }
}
