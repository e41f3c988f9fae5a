//! # Restlite
//!
//! `restlite` is a **very** basic HTTP/1.1 REST server predominantly aimed at `no_std` and
//! `no_alloc` use cases such as embedded development.
//!
//! This crate provides:
//!
//! * receiving a request's line and headers from a client, with an idle timeout.
//! * routing requests by method and path template, e.g. `/users/:id`, to handlers.
//! * access to named path segments, query string values and request headers.
//! * building a response with a status, headers and a constant or dynamic body.
//!
//! This crate does **not** provide:
//!
//! * any buffering or decoding of request bodies.  Bytes following the headers are left in
//!   the client for the handler to read.
//! * keep-alive, chunked transfer encoding, TLS or URL decoding.
//!
//! ## Memory
//!
//! All request data lives in one caller supplied buffer that is reused for every request.
//! The front of the buffer receives the request line and headers, which are parsed in place.
//! The last `Config::reserved` bytes hold the response headers set by handlers.  The dynamic
//! response body is a `heapless::String<N>` whose capacity is the server's const parameter `N`.
//!
//! ## Basic Use
//!
//! Declare a static route table of `router::Route`s, each pairing a method and path template
//! with a handler.  Handlers are plain functions (`server::HandlerFn`) or any type
//! implementing `server::Handler`.  Create a `server::Server` over the buffer, the routes and
//! a `clock::Clock`, then call `serve()` for every client that connects on a TCP socket (or
//! anything implementing `embedded_io_async::{Read, Write, ReadReady}`).
//!
//! ## Example
//!
//! ```
//! # use tokio;
//! # use embedded_io_async::Read as _;
//! use core::fmt::Write as _;
//!
//! use restlite::config::Config;
//! use restlite::header::RESP_HEAD_CONTENT_TYPE;
//! use restlite::request::Request;
//! use restlite::response::{Response, StatusCode};
//! use restlite::router::Route;
//! use restlite::server::{HandlerFn, Server};
//!
//! const BODY: usize = 128;
//! const HTML_INDEX: &str = "<html>...</html>";
//!
//! fn index(_req: &Request<'_>, resp: &mut Response<'_, BODY>) {
//!     resp.set_constbody(HTML_INDEX);
//!     resp.use_constbody(true);
//! }
//!
//! fn user(req: &Request<'_>, resp: &mut Response<'_, BODY>) {
//!     resp.header_mut().set(RESP_HEAD_CONTENT_TYPE, "application/json");
//!     let _ = write!(
//!         resp.body_mut(),
//!         "{{\"id\":\"{}\"}}",
//!         req.parameter("id").unwrap_or("")
//!     );
//! }
//!
//! static ROUTES: [Route<'static, HandlerFn<BODY>>; 2] = [
//!     Route::new("GET", "/", index as HandlerFn<BODY>),
//!     Route::new("GET", "/users/:id", user as HandlerFn<BODY>),
//! ];
//!
//! # struct Client<'a> {
//! #     rx: &'a [u8],
//! #     tx: Vec<u8>,
//! # }
//! #
//! # impl<'a> embedded_io_async::ErrorType for Client<'a> {
//! #     type Error = embedded_io_async::ErrorKind;
//! # }
//! #
//! # impl<'a> embedded_io_async::ReadReady for Client<'a> {
//! #     fn read_ready(&mut self) -> Result<bool, Self::Error> {
//! #         Ok(true)
//! #     }
//! # }
//! #
//! # impl<'a> embedded_io_async::Read for Client<'a> {
//! #     async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
//! #         match self.rx.read(buf).await {
//! #             Ok(n) => Ok(n),
//! #             Err(_) => Err(embedded_io_async::ErrorKind::Other),
//! #         }
//! #     }
//! # }
//! #
//! # impl<'a> embedded_io_async::Write for Client<'a> {
//! #     async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
//! #         self.tx.extend_from_slice(buf);
//! #         Ok(buf.len())
//! #     }
//! # }
//! #
//! async fn run_server() {
//!     // Client implements embedded_io_async::{Read, Write, ReadReady} (not shown)
//!     // this would typically be an implementation of a TCP Socket that implements the traits.
//!     // e.g. embassy_net::tcp::TcpSocket
//!     let mut client = Client {
//!         rx: b"GET /users/42 HTTP/1.1\r\nHost: device.local\r\n\r\n",
//!         tx: Vec::new(),
//!     };
//!
//!     // milliseconds since boot, e.g. embassy_time::Instant::now().as_millis()
//!     let clock = || 0u64;
//!
//!     let mut http_buffer = [0u8; 1024];
//!     let mut server = Server::<_, _, BODY>::new(
//!         &mut http_buffer[..],
//!         &ROUTES,
//!         clock,
//!         Config::default().with_reserved(256),
//!     )
//!     .unwrap();
//!
//!     match server.serve(&mut client).await {
//!         Ok(status) => assert_eq!(status, StatusCode::OK),
//!         Err(_) => {
//!             // drop the client
//!         }
//!     }
//!
//!     assert_eq!(
//!         client.tx,
//!         b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"id\":\"42\"}"
//!     );
//! }
//! #
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! #     run_server().await;
//! # })
//! ```

#![no_std]
#![warn(missing_docs)]

mod fmt;

/// Byte sequence primitives
pub mod ascii;
/// Millisecond time source
pub mod clock;
/// Server configuration
pub mod config;
/// HTTP Headers
pub mod header;
/// HTTP Requests
pub mod request;
/// HTTP responses
pub mod response;
/// Request routing
pub mod router;
/// HTTP server
pub mod server;

use embedded_io_async::Write;

pub(crate) enum WriteError {
    NetworkError,
}

pub(crate) trait HttpWrite {
    async fn write<T: Write>(self, writer: &mut T) -> Result<(), WriteError>;
}
