//! HTTP protocol implementation.
//!
//! A deliberately small slice of HTTP/1.x: one request per connection, GET
//! and HEAD only, headers skipped rather than parsed, and the connection
//! closed after every response.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection worker driving the state machine below
//! - **`parser`**: Tokenizes the request line out of the raw bytes
//! - **`request`**: `Method` and `RequestLine`
//! - **`framer`**: Turns a request outcome into a `Response`
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes responses, tolerating short writes
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │  Admitting  │ ← Take an admission slot
//!        └──┬───────┬──┘
//!  admitted │       │ limit reached
//!           ▼       ▼
//!   ┌─────────┐   ┌──────────┐
//!   │ Reading │   │ Rejected │ ← Sniff method, frame 503
//!   └────┬────┘   └────┬─────┘
//!        │ terminator  │
//!        │ or size cap │
//!        ▼             │
//!   ┌────────────┐     │
//!   │ Processing │     │ ← Parse, resolve, classify, frame
//!   └────┬───────┘     │
//!        ▼             ▼
//!   ┌──────────────────────┐
//!   │       Writing        │ ← Header block, then entity
//!   └──────────┬───────────┘
//!              ▼
//!   ┌──────────────────────┐
//!   │        Closed        │ ← Release slot, shut the stream down
//!   └──────────────────────┘
//! ```
//!
//! A peer that disconnects while `Reading` goes straight to `Closed`.

pub mod connection;
pub mod framer;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
