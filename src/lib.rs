//! Simple - minimal static file HTTP server
//!
//! Reads one request per connection, serves a file from the document root
//! or an error response, and closes the connection.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;
