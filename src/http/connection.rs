use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::StaticFilesConfig;
use crate::error::RequestError;
use crate::http::framer::{frame_error, respond};
use crate::http::parser::{MAX_REQUEST_SIZE, find_header_end, parse_request_line};
use crate::http::request::Method;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::admission::{Admission, AdmissionController, AdmissionSlot};

const READ_CHUNK: usize = 1024;

/// Serves exactly one request on one connection.
///
/// Generic over the stream so the same worker runs on a `TcpStream` or on
/// an in-memory duplex pipe.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    static_files: StaticFilesConfig,
    admission: AdmissionController,
    slot: Option<AdmissionSlot>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Admitting,
    Reading,
    Processing,
    Rejected,
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, static_files: StaticFilesConfig, admission: AdmissionController) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            static_files,
            admission,
            slot: None,
            state: ConnectionState::Admitting,
        }
    }

    /// Drives the connection to completion.
    ///
    /// Whatever happens on the way, the admission slot is released and the
    /// stream shut down before this returns.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.serve().await;

        self.slot.take();
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Admitting => match self.admission.enter() {
                    Admission::Admitted(slot) => {
                        self.slot = Some(slot);
                        self.state = ConnectionState::Reading;
                    }
                    Admission::Rejected => {
                        tracing::warn!(
                            active = self.admission.active(),
                            limit = self.admission.limit(),
                            "Connection limit reached, rejecting"
                        );
                        self.state = ConnectionState::Rejected;
                    }
                },

                ConnectionState::Reading => {
                    if self.read_request().await? {
                        self.state = ConnectionState::Processing;
                    } else {
                        // Peer went away before a full request arrived.
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Processing => {
                    let response = self.handle_request().await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Rejected => {
                    let method = self.sniff_method().await;
                    let response = frame_error(&RequestError::CapacityExceeded, method);
                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(writer) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream).await {
                        tracing::debug!(
                            error = %e,
                            written = writer.bytes_written(),
                            "Response write aborted"
                        );
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the header terminator shows up or the size cap is hit.
    ///
    /// Returns `false` when the peer closes the connection first.
    async fn read_request(&mut self) -> anyhow::Result<bool> {
        let mut temp = [0u8; READ_CHUNK];

        loop {
            if find_header_end(&self.buffer).is_some() || self.buffer.len() >= MAX_REQUEST_SIZE {
                return Ok(true);
            }

            let want = temp.len().min(MAX_REQUEST_SIZE - self.buffer.len());
            let n = self.stream.read(&mut temp[..want]).await?;

            if n == 0 {
                return Ok(false);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    async fn handle_request(&self) -> Response {
        let response = match parse_request_line(&self.buffer) {
            Ok(line) => {
                tracing::debug!(method = line.method.as_str(), uri = %line.uri, "Request received");
                respond(&line, &self.static_files).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "Request rejected by parser");
                frame_error(&e, Method::sniff(&self.buffer))
            }
        };

        tracing::debug!(
            status = response.status.as_u16(),
            entity_length = response.entity_length(),
            "Response framed"
        );
        response
    }

    /// One bounded read, only to learn which method a rejected client used.
    async fn sniff_method(&mut self) -> Method {
        let mut temp = [0u8; READ_CHUNK];
        match self.stream.read(&mut temp).await {
            Ok(n) => Method::sniff(&temp[..n]),
            Err(_) => Method::UNSUPPORTED,
        }
    }
}
