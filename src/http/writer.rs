use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Version advertised in the status line.
///
/// Requests must be HTTP/1.1, but responses have always been labelled
/// HTTP/1.0; clients rely on `Connection: close` either way.
const RESPONSE_VERSION: &str = "HTTP/1.0";

/// Serializes the status line and header block, including the blank line
/// that ends it.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    let status_line = format!(
        "{} {} {}\r\n",
        RESPONSE_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes a response as two segments: the header block, then the entity.
///
/// Short writes are retried with the unsent remainder. A write that makes
/// no progress aborts the response.
pub struct ResponseWriter {
    head: Vec<u8>,
    entity: Vec<u8>,
    head_written: usize,
    entity_written: usize,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            entity: response.body,
            head_written: 0,
            entity_written: 0,
        }
    }

    /// Total bytes sent so far across both segments.
    pub fn bytes_written(&self) -> usize {
        self.head_written + self.entity_written
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        write_segment(stream, &self.head, &mut self.head_written).await?;
        write_segment(stream, &self.entity, &mut self.entity_written).await?;
        stream.flush().await?;
        Ok(())
    }
}

async fn write_segment<S>(stream: &mut S, segment: &[u8], written: &mut usize) -> anyhow::Result<()>
where
    S: AsyncWrite + Unpin,
{
    while *written < segment.len() {
        let n = stream.write(&segment[*written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while writing"));
        }

        *written += n;
    }

    Ok(())
}
