use crate::codec::ResponseEncoder;
use crate::protocol::{Response, SendError};
use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;

/// Buffered writer over the write half of a connection.
///
/// Each response is encoded completely before anything reaches the socket,
/// then written with a single `write_all` and flushed.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, 8 * 1024)
    }

    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new() }
    }

    /// Encodes and sends `response`.
    ///
    /// # Errors
    ///
    /// Encoding failures and socket write failures. After an error the
    /// connection must be considered broken.
    pub async fn write(&mut self, response: Response) -> Result<(), SendError> {
        self.buffer.clear();
        self.encoder.encode(response, &mut self.buffer)?;

        self.writer.write_all(self.buffer.as_ref()).await?;
        Ok(self.writer.flush().await?)
    }

    /// Shuts the write half down, signalling end of stream to the client.
    ///
    /// # Errors
    ///
    /// Socket errors raised while shutting down.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        Ok(self.writer.shutdown().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::io;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn writes_whole_response() {
        let mock = Builder::new().write(b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabc").build();
        let mut writer = ResponseWriter::new(mock);

        writer.write(Response::new(StatusCode::OK).with_body("abc")).await.unwrap();
    }

    #[tokio::test]
    async fn consecutive_responses() {
        let mock = Builder::new()
            .write(b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n")
            .write(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n")
            .build();
        let mut writer = ResponseWriter::new(mock);

        writer.write(Response::new(StatusCode::CREATED)).await.unwrap();
        writer.write(Response::new(StatusCode::NOT_FOUND)).await.unwrap();
    }

    #[tokio::test]
    async fn write_failure() {
        let mock = Builder::new().write_error(io::Error::from(io::ErrorKind::BrokenPipe)).build();
        let mut writer = ResponseWriter::new(mock);

        let result = writer.write(Response::new(StatusCode::OK)).await;
        assert!(matches!(result, Err(SendError::Io { source }) if source.kind() == io::ErrorKind::BrokenPipe));
    }
}
