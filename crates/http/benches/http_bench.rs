use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use http::StatusCode;
use octo_http::codec::{LineDecoder, ResponseEncoder, header};
use octo_http::connection::HttpConnection;
use octo_http::handler::make_handler;
use octo_http::protocol::{Request, Response};
use std::convert::Infallible;
use std::hint::black_box;
use std::{
    io,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::runtime::Runtime;
use tokio_util::codec::{Decoder, Encoder};

const REQUEST: &[u8] = b"GET /echo/hello HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: curl/8.5.0\r\nAccept: */*\r\n\r\n";

// Mock IO for benchmarking
#[derive(Clone)]
struct MockIO {
    read_data: Vec<u8>,
    write_data: Vec<u8>,
    read_pos: usize,
}

impl MockIO {
    fn new(read_data: Vec<u8>) -> Self {
        Self { read_data, write_data: Vec::new(), read_pos: 0 }
    }
}

impl AsyncRead for MockIO {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = std::cmp::min(remaining.len(), buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockIO {
    fn poll_write(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        self.write_data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

async fn echo_handler(req: Request) -> Result<Response, Infallible> {
    let text = req.target().strip_prefix("/echo/").unwrap_or_default().to_owned();
    Ok(Response::new(StatusCode::OK).with_header("Content-Type", "text/plain").with_body(text))
}

fn bench_request_parsing(c: &mut Criterion) {
    c.bench_function("parse_request_head", |b| {
        b.iter(|| {
            let mut decoder = LineDecoder::new();
            let mut bytes = BytesMut::from(REQUEST);

            let Some(line) = decoder.decode(&mut bytes).unwrap() else { return };
            black_box(header::decode_request_line(&line).unwrap());
            while let Some(line) = decoder.decode(&mut bytes).unwrap() {
                if line.is_empty() {
                    break;
                }
                black_box(header::decode_header_line(&line).unwrap());
            }
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let response = Response::new(StatusCode::OK).with_header("Content-Type", "text/plain").with_body("Hello World!");

    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = BytesMut::new();
            encoder.encode(response.clone(), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let handler = Arc::new(make_handler(echo_handler));

    c.bench_function("process_simple_request", |b| {
        b.to_async(&runtime).iter(|| {
            let handler = handler.clone();
            async move {
                let mock_io = MockIO::new(REQUEST.to_vec());
                let (reader, writer) = (mock_io.clone(), mock_io);
                let connection = HttpConnection::new(reader, writer);
                black_box(connection.process(handler).await.unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_request_parsing, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
