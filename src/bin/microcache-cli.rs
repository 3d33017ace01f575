//! # Interactive command-line client
//!
//! Reads whitespace-separated commands from stdin, one per line, sends each
//! as a request frame and prints the reply as it arrives. Scalars print one
//! per line, nil prints as `(nil)`, arrays print their elements
//! recursively, errors go to stderr prefixed with `(error) `.
use bytes::{Buf, Bytes, BytesMut};
use cache_protocol_parser::{parse_reply, serialize_request, Error as WireError};
use futures::SinkExt;
use microcache::value::Value;
use std::io::{self, Write};
use tokio::{
    io::{stdin, AsyncBufReadExt, BufReader},
    net::TcpStream,
};
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, Encoder, Framed};

/// Client side of the wire format: encodes request frames, decodes reply
/// frames. Replies over the reply size cap are rejected by the parser.
struct ClientProtocol;

impl Encoder<Vec<Bytes>> for ClientProtocol {
    type Error = io::Error;

    fn encode(&mut self, args: Vec<Bytes>, dst: &mut BytesMut) -> io::Result<()> {
        let frame = serialize_request(&args)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        dst.extend_from_slice(&frame);

        Ok(())
    }
}

impl Decoder for ClientProtocol {
    type Item = Value;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<Self::Item>> {
        let (value, processed) = match parse_reply(src) {
            Ok((unused, value)) => (Value::from(&value), src.len() - unused.len()),
            Err(WireError::Partial) => return Ok(None),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        src.advance(processed);

        Ok(Some(value))
    }
}

fn render(value: &Value) {
    match value {
        Value::Blob(x) => println!("{}", String::from_utf8_lossy(x)),
        Value::Ok => println!("OK"),
        Value::Null => println!("(nil)"),
        Value::Integer(x) => println!("{}", x),
        Value::Float(x) => println!("{}", x),
        Value::Err(msg) => eprintln!("(error) {}", msg),
        Value::Array(values) => {
            for value in values.iter() {
                render(value);
            }
        }
    }
}

fn die(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, e);
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port = args.next().unwrap_or_else(|| "1234".to_string());
    let addr = format!("{}:{}", host, port);

    let socket = match TcpStream::connect(&addr).await {
        Ok(socket) => socket,
        Err(e) => die(&format!("connect {}", addr), e),
    };
    let mut transport = Framed::new(socket, ClientProtocol);
    let mut lines = BufReader::new(stdin()).lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // stdin EOF, clean exit
            Err(e) => die("stdin", e),
        };

        let cmd: Vec<Bytes> = line
            .split_whitespace()
            .map(|word| Bytes::from(word.to_string()))
            .collect();
        if cmd.is_empty() {
            continue;
        }

        if let Err(e) = transport.send(cmd).await {
            die("send", e);
        }

        match transport.next().await {
            Some(Ok(value)) => render(&value),
            Some(Err(e)) => die("recv", e),
            None => die("recv", "server closed the connection"),
        }
    }
}
