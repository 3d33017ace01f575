//! # Server
//!
//! TCP server speaking the length-prefixed binary protocol. One accept loop
//! plus one task per connection, all scheduled on the current-thread
//! runtime, so every keyspace access happens on the event-loop thread.
use crate::{
    connection::{connections::Connections, Connection},
    db::Db,
    dispatcher,
    error::Error,
    value::Value,
};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use cache_protocol_parser::{parse_request, Error as WireError};
use futures::SinkExt;
use log::{info, trace, warn};
use std::{collections::VecDeque, io, net::SocketAddr, sync::Arc};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpListener,
};
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, Encoder, Framed};

/// Request decoder / reply encoder for the binary wire format.
struct Protocol;

impl Encoder<Value> for Protocol {
    type Error = io::Error;

    fn encode(&mut self, response: Value, dst: &mut BytesMut) -> io::Result<()> {
        let start = dst.len();
        dst.put_u32_le(0); // patched once the body length is known
        response.serialize(dst);

        let body_len = (dst.len() - start - 4) as u32;
        dst[start..start + 4].copy_from_slice(&body_len.to_le_bytes());

        Ok(())
    }
}

impl Decoder for Protocol {
    type Item = VecDeque<Bytes>;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<Self::Item>> {
        let (frame, processed) = {
            let (unused, args) = match parse_request(src) {
                Ok((unused, args)) => (unused, args),
                Err(WireError::Partial) => return Ok(None),
                Err(e) => {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, e));
                }
            };
            (
                args.iter().map(|arg| Bytes::copy_from_slice(arg)).collect(),
                src.len() - unused.len(),
            )
        };

        src.advance(processed);

        Ok(Some(frame))
    }
}

/// Runs one command and folds command errors into their `ERR` reply.
///
/// Wire-format violations never reach this point; the decoder turns them
/// into transport errors that tear the connection down without a reply.
#[inline]
async fn execute_command(conn: &Connection, args: VecDeque<Bytes>) -> Value {
    match dispatcher::execute(conn, args).await {
        Ok(result) => result,
        Err(err) => err.into(),
    }
}

/// Handles a new connection
///
/// Frames are decoded and answered in arrival order; the reply is flushed
/// before the next frame is taken, so a connection never reads ahead of its
/// own replies. Peer close, protocol errors and I/O errors all end here by
/// dropping the transport.
async fn handle_new_connection<T: AsyncRead + AsyncWrite + Unpin>(
    mut transport: Framed<T, Protocol>,
    all_connections: Arc<Connections>,
    addr: SocketAddr,
) {
    let conn = all_connections.new_connection(addr);
    trace!("new connection {} from {}", conn.id(), conn.addr());

    while let Some(result) = transport.next().await {
        match result {
            Ok(args) => {
                let reply = execute_command(&conn, args).await;
                if transport.send(reply).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("closing connection {}: {}", conn.id(), e);
                break;
            }
        }
    }

    trace!("connection {} done", conn.id());
    conn.destroy();
}

/// Accept loop. Accept failures are logged and do not stop the listener.
async fn serve_tcp(addr: &str, all_connections: Arc<Connections>) -> Result<(), Error> {
    let listener = TcpListener::bind(addr).await?;
    info!("Ready to accept connections on {}", addr);

    loop {
        match listener.accept().await {
            Ok((socket, addr)) => {
                let transport = Framed::new(socket, Protocol);
                let all_connections = all_connections.clone();

                tokio::spawn(async move {
                    handle_new_connection(transport, all_connections, addr).await;
                });
            }
            Err(e) => warn!("error accepting socket; error = {:?}", e),
        }
    }
}

/// Spawns the cache server and serves until the process is killed.
///
/// The keyspace and the connection registry live here; binding failures
/// propagate to the caller, everything later is handled per connection.
pub async fn serve(addr: &str) -> Result<(), Error> {
    let db = Arc::new(Db::new());
    let all_connections = Arc::new(Connections::new(db));

    serve_tcp(addr, all_connections).await
}
