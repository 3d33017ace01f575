//! # Connection module
//!
//! Buffering and the read/write state machine live in the transport layer;
//! the objects here carry the identity that command handlers and log lines
//! see, and tie each client to the shared keyspace.
use crate::db::Db;
use std::{net::SocketAddr, sync::Arc};

pub mod connections;

/// Connection
#[derive(Debug)]
pub struct Connection {
    id: u128,
    db: Arc<Db>,
    addr: SocketAddr,
    all_connections: Arc<connections::Connections>,
}

impl Connection {
    /// Returns the keyspace this connection operates on
    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Connection ID
    pub fn id(&self) -> u128 {
        self.id
    }

    /// Peer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Removes the connection from the registry. Called once the transport
    /// is done with it.
    pub fn destroy(self: Arc<Connection>) {
        self.all_connections.clone().remove(self);
    }
}

#[cfg(test)]
mod test {
    use super::connections::Connections;
    use crate::db::Db;
    use std::{
        net::{IpAddr, Ipv4Addr, SocketAddr},
        sync::Arc,
    };

    #[test]
    fn ids_are_unique_and_destroy_deregisters() {
        let db = Arc::new(Db::new());
        let all_connections = Arc::new(Connections::new(db));
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 1234);

        let first = all_connections.new_connection(addr);
        let second = all_connections.new_connection(addr);
        assert_ne!(first.id(), second.id());
        assert_eq!(2, all_connections.total());

        first.destroy();
        assert_eq!(1, all_connections.total());
    }
}
