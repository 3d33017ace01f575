//! # Connections object
//!
//! This mod keeps track of all active connections. There is one instance of
//! this mod per running server.
use super::Connection;
use crate::db::Db;
use log::trace;
use parking_lot::RwLock;
use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

/// Connections struct
#[derive(Debug)]
pub struct Connections {
    connections: RwLock<BTreeMap<u128, Arc<Connection>>>,
    db: Arc<Db>,
    counter: RwLock<u128>,
}

impl Connections {
    /// Returns a new instance of connections.
    pub fn new(db: Arc<Db>) -> Self {
        Self {
            counter: RwLock::new(0),
            db,
            connections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of connections currently registered
    pub fn total(&self) -> usize {
        self.connections.read().len()
    }

    /// Removes a connection from the connections
    pub fn remove(self: Arc<Connections>, conn: Arc<Connection>) {
        let id = conn.id();
        self.connections.write().remove(&id);
        trace!("connection {} removed, {} left", id, self.total());
    }

    /// Creates a new connection
    pub fn new_connection(self: &Arc<Connections>, addr: SocketAddr) -> Arc<Connection> {
        let mut id = self.counter.write();
        *id += 1;

        let conn = Arc::new(Connection {
            id: *id,
            db: self.db.clone(),
            addr,
            all_connections: self.clone(),
        });

        self.connections.write().insert(*id, conn.clone());
        conn
    }
}
