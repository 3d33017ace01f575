//! # All commands handlers
pub mod key;
pub mod sorted_set;
pub mod string;

#[cfg(test)]
pub(crate) mod test {
    use crate::{
        connection::{connections::Connections, Connection},
        db::Db,
        dispatcher,
        error::Error,
        value::Value,
    };
    use bytes::Bytes;
    use std::{
        collections::VecDeque,
        net::{IpAddr, Ipv4Addr, SocketAddr},
        sync::Arc,
    };

    pub fn create_connection() -> Arc<Connection> {
        let db = Arc::new(Db::new());
        let all_connections = Arc::new(Connections::new(db));

        let client = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 1234);

        all_connections.new_connection(client)
    }

    pub async fn run_command(conn: &Connection, cmd: &[&str]) -> Result<Value, Error> {
        let args: VecDeque<Bytes> = cmd.iter().map(|s| Bytes::from(s.to_string())).collect();

        dispatcher::execute(conn, args).await
    }
}
