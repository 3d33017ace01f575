//! # Dispatcher
//!
//! Here is where every command is wired to its handler. Each command is
//! declared with the `dispatcher!` macro, which generates the command
//! table, the arity checks and the name resolution.
use crate::{cmd, connection::Connection, dispatcher, error::Error, value::Value};
use bytes::Bytes;
use futures::future::BoxFuture;
use std::{collections::VecDeque, ops::Deref};

dispatcher! {
    string {
        get {
            cmd::string::get,
            2,
        },
        set {
            cmd::string::set,
            3,
        },
    },
    key {
        del {
            cmd::key::del,
            2,
        },
        keys {
            cmd::key::keys,
            1,
        },
    },
    sorted_set {
        zadd {
            cmd::sorted_set::zadd,
            4,
        },
        zrem {
            cmd::sorted_set::zrem,
            3,
        },
        zscore {
            cmd::sorted_set::zscore,
            3,
        },
        zquery {
            cmd::sorted_set::zquery,
            6,
        },
    },
}

/// Resolves and runs a single command against a connection.
///
/// The first argument is the command name; the handler receives the
/// arguments that follow it. Name resolution and arity checking happen
/// before the handler runs, so handlers may index their arguments freely.
pub async fn execute(conn: &Connection, mut args: VecDeque<Bytes>) -> Result<Value, Error> {
    let command = Dispatcher::new(&args)?;
    args.pop_front();

    command.execute(conn, args).await
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(cmd: &[&str]) -> VecDeque<Bytes> {
        cmd.iter().map(|s| Bytes::from(s.to_string())).collect()
    }

    #[test]
    fn resolves_known_commands() {
        let command = Dispatcher::new(&args(&["get", "foo"])).unwrap();
        assert_eq!("get", command.name());
        assert_eq!("string", command.group());

        let command = Dispatcher::new(&args(&["zquery", "z", "0", "", "0", "1"])).unwrap();
        assert_eq!("zquery", command.name());
        assert_eq!("sorted_set", command.group());
    }

    #[test]
    fn rejects_unknown_names_and_bad_arity() {
        assert_eq!(
            Err(Error::CommandNotFound("ping".to_owned())),
            Dispatcher::new(&args(&["ping"])).map(|_| ())
        );
        assert_eq!(
            Err(Error::InvalidArgsCount("zadd".to_owned())),
            Dispatcher::new(&args(&["zadd", "z", "1.0"])).map(|_| ())
        );
        assert_eq!(
            Err(Error::EmptyCommand),
            Dispatcher::new(&args(&[])).map(|_| ())
        );
    }

    #[test]
    fn arity_counts_the_command_name() {
        assert!(Dispatcher::new(&args(&["keys"])).is_ok());
        assert!(Dispatcher::new(&args(&["keys", "extra"])).is_err());
    }
}
