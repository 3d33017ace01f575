//! # Key-related command handlers
use crate::{connection::Connection, error::Error, value::Value};
use bytes::Bytes;
use std::collections::VecDeque;

/// Removes the entry stored at key, whatever its type. Replies with the
/// number of entries removed.
pub async fn del(conn: &Connection, args: VecDeque<Bytes>) -> Result<Value, Error> {
    Ok(conn.db().del(&args[0]))
}

/// Lists every key in the keyspace, in no particular order.
pub async fn keys(conn: &Connection, _args: VecDeque<Bytes>) -> Result<Value, Error> {
    Ok(conn.db().keys())
}

#[cfg(test)]
mod test {
    use crate::{
        cmd::test::{create_connection, run_command},
        error::Error,
        value::Value,
    };

    #[tokio::test]
    async fn del_reports_whether_a_key_existed() {
        let c = create_connection();
        let _ = run_command(&c, &["set", "foo", "bar"]).await;
        assert_eq!(
            Ok(Value::Integer(1)),
            run_command(&c, &["del", "foo"]).await
        );
        assert_eq!(
            Ok(Value::Integer(0)),
            run_command(&c, &["del", "foo"]).await
        );
        assert_eq!(Ok(Value::Null), run_command(&c, &["get", "foo"]).await);
    }

    #[tokio::test]
    async fn del_removes_sorted_sets() {
        let c = create_connection();
        let _ = run_command(&c, &["zadd", "z", "1", "m"]).await;
        assert_eq!(Ok(Value::Integer(1)), run_command(&c, &["del", "z"]).await);
        assert_eq!(
            Err(Error::MissingKey),
            run_command(&c, &["zscore", "z", "m"]).await
        );
    }

    #[tokio::test]
    async fn keys_lists_all_keys() {
        let c = create_connection();
        let _ = run_command(&c, &["set", "a", "1"]).await;
        let _ = run_command(&c, &["set", "b", "2"]).await;
        let _ = run_command(&c, &["zadd", "z", "1", "m"]).await;

        let mut keys = match run_command(&c, &["keys"]).await {
            Ok(Value::Array(values)) => values
                .into_iter()
                .map(|value| match value {
                    Value::Blob(x) => x,
                    other => panic!("unexpected key value {:?}", other),
                })
                .collect::<Vec<_>>(),
            other => panic!("keys replied {:?}", other),
        };
        keys.sort();
        assert_eq!(vec!["a", "b", "z"], keys);
    }

    #[tokio::test]
    async fn keys_takes_no_arguments() {
        let c = create_connection();
        assert_eq!(
            Err(Error::InvalidArgsCount("keys".to_owned())),
            run_command(&c, &["keys", "*"]).await
        );
    }
}
