//! # Server entry point
use log::error;
use microcache::server;
use std::env;

/// Default listening endpoint: any address, port 1234.
const DEFAULT_ADDR: &str = "0.0.0.0:1234";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _logger = match flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
    {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("logger setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    if let Err(e) = server::serve(&addr).await {
        error!("cannot serve on {}: {:?}", addr, e);
        std::process::exit(1);
    }
}
