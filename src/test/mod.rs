mod quote_service;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde_json::{Value, json};
use sqlx::{Pool, Sqlite};

use crate::config::ServerConfig;

pub const PAIR_PATH: &str = "/json/last/USD-BRL";

pub fn sample_payload(bid: &str) -> Value {
    json!({
        "USDBRL": {
            "code": "USD",
            "codein": "BRL",
            "name": "Dólar Americano/Real Brasileiro",
            "high": "5.4601",
            "low": "5.4012",
            "varBid": "0.0123",
            "pctChange": "0.23",
            "bid": bid,
            "ask": "5.4338",
            "timestamp": "1718035200",
            "create_date": "2024-06-10 13:00:00"
        }
    })
}

pub fn test_config(upstream_uri: &str, database_path: &Path) -> ServerConfig {
    config_with_timings(
        upstream_uri,
        database_path,
        Duration::from_millis(10),
        Duration::from_secs(2),
    )
}

pub fn config_with_timings(
    upstream_uri: &str,
    database_path: &Path,
    gate_delay: Duration,
    fetch_timeout: Duration,
) -> ServerConfig {
    ServerConfig::new(
        format!("{}/json/last", upstream_uri),
        String::from("USD-BRL"),
        String::from("127.0.0.1:0"),
        database_path.to_path_buf(),
        gate_delay,
        fetch_timeout,
        Duration::from_secs(2),
    )
}

pub async fn setup_db(dir: &Path) -> Pool<Sqlite> {
    let connection = crate::db::init::connect(&database_path(dir)).await.unwrap();
    crate::db::init::bootstrap(&connection).await.unwrap();
    connection
}

pub fn database_path(dir: &Path) -> PathBuf {
    dir.join("quotes.db")
}
