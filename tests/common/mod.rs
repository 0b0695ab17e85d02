//! Shared utilities for integration tests.

use config_dashboard::{HttpServer, Settings};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Start a dashboard server on an ephemeral port with an isolated store.
///
/// Returns the base URL and the TempDir guard keeping the store alive for
/// the duration of the test.
pub async fn start_server(admin_token: Option<&str>) -> (String, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let settings = Settings {
        port: 0,
        admin_token: admin_token.map(str::to_string),
        default_customer_id: "DEFAULT".to_string(),
        store_path: temp.path().join("config_store.json"),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = HttpServer::new(&settings).expect("server setup");

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (format!("http://{addr}"), temp)
}
