//! Test helpers for the relay integration tests
//!
//! `TestServer` runs the full application on an ephemeral port with a
//! tempdir-backed SQLite file; `WsClient` is a thin WebSocket driver with
//! frame-level assertions.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures_util::{SinkExt, StreamExt};
use relay_common::{AppConfig, AppSettings, DatabaseConfig, Environment, ServerConfig};
use relay_gateway::server::{create_app, create_relay_state, RelayState};
use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected frame
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen when asserting that nothing arrives
const SILENCE_WINDOW: Duration = Duration::from_millis(250);

/// In-process relay server bound to an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: RelayState,
    _db_dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay backed by a throwaway SQLite file
    pub async fn start() -> Result<Self> {
        let db_dir = tempfile::tempdir()?;
        let config = AppConfig {
            app: AppSettings {
                name: "relay-test".to_string(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: format!("sqlite://{}/relay-test.db", db_dir.path().display()),
                max_connections: 5,
            },
        };

        let state = create_relay_state(config).await?;
        let app = create_app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _db_dir: db_dir,
            _handle: handle,
        })
    }

    /// Base URL for the HTTP routes
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the relay WebSocket endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// GET an HTTP route
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a WebSocket client against the relay
    pub async fn connect(&self) -> Result<WsClient> {
        let (stream, _) = connect_async(self.ws_url()).await?;
        Ok(WsClient { stream })
    }
}

/// A WebSocket client under test
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Send a JSON frame
    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.stream.send(Message::Text(value.to_string())).await?;
        Ok(())
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, raw: &str) -> Result<()> {
        self.stream.send(Message::Text(raw.to_string())).await?;
        Ok(())
    }

    /// Send a binary frame
    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.stream.send(Message::Binary(bytes)).await?;
        Ok(())
    }

    /// Receive the next JSON frame, skipping transport control frames
    pub async fn recv_json(&mut self) -> Result<Value> {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for a frame")?
                .context("connection closed while waiting for a frame")??;

            match frame {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Ping(_) | Message::Pong(_) => {}
                other => bail!("unexpected frame: {other:?}"),
            }
        }
    }

    /// Assert that no frame arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(SILENCE_WINDOW, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => Ok(()),
            Ok(frame) => bail!("expected silence, got: {frame:?}"),
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
