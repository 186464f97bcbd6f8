//! Mock native modules shared by integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use web3_bridge::{Callback, NativeModule};

/// Start a JSON-RPC node answering each method with a fixed result.
///
/// Unknown methods get a `-32601` error. Returns the bound address.
pub async fn start_mock_node(results: HashMap<&'static str, Value>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let results = Arc::new(results);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let results = results.clone();
                    tokio::spawn(async move {
                        let _ = serve_rpc(socket, &results).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn serve_rpc(mut socket: TcpStream, results: &HashMap<&'static str, Value>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request: Value = serde_json::from_slice(&buf[header_end..]).unwrap_or(Value::Null);
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or_default();

    let body = match results.get(method) {
        Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method not found: {}", method) }
        }),
    }
    .to_string();

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

/// Opaque error value handed through the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl MockError {
    pub fn new(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// A native call as the module received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init(String),
    ListWallets,
    CreateWallet(String),
    GetBalance(String, String),
}

/// Outcomes a [`ScriptedModule`] settles with.
#[derive(Debug, Clone)]
pub struct Script {
    pub init: Result<String, MockError>,
    pub list_wallets: Result<Vec<String>, MockError>,
    pub create_wallet: Result<String, MockError>,
    pub get_balance: Result<String, MockError>,
    /// Invoke every callback a second time with an error after settling.
    pub invoke_twice: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            init: Ok("Geth/v1.13.0".to_string()),
            list_wallets: Ok(vec!["0xaaa".to_string(), "0xbbb".to_string()]),
            create_wallet: Ok("0xnew".to_string()),
            get_balance: Ok("0".to_string()),
            invoke_twice: false,
        }
    }
}

/// Records every call and settles synchronously from a [`Script`].
#[derive(Debug, Default)]
pub struct ScriptedModule {
    pub script: Script,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedModule {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T: Clone>(&self, callback: Callback<T, MockError>, outcome: &Result<T, MockError>) {
        callback.settle(outcome.clone());
        if self.script.invoke_twice {
            callback.reject(MockError::new("second invocation"));
        }
    }
}

impl NativeModule for ScriptedModule {
    type Error = MockError;
    type ClientVersion = String;
    type Wallet = String;
    type Balance = String;

    fn init(&self, url: String, callback: Callback<String, MockError>) {
        self.calls.lock().unwrap().push(Call::Init(url));
        self.respond(callback, &self.script.init);
    }

    fn list_wallets(&self, callback: Callback<Vec<String>, MockError>) {
        self.calls.lock().unwrap().push(Call::ListWallets);
        self.respond(callback, &self.script.list_wallets);
    }

    fn create_wallet(&self, password: String, callback: Callback<String, MockError>) {
        self.calls.lock().unwrap().push(Call::CreateWallet(password));
        self.respond(callback, &self.script.create_wallet);
    }

    fn get_balance(&self, address: String, unit: String, callback: Callback<String, MockError>) {
        self.calls.lock().unwrap().push(Call::GetBalance(address, unit));
        self.respond(callback, &self.script.get_balance);
    }
}

/// Holds on to callbacks so tests decide when, where and whether they fire.
#[derive(Debug, Default)]
pub struct DeferredModule {
    pub init: Mutex<Vec<Callback<String, MockError>>>,
    pub list_wallets: Mutex<Vec<Callback<Vec<String>, MockError>>>,
    pub create_wallet: Mutex<Vec<Callback<String, MockError>>>,
    pub get_balance: Mutex<Vec<(String, Callback<String, MockError>)>>,
}

impl DeferredModule {
    /// Remove the balance callback registered for `address`.
    pub fn take_balance(&self, address: &str) -> Callback<String, MockError> {
        let mut pending = self.get_balance.lock().unwrap();
        let idx = pending.iter().position(|(a, _)| a == address).unwrap();
        pending.remove(idx).1
    }
}

impl NativeModule for DeferredModule {
    type Error = MockError;
    type ClientVersion = String;
    type Wallet = String;
    type Balance = String;

    fn init(&self, _url: String, callback: Callback<String, MockError>) {
        self.init.lock().unwrap().push(callback);
    }

    fn list_wallets(&self, callback: Callback<Vec<String>, MockError>) {
        self.list_wallets.lock().unwrap().push(callback);
    }

    fn create_wallet(&self, _password: String, callback: Callback<String, MockError>) {
        self.create_wallet.lock().unwrap().push(callback);
    }

    fn get_balance(&self, address: String, _unit: String, callback: Callback<String, MockError>) {
        self.get_balance.lock().unwrap().push((address, callback));
    }
}

/// Drops every callback without invoking it.
#[derive(Debug, Default)]
pub struct SilentModule;

impl NativeModule for SilentModule {
    type Error = MockError;
    type ClientVersion = String;
    type Wallet = String;
    type Balance = String;

    fn init(&self, _url: String, _callback: Callback<String, MockError>) {}

    fn list_wallets(&self, _callback: Callback<Vec<String>, MockError>) {}

    fn create_wallet(&self, _password: String, _callback: Callback<String, MockError>) {}

    fn get_balance(&self, _address: String, _unit: String, _callback: Callback<String, MockError>) {}
}
