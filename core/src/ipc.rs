//! # IPC Envelope
//!
//! One JSON object per line in each direction.
//!
//! ```text
//! -> {"id": 7, "op": "ping", "args": ["8.8.8.8", {"count": 3}]}
//! <- {"id": 7, "op": "ping", "result": {"host": "8.8.8.8", "alive": true, ...}}
//! ```
//!
//! Arguments are positional and match the operation table: host first, then
//! the port list for `portScan`, then the options record. Bad argument shapes
//! come back inside the typed result like any other validation failure. Only
//! an undecodable envelope or an unknown operation produces an `error`
//! response.

use std::str::FromStr;
use std::sync::Arc;

use netdiag_common::error::ValidationError;
use netdiag_common::models::dns::{DnsLookupResult, RecordType, SYSTEM_SERVER};
use netdiag_common::models::ping::PingResult;
use netdiag_common::models::scan::PortScanResult;
use netdiag_common::models::system::{ArpScanResult, InterfaceInfo, SystemInfo};
use netdiag_common::models::traceroute::TracerouteResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::diagnostics::Diagnostics;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ping,
    Traceroute,
    PortScan,
    DnsLookup,
    GetInterfaces,
    ArpScan,
    GetSystemInfo,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Ping,
        Operation::Traceroute,
        Operation::PortScan,
        Operation::DnsLookup,
        Operation::GetInterfaces,
        Operation::ArpScan,
        Operation::GetSystemInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Ping => "ping",
            Operation::Traceroute => "traceroute",
            Operation::PortScan => "portScan",
            Operation::DnsLookup => "dnsLookup",
            Operation::GetInterfaces => "getInterfaces",
            Operation::ArpScan => "arpScan",
            Operation::GetSystemInfo => "getSystemInfo",
        }
    }
}

impl FromStr for Operation {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| IpcError::UnknownOperation(s.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub op: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// One variant per operation. Serialized without a tag, the `op` field of the
/// response already says which one it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OpResult {
    Ping(PingResult),
    Traceroute(TracerouteResult),
    PortScan(PortScanResult),
    DnsLookup(DnsLookupResult),
    Interfaces(Vec<InterfaceInfo>),
    Arp(ArpScanResult),
    SystemInfo(SystemInfo),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OpResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn ok(id: Value, op: impl Into<String>, result: OpResult) -> Self {
        Self {
            id,
            op: op.into(),
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, op: impl Into<String>, error: impl ToString) -> Self {
        Self {
            id,
            op: op.into(),
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Decodes one line and runs it. Never fails, bad input becomes an error
/// response.
pub async fn handle_line(diag: &Diagnostics, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(diag, request).await,
        Err(e) => Response::err(Value::Null, "", IpcError::Malformed(e)),
    }
}

pub async fn handle(diag: &Diagnostics, request: Request) -> Response {
    let Request { id, op, args } = request;
    match op.parse::<Operation>() {
        Ok(operation) => {
            debug!("Dispatching {op}");
            Response::ok(id, op, dispatch(diag, operation, &args).await)
        }
        Err(e) => {
            warn!("{e}");
            Response::err(id, op, e)
        }
    }
}

pub async fn dispatch(diag: &Diagnostics, operation: Operation, args: &[Value]) -> OpResult {
    match operation {
        Operation::Ping => {
            let host = host_arg(args);
            OpResult::Ping(match options_arg(args, 1) {
                Ok(options) => diag.ping(&host, &options).await,
                Err(e) => PingResult::failed(host, e.to_string()),
            })
        }
        Operation::Traceroute => {
            let host = host_arg(args);
            OpResult::Traceroute(match options_arg(args, 1) {
                Ok(options) => diag.traceroute(&host, &options).await,
                Err(e) => TracerouteResult::failed(host, e.to_string()),
            })
        }
        Operation::PortScan => {
            let host = host_arg(args);
            let scan = ports_arg(args, 1).and_then(|ports| Ok((ports, options_arg(args, 2)?)));
            OpResult::PortScan(match scan {
                Ok((ports, options)) => diag.port_scan(&host, &ports, &options).await,
                Err(e) => PortScanResult::failed(host, e.to_string()),
            })
        }
        Operation::DnsLookup => {
            let host = host_arg(args);
            OpResult::DnsLookup(match options_arg(args, 1) {
                Ok(options) => diag.dns_lookup(&host, &options).await,
                Err(e) => {
                    DnsLookupResult::failed(host, RecordType::A.as_str(), SYSTEM_SERVER, e.to_string())
                }
            })
        }
        Operation::GetInterfaces => OpResult::Interfaces(diag.get_interfaces()),
        Operation::ArpScan => OpResult::Arp(diag.arp_scan().await),
        Operation::GetSystemInfo => OpResult::SystemInfo(diag.get_system_info()),
    }
}

/// Anything but a string becomes empty and is refused as a missing host.
fn host_arg(args: &[Value]) -> String {
    match args.first() {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Non-integer entries become `0`, which the validator drops as out of range.
fn ports_arg(args: &[Value], index: usize) -> Result<Vec<i64>, ValidationError> {
    match args.get(index) {
        Some(Value::Array(items)) => Ok(items.iter().map(|v| v.as_i64().unwrap_or(0)).collect()),
        _ => Err(ValidationError::PortsNotAnArray),
    }
}

/// A missing or `null` options argument selects the defaults.
fn options_arg<T>(args: &[Value], index: usize) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Default,
{
    match args.get(index) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value @ Value::Object(_)) => {
            serde_json::from_value(value.clone()).map_err(|e| ValidationError::InvalidOption {
                field: "options",
                reason: e.to_string(),
            })
        }
        Some(_) => Err(ValidationError::OptionsNotAnObject),
    }
}

/// Serves requests from `reader` until it reaches end of input.
///
/// Every request runs on its own task and responses are written one per
/// line, in completion order.
pub async fn serve<R, W>(diag: Arc<Diagnostics>, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();

    let writer_task = tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            let mut line = match serde_json::to_vec(&response) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Could not encode response: {e}");
                    continue;
                }
            };
            line.push(b'\n');
            writer.write_all(&line).await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut lines = reader.lines();
    let mut served = 0usize;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        served += 1;
        let diag = diag.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = handle_line(&diag, &line).await;
            let _ = tx.send(response);
        });
    }
    drop(tx);
    info!("Input closed after {served} request(s), waiting for pending responses");

    match writer_task.await {
        Ok(result) => result,
        Err(e) => Err(std::io::Error::other(e)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use netdiag_common::config::Config;
    use serde_json::json;
    use tokio::io::BufReader;

    fn diag() -> Diagnostics {
        Diagnostics::new(Config {
            vendor_lookup: false,
            ..Config::default()
        })
    }

    #[test]
    fn operation_should_parse_camel_case_names() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert!(matches!(
            "port_scan".parse::<Operation>(),
            Err(IpcError::UnknownOperation(_))
        ));
    }

    #[tokio::test]
    async fn handle_line_should_reject_malformed_json() {
        let response = handle_line(&diag(), "{not json").await;
        assert_eq!(response.id, Value::Null);
        assert!(response.result.is_none());
        assert!(response.error.unwrap().starts_with("malformed request"));
    }

    #[tokio::test]
    async fn handle_line_should_echo_id_for_unknown_operation() {
        let response = handle_line(&diag(), r#"{"id":"abc","op":"reboot","args":[]}"#).await;
        assert_eq!(response.id, json!("abc"));
        assert_eq!(response.op, "reboot");
        assert_eq!(response.error.as_deref(), Some("unknown operation 'reboot'"));
    }

    #[tokio::test]
    async fn dispatch_should_refuse_non_string_host() {
        let result = dispatch(&diag(), Operation::Ping, &[json!(42)]).await;
        let OpResult::Ping(ping) = result else {
            panic!("expected a ping result");
        };
        assert_eq!(ping.error.as_deref(), Some("host is required"));
    }

    #[tokio::test]
    async fn dispatch_should_refuse_non_array_ports() {
        let result = dispatch(&diag(), Operation::PortScan, &[json!("127.0.0.1"), json!("80")]).await;
        let OpResult::PortScan(scan) = result else {
            panic!("expected a port scan result");
        };
        assert_eq!(scan.error.as_deref(), Some("ports must be an array"));
    }

    #[tokio::test]
    async fn dispatch_should_refuse_non_object_options() {
        let result = dispatch(&diag(), Operation::Traceroute, &[json!("10.0.0.1"), json!([1])]).await;
        let OpResult::Traceroute(trace) = result else {
            panic!("expected a traceroute result");
        };
        assert_eq!(trace.error.as_deref(), Some("options must be an object"));
    }

    #[tokio::test]
    async fn dispatch_should_report_unsupported_record_type() {
        let args = [json!("example.com"), json!({"type": "HINFO"})];
        let OpResult::DnsLookup(lookup) = dispatch(&diag(), Operation::DnsLookup, &args).await else {
            panic!("expected a DNS result");
        };
        assert!(lookup.records.is_empty());
        assert_eq!(lookup.error.as_deref(), Some("unsupported record type 'HINFO'"));
    }

    #[test]
    fn response_should_serialize_result_without_error_field() {
        let response = Response::ok(
            json!(1),
            "getSystemInfo",
            OpResult::Interfaces(Vec::new()),
        );
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded, json!({"id": 1, "op": "getSystemInfo", "result": []}));
    }

    #[tokio::test]
    async fn serve_should_answer_every_line() {
        let input = concat!(
            r#"{"id":1,"op":"portScan","args":["127.0.0.1",[]]}"#,
            "\n\n",
            r#"{"id":2,"op":"nope"}"#,
            "\n",
        );
        let (client, server) = tokio::io::duplex(64 * 1024);

        serve(Arc::new(diag()), BufReader::new(input.as_bytes()), server)
            .await
            .unwrap();

        let mut responses = Vec::new();
        let mut lines = BufReader::new(client).lines();
        while let Some(line) = lines.next_line().await.unwrap() {
            responses.push(serde_json::from_str::<Value>(&line).unwrap());
        }
        responses.sort_by_key(|r| r["id"].as_i64());

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["result"]["error"], json!("at least one port is required"));
        assert_eq!(responses[1]["error"], json!("unknown operation 'nope'"));
    }
}
