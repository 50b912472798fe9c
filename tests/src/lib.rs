//! Test doubles and fixtures shared by the integration tests.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netdiag_common::error::{ProcessError, ResolutionError};
use netdiag_common::models::dns::{DnsRecord, RecordType};
use netdiag_core::dns::DnsBackend;
use netdiag_core::platform::CommandSpec;
use netdiag_core::process::{CommandRunner, ProcessOutput};
use pnet::datalink::{MacAddr, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

/// One scripted reply for a [`ScriptedRunner`].
pub enum Reply {
    Stdout(String),
    Partial(String),
    NotFound,
    Timeout,
}

/// Returns canned output per program name and records every command.
pub struct ScriptedRunner {
    replies: Vec<(&'static str, Reply)>,
    pub seen: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            replies: Vec::new(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, program: &'static str, reply: Reply) -> Self {
        self.replies.push((program, reply));
        self
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.seen.lock().unwrap().clone()
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        self.seen.lock().unwrap().push(spec.clone());
        let command = spec.program.to_string();
        let reply = self
            .replies
            .iter()
            .find(|(program, _)| *program == spec.program)
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Stdout(stdout)) => Ok(ProcessOutput {
                stdout: stdout.clone(),
                exit_code: Some(0),
                ..Default::default()
            }),
            Some(Reply::Partial(stdout)) => Ok(ProcessOutput {
                stdout: stdout.clone(),
                exit_code: None,
                timed_out: true,
                ..Default::default()
            }),
            Some(Reply::Timeout) => Err(ProcessError::Timeout {
                command,
                after_ms: spec.deadline.as_millis() as u64,
            }),
            Some(Reply::NotFound) | None => Err(ProcessError::NotFound { command }),
        }
    }
}

pub type DnsCalls = Arc<Mutex<Vec<(String, RecordType, Option<Ipv4Addr>)>>>;

/// Answers every query with a fixed address and records which server was
/// asked.
pub struct RecordingDns {
    pub calls: DnsCalls,
}

impl RecordingDns {
    pub fn new() -> (Self, DnsCalls) {
        let calls = DnsCalls::default();
        (
            Self {
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl DnsBackend for RecordingDns {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        server: Option<Ipv4Addr>,
    ) -> Result<Vec<DnsRecord>, ResolutionError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), record_type, server));
        tokio::task::yield_now().await;
        Ok(vec![DnsRecord {
            record_type,
            value: server.map_or("192.0.2.1".to_string(), |s| format!("answer-from-{s}")),
            ttl: Some(300),
        }])
    }
}

pub fn ni(name: &str, index: u32, mac: Option<MacAddr>, ips: &[IpNetwork], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac,
        ips: ips.to_vec(),
        flags,
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

pub fn v6(s: &str, p: u8) -> IpNetwork {
    IpNetwork::V6(Ipv6Network::new(s.parse::<Ipv6Addr>().unwrap(), p).unwrap())
}
