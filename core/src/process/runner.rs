use async_trait::async_trait;
use netdiag_common::config::Config;
use netdiag_common::error::ProcessError;

use super::{ProcessOutput, execute, resolve_binary};
use crate::platform::CommandSpec;

/// Resolves and runs a [`CommandSpec`].
///
/// The facade only talks to this trait, which lets tests script tool output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError>;
}

/// Runs the real binaries installed on this host.
pub struct SystemRunner {
    config: Config,
}

impl SystemRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
        let program = resolve_binary(spec.program, spec.fallbacks);
        execute(&program, &spec.args, spec.deadline, &self.config).await
    }
}
