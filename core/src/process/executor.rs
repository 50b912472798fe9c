use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use netdiag_common::config::Config;
use netdiag_common::error::ProcessError;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// The deadline fired and the process was terminated.
    pub timed_out: bool,
}

type SharedBuf = Arc<Mutex<Vec<u8>>>;

/// Runs `program` with `args` and collects its output.
///
/// Bytes read before the deadline are kept. After the deadline the child gets
/// a terminate signal, then a kill once `config.kill_grace` has passed.
///
/// # Errors
/// * spawn failures mapped by [`ProcessError::from_spawn`]
/// * [`ProcessError::Timeout`] when the deadline fired before any stdout
/// * [`ProcessError::Failed`] for a non-zero exit without stdout
pub async fn execute(
    program: &Path,
    args: &[String],
    deadline: Duration,
    config: &Config,
) -> Result<ProcessOutput, ProcessError> {
    let name = program.display().to_string();

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(windows)]
    command.creation_flags(CREATE_NO_WINDOW);

    debug!("Spawning {name} {}", args.join(" "));
    let mut child = command
        .spawn()
        .map_err(|e| ProcessError::from_spawn(&name, e))?;

    let stdout_buf = SharedBuf::default();
    let stderr_buf = SharedBuf::default();
    let readers: Vec<JoinHandle<()>> = [
        drain(child.stdout.take(), stdout_buf.clone()),
        drain(child.stderr.take(), stderr_buf.clone()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let waited = timeout(deadline, child.wait()).await;
    let (status, timed_out) = match waited {
        Ok(Ok(status)) => (Some(status), false),
        Ok(Err(source)) => {
            return Err(ProcessError::Spawn {
                command: name,
                source,
            });
        }
        Err(_) => {
            warn!(
                "{name} exceeded its {} ms deadline, terminating",
                deadline.as_millis()
            );
            (terminate(&mut child, config.kill_grace).await, true)
        }
    };

    // A grandchild may still hold the pipes open.
    for handle in readers {
        let abort = handle.abort_handle();
        if timeout(config.reader_drain, handle).await.is_err() {
            abort.abort();
        }
    }

    let output = ProcessOutput {
        stdout: take_string(&stdout_buf),
        stderr: take_string(&stderr_buf),
        exit_code: status.and_then(|s| s.code()),
        timed_out,
    };
    debug!(
        "{name} finished: exit={:?} timed_out={} stdout={}B stderr={}B",
        output.exit_code,
        output.timed_out,
        output.stdout.len(),
        output.stderr.len()
    );

    if !output.stdout.trim().is_empty() {
        if timed_out {
            warn!("{name} was cut short, returning partial output");
        }
        return Ok(output);
    }
    if timed_out {
        return Err(ProcessError::Timeout {
            command: name,
            after_ms: deadline.as_millis() as u64,
        });
    }
    match status {
        Some(s) if s.success() => Ok(output),
        other => Err(ProcessError::Failed {
            command: name,
            code: describe_status(other),
            stderr: output.stderr,
        }),
    }
}

fn drain<R>(reader: Option<R>, sink: SharedBuf) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut reader = reader?;
    Some(tokio::spawn(async move {
        let mut chunk = [0u8; 4096];
        loop {
            match reader.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend_from_slice(&chunk[..n]);
                    }
                }
            }
        }
    }))
}

fn take_string(buf: &SharedBuf) -> String {
    match buf.lock() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

fn describe_status(status: Option<ExitStatus>) -> String {
    match status.and_then(|s| s.code()) {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

/// Terminate cooperatively, then forcefully once `grace` has passed.
async fn terminate(child: &mut Child, grace: Duration) -> Option<ExitStatus> {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            // SAFETY: signals our own child, which has not been reaped yet.
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
            }
            if let Ok(Ok(status)) = timeout(grace, child.wait()).await {
                return Some(status);
            }
        }
    }
    #[cfg(not(unix))]
    let _ = grace;

    if let Err(e) = child.kill().await {
        warn!("Failed to kill timed out process: {e}");
    }
    child.try_wait().ok().flatten()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::process::resolve_binary;
    use std::time::Instant;

    fn sh(script: &str) -> (std::path::PathBuf, Vec<String>) {
        (
            resolve_binary("sh", &["/bin/sh"]),
            vec!["-c".to_string(), script.to_string()],
        )
    }

    #[tokio::test]
    async fn execute_should_capture_stdout() {
        let (program, args) = sh("echo hello");
        let out = execute(&program, &args, Duration::from_secs(5), &Config::default())
            .await
            .unwrap();
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.exit_code, Some(0));
        assert!(!out.timed_out);
    }

    #[tokio::test]
    async fn execute_should_report_missing_binary() {
        let err = execute(
            Path::new("/nonexistent/netdiag-tool"),
            &[],
            Duration::from_secs(1),
            &Config::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProcessError::NotFound { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn execute_should_not_interpret_shell_syntax_in_arguments() {
        let echo = resolve_binary("echo", &["/bin/echo", "/usr/bin/echo"]);
        let args = vec!["$(id); ls".to_string()];
        let out = execute(&echo, &args, Duration::from_secs(5), &Config::default())
            .await
            .unwrap();
        assert_eq!(out.stdout.trim(), "$(id); ls");
    }

    #[tokio::test]
    async fn execute_should_return_partial_output_on_timeout() {
        let (program, args) = sh("echo partial; sleep 10");
        let started = Instant::now();
        let out = execute(&program, &args, Duration::from_millis(500), &Config::default())
            .await
            .unwrap();
        assert!(out.timed_out);
        assert_eq!(out.stdout.trim(), "partial");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn execute_should_kill_process_ignoring_terminate() {
        let (program, args) = sh("trap '' TERM; echo stubborn; sleep 10");
        let started = Instant::now();
        let out = execute(&program, &args, Duration::from_millis(500), &Config::default())
            .await
            .unwrap();
        assert!(out.timed_out);
        assert_eq!(out.stdout.trim(), "stubborn");
        assert_eq!(out.exit_code, None);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn execute_should_fail_on_timeout_without_output() {
        let (program, args) = sh("sleep 10");
        let err = execute(&program, &args, Duration::from_millis(300), &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Timeout { after_ms: 300, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn execute_should_treat_exit_code_as_advisory() {
        let (program, args) = sh("echo reply; exit 1");
        let out = execute(&program, &args, Duration::from_secs(5), &Config::default())
            .await
            .unwrap();
        assert_eq!(out.exit_code, Some(1));
        assert_eq!(out.stdout.trim(), "reply");
    }

    #[tokio::test]
    async fn execute_should_fail_on_error_without_output() {
        let (program, args) = sh("echo 'unknown host' >&2; exit 2");
        let err = execute(&program, &args, Duration::from_secs(5), &Config::default())
            .await
            .unwrap_err();
        match err {
            ProcessError::Failed { code, stderr, .. } => {
                assert_eq!(code, "exit code 2");
                assert_eq!(stderr.trim(), "unknown host");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
