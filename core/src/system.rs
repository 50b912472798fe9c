use std::path::Path;

use anyhow::Context;
use netdiag_common::error::ProcessError;
use netdiag_common::models::system::{ArpEntry, InterfaceInfo, SystemInfo};
use netdiag_common::network::interface::list_interfaces;
use netdiag_common::platform::Platform;
use sysinfo::{CpuExt, System, SystemExt};
use tracing::{debug, info, warn};

use crate::parsers::{parse_arp, parse_proc_net_arp};
use crate::platform::PlatformTools;
use crate::process::CommandRunner;

/// Kernel neighbour table read when `arp` is not installed on Linux.
pub const PROC_NET_ARP: &str = "/proc/net/arp";

/// Read-only view of the local machine.
pub trait SystemRepository: Send + Sync {
    fn network_interfaces(&self) -> Vec<InterfaceInfo>;
    fn system_info(&self) -> SystemInfo;
}

pub struct SystemRepo;

impl SystemRepository for SystemRepo {
    fn network_interfaces(&self) -> Vec<InterfaceInfo> {
        list_interfaces()
    }

    fn system_info(&self) -> SystemInfo {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu();

        let cpu_count = match sys.cpus().len() {
            0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        };
        if let Some(cpu) = sys.cpus().first() {
            debug!("CPU: {}", cpu.brand());
        }

        SystemInfo {
            hostname: sys.host_name().unwrap_or_else(|| "unknown".to_string()),
            platform: Platform::current().to_string(),
            arch: arch_name(std::env::consts::ARCH).to_string(),
            cpu_count,
            total_memory: sys.total_memory(),
            uptime: sys.uptime(),
            os_version: sys.long_os_version(),
            privileged: is_root::is_root(),
        }
    }
}

/// Architecture names as the UI knows them.
pub fn arch_name(rust_arch: &str) -> &str {
    match rust_arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "arm" => "arm",
        other => other,
    }
}

/// Runs the platform's `arp` command and parses the neighbour table.
///
/// On Linux a missing `arp` binary falls back to `kernel_table`. The original
/// error is returned when that cannot be read either.
pub async fn arp_table(
    runner: &dyn CommandRunner,
    tools: &dyn PlatformTools,
    kernel_table: &Path,
) -> Result<Vec<ArpEntry>, ProcessError> {
    let spec = tools.arp_command();
    match runner.run(&spec).await {
        Ok(output) => {
            let entries = parse_arp(&output.stdout, tools.platform());
            info!("{} ARP entries", entries.len());
            Ok(entries)
        }
        Err(err @ ProcessError::NotFound { .. }) if tools.platform() == Platform::Linux => {
            warn!("{err}, reading {} instead", kernel_table.display());
            match read_kernel_table(kernel_table).await {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    warn!("{e:#}");
                    Err(err)
                }
            }
        }
        Err(err) => Err(err),
    }
}

async fn read_kernel_table(path: &Path) -> anyhow::Result<Vec<ArpEntry>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    Ok(parse_proc_net_arp(&raw))
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
    use crate::platform::{CommandSpec, tools_for};
    use crate::process::ProcessOutput;
    use async_trait::async_trait;

    enum Scripted {
        Output(&'static str),
        Missing,
    }

    #[async_trait]
    impl CommandRunner for Scripted {
        async fn run(&self, spec: &CommandSpec) -> Result<ProcessOutput, ProcessError> {
            match self {
                Scripted::Output(stdout) => Ok(ProcessOutput {
                    stdout: stdout.to_string(),
                    exit_code: Some(0),
                    ..Default::default()
                }),
                Scripted::Missing => Err(ProcessError::NotFound {
                    command: spec.program.to_string(),
                }),
            }
        }
    }

    fn missing_path() -> std::path::PathBuf {
        std::env::temp_dir().join("netdiag-no-such-arp-table")
    }

    #[tokio::test]
    async fn arp_table_should_parse_command_output() {
        let tools = tools_for(Platform::Linux);
        let runner = Scripted::Output("? (10.0.0.1) at aa:bb:cc:dd:ee:ff [ether] on eth0\n");
        let entries = arp_table(&runner, tools.as_ref(), &missing_path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ip, "10.0.0.1");
    }

    #[tokio::test]
    async fn arp_table_should_fall_back_to_kernel_table_on_linux() {
        let path = std::env::temp_dir().join(format!("netdiag-arp-{}", std::process::id()));
        std::fs::write(
            &path,
            "IP address       HW type     Flags       HW address            Mask     Device\n\
             192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0\n",
        )
        .unwrap();

        let tools = tools_for(Platform::Linux);
        let entries = arp_table(&Scripted::Missing, tools.as_ref(), &path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mac, "aa:bb:cc:dd:ee:ff");
    }

    #[tokio::test]
    async fn arp_table_should_keep_not_found_when_fallback_fails() {
        let tools = tools_for(Platform::Linux);
        let err = arp_table(&Scripted::Missing, tools.as_ref(), &missing_path())
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::NotFound { .. }));
    }

    #[tokio::test]
    async fn arp_table_should_not_fall_back_off_linux() {
        let tools = tools_for(Platform::Windows);
        let err = arp_table(&Scripted::Missing, tools.as_ref(), &missing_path())
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::NotFound { .. }));
    }

    #[test]
    fn arch_name_should_use_ui_names() {
        assert_eq!(arch_name("x86_64"), "x64");
        assert_eq!(arch_name("aarch64"), "arm64");
        assert_eq!(arch_name("riscv64"), "riscv64");
    }

    #[test]
    fn system_info_should_describe_this_host() {
        let info = SystemRepo.system_info();
        assert!(info.cpu_count >= 1);
        assert!(info.total_memory > 0);
        assert_eq!(info.platform, Platform::current().as_str());
        assert!(!info.hostname.is_empty());
    }
}
