// 后端：iw_cli（通过 iw 扫描，通过外部脚本连接）

use crate::config::{CommandLine, JoinConfig, ScanConfig};
use crate::structs::JoinTarget;
use crate::traits::{JoinLauncher, ScanSource};
use crate::{Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// 调用外部工具的真实后端
///
/// Every call spawns its own process with its own pipes, so concurrent
/// exchanges never share handles.
#[derive(Debug, Clone)]
pub struct IwCliBackend {
    scan_command: CommandLine,
    scan_timeout: Duration,
    join_command: CommandLine,
    open_flag: String,
}

impl IwCliBackend {
    pub fn new(scan: &ScanConfig, join: &JoinConfig) -> Self {
        Self {
            scan_command: scan.command.clone(),
            scan_timeout: scan.timeout,
            join_command: join.command.clone(),
            open_flag: join.open_flag.clone(),
        }
    }
}

#[async_trait]
impl ScanSource for IwCliBackend {
    async fn raw_scan(&self) -> Result<String> {
        tracing::debug!(program = %self.scan_command.program, "Running scan command");

        // kill_on_drop: when the timeout drops the future the child is killed too.
        let mut command = Command::new(&self.scan_command.program);
        command
            .args(&self.scan_command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.scan_timeout, command.output())
            .await
            .map_err(|_| Error::ScanTimeout(self.scan_timeout))?
            .map_err(|source| Error::Spawn {
                program: self.scan_command.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(format!(
                "{} exited with {}: {}",
                self.scan_command.program,
                output.status,
                error_msg.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl JoinLauncher for IwCliBackend {
    fn launch(&self, target: &JoinTarget) -> Result<()> {
        let mut child = Command::new(&self.join_command.program)
            .args(&self.join_command.args)
            .args(target.script_args(&self.open_flag))
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.join_command.program.clone(),
                source,
            })?;

        // 仅用于回收子进程并记录退出状态，结果不会返回给调用者
        let ssid = target.ssid().to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::info!(%ssid, %status, "Join script exited"),
                Err(e) => tracing::warn!(%ssid, "Failed to wait for join script: {}", e),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn backend(scan: &[&str], timeout: Duration, join: &[&str]) -> IwCliBackend {
        let line = |argv: &[&str]| CommandLine {
            program: argv[0].to_string(),
            args: argv[1..].iter().map(|s| s.to_string()).collect(),
        };
        IwCliBackend {
            scan_command: line(scan),
            scan_timeout: timeout,
            join_command: line(join),
            open_flag: "--open".into(),
        }
    }

    #[tokio::test]
    async fn scan_returns_stdout() {
        let b = backend(
            &["printf", "BSS 1(on wlan0)\\n\\tSSID: Home\\n"],
            Duration::from_secs(5),
            &["true"],
        );
        let raw = b.raw_scan().await.unwrap();
        assert_eq!(raw, "BSS 1(on wlan0)\n\tSSID: Home\n");
    }

    #[tokio::test]
    async fn scan_times_out_within_bound() {
        let b = backend(&["sleep", "5"], Duration::from_millis(200), &["true"]);
        let started = Instant::now();
        let err = b.raw_scan().await.unwrap_err();
        assert!(matches!(err, Error::ScanTimeout(_)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn scan_reports_missing_binary_and_failure_exit() {
        let missing = backend(
            &["/nonexistent/iw", "dev", "wlan0", "scan"],
            Duration::from_secs(1),
            &["true"],
        );
        assert!(matches!(
            missing.raw_scan().await,
            Err(Error::Spawn { .. })
        ));

        let failing = backend(&["false"], Duration::from_secs(5), &["true"]);
        assert!(matches!(
            failing.raw_scan().await,
            Err(Error::CommandFailed(_))
        ));
    }

    #[tokio::test]
    async fn launch_does_not_wait_for_the_script() {
        let b = backend(&["true"], Duration::from_secs(1), &["sleep", "5"]);
        let started = Instant::now();
        b.launch(&JoinTarget::Open { ssid: "Cafe".into() }).unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    async fn recorded_argv(target: JoinTarget) -> String {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("argv");
        let out = out.to_str().unwrap();
        // $0 is the output file; the join arguments follow it.
        let script = r#"echo "$@" > "$0.tmp" && mv "$0.tmp" "$0""#;
        let b = backend(&["true"], Duration::from_secs(1), &["sh", "-c", script, out]);
        b.launch(&target).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Ok(argv) = tokio::fs::read_to_string(out).await {
                return argv;
            }
            assert!(Instant::now() < deadline, "join script never ran");
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    #[tokio::test]
    async fn launch_passes_ssid_and_credential() {
        let open = recorded_argv(JoinTarget::Open { ssid: "Cafe".into() }).await;
        assert_eq!(open, "Cafe --open\n");

        let secured = recorded_argv(JoinTarget::Secured {
            ssid: "Home".into(),
            password: "hunter22".into(),
        })
        .await;
        assert_eq!(secured, "Home hunter22\n");
    }

    #[tokio::test]
    async fn launch_reports_missing_binary() {
        let b = backend(&["true"], Duration::from_secs(1), &["/nonexistent/wifi-connect.sh"]);
        let err = b
            .launch(&JoinTarget::Secured {
                ssid: "Home".into(),
                password: "hunter22".into(),
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to launch /nonexistent/wifi-connect.sh"));
    }
}
