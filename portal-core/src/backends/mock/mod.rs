use crate::Result;
use crate::structs::JoinTarget;
use crate::traits::{JoinLauncher, ScanSource};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

// 模拟的 `iw dev wlan0 scan` 输出：包含重复 SSID、隐藏网络和 BSS Load 元素
const CANNED_SCAN: &str = "\
BSS 3c:84:6a:10:20:30(on wlan0)
\tfreq: 2412
\tsignal: -41.00 dBm
\tSSID: MyHomeWiFi
\tBSS Load:
\t\t * station count: 2
\tRSN:\t * Version: 1
BSS 9e:1b:44:02:11:aa(on wlan0)
\tfreq: 2437
\tsignal: -63.00 dBm
\tSSID: CafeGuest
BSS 00:1a:2b:3c:4d:5e(on wlan0)
\tfreq: 5180
\tsignal: -70.00 dBm
\tSSID:
\tRSN:\t * Version: 1
BSS 3c:84:6a:10:20:31(on wlan0)
\tfreq: 5200
\tsignal: -55.00 dBm
\tSSID: MyHomeWiFi
BSS 5a:60:ff:01:02:03(on wlan0)
\tfreq: 2462
\tsignal: -77.00 dBm
\tSSID: Neighbor's Network
\tWPA:\t * Version: 1
";

/// A mock backend for local development without a radio.
/// It returns canned scan output and only logs join hand-offs.
#[derive(Debug, Default)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScanSource for MockBackend {
    async fn raw_scan(&self) -> Result<String> {
        tracing::info!("🤖 [MockBackend] Scanning for networks...");
        // Simulate a delay
        sleep(Duration::from_secs(2)).await;
        Ok(CANNED_SCAN.to_string())
    }
}

impl JoinLauncher for MockBackend {
    fn launch(&self, target: &JoinTarget) -> Result<()> {
        let credential = match target {
            JoinTarget::Open { .. } => "(open)",
            JoinTarget::Secured { .. } => "********",
        };
        tracing::info!(
            "🤖 [MockBackend] Would join SSID '{}' with password {}",
            target.ssid(),
            credential
        );
        Ok(())
    }
}
