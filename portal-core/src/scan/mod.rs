//! 扫描聚合：把扫描工具的原始文本变成去重、排序、带安全性分类的网络列表

mod merge;
mod parsing;

pub use merge::merge_observations;
pub use parsing::{Observation, parse_bss_records};

use crate::structs::{NetworkDescriptor, ScanReport};
use crate::traits::ScanSource;

/// Parses raw scan output and merges duplicate SSIDs.
pub fn aggregate(raw_scan_text: &str) -> Vec<NetworkDescriptor> {
    merge_observations(parse_bss_records(raw_scan_text))
}

/// Runs one scan through `source` and aggregates the result.
///
/// Tool failures (missing binary, non-zero exit, timeout) never propagate:
/// they become an empty network list with `error` set.
pub async fn survey(source: &dyn ScanSource) -> ScanReport {
    match source.raw_scan().await {
        Ok(raw) => {
            let networks = aggregate(&raw);
            tracing::debug!("Scan complete, {} unique networks", networks.len());
            ScanReport {
                networks,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Scan failed: {}", e);
            ScanReport::failed(e.to_string())
        }
    }
}
