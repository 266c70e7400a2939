use crate::structs::JoinTarget;
use async_trait::async_trait;
use std::borrow::Cow;

// 在这里定义所有后端和前端的 trait。

/// 前端资源提供者接口。
#[async_trait]
pub trait UiAssetProvider: Send + Sync {
    /// Retrieves a single UI asset.
    ///
    /// # Arguments
    /// * `path` - The asset name (e.g., "index.html", "logo.png").
    ///
    /// # Returns
    /// The asset's content and its MIME type, or an `Error` if it could not
    /// be read.
    async fn get_asset(&self, path: &str) -> crate::Result<(Cow<'static, [u8]>, String)>;
}

/// 扫描工具接口：返回扫描工具的原始文本输出
#[async_trait]
pub trait ScanSource: Send + Sync {
    /// Runs one scan and returns the tool's stdout.
    ///
    /// Implementations must resolve within their own bounded wait; a tool
    /// that hangs is reported as `Error::ScanTimeout`.
    async fn raw_scan(&self) -> crate::Result<String>;
}

/// 连接脚本接口：发射后不管 (fire and forget)
pub trait JoinLauncher: Send + Sync {
    /// Hands `target` to the join tool and returns as soon as the process
    /// is started. `Ok(())` means the hand-off happened, not that the
    /// device joined the network.
    fn launch(&self, target: &JoinTarget) -> crate::Result<()>;
}
