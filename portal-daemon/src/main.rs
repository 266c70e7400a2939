mod runner;

use anyhow::Result;
use std::path::PathBuf;

/// 配置文件路径环境变量；未设置时使用内置默认配置
const CONFIG_ENV: &str = "PORTAL_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 初始化日志（这是入口点的职责）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // 2. 加载配置
    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = match portal_core::config::load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 3. 运行门户服务器，处理顶层错误
    if let Err(e) = runner::run_portal(config).await {
        tracing::error!("❌ Portal server failed: {}", e);
        std::process::exit(1);
    }

    tracing::info!("🛑 Shutting down.");
    Ok(())
}
