use portal_core::config::AppConfig;
use portal_core::traits::{JoinLauncher, ScanSource, UiAssetProvider};
use portal_core::web_server::{self, AppState};
use std::sync::Arc;

// --- 1. 选择后端实现 ---
#[cfg(not(feature = "backend_mock"))]
fn get_backend(config: &AppConfig) -> (Arc<dyn ScanSource>, Arc<dyn JoinLauncher>) {
    use portal_core::backends::iw_cli::IwCliBackend;
    tracing::info!(
        "🚀 Using iw backend (scan: {}, join: {})",
        config.scan.command.program,
        config.join.command.program
    );
    let backend = Arc::new(IwCliBackend::new(&config.scan, &config.join));
    (backend.clone(), backend)
}

#[cfg(feature = "backend_mock")]
fn get_backend(_config: &AppConfig) -> (Arc<dyn ScanSource>, Arc<dyn JoinLauncher>) {
    use portal_core::backends::mock::MockBackend;
    tracing::info!("🚀 Using Mock Backend");
    let backend = Arc::new(MockBackend::new());
    (backend.clone(), backend)
}

// --- 2. 选择前端实现 ---
#[cfg(not(feature = "frontend_embed"))]
fn get_frontend(config: &AppConfig) -> Arc<dyn UiAssetProvider> {
    use portal_core::frontends::provider_disk::DiskFrontend;
    tracing::info!(
        "💿 Frontend: Disk Provider ({})",
        config.portal.asset_dir.display()
    );
    Arc::new(DiskFrontend::new(config.portal.asset_dir.clone()))
}

#[cfg(feature = "frontend_embed")]
fn get_frontend(_config: &AppConfig) -> Arc<dyn UiAssetProvider> {
    use portal_core::frontends::provider_embed::EmbedFrontend;
    tracing::info!("📦 Frontend: Embed Provider");
    Arc::new(EmbedFrontend::new())
}

/// 组装后端和前端，并运行 Web 服务器直到收到 Ctrl+C
pub async fn run_portal(config: AppConfig) -> anyhow::Result<()> {
    let (scanner, launcher) = get_backend(&config);
    let frontend = get_frontend(&config);

    tracing::info!("==================================================");
    tracing::info!("Wi-Fi Portal Server Starting");
    tracing::info!("Listening on: http://{}", config.portal.bind_addr);
    tracing::info!("Captive Portal: Enabled (redirecting to {})", config.portal.portal_url);
    tracing::info!("Open Networks: Supported");
    tracing::info!("Press Ctrl+C to stop");
    tracing::info!("==================================================");

    let state = AppState {
        portal: config.portal,
        scanner,
        launcher,
        frontend,
    };

    web_server::run_server(state, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving rather than exiting at once.
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl+C received, shutting down server...");
}
