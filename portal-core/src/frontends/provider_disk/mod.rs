use crate::traits::UiAssetProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::borrow::Cow;
use std::path::PathBuf;
use tokio::fs;

/// A UI asset provider that reads files directly from disk on every request.
pub struct DiskFrontend {
    root: PathBuf,
}

impl DiskFrontend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl UiAssetProvider for DiskFrontend {
    async fn get_asset(&self, path: &str) -> Result<(Cow<'static, [u8]>, String)> {
        // Only the fixed names "index.html" / "logo.png" ever reach here.
        let asset_path = self.root.join(path);

        let content = fs::read(&asset_path).await.map_err(|source| Error::AssetRead {
            path: asset_path.display().to_string(),
            source,
        })?;

        // Guess the MIME type based on the file extension
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok((Cow::Owned(content), mime))
    }
}
