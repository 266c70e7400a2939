// Disk-based frontend, the default: assets are read live from the asset directory.
pub mod provider_disk;

// Conditionally compile and expose the embedded frontend.
#[cfg(feature = "frontend_embed")]
pub mod provider_embed;
