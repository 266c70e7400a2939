pub mod iw_cli;

#[cfg(feature = "backend_mock")]
pub mod mock;
