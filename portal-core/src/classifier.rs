//! Probe classification.
//!
//! Every operating system fires its own "is there internet?" request right
//! after joining a network. While our dnsmasq answers every DNS name with
//! the portal's address, those probes land here. Each vendor's heuristic
//! has to be failed in a specific way for the OS to raise its captive
//! portal sheet:
//!
//! * Android expects `204 No Content`; a redirect means "captive".
//! * Apple looks for a literal `Success` page; any other body means
//!   "captive", and the portal page is what the sheet then shows.
//! * Windows NCSI expects a fixed text file; a redirect means "captive".
//!
//! Everything unrecognised is redirected to the portal root as well.

use axum::http::Method;

pub const LOGO_PATH: &str = "/logo.png";
pub const SCAN_PATH: &str = "/scan";
pub const CONNECT_PATH: &str = "/connect";

const ANDROID_PREFIXES: &[&str] = &["/generate_204"];
const APPLE_PREFIXES: &[&str] = &["/hotspot-detect.html", "/library/test/success.html"];
const WINDOWS_PREFIXES: &[&str] = &["/connecttest.txt", "/ncsi.txt"];
const PORTAL_PATHS: &[&str] = &["/", "/index.html"];

/// 发出连通性探测的操作系统
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Apple,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeClassification {
    BinaryAsset,
    PlatformProbe(Platform),
    PortalPage,
    ScanQuery,
    ConnectCommand,
    Unknown,
}

/// What the HTTP front has to produce for a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 302 to the portal root, no-cache.
    RedirectToPortal,
    /// 200 with the portal page (or an inline error page), no-cache.
    ServePortalPage,
    /// 200 image/png with a positive cache lifetime; empty body on read failure.
    ServeLogo,
    /// 200 JSON scan report, no-cache.
    RunScan,
    /// 200 JSON connect acknowledgement, no-cache.
    DispatchConnect,
}

/// Classifies a request by its target (path plus any query string, exactly
/// as the client sent it) and method. First matching rule wins.
pub fn classify(target: &str, method: &Method) -> ProbeClassification {
    if *method == Method::POST {
        return if target == CONNECT_PATH {
            ProbeClassification::ConnectCommand
        } else {
            ProbeClassification::Unknown
        };
    }
    if *method != Method::GET && *method != Method::HEAD {
        return ProbeClassification::Unknown;
    }

    if target == LOGO_PATH {
        ProbeClassification::BinaryAsset
    } else if starts_with_any(target, ANDROID_PREFIXES) {
        ProbeClassification::PlatformProbe(Platform::Android)
    } else if starts_with_any(target, APPLE_PREFIXES) {
        ProbeClassification::PlatformProbe(Platform::Apple)
    } else if starts_with_any(target, WINDOWS_PREFIXES) {
        ProbeClassification::PlatformProbe(Platform::Windows)
    } else if PORTAL_PATHS.contains(&target) {
        ProbeClassification::PortalPage
    } else if target == SCAN_PATH {
        ProbeClassification::ScanQuery
    } else {
        ProbeClassification::Unknown
    }
}

fn starts_with_any(target: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| target.starts_with(prefix))
}

impl ProbeClassification {
    pub fn disposition(self) -> Disposition {
        match self {
            ProbeClassification::BinaryAsset => Disposition::ServeLogo,
            ProbeClassification::PlatformProbe(Platform::Apple) => Disposition::ServePortalPage,
            ProbeClassification::PlatformProbe(Platform::Android | Platform::Windows) => {
                Disposition::RedirectToPortal
            }
            ProbeClassification::PortalPage => Disposition::ServePortalPage,
            ProbeClassification::ScanQuery => Disposition::RunScan,
            ProbeClassification::ConnectCommand => Disposition::DispatchConnect,
            ProbeClassification::Unknown => Disposition::RedirectToPortal,
        }
    }
}
