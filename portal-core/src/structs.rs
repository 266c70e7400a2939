use serde::{Deserialize, Deserializer, Serialize};

/// 网络安全性：扫描结果只区分开放与加密两种
/// `Secured` orders above `Open` so merging can keep the maximum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Security {
    #[default]
    Open,
    Secured,
}

/// 扫描到的单个 Wi-Fi 网络（按 SSID 去重后）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub ssid: String,
    pub security: Security,
}

/// GET /scan 的响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub networks: Vec<NetworkDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanReport {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            networks: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// POST /connect 的请求体
///
/// Missing or `null` fields fall back to their empty value, so
/// `{"ssid": "Cafe"}` is a secured request with no password.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_open: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// POST /connect 的响应体
///
/// `success` only says whether the join script was handed the request;
/// the outcome of the join itself is never reported here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectAcknowledgement {
    pub success: bool,
    pub message: String,
}

impl ConnectAcknowledgement {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// 交给外部连接脚本的目标网络
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinTarget {
    Open { ssid: String },
    Secured { ssid: String, password: String },
}

impl JoinTarget {
    pub fn ssid(&self) -> &str {
        match self {
            JoinTarget::Open { ssid } | JoinTarget::Secured { ssid, .. } => ssid,
        }
    }

    /// Arguments appended to the join command: `<ssid> <open_flag>` or
    /// `<ssid> <password>`.
    pub fn script_args<'a>(&'a self, open_flag: &'a str) -> [&'a str; 2] {
        match self {
            JoinTarget::Open { ssid } => [ssid.as_str(), open_flag],
            JoinTarget::Secured { ssid, password } => [ssid.as_str(), password.as_str()],
        }
    }
}
