use crate::structs::{ConnectAcknowledgement, ConnectRequest, JoinTarget};
use crate::traits::JoinLauncher;

pub const SSID_REQUIRED: &str = "SSID required";
pub const PASSWORD_REQUIRED: &str = "Password required for secured network";

/// Turns a connect request into a join target, or the rejection message.
///
/// Checked in order: SSID present, open flag, non-empty password.
pub fn plan_join(request: &ConnectRequest) -> Result<JoinTarget, &'static str> {
    if request.ssid.is_empty() {
        return Err(SSID_REQUIRED);
    }
    if request.is_open {
        return Ok(JoinTarget::Open {
            ssid: request.ssid.clone(),
        });
    }
    match request.password.as_deref() {
        Some(password) if !password.is_empty() => Ok(JoinTarget::Secured {
            ssid: request.ssid.clone(),
            password: password.to_string(),
        }),
        _ => Err(PASSWORD_REQUIRED),
    }
}

/// 处理连接请求：校验后将连接工作交给外部脚本，立即返回
///
/// The acknowledgement reflects the hand-off only. The join script keeps
/// running after the HTTP response is sent and its outcome is never seen
/// here; the AP usually goes down as the device switches networks.
pub fn dispatch(request: &ConnectRequest, launcher: &dyn JoinLauncher) -> ConnectAcknowledgement {
    let target = match plan_join(request) {
        Ok(target) => target,
        Err(reason) => {
            tracing::info!(ssid = %request.ssid, "Rejecting connect request: {}", reason);
            return ConnectAcknowledgement::rejected(reason);
        }
    };

    match launcher.launch(&target) {
        Ok(()) => {
            tracing::info!(ssid = %target.ssid(), open = request.is_open, "Join handed off");
            ConnectAcknowledgement::accepted(format!(
                "Connecting to {}... The portal will close shortly.",
                target.ssid()
            ))
        }
        Err(e) => {
            tracing::error!(ssid = %target.ssid(), "Failed to hand off join: {}", e);
            ConnectAcknowledgement::rejected(format!("Error: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Mutex<Vec<JoinTarget>>,
    }

    impl JoinLauncher for RecordingLauncher {
        fn launch(&self, target: &JoinTarget) -> crate::Result<()> {
            self.launched.lock().unwrap().push(target.clone());
            Ok(())
        }
    }

    struct MissingBinary;

    impl JoinLauncher for MissingBinary {
        fn launch(&self, _target: &JoinTarget) -> crate::Result<()> {
            Err(crate::Error::Spawn {
                program: "/usr/local/bin/wifi-connect.sh".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn request(ssid: &str, password: Option<&str>, is_open: bool) -> ConnectRequest {
        ConnectRequest {
            ssid: ssid.into(),
            password: password.map(str::to_string),
            is_open,
        }
    }

    #[test]
    fn empty_ssid_is_rejected_without_spawning() {
        let launcher = RecordingLauncher::default();
        let ack = dispatch(&request("", Some(""), false), &launcher);
        assert_eq!(ack, ConnectAcknowledgement::rejected("SSID required"));

        // SSID is checked before the open flag.
        let ack = dispatch(&request("", None, true), &launcher);
        assert_eq!(ack.message, SSID_REQUIRED);
        assert!(launcher.launched.lock().unwrap().is_empty());
    }

    #[test]
    fn secured_without_password_is_rejected() {
        let launcher = RecordingLauncher::default();
        for password in [None, Some("")] {
            let ack = dispatch(&request("Home", password, false), &launcher);
            assert_eq!(
                ack,
                ConnectAcknowledgement::rejected("Password required for secured network")
            );
        }
        assert!(launcher.launched.lock().unwrap().is_empty());
    }

    #[test]
    fn open_network_uses_open_form() {
        let launcher = RecordingLauncher::default();
        let ack = dispatch(&request("Cafe", Some(""), true), &launcher);
        assert!(ack.success);
        assert!(ack.message.starts_with("Connecting to Cafe... "));
        assert_eq!(
            *launcher.launched.lock().unwrap(),
            vec![JoinTarget::Open { ssid: "Cafe".into() }]
        );
    }

    #[test]
    fn open_flag_ignores_supplied_password() {
        let launcher = RecordingLauncher::default();
        dispatch(&request("Cafe", Some("unused"), true), &launcher);
        assert_eq!(
            *launcher.launched.lock().unwrap(),
            vec![JoinTarget::Open { ssid: "Cafe".into() }]
        );
    }

    #[test]
    fn secured_network_passes_password() {
        let launcher = RecordingLauncher::default();
        let ack = dispatch(&request("Home", Some("hunter22"), false), &launcher);
        assert!(ack.success);
        assert_eq!(
            *launcher.launched.lock().unwrap(),
            vec![JoinTarget::Secured {
                ssid: "Home".into(),
                password: "hunter22".into(),
            }]
        );
    }

    #[test]
    fn spawn_failure_becomes_error_acknowledgement() {
        let ack = dispatch(&request("Home", Some("hunter22"), false), &MissingBinary);
        assert!(!ack.success);
        assert!(ack.message.starts_with("Error: failed to launch /usr/local/bin/wifi-connect.sh"));
    }
}
