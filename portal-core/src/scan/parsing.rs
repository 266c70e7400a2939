use crate::structs::Security;

const BSS_MARKER: &str = "BSS ";
const SSID_MARKER: &str = "SSID:";
const SECURITY_MARKERS: &[&str] = &["RSN:", "WPA:"];

/// 单个 BSS 条目的一次观测（去重之前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub ssid: String,
    pub security: Security,
}

/// 正在解析中的 BSS 条目
#[derive(Debug, Default)]
struct Tentative {
    ssid: Option<String>,
    security: Security,
}

impl Tentative {
    fn into_observation(self) -> Option<Observation> {
        self.ssid.map(|ssid| Observation {
            ssid,
            security: self.security,
        })
    }
}

/// Line-oriented parser over `iw dev <iface> scan` output.
///
/// The only state is the BSS entry currently being filled in. Lines before
/// the first `BSS ` line belong to no entry and are ignored.
#[derive(Debug, Default)]
pub(crate) struct BssParser {
    current: Option<Tentative>,
    done: Vec<Observation>,
}

impl BssParser {
    pub(crate) fn feed(&mut self, raw: &str) {
        // Entry headers are the only unindented lines; the indented
        // "BSS Load:" element must not open a new entry.
        if raw.starts_with(BSS_MARKER) {
            self.flush();
            self.current = Some(Tentative::default());
            return;
        }

        let line = raw.trim();

        let Some(current) = self.current.as_mut() else {
            return;
        };

        if let Some((_, rest)) = line.split_once(SSID_MARKER) {
            let ssid = rest.trim();
            if current.ssid.is_none() && !ssid.is_empty() {
                current.ssid = Some(ssid.to_string());
            }
        } else if SECURITY_MARKERS.iter().any(|marker| line.contains(marker)) {
            current.security = Security::Secured;
        }
    }

    fn flush(&mut self) {
        if let Some(observation) = self.current.take().and_then(Tentative::into_observation) {
            self.done.push(observation);
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Observation> {
        self.flush();
        self.done
    }
}

/// 解析 iw 扫描输出，返回每个带 SSID 的 BSS 条目（未去重，保持出现顺序）
///
/// Entries without an SSID (hidden networks) are dropped. Malformed output
/// never errors; it just yields fewer observations.
pub fn parse_bss_records(output: &str) -> Vec<Observation> {
    let mut parser = BssParser::default();
    for line in output.lines() {
        parser.feed(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
BSS 11:22:33:44:55:66(on wlan0)
\tlast seen: 120 ms ago
\tfreq: 2412
\tsignal: -48.00 dBm
\tSSID: HomeNet
\tRSN:\t * Version: 1
\t\t * Group cipher: CCMP
BSS aa:bb:cc:dd:ee:ff(on wlan0)
\tfreq: 2437
\tSSID: Cafe Guest
\tSupported rates: 1.0* 2.0* 5.5* 11.0*
BSS 01:02:03:04:05:06(on wlan0)
\tSSID:
\tWPA:\t * Version: 1
BSS 0a:0b:0c:0d:0e:0f(on wlan0)
\tSSID: Legacy
\tWPA:\t * Version: 1
";

    #[test]
    fn parses_records_in_order_and_drops_hidden() {
        let observations = parse_bss_records(SAMPLE);
        assert_eq!(
            observations,
            vec![
                Observation {
                    ssid: "HomeNet".into(),
                    security: Security::Secured,
                },
                Observation {
                    ssid: "Cafe Guest".into(),
                    security: Security::Open,
                },
                Observation {
                    ssid: "Legacy".into(),
                    security: Security::Secured,
                },
            ]
        );
    }

    #[test]
    fn empty_and_garbage_input_yield_nothing() {
        assert!(parse_bss_records("").is_empty());
        assert!(parse_bss_records("command failed: Device or resource busy (-16)\n").is_empty());
    }

    #[test]
    fn lines_before_first_bss_are_ignored() {
        let output = "\tSSID: Orphan\nBSS 00:00:00:00:00:01(on wlan0)\n\tSSID: Real\n";
        let observations = parse_bss_records(output);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].ssid, "Real");
    }

    #[test]
    fn first_ssid_in_a_record_wins() {
        let output = "BSS 1\n\tSSID: First\n\tSSID: Second\n";
        assert_eq!(parse_bss_records(output)[0].ssid, "First");
    }

    #[test]
    fn indented_bss_load_does_not_split_a_record() {
        let output = "BSS 1\n\tSSID: Busy\n\tBSS Load:\n\t\t * station count: 3\n\tRSN:\t * Version: 1\n";
        assert_eq!(
            parse_bss_records(output),
            vec![Observation {
                ssid: "Busy".into(),
                security: Security::Secured,
            }]
        );
    }

    #[test]
    fn security_marker_without_ssid_is_dropped() {
        let output = "BSS 1\n\tRSN:\t * Version: 1\nBSS 2\n\tWPA:\t * Version: 1\n";
        assert!(parse_bss_records(output).is_empty());
    }
}
