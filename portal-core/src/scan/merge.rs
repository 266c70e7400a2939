use super::parsing::Observation;
use crate::structs::NetworkDescriptor;
use std::collections::BTreeMap;

/// 按 SSID 合并重复观测，并按 SSID 升序排列
///
/// Several access points may broadcast the same SSID. The first observation
/// is kept, except that a later `Secured` observation upgrades an `Open`
/// one; `Secured` is never downgraded. Ordering is byte-wise on the SSID.
pub fn merge_observations<I>(observations: I) -> Vec<NetworkDescriptor>
where
    I: IntoIterator<Item = Observation>,
{
    let mut unique: BTreeMap<String, NetworkDescriptor> = BTreeMap::new();

    for observation in observations {
        match unique.get_mut(&observation.ssid) {
            Some(kept) => kept.security = kept.security.max(observation.security),
            None => {
                unique.insert(
                    observation.ssid.clone(),
                    NetworkDescriptor {
                        ssid: observation.ssid,
                        security: observation.security,
                    },
                );
            }
        }
    }

    unique.into_values().collect()
}
