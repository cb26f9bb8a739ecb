//! Merging session-observed devices into the roster.

use tally_core::models::{DeviceId, Roster, RosterEntry, SessionResult};
use tracing::debug;

/// Add a placeholder roster entry for every device in `result` that the
/// roster does not know yet.
///
/// Placeholders use the canonical device id as the last name and an empty
/// first name. They are appended in the order the devices first answered.
/// Returns the ids that were added.
pub fn reconcile(roster: &mut Roster, result: &SessionResult) -> Vec<DeviceId> {
    let unknown: Vec<DeviceId> = result.devices().filter(|id| !roster.contains(*id)).collect();

    for id in &unknown {
        debug!("Device {} is not on the roster; adding placeholder", id);
        roster.insert(*id, RosterEntry::placeholder(*id));
    }

    unknown
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(rows: &[(u32, &str, &str)]) -> Roster {
        let mut roster = Roster::new();
        for (id, last, first) in rows {
            roster.insert(DeviceId::new(*id), RosterEntry::new(*last, *first));
        }
        roster
    }

    fn result_of(ids: &[u32]) -> SessionResult {
        let mut result = SessionResult::new(1);
        for id in ids {
            result.record_response(DeviceId::new(*id));
        }
        result
    }

    #[test]
    fn test_reconcile_adds_unknown_device() {
        let mut roster = roster_of(&[(1, "Smith", "Jane"), (2, "Doe", "John")]);
        let added = reconcile(&mut roster, &result_of(&[1, 3, 2]));

        assert_eq!(added, vec![DeviceId::new(3)]);
        assert_eq!(roster.len(), 3);
        assert_eq!(
            roster.get(DeviceId::new(3)),
            Some(&RosterEntry::new("00003", ""))
        );
        let last = roster.iter().last().unwrap();
        assert_eq!(last.0, DeviceId::new(3));
    }

    #[test]
    fn test_reconcile_known_devices_untouched() {
        let mut roster = roster_of(&[(1, "Smith", "Jane")]);
        let before = roster.clone();
        let added = reconcile(&mut roster, &result_of(&[1, 1, 1]));

        assert!(added.is_empty());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_reconcile_uses_first_seen_order() {
        let mut roster = Roster::new();
        reconcile(&mut roster, &result_of(&[0xBEEF, 0x10, 0xBEEF, 0x2]));

        let names: Vec<&str> = roster.iter().map(|(_, e)| e.last_name.as_str()).collect();
        assert_eq!(names, vec!["0BEEF", "00010", "00002"]);
    }

    #[test]
    fn test_reconcile_across_sessions_grows_once() {
        let mut roster = roster_of(&[(1, "Smith", "Jane")]);
        reconcile(&mut roster, &result_of(&[4]));
        let added = reconcile(&mut roster, &result_of(&[4, 5]));

        assert_eq!(added, vec![DeviceId::new(5)]);
        assert_eq!(roster.len(), 3);
    }
}
