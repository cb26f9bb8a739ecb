use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;

// ── DeviceId ──────────────────────────────────────────────────────────────────

/// Hardware identifier of a single clicker.
///
/// Parsed from a hexadecimal string and always rendered in canonical form:
/// at least five uppercase hex digits, zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(u32);

impl DeviceId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Canonical string form, e.g. `"1A2B3"` or `"00003"`.
    pub fn canonical(self) -> String {
        self.to_string()
    }
}

impl FromStr for DeviceId {
    type Err = TallyError;

    /// Case-insensitive hex parse. Surrounding whitespace is ignored; a `0x`
    /// prefix, sign, or any other non-hex character is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TallyError::InvalidDeviceId(s.to_string()));
        }
        u32::from_str_radix(trimmed, 16)
            .map(DeviceId)
            .map_err(|_| TallyError::InvalidDeviceId(s.to_string()))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05X}", self.0)
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// Display name attached to a device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterEntry {
    pub last_name: String,
    pub first_name: String,
}

impl RosterEntry {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    /// Placeholder for a device that answered but is not on the roster.
    pub fn placeholder(id: DeviceId) -> Self {
        Self::new(id.canonical(), "")
    }
}

/// Name table keyed by device id, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<(DeviceId, RosterEntry)>,
    index: HashMap<DeviceId, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `id`.
    ///
    /// A replaced entry keeps its original position; the previous value is
    /// returned.
    pub fn insert(&mut self, id: DeviceId, entry: RosterEntry) -> Option<RosterEntry> {
        match self.index.get(&id) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, entry)),
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push((id, entry));
                None
            }
        }
    }

    pub fn get(&self, id: DeviceId) -> Option<&RosterEntry> {
        self.index.get(&id).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &RosterEntry)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}

// ── SessionResult ─────────────────────────────────────────────────────────────

/// Tally of one session archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResult {
    /// Number of multiple-choice questions in the session.
    pub total_questions: usize,
    counts: HashMap<DeviceId, u32>,
    /// Devices in order of their first response.
    seen: Vec<DeviceId>,
}

impl SessionResult {
    pub fn new(total_questions: usize) -> Self {
        Self {
            total_questions,
            ..Self::default()
        }
    }

    /// Count one response from `id`. Repeated answers to the same question
    /// are counted again.
    pub fn record_response(&mut self, id: DeviceId) {
        let count = self.counts.entry(id).or_insert(0);
        if *count == 0 {
            self.seen.push(id);
        }
        *count += 1;
    }

    /// Responses recorded for `id`, zero when it never answered.
    pub fn count_for(&self, id: DeviceId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Responding devices in first-seen order.
    pub fn devices(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.seen.iter().copied()
    }

    /// Sum of all per-device counts.
    pub fn total_responses(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }
}

// ── AggregateState ────────────────────────────────────────────────────────────

/// One processed archive, identified by its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    pub display_name: String,
    pub result: SessionResult,
}

/// Everything the formatter needs: the reconciled roster plus every session
/// in input order.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    pub roster: Roster,
    pub sessions: Vec<SessionFile>,
}

impl AggregateState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            sessions: Vec::new(),
        }
    }

    pub fn push_session(&mut self, display_name: impl Into<String>, result: SessionResult) {
        self.sessions.push(SessionFile {
            display_name: display_name.into(),
            result,
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── DeviceId ──────────────────────────────────────────────────────────────

    #[test]
    fn test_device_id_parse_hex() {
        let id: DeviceId = "1A2B3".parse().unwrap();
        assert_eq!(id, DeviceId::new(0x1A2B3));
    }

    #[test]
    fn test_device_id_parse_is_case_insensitive() {
        let upper: DeviceId = "ABCDE".parse().unwrap();
        let lower: DeviceId = "abcde".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_device_id_parse_trims_whitespace() {
        let id: DeviceId = "  01F \n".parse().unwrap();
        assert_eq!(id, DeviceId::new(0x1F));
    }

    #[test]
    fn test_device_id_rejects_bad_input() {
        for raw in ["", "   ", "0x1F", "+1F", "-1", "12G45", "1 2"] {
            assert!(raw.parse::<DeviceId>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_device_id_rejects_overflow() {
        assert!("123456789".parse::<DeviceId>().is_err());
    }

    #[test]
    fn test_device_id_canonical_is_zero_padded_uppercase() {
        assert_eq!(DeviceId::new(3).canonical(), "00003");
        assert_eq!(DeviceId::new(0xabcde).canonical(), "ABCDE");
        assert_eq!(DeviceId::new(0).canonical(), "00000");
    }

    #[test]
    fn test_device_id_canonical_round_trip() {
        for raw in (0..=0xFFFFFu32).step_by(4093).chain([0xFFFFF]) {
            let id = DeviceId::new(raw);
            let parsed: DeviceId = id.canonical().parse().unwrap();
            assert_eq!(parsed, id);
            assert_eq!(id.canonical().len(), 5);
        }
    }

    // ── Roster ────────────────────────────────────────────────────────────────

    #[test]
    fn test_roster_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.insert(DeviceId::new(9), RosterEntry::new("Zed", "Ann"));
        roster.insert(DeviceId::new(1), RosterEntry::new("Abe", "Bo"));
        roster.insert(DeviceId::new(5), RosterEntry::new("Moe", "Cy"));

        let ids: Vec<DeviceId> = roster.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![DeviceId::new(9), DeviceId::new(1), DeviceId::new(5)]);
    }

    #[test]
    fn test_roster_replace_keeps_position() {
        let mut roster = Roster::new();
        roster.insert(DeviceId::new(1), RosterEntry::new("Smith", "Jane"));
        roster.insert(DeviceId::new(2), RosterEntry::new("Doe", "John"));
        let previous = roster.insert(DeviceId::new(1), RosterEntry::new("Smyth", "Jane"));

        assert_eq!(previous, Some(RosterEntry::new("Smith", "Jane")));
        assert_eq!(roster.len(), 2);
        let first = roster.iter().next().unwrap();
        assert_eq!(first.0, DeviceId::new(1));
        assert_eq!(first.1.last_name, "Smyth");
    }

    #[test]
    fn test_roster_lookup() {
        let mut roster = Roster::new();
        assert!(roster.is_empty());
        roster.insert(DeviceId::new(2), RosterEntry::new("Doe", "John"));

        assert!(roster.contains(DeviceId::new(2)));
        assert!(!roster.contains(DeviceId::new(3)));
        assert_eq!(roster.get(DeviceId::new(2)).unwrap().first_name, "John");
        assert!(roster.get(DeviceId::new(3)).is_none());
    }

    #[test]
    fn test_placeholder_entry() {
        let entry = RosterEntry::placeholder(DeviceId::new(0x3));
        assert_eq!(entry.last_name, "00003");
        assert_eq!(entry.first_name, "");
    }

    // ── SessionResult ─────────────────────────────────────────────────────────

    #[test]
    fn test_session_result_counts_every_response() {
        let mut result = SessionResult::new(2);
        let a = DeviceId::new(0xA);
        let b = DeviceId::new(0xB);
        result.record_response(b);
        result.record_response(a);
        result.record_response(b);
        result.record_response(b);

        assert_eq!(result.count_for(a), 1);
        assert_eq!(result.count_for(b), 3);
        assert_eq!(result.count_for(DeviceId::new(0xC)), 0);
        assert_eq!(result.total_responses(), 4);
        assert_eq!(result.devices().collect::<Vec<_>>(), vec![b, a]);
    }

    // ── AggregateState ────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_state_keeps_input_order() {
        let mut state = AggregateState::new(Roster::new());
        state.push_session("week2", SessionResult::new(4));
        state.push_session("week1", SessionResult::new(3));

        let names: Vec<&str> = state
            .sessions
            .iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["week2", "week1"]);
        assert_eq!(state.sessions[1].result.total_questions, 3);
    }
}
