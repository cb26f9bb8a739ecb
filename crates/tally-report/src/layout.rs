//! Column alignment for the `prettyprint` format.
//!
//! Two strategies, chosen by the separator:
//!
//! * **Tab stops** when the separator is a horizontal tab. The last-name
//!   and first-name columns are each padded with tabs up to the tab stop
//!   after their widest value, so at least one tab always follows a name.
//! * **Spaces** for any other separator. Every `last<sep>first<sep>` prefix
//!   is padded with spaces to the widest prefix.

use tally_core::models::{Roster, RosterEntry};
use unicode_width::UnicodeWidthStr;

/// Distance between tab stops, in character cells.
pub const TAB_WIDTH: usize = 8;

/// Resolved column positions for one roster and separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLayout {
    TabStops {
        /// Cell where the first-name column starts.
        first_name_col: usize,
        /// Cell where the count column starts.
        count_col: usize,
    },
    Padded {
        separator: String,
        /// Width of the widest `last<sep>first<sep>` prefix.
        prefix_width: usize,
    },
}

impl ColumnLayout {
    pub fn for_roster(roster: &Roster, separator: &str) -> Self {
        if separator == "\t" {
            let widest_last = roster
                .iter()
                .map(|(_, e)| e.last_name.width())
                .max()
                .unwrap_or(0);
            let widest_first = roster
                .iter()
                .map(|(_, e)| e.first_name.width())
                .max()
                .unwrap_or(0);

            let first_name_col = next_tab_stop(widest_last);
            ColumnLayout::TabStops {
                first_name_col,
                count_col: first_name_col + next_tab_stop(widest_first),
            }
        } else {
            let prefix_width = roster
                .iter()
                .map(|(_, e)| padded_prefix(e, separator).width())
                .max()
                .unwrap_or(0);
            ColumnLayout::Padded {
                separator: separator.to_string(),
                prefix_width,
            }
        }
    }

    /// Cell where the count column starts.
    pub fn count_col(&self) -> usize {
        match self {
            ColumnLayout::TabStops { count_col, .. } => *count_col,
            ColumnLayout::Padded { prefix_width, .. } => *prefix_width,
        }
    }

    /// Everything in a row before the count.
    pub fn row_prefix(&self, entry: &RosterEntry) -> String {
        match self {
            ColumnLayout::TabStops {
                first_name_col,
                count_col,
            } => {
                let last_width = entry.last_name.width();
                let first_width = entry.first_name.width();
                format!(
                    "{}{}{}{}",
                    entry.last_name,
                    "\t".repeat(tabs_to(last_width, *first_name_col)),
                    entry.first_name,
                    "\t".repeat(tabs_to(first_width, count_col - first_name_col)),
                )
            }
            ColumnLayout::Padded {
                separator,
                prefix_width,
            } => {
                let prefix = padded_prefix(entry, separator);
                let pad = prefix_width.saturating_sub(prefix.width());
                format!("{}{}", prefix, " ".repeat(pad))
            }
        }
    }

    /// The `/ <questions>` footer, placed so the question count starts in
    /// the count column.
    pub fn footer(&self, total_questions: usize) -> String {
        let indent = self.count_col().saturating_sub(2);
        format!("{}/ {}", " ".repeat(indent), total_questions)
    }
}

fn padded_prefix(entry: &RosterEntry, separator: &str) -> String {
    format!(
        "{}{sep}{}{sep}",
        entry.last_name,
        entry.first_name,
        sep = separator
    )
}

/// First tab stop strictly after `width`.
fn next_tab_stop(width: usize) -> usize {
    (width / TAB_WIDTH + 1) * TAB_WIDTH
}

/// Tabs needed to move from cell `width` to the tab stop `stop`.
fn tabs_to(width: usize, stop: usize) -> usize {
    (stop / TAB_WIDTH).saturating_sub(width / TAB_WIDTH).max(1)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::models::DeviceId;

    fn roster_of(rows: &[(&str, &str)]) -> Roster {
        let mut roster = Roster::new();
        for (i, (last, first)) in rows.iter().enumerate() {
            roster.insert(DeviceId::new(i as u32 + 1), RosterEntry::new(*last, *first));
        }
        roster
    }

    /// Render a string the way a terminal expands tabs, to check alignment.
    fn expand_tabs(s: &str) -> String {
        let mut out = String::new();
        for c in s.chars() {
            if c == '\t' {
                let pad = TAB_WIDTH - out.chars().count() % TAB_WIDTH;
                out.push_str(&" ".repeat(pad));
            } else {
                out.push(c);
            }
        }
        out
    }

    // ── tab stops ─────────────────────────────────────────────────────────────

    #[test]
    fn test_next_tab_stop() {
        assert_eq!(next_tab_stop(0), 8);
        assert_eq!(next_tab_stop(5), 8);
        assert_eq!(next_tab_stop(7), 8);
        assert_eq!(next_tab_stop(8), 16);
        assert_eq!(next_tab_stop(13), 16);
    }

    #[test]
    fn test_tab_layout_simple() {
        let roster = roster_of(&[("Smith", "Jane"), ("Doe", "John")]);
        let layout = ColumnLayout::for_roster(&roster, "\t");

        assert_eq!(
            layout,
            ColumnLayout::TabStops {
                first_name_col: 8,
                count_col: 16
            }
        );
        let rows: Vec<String> = roster.iter().map(|(_, e)| layout.row_prefix(e)).collect();
        assert_eq!(rows, vec!["Smith\tJane\t", "Doe\tJohn\t"]);
    }

    #[test]
    fn test_tab_layout_exact_fill_still_gets_a_tab() {
        let roster = roster_of(&[("Abcdefgh", "Jo"), ("Li", "Christopher")]);
        let layout = ColumnLayout::for_roster(&roster, "\t");

        assert_eq!(layout.count_col(), 16 + 16);
        let first = layout.row_prefix(roster.get(DeviceId::new(1)).unwrap());
        let second = layout.row_prefix(roster.get(DeviceId::new(2)).unwrap());
        assert_eq!(first, "Abcdefgh\tJo\t\t");
        assert_eq!(second, "Li\t\tChristopher\t");
    }

    #[test]
    fn test_tab_layout_aligns_counts() {
        let roster = roster_of(&[
            ("Ng", "Al"),
            ("Vanderbilt-Smythe", "Margaret"),
            ("Okafor", ""),
        ]);
        let layout = ColumnLayout::for_roster(&roster, "\t");

        for (_, entry) in roster.iter() {
            let expanded = expand_tabs(&layout.row_prefix(entry));
            assert_eq!(expanded.chars().count(), layout.count_col());
        }
    }

    #[test]
    fn test_tab_footer_lines_up_with_counts() {
        let roster = roster_of(&[("Smith", "Jane")]);
        let layout = ColumnLayout::for_roster(&roster, "\t");

        let footer = layout.footer(12);
        assert_eq!(footer, format!("{}/ 12", " ".repeat(14)));
        assert_eq!(footer.find("12"), Some(layout.count_col()));
    }

    #[test]
    fn test_tab_layout_empty_roster() {
        let layout = ColumnLayout::for_roster(&Roster::new(), "\t");
        assert_eq!(layout.count_col(), 16);
    }

    // ── space padding ─────────────────────────────────────────────────────────

    #[test]
    fn test_padded_layout() {
        let roster = roster_of(&[("Smith", "Jane"), ("Doe", "John")]);
        let layout = ColumnLayout::for_roster(&roster, ",");

        assert_eq!(layout.count_col(), "Smith,Jane,".len());
        let rows: Vec<String> = roster.iter().map(|(_, e)| layout.row_prefix(e)).collect();
        assert_eq!(rows, vec!["Smith,Jane,", "Doe,John,  "]);
        assert_eq!(layout.footer(3), "         / 3");
    }

    #[test]
    fn test_padded_layout_uses_display_width() {
        let roster = roster_of(&[("Müller", "Zoë"), ("Li", "Bo")]);
        let layout = ColumnLayout::for_roster(&roster, ";");

        assert_eq!(layout.count_col(), 11);
        let second = layout.row_prefix(roster.get(DeviceId::new(2)).unwrap());
        assert_eq!(second, "Li;Bo;     ");
    }
}
