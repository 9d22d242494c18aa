use std::collections::HashMap;

/// The seven channels the upstream page lists, in its fixed document order.
///
/// Extracted list containers are matched to channels by position, so this
/// order is part of the upstream contract.
pub const CHANNELS: [&str; 7] = [
    "Rai 1", "Rai 2", "Rai 3", "Rete 4", "Canale 5", "Italia 1", "LA7",
];

/// Path suffixes of the three day-part pages, in schedule order.
pub const DAY_PART_PATHS: [&str; 3] = ["mattina", "pomeriggio", "serata"];

/// One scheduled program.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ProgramEntry {
    /// Start time as `"H:MM"`, or empty when the listing carries no time.
    pub time: String,
    pub title: String,
}

/// Today's listings for every channel that had at least one entry.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ScheduleSet {
    /// Canonical channel order restricted to the channels present in `programs`.
    pub channels: Vec<String>,
    pub programs: HashMap<String, Vec<ProgramEntry>>,
}

impl ScheduleSet {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
