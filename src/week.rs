//! Canonical week: the fixed Monday..Sunday sequence every plan is keyed by.

use chrono::Weekday;

/// Days of a plan, in display order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Number of slots in a weekly plan.
pub const DAYS_IN_WEEK: usize = WEEK.len();

/// Full English label for a day, as used in prompts and output.
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Position of a day in the canonical sequence.
pub fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Parse a day label as a model might emit it ("Monday", "monday", "Mon").
pub fn parse_day_label(label: &str) -> Option<Weekday> {
    label.trim().parse::<Weekday>().ok()
}
