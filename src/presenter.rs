//! Display helpers for the rendered page: Italian date formatting and the
//! channel-logo naming scheme.

use chrono::Datelike;

/// Italian weekday names, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Lunedì", "Martedì", "Mercoledì", "Giovedì", "Venerdì", "Sabato", "Domenica",
];

/// Italian month names.
pub const MONTHS: [&str; 12] = [
    "Gennaio", "Febbraio", "Marzo", "Aprile", "Maggio", "Giugno",
    "Luglio", "Agosto", "Settembre", "Ottobre", "Novembre", "Dicembre",
];

/// Formats a date as e.g. `"Mercoledì, 15 Marzo 2023"`.
pub fn format_italian_date<D: Datelike>(date: &D) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];

    format!("{}, {} {} {}", weekday, date.day(), month, date.year())
}

/// Builds the logo file name for a channel.
///
/// Lowercases the name, strips spaces and periods, spells out `+` and drops
/// `-`. No check that the file exists; missing logos are the page's problem.
pub fn logo_file_name(channel: &str) -> String {
    let key = channel
        .to_lowercase()
        .replace(' ', "")
        .replace('.', "")
        .replace('+', "plus")
        .replace('-', "");

    format!("img/{}.png", key)
}
