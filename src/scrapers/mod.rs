//! Various modules for getting data from the site's HTML.

pub mod schedule_page;

use scraper::Selector;
use std::collections::HashMap;

/// Loads a named set of selectors from the contents of one of the TOML files
/// under `selectors/`.
///
/// Panics if the file or one of its selectors doesn't parse; the files are
/// compiled into the crate, so that's a programming error.
fn load_sels(toml_str: &str) -> HashMap<String, Selector> {
    let table: HashMap<String, String> =
        toml::from_str(toml_str).expect("malformed selector file");

    table
        .into_iter()
        .map(|(name, sel)| {
            let parsed = Selector::parse(&sel).expect("malformed selector");
            (name, parsed)
        })
        .collect()
}
