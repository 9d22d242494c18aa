//! Handles extraction of content from one of the palinsesto day-part pages
//! (mattina / pomeriggio / serata).

use super::load_sels;
use crate::data_structs::ProgramEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

const SCHEDULE_PAGE_SELECTORS_STR: &str = include_str!("../../selectors/schedule_page.toml");

/// Matches a leading `H:MM` / `H.MM` token followed by the program title.
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}[:.]\d{2})\s*(.*)$").unwrap());

/// Handles extraction of content from one palinsesto day-part page.
///
/// You can either provide your own HTML string (see the `From<String>` impl)
/// or use the `http_client::Downloader`.
pub struct SchedulePageScraper {
    doc: Html,
}

impl From<String> for SchedulePageScraper {
    fn from(html: String) -> Self {
        SchedulePageScraper {
            doc: Html::parse_document(&html),
        }
    }
}

impl SchedulePageScraper {
    /// Gets the inner markup of every per-channel program list on the page,
    /// in document order.
    ///
    /// The upstream page holds one list per channel; position in the returned
    /// vec is what ties a list to a channel. Markup that doesn't match the
    /// expected structure yields an empty vec.
    #[inline]
    pub fn channel_lists(&self) -> Vec<String> {
        let selectors = load_sels(SCHEDULE_PAGE_SELECTORS_STR);

        self.doc
            .select(&selectors["channel_lists"])
            .map(|list| list.inner_html())
            .collect()
    }
}

/// Parses the inner markup of one program list into its entries.
///
/// Every item with visible text produces an entry: items that start with a
/// time token get it split off (with `.` normalized to `:`), the rest keep an
/// empty time. An empty or unrecognizable fragment produces no entries.
pub fn parse_program_list(fragment: &str) -> Vec<ProgramEntry> {
    let mut entries = vec![];

    if fragment.is_empty() {
        return entries;
    }

    let doc = Html::parse_fragment(&format!("<ul>{}</ul>", fragment));
    let selectors = load_sels(SCHEDULE_PAGE_SELECTORS_STR);

    for item in doc.select(&selectors["items"]) {
        let text = item.text().collect::<Vec<_>>().join(" ");
        // Collapse runs of whitespace left behind by nested markup
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if text.is_empty() {
            continue;
        }

        match TIME_RE.captures(&text) {
            Some(caps) => entries.push(ProgramEntry {
                time: caps[1].replace('.', ":"),
                title: caps[2].trim().into(),
            }),
            None => entries.push(ProgramEntry {
                time: String::new(),
                title: text,
            }),
        }
    }

    entries
}
