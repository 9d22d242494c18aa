//! Puts the scraped day-part pages together into per-channel schedules and
//! figures out which program is on right now.

use crate::data_structs::{ProgramEntry, ScheduleSet, CHANNELS};
use crate::scrapers::schedule_page::{parse_program_list, SchedulePageScraper};
use chrono::NaiveTime;
use std::collections::HashMap;

/// Builds the full schedule from the raw HTML of the three day-part pages,
/// given in `[mattina, pomeriggio, serata]` order.
///
/// List containers are matched to channels by position against [`CHANNELS`];
/// positions missing from a page contribute nothing. Channels that end up
/// with no entries at all are left out.
pub fn build_schedule(pages: &[String; 3]) -> ScheduleSet {
    let day_part_lists: Vec<Vec<String>> = pages
        .iter()
        .map(|html| SchedulePageScraper::from(html.clone()).channel_lists())
        .collect();

    let mut programs: HashMap<String, Vec<ProgramEntry>> = HashMap::new();

    for (idx, channel) in CHANNELS.iter().enumerate() {
        let mut entries = vec![];

        for lists in &day_part_lists {
            if let Some(fragment) = lists.get(idx) {
                entries.extend(parse_program_list(fragment));
            }
        }

        if !entries.is_empty() {
            programs.insert((*channel).into(), entries);
        }
    }

    let channels = CHANNELS
        .iter()
        .filter(|c| programs.contains_key(**c))
        .map(|c| (*c).into())
        .collect();

    ScheduleSet { channels, programs }
}

/// Fetches the three day-part pages and builds the schedule from them.
///
/// Any fetch failure degrades to an empty schedule; the caller renders "no
/// schedule available" rather than an error.
#[cfg(feature = "http-client")]
pub fn fetch_schedule(downloader: &crate::http_client::Downloader) -> ScheduleSet {
    match downloader.schedule_pages() {
        Ok(pages) => build_schedule(&pages),
        Err(e) => {
            log::warn!("palinsesto fetch failed: {}", e);
            ScheduleSet::default()
        }
    }
}

/// Returns the index of the program currently airing, given a channel's
/// entries in document order and the current time of day.
///
/// An entry is airing when its time is at or before `now` and the next timed
/// entry starts after `now`. An entry followed by nothing, or by an entry
/// with no time, plays until further notice. Entries whose time is empty or
/// doesn't parse are never candidates. Falls back to 0.
pub fn current_program_index(programs: &[ProgramEntry], now: NaiveTime) -> usize {
    for (i, program) in programs.iter().enumerate() {
        let start = match parse_time(&program.time) {
            Some(t) => t,
            None => continue,
        };

        if start > now {
            continue;
        }

        match programs.get(i + 1) {
            Some(next) if !next.time.is_empty() => {
                // A successor that starts later closes the window; one that
                // doesn't parse is passed over, same as the untimed case below
                if let Some(next_start) = parse_time(&next.time) {
                    if now < next_start {
                        return i;
                    }
                }
            }
            _ => return i,
        }
    }

    0
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    if_chain! {
        if let Some(colon) = time.find(':');
        let (hour, minute) = (&time[..colon], &time[colon + 1..]);
        if let Ok(hour) = hour.parse::<u32>();
        if let Ok(minute) = minute.parse::<u32>();

        then {
            NaiveTime::from_hms_opt(hour, minute, 0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TEST_DATA_MATTINA: &str = include_str!("../test_data/palinsesto_mattina.html");
    const TEST_DATA_POMERIGGIO: &str = include_str!("../test_data/palinsesto_pomeriggio.html");
    const TEST_DATA_SERATA: &str = include_str!("../test_data/palinsesto_serata.html");

    fn entry(time: &str, title: &str) -> ProgramEntry {
        ProgramEntry {
            time: time.into(),
            title: title.into(),
        }
    }

    fn entries(list: &[(&str, &str)]) -> Vec<ProgramEntry> {
        list.iter().map(|(time, title)| entry(time, title)).collect()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn pages(mattina: &str, pomeriggio: &str, serata: &str) -> [String; 3] {
        [mattina.into(), pomeriggio.into(), serata.into()]
    }

    fn page_with_lists(lists: &[&str]) -> String {
        let lists: String = lists
            .iter()
            .map(|items| format!("<div class=\"g3\"><ul>{}</ul></div>", items))
            .collect();
        format!("<html><body>{}</body></html>", lists)
    }

    #[test]
    fn full_day_from_fixture_pages() {
        let schedule = build_schedule(&pages(
            TEST_DATA_MATTINA,
            TEST_DATA_POMERIGGIO,
            TEST_DATA_SERATA,
        ));

        assert_eq!(schedule.channels, CHANNELS.to_vec());

        // Day parts concatenate in mattina, pomeriggio, serata order
        let rai1 = &schedule.programs["Rai 1"];
        assert_eq!(rai1[0], entry("6:00", "Rai News 24 Telegiornale"));
        assert!(rai1.iter().any(|p| p.title == "La vita in diretta"));
        assert_eq!(rai1.last().unwrap(), &entry("23:30", "Porta a Porta"));

        let pos = |title: &str| rai1.iter().position(|p| p.title == title).unwrap();
        assert!(pos("Rai News 24 Telegiornale") < pos("La vita in diretta"));
        assert!(pos("La vita in diretta") < pos("Porta a Porta"));
    }

    #[test]
    fn channels_align_positionally() {
        let page = page_with_lists(&["<li>7:00 Primo</li>", "<li>8:00 Secondo</li>"]);
        let schedule = build_schedule(&pages(&page, "", ""));

        assert_eq!(schedule.channels, vec!["Rai 1", "Rai 2"]);
        assert_eq!(schedule.programs["Rai 2"], entries(&[("8:00", "Secondo")]));
    }

    #[test]
    fn channel_omitted_only_when_all_day_parts_empty() {
        // Rai 1 has a single evening entry; Rai 2 has nothing anywhere
        let serata = page_with_lists(&["<li>21:00 Film</li>", ""]);
        let schedule = build_schedule(&pages("", "", &serata));

        assert_eq!(schedule.channels, vec!["Rai 1"]);
        assert!(!schedule.programs.contains_key("Rai 2"));
    }

    #[test]
    fn missing_trailing_containers_drop_those_channels() {
        let page = page_with_lists(&["<li>7:00 Unico</li>"]);
        let schedule = build_schedule(&pages(&page, &page, &page));

        assert_eq!(schedule.channels, vec!["Rai 1"]);
        assert_eq!(schedule.programs.len(), 1);
    }

    #[test]
    fn empty_pages_build_empty_schedule() {
        let schedule = build_schedule(&pages("", "", ""));

        assert!(schedule.is_empty());
        assert!(schedule.programs.is_empty());
    }

    #[test]
    fn active_program_mid_window() {
        let programs = entries(&[("08:00", "A"), ("09:30", "B"), ("11:00", "C")]);

        assert_eq!(current_program_index(&programs, time(9, 45)), 1);
    }

    #[test]
    fn last_program_plays_until_further_notice() {
        let programs = entries(&[("08:00", "A")]);

        assert_eq!(current_program_index(&programs, time(23, 0)), 0);
    }

    #[test]
    fn before_first_program_falls_back_to_zero() {
        let programs = entries(&[("08:00", "A"), ("09:30", "B")]);

        assert_eq!(current_program_index(&programs, time(7, 0)), 0);
    }

    #[test]
    fn empty_schedule_falls_back_to_zero() {
        assert_eq!(current_program_index(&[], time(12, 0)), 0);
    }

    #[test]
    fn untimed_successor_ends_the_scan() {
        let programs = entries(&[("08:00", "A"), ("", "Pubblicità"), ("09:00", "C")]);

        // The untimed entry can't close A's window, so A still plays
        assert_eq!(current_program_index(&programs, time(8, 30)), 0);
    }

    #[test]
    fn unparseable_successor_is_passed_over() {
        let programs = entries(&[("08:00", "A"), ("9x:30", "B")]);

        assert_eq!(current_program_index(&programs, time(8, 30)), 0);
    }

    #[test]
    fn malformed_entry_time_skips_that_entry() {
        let programs = entries(&[("25:99", "Rotto"), ("08:00", "A")]);

        assert_eq!(current_program_index(&programs, time(9, 0)), 1);
    }

    #[test]
    fn untimed_entries_are_never_candidates() {
        let programs = entries(&[("", "Pubblicità"), ("", "Promo")]);

        assert_eq!(current_program_index(&programs, time(12, 0)), 0);
    }

    #[cfg(feature = "http-client")]
    #[test]
    fn fetch_failure_degrades_to_empty_schedule() {
        use crate::http_client::Downloader;

        // Discard port; connection is refused immediately
        let downloader = Downloader::with_base_url("http://127.0.0.1:9/palinsesto").unwrap();
        let schedule = fetch_schedule(&downloader);

        assert!(schedule.is_empty());
    }
}
