//! A quick, built-in way to grab HTML from the live site.
//!
//! This module can be disabled by building this crate without default features.

use crate::data_structs::DAY_PART_PATHS;
use crate::error::*;
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;

const HYLE_BASE_URL: &str = "https://hyle.appspot.com/palinsesto";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// A quick, built-in way to grab the day-part pages from the live site.
pub struct Downloader {
    client: Client,
    base_url: String,
}

impl Downloader {
    /// Create a downloader against the live site.
    #[inline]
    pub fn new() -> Result<Self> {
        Self::with_base_url(HYLE_BASE_URL)
    }

    /// Create a downloader against a different base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(FETCH_TIMEOUT).build()?,
            base_url: base_url.into(),
        })
    }

    /// Fetches the raw HTML of the three day-part pages, in
    /// `[mattina, pomeriggio, serata]` order.
    ///
    /// The fetches run sequentially and the first failure fails the whole
    /// call; there is no partial result.
    #[inline]
    pub fn schedule_pages(&self) -> Result<[String; 3]> {
        let mut pages: [String; 3] = Default::default();

        for (page, path) in pages.iter_mut().zip(DAY_PART_PATHS.iter()) {
            *page = self.get_string(&format!("{}/{}", self.base_url, path))?;
        }

        Ok(pages)
    }

    /// Helper to get the HTML of the given URL.
    #[inline]
    fn get_string(&self, url: &str) -> Result<String> {
        let mut resp = self.client.get(url).send()?;
        let status = resp.status();

        if !status.is_success() {
            bail!(ErrorKind::NonSuccessStatus(status.as_u16()));
        }

        let mut content = String::new();
        resp.read_to_string(&mut content)?;

        Ok(content)
    }
}
