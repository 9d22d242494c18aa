//! Scraping and schedule logic for the Hyle palinsesto pages.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate if_chain;
#[macro_use]
extern crate serde_derive;

pub mod data_structs;
pub mod error;
#[cfg(feature = "http-client")]
pub mod http_client;
pub mod presenter;
pub mod schedule;
pub mod scrapers;
