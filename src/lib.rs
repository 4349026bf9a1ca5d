//! Breakdown of a Railgun-style NDJSON transaction log by destination address.
//!
//! Records flow from [`source::RecordSource`] through [`aggregate::ByToStats`]
//! (which applies [`classify::classify_to_address`]) into
//! [`summary::build_summary`], and the resulting [`models::Summary`] is handed
//! to the reporters in [`report`]. [`analyser::Analyser`] wires the steps
//! together for one dataset mode.

pub mod aggregate;
pub mod analyser;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod models;
pub mod report;
pub mod source;
pub mod summary;
