//! Clock stamps shown on the site
//!
//! Formats: date `DD-MM-YYYY`, time `DD-Time{HH:MM}`, display
//! `DD-MM-YYYY, DD-Time{HH:MM}`.

use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

/// `DD-MM-YYYY`
pub fn date_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%d-%m-%Y").to_string()
}

/// `DD-Time{HH:MM}`
pub fn time_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("{}-Time{{{}}}", at.format("%d"), at.format("%H:%M"))
}

/// `DD-MM-YYYY, DD-Time{HH:MM}`
pub fn display_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("{}, {}", date_stamp(at), time_stamp(at))
}

/// Four-digit year
pub fn year_stamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    at.year().to_string()
}
