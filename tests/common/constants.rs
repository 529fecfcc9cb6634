//! Shape of the fixture dataset written by `create_test_dataset`.
#![allow(dead_code)]

pub const EARLIEST_YEAR: i32 = 2020;
pub const EARLIEST_MONTH: u32 = 12;
pub const LATEST_YEAR: i32 = 2021;
pub const LATEST_MONTH: u32 = 5;

/// Weeks present in the fixture, `M/D/YYYY` as in the real dataset.
pub const FULL_WEEKS: [&str; 2] = ["1/2/2021", "1/9/2021"];
pub const SHORT_WEEKS: [&str; 4] = ["12/5/2020", "2/6/2021", "4/3/2021", "5/29/2021"];
pub const SHORT_WEEK_SIZE: u32 = 10;

/// March 2021 is inside the coverage window but has no chart.
pub const GAP_YEAR: i32 = 2021;
pub const GAP_MONTH: u32 = 3;

pub const NUMBER_ONE_TITLE: &str = "Blinding Lights";
pub const NUMBER_ONE_ARTIST: &str = "The Weeknd";
/// Number one of the second January week, which never shows up in the
/// January chart.
pub const LATER_NUMBER_ONE_TITLE: &str = "Drivers License";
pub const LATER_NUMBER_ONE_ARTIST: &str = "Olivia Rodrigo";
pub const NUMBER_TWO_TITLE: &str = "Mood";
pub const NUMBER_TWO_ARTIST: &str = "24kGoldn Featuring iann dior";
