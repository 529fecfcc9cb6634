//! Test fixture creation for the chart dataset

use super::constants::*;
use anyhow::Result;
use std::fmt::Write;
use std::fs;
use tempfile::TempDir;

const CHART_HEADER: &str = "url,WeekID,Week Position,Song,Performer,SongID,Instance,Previous Week Position,Peak Position,Weeks on Chart";

fn song_for(week: &str, position: u32) -> (String, String) {
    match position {
        1 if week == FULL_WEEKS[1] => (
            LATER_NUMBER_ONE_TITLE.to_string(),
            LATER_NUMBER_ONE_ARTIST.to_string(),
        ),
        1 => (NUMBER_ONE_TITLE.to_string(), NUMBER_ONE_ARTIST.to_string()),
        2 => (NUMBER_TWO_TITLE.to_string(), NUMBER_TWO_ARTIST.to_string()),
        p => (format!("Song {}", p), format!("Performer {}", p)),
    }
}

fn write_week(csv: &mut String, week: &str, size: u32) -> Result<()> {
    // Highest ranks first, the resolver is expected to sort.
    for position in (1..=size).rev() {
        let (title, artist) = song_for(week, position);
        let previous = if position % 10 == 0 {
            String::new()
        } else {
            (position + 1).min(100).to_string()
        };
        writeln!(
            csv,
            "https://www.billboard.com/charts/hot-100/{},{},{},{},{},{}{},1,{},{},{}",
            week,
            week,
            position,
            title,
            artist,
            title,
            artist,
            previous,
            position,
            position % 20 + 1
        )?;
    }
    Ok(())
}

/// Creates a temporary dataset directory with both tables.
///
/// January 2021 has two full weeks of 100 entries that differ at number one.
/// A handful of other months have 10 entries and March 2021 is missing.
pub fn create_test_dataset() -> Result<TempDir> {
    let dir = TempDir::new()?;

    let mut chart = String::new();
    writeln!(chart, "{}", CHART_HEADER)?;
    for week in SHORT_WEEKS.iter() {
        write_week(&mut chart, week, SHORT_WEEK_SIZE)?;
    }
    for week in FULL_WEEKS.iter().rev() {
        write_week(&mut chart, week, 100)?;
    }
    fs::write(dir.path().join("Hot Stuff.csv"), chart)?;

    let features = format!(
        "SongID,Performer,Song,spotify_genre,spotify_track_id,danceability\n\
         {title}{artist},{artist},{title},['canadian contemporary r&b'],0VjIjW4GlUZAMYd2vXMi3b,0.514\n",
        title = NUMBER_ONE_TITLE,
        artist = NUMBER_ONE_ARTIST,
    );
    fs::write(dir.path().join("Hot 100 Audio Features.csv"), features)?;

    Ok(dir)
}
