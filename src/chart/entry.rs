use serde::Serialize;

/// One ranked song of a resolved chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    pub rank: u32,
    pub title: String,
    pub artist: String,
    pub weeks_on_chart: u32,
    pub last_week_rank: Option<u32>,
    pub peak_rank: Option<u32>,
    pub is_new: bool,
}

/// Position change compared to the previous week.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    New,
    Up(u32),
    Down(u32),
    Steady,
}

impl ChartEntry {
    /// `last_week_rank - rank`, positive when the song climbed.
    pub fn rank_delta(&self) -> Option<i64> {
        self.last_week_rank
            .map(|last_week| i64::from(last_week) - i64::from(self.rank))
    }

    pub fn movement(&self) -> Movement {
        match self.rank_delta() {
            None => Movement::New,
            Some(0) => Movement::Steady,
            Some(delta) if delta > 0 => Movement::Up(delta.unsigned_abs() as u32),
            Some(delta) => Movement::Down(delta.unsigned_abs() as u32),
        }
    }
}
