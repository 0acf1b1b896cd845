use serde::{Deserialize, Serialize};

/// Number of commits on one day.
pub type CommitCount = u64;

/// Per-day activity counts for one year, oldest day first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heightmap {
    counts: Vec<CommitCount>,
}

impl Heightmap {
    pub fn new(counts: Vec<CommitCount>) -> Self {
        Self { counts }
    }

    /// A heightmap of `len` empty days.
    pub fn zeros(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, day: usize) -> Option<CommitCount> {
        self.counts.get(day).copied()
    }

    pub fn counts(&self) -> &[CommitCount] {
        &self.counts
    }

    /// Largest count over the whole heightmap, 0 when empty.
    pub fn max(&self) -> CommitCount {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Count of strictly positive entries.
    pub fn active_days(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Cap every day at `limit`.
    pub fn clipped(&self, limit: CommitCount) -> Self {
        Self {
            counts: self.counts.iter().map(|&c| c.min(limit)).collect(),
        }
    }
}

impl From<Vec<CommitCount>> for Heightmap {
    fn from(counts: Vec<CommitCount>) -> Self {
        Self::new(counts)
    }
}

/// Position of a day in the trophy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    /// Column index along X.
    pub week: usize,
    /// Row index along Y.
    pub weekday: usize,
}

impl GridCell {
    pub fn new(week: usize, weekday: usize) -> Self {
        Self { week, weekday }
    }

    /// Heightmap index of this cell: `weekday + weekdays * week`.
    pub fn day(&self, weekdays: usize) -> usize {
        self.weekday + weekdays * self.week
    }

    pub fn from_day(day: usize, weekdays: usize) -> Self {
        Self {
            week: day / weekdays,
            weekday: day % weekdays,
        }
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(week {}, weekday {})", self.week, self.weekday)
    }
}
