use serde::{Deserialize, Serialize};

/// Weeks in the trophy grid (columns along X).
pub const DEFAULT_WEEKS: usize = 52;
/// Days per week (rows along Y).
pub const DEFAULT_WEEKDAYS: usize = 7;

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one week and one weekday (got {weeks}x{weekdays})")]
    EmptyGrid { weeks: usize, weekdays: usize },

    #[error("{field} must be finite and strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("bar size {bar_size} exceeds the cell pitch {pitch} along {axis}")]
    BarTooWide {
        bar_size: f64,
        pitch: f64,
        axis: Axis,
    },
}

/// Horizontal grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Immutable trophy dimensions, fixed for one run.
///
/// The grid spans `base_length` along X (one column per week) and
/// `base_width` along Y (one row per weekday). Every bar stands on the
/// pedestal top, lifted by `bar_lift` so its bottom face never coincides
/// with the pedestal's top face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrophyConfig {
    /// Grid columns.
    pub weeks: usize,
    /// Grid rows.
    pub weekdays: usize,
    /// Pedestal size along X.
    pub base_length: f64,
    /// Pedestal size along Y.
    pub base_width: f64,
    /// Pedestal thickness; also the flare amount when `flare_base` is set.
    pub base_height: f64,
    /// Height of the tallest bar.
    pub max_height: f64,
    /// Edge length of a bar's square cross-section.
    pub bar_size: f64,
    /// Gap between the pedestal top and every bar's bottom face.
    pub bar_lift: f64,
    /// Flare the pedestal's bottom face outward into a frustum.
    pub flare_base: bool,
    /// Optional cap on the count of any single day.
    pub clip: Option<u64>,
}

impl TrophyConfig {
    /// Flared pedestal, 52x7 grid, bars just under one cell wide.
    pub fn pyramid() -> Self {
        Self {
            weeks: DEFAULT_WEEKS,
            weekdays: DEFAULT_WEEKDAYS,
            base_length: DEFAULT_WEEKS as f64,
            base_width: DEFAULT_WEEKDAYS as f64,
            base_height: 2.0,
            max_height: 10.0,
            bar_size: 0.99,
            bar_lift: 0.01,
            flare_base: true,
            clip: None,
        }
    }

    /// Same dimensions as [`TrophyConfig::pyramid`] with a plain box pedestal.
    pub fn flat() -> Self {
        Self {
            flare_base: false,
            ..Self::pyramid()
        }
    }

    /// Number of grid cells, which is also the minimum heightmap length.
    pub fn cell_count(&self) -> usize {
        self.weeks * self.weekdays
    }

    /// Spacing between adjacent bar centers as `(x, y)`.
    pub fn cell_pitch(&self) -> (f64, f64) {
        (
            self.base_length / self.weeks as f64,
            self.base_width / self.weekdays as f64,
        )
    }

    /// Z coordinate of the pedestal's top face.
    pub fn base_top(&self) -> f64 {
        self.base_height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weeks == 0 || self.weekdays == 0 {
            return Err(ConfigError::EmptyGrid {
                weeks: self.weeks,
                weekdays: self.weekdays,
            });
        }

        let lengths = [
            ("base_length", self.base_length),
            ("base_width", self.base_width),
            ("base_height", self.base_height),
            ("max_height", self.max_height),
            ("bar_size", self.bar_size),
            ("bar_lift", self.bar_lift),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let (pitch_x, pitch_y) = self.cell_pitch();
        for (pitch, axis) in [(pitch_x, Axis::X), (pitch_y, Axis::Y)] {
            if self.bar_size > pitch {
                return Err(ConfigError::BarTooWide {
                    bar_size: self.bar_size,
                    pitch,
                    axis,
                });
            }
        }

        Ok(())
    }
}

impl Default for TrophyConfig {
    fn default() -> Self {
        Self::pyramid()
    }
}
