use std::borrow::Cow;

use serde::Serialize;
use tracing::{info, instrument};
use trophy_types::{
    BarPrimitive, BasePrimitive, BoxPrimitive, CommitCount, GridCell, Heightmap, TrophyConfig,
};

use crate::flare::flare_base;
use crate::types::PlanError;

/// Every primitive of a trophy, in union order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrophyPlan {
    pub base: BasePrimitive,
    /// One bar per active day, week-major then weekday.
    pub bars: Vec<BarPrimitive>,
}

impl TrophyPlan {
    /// Base plus bars.
    pub fn primitive_count(&self) -> usize {
        1 + self.bars.len()
    }

    /// Height of the tallest bar, 0 for a bare pedestal.
    pub fn tallest_bar(&self) -> f64 {
        self.bars.iter().map(|b| b.height).fold(0.0, f64::max)
    }
}

/// Scaled height of a bar: `max_height * count / max(global_max, 1)`.
///
/// The `max(.., 1)` keeps an all-zero heightmap from dividing by zero.
pub fn bar_height(count: CommitCount, global_max: CommitCount, max_height: f64) -> f64 {
    max_height * (count as f64 / global_max.max(1) as f64)
}

/// Plan the pedestal and one bar per non-zero day.
///
/// Fails fast if the configuration is invalid or the heightmap does not
/// cover the whole grid. Days past the grid are never drawn but still take
/// part in the global maximum.
#[instrument(skip_all, fields(days = heightmap.len(), flared = config.flare_base))]
pub fn plan(heightmap: &Heightmap, config: &TrophyConfig) -> Result<TrophyPlan, PlanError> {
    config.validate()?;

    let required = config.cell_count();
    if heightmap.len() < required {
        return Err(PlanError::HeightmapTooShort {
            len: heightmap.len(),
            required,
        });
    }

    let heightmap = match config.clip {
        Some(limit) => Cow::Owned(heightmap.clipped(limit)),
        None => Cow::Borrowed(heightmap),
    };
    let global_max = heightmap.max();
    let counts = heightmap.counts();

    let (pitch_x, pitch_y) = config.cell_pitch();
    let bar_bottom = config.base_top() + config.bar_lift;
    let mut bars = Vec::new();

    for week in 0..config.weeks {
        for weekday in 0..config.weekdays {
            let cell = GridCell::new(week, weekday);
            let day = cell.day(config.weekdays);
            let count = counts[day];
            if count == 0 {
                continue;
            }

            let height = bar_height(count, global_max, config.max_height);
            let center = [
                (week as f64 + 0.5) * pitch_x,
                (weekday as f64 + 0.5) * pitch_y,
                height * 0.5 + bar_bottom,
            ];
            bars.push(BarPrimitive {
                cell,
                day,
                count,
                height,
                block: BoxPrimitive::new(center, [config.bar_size, config.bar_size, height]),
            });
        }
    }

    info!(bars = bars.len(), global_max, "planned trophy");

    Ok(TrophyPlan {
        base: plan_base(config),
        bars,
    })
}

/// The pedestal box, flared by `base_height` when the config asks for it.
fn plan_base(config: &TrophyConfig) -> BasePrimitive {
    let block = BoxPrimitive::new(
        [
            config.base_length * 0.5,
            config.base_width * 0.5,
            config.base_height * 0.5,
        ],
        [config.base_length, config.base_width, config.base_height],
    );
    if !config.flare_base {
        return BasePrimitive::Block(block);
    }

    let mut corners = block.corners();
    let flared = flare_base(&corners, block.center, config.base_height);
    corners.copy_from_slice(&flared);
    BasePrimitive::Flared { block, corners }
}
