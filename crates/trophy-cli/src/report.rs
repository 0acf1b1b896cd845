//! Text report of a generated trophy, printed by `--show`.

use std::fmt;

use trophy_kernel::{Bounds, RenderMesh};
use trophy_model::Trophy;
use trophy_types::{GridCell, Heightmap, TrophyConfig};

/// Summary of one trophy: input, geometry and mesh.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub days: usize,
    pub active_days: usize,
    pub global_max: u64,
    pub flared: bool,
    pub bar_count: usize,
    /// Cell and height of the tallest bar, first one wins on ties.
    pub tallest: Option<(GridCell, f64)>,
    pub mean_height: f64,
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub face_range_count: usize,
    pub bounding_box: Option<Bounds>,
    pub plan_time_ms: f64,
    pub assembly_time_ms: f64,
}

impl ModelReport {
    pub fn new(
        heightmap: &Heightmap,
        config: &TrophyConfig,
        trophy: &Trophy,
        mesh: &RenderMesh,
    ) -> Self {
        let bars = &trophy.plan.bars;
        let tallest = bars
            .iter()
            .fold(None, |best: Option<(GridCell, f64)>, bar| match best {
                Some((_, h)) if h >= bar.height => best,
                _ => Some((bar.cell, bar.height)),
            });
        let mean_height = if bars.is_empty() {
            0.0
        } else {
            bars.iter().map(|b| b.height).sum::<f64>() / bars.len() as f64
        };
        let global_max = match config.clip {
            Some(limit) => heightmap.max().min(limit),
            None => heightmap.max(),
        };

        Self {
            days: heightmap.len(),
            active_days: heightmap.active_days(),
            global_max,
            flared: config.flare_base,
            bar_count: bars.len(),
            tallest,
            mean_height,
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            face_range_count: mesh.face_ranges.len(),
            bounding_box: mesh.bounds(),
            plan_time_ms: trophy.diagnostics.plan_time_ms,
            assembly_time_ms: trophy.diagnostics.assembly_time_ms,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Trophy Report ===\n\n");

        out.push_str(&format!(
            "Heightmap: {} days, {} active, max {} commits\n",
            self.days, self.active_days, self.global_max,
        ));
        out.push_str(&format!(
            "Pedestal: {}\n",
            if self.flared { "flared" } else { "flat" }
        ));

        out.push_str(&format!("\nBars ({}):\n", self.bar_count));
        match self.tallest {
            Some((cell, h)) => {
                out.push_str(&format!("  tallest {:.2} at {}\n", h, cell));
                out.push_str(&format!("  mean height {:.2}\n", self.mean_height));
            }
            None => out.push_str("  none, pedestal only\n"),
        }

        out.push_str(&format!(
            "\nMesh: {} triangles, {} vertices, {} face ranges\n",
            self.triangle_count, self.vertex_count, self.face_range_count,
        ));
        if let Some(b) = self.bounding_box {
            out.push_str(&format!(
                "Bounding Box: ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})\n",
                b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2],
            ));
        }

        out.push_str(&format!(
            "\nTiming: plan {:.1} ms, assembly {:.1} ms\n",
            self.plan_time_ms, self.assembly_time_ms,
        ));
        out
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
