use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use file_format::{load_heightmap, write_ply, write_stl, StlFormat};
use log::info;
use trophy_kernel::{Kernel, TruckKernel, DEFAULT_UNION_TOLERANCE};
use trophy_model::{build_trophy, AssemblyProgress};
use trophy_types::TrophyConfig;

use crate::report::ModelReport;

/// Chord tolerance used when tessellating the finished solid.
pub const MESH_TOLERANCE: f64 = 0.01;

/// Name written into the STL header and `solid` line.
const SOLID_NAME: &str = "trophy";

/// Generate a trophy STL from a contribution heightmap.
#[derive(Parser, Debug, Clone)]
#[command(name = "trophy", version)]
pub struct Args {
    /// Heightmap JSON file with a "commits" array of daily counts
    pub heightmap: PathBuf,

    /// Print a model report after writing the STL
    #[arg(long)]
    pub show: bool,

    /// Output STL path
    #[arg(short, long, default_value = "trophy.stl")]
    pub output: PathBuf,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    pub ascii: bool,

    /// Also write a binary PLY beside the STL
    #[arg(long)]
    pub ply: bool,

    /// Use a plain box pedestal instead of the flared one
    #[arg(long)]
    pub flat: bool,

    /// Height of the tallest bar
    #[arg(long)]
    pub max_height: Option<f64>,

    /// Pedestal thickness, also the flare amount
    #[arg(long)]
    pub base_height: Option<f64>,

    /// Bar cross-section edge length
    #[arg(long)]
    pub bar_size: Option<f64>,

    /// Limit the number of commits counted per day
    #[arg(long)]
    pub clip: Option<u64>,

    /// Geometric tolerance of the boolean union, below the bar lift
    #[arg(long, default_value_t = DEFAULT_UNION_TOLERANCE, allow_negative_numbers = true)]
    pub tolerance: f64,
}

impl Args {
    /// Preset chosen by `--flat`, with any explicit overrides applied.
    pub fn config(&self) -> TrophyConfig {
        let mut config = if self.flat {
            TrophyConfig::flat()
        } else {
            TrophyConfig::pyramid()
        };
        if let Some(h) = self.max_height {
            config.max_height = h;
        }
        if let Some(h) = self.base_height {
            config.base_height = h;
        }
        if let Some(s) = self.bar_size {
            config.bar_size = s;
        }
        if self.clip.is_some() {
            config.clip = self.clip;
        }
        config
    }

    /// Union tolerance, which must stay inside the gap between bars and
    /// pedestal so lifted bars are never fused with it.
    pub fn union_tolerance(&self, config: &TrophyConfig) -> Result<f64> {
        ensure!(
            self.tolerance.is_finite() && self.tolerance > 0.0 && self.tolerance < config.bar_lift,
            "union tolerance {} must lie in (0, {})",
            self.tolerance,
            config.bar_lift
        );
        Ok(self.tolerance)
    }

    /// The STL path with a `.ply` extension, when `--ply` is given.
    pub fn ply_path(&self) -> Option<PathBuf> {
        self.ply.then(|| self.output.with_extension("ply"))
    }

    pub fn format(&self) -> StlFormat {
        if self.ascii {
            StlFormat::Ascii
        } else {
            StlFormat::Binary
        }
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub output: PathBuf,
    pub ply: Option<PathBuf>,
    pub report: ModelReport,
}

/// Load, build, tessellate and write one trophy.
pub fn run(args: &Args) -> Result<RunSummary> {
    let config = args.config();
    let tolerance = args.union_tolerance(&config)?;
    let heightmap = load_heightmap(&args.heightmap)
        .with_context(|| format!("loading heightmap {}", args.heightmap.display()))?;
    info!(
        "loaded {} days ({} active) from {}",
        heightmap.len(),
        heightmap.active_days(),
        args.heightmap.display()
    );

    let mut kernel = TruckKernel::with_tolerance(tolerance);
    let mut next_decile = 1;
    let trophy = build_trophy(&mut kernel, &heightmap, &config, |p: AssemblyProgress| {
        while p.fraction() * 10.0 >= next_decile as f64 && next_decile <= 10 {
            info!("merged {}/{} bars ({}%)", p.merged, p.total, next_decile * 10);
            next_decile += 1;
        }
        ControlFlow::Continue(())
    })
    .context("building trophy")?;

    let mesh = trophy
        .tessellate(&mut kernel, MESH_TOLERANCE)
        .context("tessellating trophy")?;
    write_stl(&mesh, &args.output, args.format(), SOLID_NAME)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        "wrote {} triangles to {}",
        mesh.triangle_count(),
        args.output.display()
    );
    let ply = args.ply_path();
    if let Some(path) = &ply {
        write_ply(&mesh, path, SOLID_NAME)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote PLY to {}", path.display());
    }

    let report = ModelReport::new(&heightmap, &config, &trophy, &mesh);
    kernel.release(trophy.solid);

    Ok(RunSummary {
        output: args.output.clone(),
        ply,
        report,
    })
}
