//! Command-line arguments. Every path option has a `CALLOUTS_*` environment
//! fallback.

use std::path::PathBuf;

use callout_geometry::ProjectionMethod;
use callout_pipeline::RotationChoice;
use clap::{Args, Parser, Subcommand};
use config::constants::{
    DEFAULT_EXPORT_ROOT, DEFAULT_MAP, DEFAULT_MIN_RADIUS, DEFAULT_MODELS_ROOT, DEFAULT_OUT_DIR,
    DEFAULT_SCALE_MULTIPLIER,
};

#[derive(Parser, Debug)]
#[command(name = "callouts")]
#[command(version)]
#[command(about = "Turns exported callout placements and meshes into map-overlay polygons")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve callout polygons for one map, or every exported map with `--map all`.
    Process(ProcessArgs),
    /// List exported maps and whether they have been processed.
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Map name, or `all` for every map under `<export-root>/maps`.
    #[arg(long, env = "CALLOUTS_MAP", default_value = DEFAULT_MAP)]
    pub map: String,

    /// Placement records JSON. Defaults to the map's export report.
    #[arg(long, env = "CALLOUTS_RECORDS")]
    pub records: Option<PathBuf>,

    #[arg(long, env = "CALLOUTS_MODELS_ROOT", default_value = DEFAULT_MODELS_ROOT)]
    pub models_root: PathBuf,

    #[arg(long, env = "CALLOUTS_EXPORT_ROOT", default_value = DEFAULT_EXPORT_ROOT)]
    pub export_root: PathBuf,

    /// Output JSON path for a single map. Defaults to `<out-dir>/<map>_callouts.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, env = "CALLOUTS_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// `auto`, `rz_rx_ry`, `ry_rx_rz` or `rz_ry_rx`.
    #[arg(long, default_value = "auto")]
    pub rotation_order: RotationChoice,

    /// `top_down`, `alpha_shape` or `convex_hull`.
    #[arg(long, default_value = "top_down")]
    pub projection: ProjectionMethod,

    #[arg(long, default_value_t = DEFAULT_SCALE_MULTIPLIER)]
    pub global_scale_multiplier: f64,

    /// Minimum radius for callouts without physics data.
    #[arg(long, default_value_t = DEFAULT_MIN_RADIUS)]
    pub min_radius: f64,

    /// Apply the multiplier about each placement origin instead of the polygon centroid.
    #[arg(long)]
    pub scale_about_origin: bool,

    /// Skip the Delaunay alpha shape tier.
    #[arg(long)]
    pub no_alpha_shape: bool,

    /// Write compact JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[arg(long, env = "CALLOUTS_EXPORT_ROOT", default_value = DEFAULT_EXPORT_ROOT)]
    pub export_root: PathBuf,

    #[arg(long, env = "CALLOUTS_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use callout_geometry::RotationOrder;

    #[test]
    fn process_defaults() {
        let args = CliArgs::try_parse_from(["callouts", "process"]).unwrap();
        let Command::Process(process) = args.command else {
            panic!("expected process");
        };
        assert_eq!(process.rotation_order, RotationChoice::Auto);
        assert_eq!(process.projection, ProjectionMethod::TopDown);
        assert_eq!(process.min_radius, DEFAULT_MIN_RADIUS);
        assert!(!process.compact);
    }

    #[test]
    fn process_overrides() {
        let args = CliArgs::try_parse_from([
            "callouts",
            "process",
            "--map",
            "all",
            "--rotation-order",
            "rz_ry_rx",
            "--projection",
            "convex-hull",
            "--global-scale-multiplier",
            "1.5",
            "--no-alpha-shape",
            "--compact",
        ])
        .unwrap();
        let Command::Process(process) = args.command else {
            panic!("expected process");
        };
        assert_eq!(process.map, "all");
        assert_eq!(process.rotation_order, RotationChoice::Fixed(RotationOrder::RzRyRx));
        assert_eq!(process.projection, ProjectionMethod::ConvexHull);
        assert_eq!(process.global_scale_multiplier, 1.5);
        assert!(process.no_alpha_shape && process.compact);
    }

    #[test]
    fn unknown_rotation_order_is_rejected() {
        assert!(CliArgs::try_parse_from(["callouts", "process", "--rotation-order", "xyz"]).is_err());
    }
}
