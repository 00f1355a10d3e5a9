//! `process` and `status` command bodies.

use std::path::Path;

use anyhow::{bail, Context};
use callout_mesh::{GltfLoader, ModelIndex};
use callout_pipeline::{read_records, write_json, CalloutPipeline, PipelineOptions, PlacementRecord};
use config::constants::{PipelineConfig, ALL_MAPS};

use crate::args::{ProcessArgs, StatusArgs};
use crate::maps::{discover_maps, output_path, records_path};

fn pipeline_options(args: &ProcessArgs) -> anyhow::Result<PipelineOptions> {
    let config = PipelineConfig::new(args.min_radius, args.global_scale_multiplier)?;
    let mut options = PipelineOptions::from_config(&config)
        .with_rotation(args.rotation_order)
        .with_projection(args.projection);
    options.scale_about_origin = args.scale_about_origin;
    options.use_alpha_shape = !args.no_alpha_shape;
    Ok(options)
}

pub fn process(args: &ProcessArgs) -> anyhow::Result<()> {
    let options = pipeline_options(args)?;
    let index = ModelIndex::build(&args.models_root)
        .with_context(|| format!("Failed to index models in {}", args.models_root.display()))?;
    tracing::info!(root = %args.models_root.display(), keys = index.len(), "Indexed models");
    let pipeline = CalloutPipeline::new(GltfLoader::new(), options);

    if args.map != ALL_MAPS {
        let records_file = args
            .records
            .clone()
            .unwrap_or_else(|| records_path(&args.export_root, &args.map));
        let records = read_records(&records_file)?;
        if records.is_empty() {
            bail!("No callouts found in {}", records_file.display());
        }
        let out = args
            .out
            .clone()
            .unwrap_or_else(|| output_path(&args.out_dir, &args.map));
        return run_map(&pipeline, &records, &index, &out, !args.compact);
    }

    if args.records.is_some() || args.out.is_some() {
        bail!("--records and --out apply to a single map, not --map {ALL_MAPS}");
    }
    let maps = discover_maps(&args.export_root)?;
    if maps.is_empty() {
        bail!("No exported maps with records under {}", args.export_root.join("maps").display());
    }
    for map in maps {
        let records = read_records(&map.records)?;
        if records.is_empty() {
            tracing::warn!(map = %map.name, "No callouts found, skipping");
            continue;
        }
        println!("[{}]", map.name);
        run_map(&pipeline, &records, &index, &output_path(&args.out_dir, &map.name), !args.compact)?;
    }
    Ok(())
}

fn run_map(
    pipeline: &CalloutPipeline<GltfLoader>,
    records: &[PlacementRecord],
    index: &ModelIndex,
    out: &Path,
    pretty: bool,
) -> anyhow::Result<()> {
    let result = pipeline.process(records, index);
    write_json(&result, out, pretty)?;

    println!(
        "Wrote {} with {} callouts. Rotation order: {}",
        out.display(),
        result.count,
        result.rotation_order
    );
    if !result.missing_models.is_empty() {
        println!("Missing models: {}", result.missing_models.len());
    }
    Ok(())
}

pub fn status(args: &StatusArgs) -> anyhow::Result<()> {
    let maps = discover_maps(&args.export_root)?;
    if maps.is_empty() {
        println!("No exported maps under {}", args.export_root.join("maps").display());
        return Ok(());
    }

    for map in maps {
        let records = match read_records(&map.records) {
            Ok(records) => records.len().to_string(),
            Err(error) => {
                tracing::warn!(map = %map.name, %error, "Unreadable records");
                "unreadable".to_string()
            }
        };
        let out = output_path(&args.out_dir, &map.name);
        let processed = if out.is_file() { "processed" } else { "pending" };
        println!("{:<24} {:>10} records  {}", map.name, records, processed);
    }
    Ok(())
}
