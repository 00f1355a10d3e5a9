//! Exported map layout: `<export-root>/maps/<map>/report/callouts_found.json`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::constants::RECORDS_RELATIVE_PATH;

/// One exported map with a records file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapExport {
    pub name: String,
    pub records: PathBuf,
}

pub fn records_path(export_root: &Path, map: &str) -> PathBuf {
    export_root.join("maps").join(map).join(RECORDS_RELATIVE_PATH)
}

pub fn output_path(out_dir: &Path, map: &str) -> PathBuf {
    out_dir.join(format!("{map}_callouts.json"))
}

/// Maps under `<export-root>/maps` that have a records file, sorted by name.
pub fn discover_maps(export_root: &Path) -> anyhow::Result<Vec<MapExport>> {
    let maps_dir = export_root.join("maps");
    let entries = std::fs::read_dir(&maps_dir)
        .with_context(|| format!("Failed to list maps in {}", maps_dir.display()))?;

    let mut maps = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list maps in {}", maps_dir.display()))?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let records = records_path(export_root, &name);
        if records.is_file() {
            maps.push(MapExport { name, records });
        } else {
            tracing::debug!(map = %name, "Skipping map without a records file");
        }
    }
    maps.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(maps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_only_maps_with_records() {
        let root = std::env::temp_dir().join(format!("callouts-cli-maps-{}", std::process::id()));
        for map in ["de_nuke", "de_mirage", "empty"] {
            std::fs::create_dir_all(root.join("maps").join(map).join("report")).unwrap();
        }
        for map in ["de_nuke", "de_mirage"] {
            std::fs::write(records_path(&root, map), "[]").unwrap();
        }

        let maps = discover_maps(&root).unwrap();
        let names: Vec<_> = maps.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["de_mirage", "de_nuke"]);
        assert_eq!(maps[0].records, records_path(&root, "de_mirage"));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn missing_export_root_is_an_error() {
        assert!(discover_maps(Path::new("/definitely/not/an/export")).is_err());
    }

    #[test]
    fn default_paths() {
        assert_eq!(
            records_path(Path::new("export"), "de_dust2"),
            Path::new("export/maps/de_dust2/report/callouts_found.json")
        );
        assert_eq!(output_path(Path::new("out"), "de_dust2"), Path::new("out/de_dust2_callouts.json"));
    }
}
