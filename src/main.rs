//! Road Lane Engine.
//!
//! Lädt eine Straße (oder legt eine Demo-Straße an), baut alle Meshes und
//! schreibt die Straße optional wieder als JSON.

use anyhow::{bail, Context, Result};
use glam::DVec3;
use road_lane_engine::io::{centerline_key_path, road_from_record, RoadRecord};
use road_lane_engine::{
    write_road_json, CatmullRomCurve3, EngineOptions, Road, RoadEditor, RoadTemplate,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Kommandozeilen-Argumente: `road-lane-engine [road.json] [--out FILE]`
#[derive(Debug, Default)]
struct CliArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" | "-o" => {
                    let Some(path) = args.next() else {
                        bail!("--out erwartet einen Dateipfad");
                    };
                    parsed.output = Some(PathBuf::from(path));
                }
                other if other.starts_with('-') => bail!("Unbekannte Option: {other}"),
                other => {
                    if parsed.input.is_some() {
                        bail!("Nur eine Eingabedatei erlaubt");
                    }
                    parsed.input = Some(PathBuf::from(other));
                }
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Road Lane Engine v{} startet...", env!("CARGO_PKG_VERSION"));

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let options = EngineOptions::load_from_file(&EngineOptions::config_path());

    let road = match &args.input {
        Some(path) => load_road(path, &options)?,
        None => demo_road(&options),
    };
    let road_id = road.id;

    let mut editor = RoadEditor::new(options);
    editor.insert_road(road)?;

    if let Some(meshes) = editor.meshes(road_id) {
        log::info!(
            "Straße {}: {} Fahrstreifen-Meshes, {} Randlinien, {} Dreiecke",
            road_id,
            meshes.lanes.len(),
            meshes.boundaries.len(),
            meshes.triangle_count()
        );
    }

    if let (Some(path), Some(road)) = (&args.output, editor.road(road_id)) {
        let json = write_road_json(road)?;
        std::fs::write(path, json)
            .with_context(|| format!("Datei {} konnte nicht geschrieben werden", path.display()))?;
        log::info!("Straße {} nach {} geschrieben", road_id, path.display());
    }
    Ok(())
}

/// Lädt eine Straße; die Referenzlinie wird aus den gespeicherten Mittellinien gebildet.
fn load_road(path: &std::path::Path, options: &EngineOptions) -> Result<Road> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Datei {} konnte nicht gelesen werden", path.display()))?;
    let record: RoadRecord = serde_json::from_str(&json)
        .with_context(|| format!("{} ist kein gültiges Straßen-JSON", path.display()))?;
    let Some(key_path) = centerline_key_path(&record) else {
        bail!("Straße {} hat keine auswertbare Mittellinie", record.id);
    };
    road_from_record(&record, key_path, None, options)
}

/// Leicht gekrümmte Zweirichtungsstraße mit zwei Fahrstreifen je Richtung.
fn demo_road(options: &EngineOptions) -> Road {
    let key_path = CatmullRomCurve3::centripetal(vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(40.0, 0.0, 8.0),
        DVec3::new(80.0, 0.0, 0.0),
        DVec3::new(120.0, 0.0, -6.0),
    ]);
    Road::create(
        1,
        Arc::new(key_path),
        None,
        &RoadTemplate::two_way(2, options.lane_width),
        options,
    )
}
