//! Zentraler Editor: hält alle Straßen und ihre Meshes und führt Commands aus.

use super::use_cases;
use super::{CommandLog, EditCommand, EditError};
use crate::core::{Road, RoadId};
use crate::mesh::{build_road_meshes, MeshScope, RoadMeshes};
use crate::shared::EngineOptions;
use indexmap::IndexMap;

/// Besitzt die Straßen und ihre Mesh-Tabellen.
///
/// Jede Bearbeitung läuft auf einer Kopie der Straße. Erst wenn Use-Case und
/// Mesh-Batch erfolgreich sind, werden Straße und Meshes gemeinsam übernommen.
#[derive(Debug, Default)]
pub struct RoadEditor {
    roads: IndexMap<RoadId, Road>,
    meshes: IndexMap<RoadId, RoadMeshes>,
    options: EngineOptions,
    command_log: CommandLog,
}

impl RoadEditor {
    /// Erstellt einen leeren Editor.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Übernimmt eine fertige Straße (z.B. aus einer Datei) und baut ihre Meshes.
    ///
    /// Eine vorhandene Straße mit gleicher ID wird ersetzt.
    pub fn insert_road(&mut self, road: Road) -> Result<(), EditError> {
        let meshes = build_road_meshes(&road, MeshScope::All, &self.options)?;
        let id = road.id;
        if self.roads.insert(id, road).is_some() {
            log::warn!("Straße {id} ersetzt");
        }
        self.meshes.insert(id, meshes);
        Ok(())
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    /// Alle Straßen in Einfügereihenfolge.
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn meshes(&self, id: RoadId) -> Option<&RoadMeshes> {
        self.meshes.get(&id)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn command_log(&self) -> &CommandLog {
        &self.command_log
    }

    /// Führt einen Command aus.
    ///
    /// Im Fehlerfall bleiben Straßen, Meshes und Command-Log unverändert.
    pub fn handle_command(&mut self, command: EditCommand) -> Result<(), EditError> {
        match &command {
            EditCommand::CreateRoad {
                id,
                key_path,
                elevation,
                template,
            } => {
                let road = Road::create(
                    *id,
                    key_path.clone(),
                    elevation.clone(),
                    template,
                    &self.options,
                );
                self.insert_road(road)?;
            }
            EditCommand::RemoveRoad { road } => {
                self.roads
                    .shift_remove(road)
                    .ok_or(EditError::RoadNotFound(*road))?;
                self.meshes.shift_remove(road);
            }
            _ => self.edit_road(&command)?,
        }

        log::info!("Command {} für Straße {}", command.name(), command.road_id());
        self.command_log.record(command);
        Ok(())
    }

    fn edit_road(&mut self, command: &EditCommand) -> Result<(), EditError> {
        let road_id = command.road_id();
        let mut branch = self
            .roads
            .get(&road_id)
            .ok_or(EditError::RoadNotFound(road_id))?
            .clone();

        let scope = apply_use_case(&mut branch, command, &self.options)?;
        let fresh = build_road_meshes(&branch, scope, &self.options)?;

        self.meshes.entry(road_id).or_default().apply(scope, fresh);
        self.roads.insert(road_id, branch);
        Ok(())
    }
}

/// Dispatcht einen straßenbezogenen Command an seinen Use-Case.
fn apply_use_case(
    road: &mut Road,
    command: &EditCommand,
    options: &EngineOptions,
) -> Result<MeshScope, EditError> {
    match command {
        EditCommand::ResizeLaneWidth { lane, width } => {
            use_cases::resize_lane_width(road, lane.section, lane.lane, *width, options)
        }
        EditCommand::AddLane { lane } => use_cases::add_lane(road, lane.section, lane.lane, options),
        EditCommand::RemoveLane { lane } => {
            use_cases::remove_lane(road, lane.section, lane.lane, options)
        }
        EditCommand::SplitSection { lane, request, .. } => {
            use_cases::split_section(road, *lane, *request, options)
        }
        EditCommand::UpdateKeyPath {
            key_path,
            target_percent,
            ..
        } => use_cases::update_key_path(road, key_path.clone(), *target_percent, options),
        EditCommand::SetElevation { elevation, .. } => {
            use_cases::set_elevation(road, elevation.clone(), options)
        }
        EditCommand::UpdateLaneAttribute { lane, attribute } => {
            use_cases::update_lane_attribute(road, lane.section, lane.lane, *attribute)
        }
        EditCommand::UpdateBoundaryMark {
            section,
            boundary,
            mark,
            ..
        } => use_cases::update_boundary_mark(road, *section, *boundary, *mark),
        EditCommand::CreateRoad { .. } | EditCommand::RemoveRoad { .. } => Ok(MeshScope::Nothing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{BlockedEdit, LaneRef};
    use crate::core::{BoundaryMark, CatmullRomCurve3, RoadTemplate};
    use glam::DVec3;
    use std::sync::Arc;

    fn editor_with_road() -> RoadEditor {
        let mut editor = RoadEditor::new(EngineOptions::default());
        let curve = CatmullRomCurve3::chordal(vec![DVec3::ZERO, DVec3::new(60.0, 0.0, 0.0)]);
        editor
            .handle_command(EditCommand::CreateRoad {
                id: 7,
                key_path: Arc::new(curve),
                elevation: None,
                template: RoadTemplate::two_way(1, 3.5),
            })
            .expect("Straße erwartet");
        editor
    }

    #[test]
    fn test_strasse_anlegen_baut_meshes() {
        let editor = editor_with_road();
        let meshes = editor.meshes(7).expect("Meshes erwartet");
        assert_eq!(meshes.lanes.len(), 2);
        assert_eq!(meshes.boundaries.len(), 3);
        assert_eq!(editor.command_log().len(), 1);
    }

    #[test]
    fn test_blockierte_bearbeitung_aendert_nichts() {
        let mut editor = editor_with_road();
        let before = editor.road(7).expect("Straße erwartet").sections.clone();

        let result = editor.handle_command(EditCommand::RemoveLane {
            lane: LaneRef::new(7, 0, -1),
        });
        assert!(matches!(
            result,
            Err(EditError::Blocked(BlockedEdit::LastLaneOfDirection { .. }))
        ));
        assert_eq!(editor.road(7).expect("Straße erwartet").sections, before);
        assert_eq!(editor.command_log().len(), 1);
    }

    #[test]
    fn test_fahrstreifen_einfuegen_erneuert_meshes() {
        let mut editor = editor_with_road();
        editor
            .handle_command(EditCommand::AddLane {
                lane: LaneRef::new(7, 0, -1),
            })
            .expect("Einfügen erwartet");
        let road = editor.road(7).expect("Straße erwartet");
        assert_eq!(road.sections[0].lanes.len(), 3);
        assert_eq!(editor.meshes(7).map(|m| m.lanes.len()), Some(3));
        assert_eq!(editor.meshes(7).map(|m| m.boundaries.len()), Some(4));
    }

    #[test]
    fn test_markierung_erneuert_nur_linien() {
        let mut editor = editor_with_road();
        let lanes_before = editor.meshes(7).expect("Meshes erwartet").lanes.clone();
        let center = editor.road(7).and_then(|r| r.sections[0].center_boundary_id());
        editor
            .handle_command(EditCommand::UpdateBoundaryMark {
                road: 7,
                section: 0,
                boundary: center.expect("Mittellinie erwartet"),
                mark: BoundaryMark::NONE,
            })
            .expect("Update erwartet");
        let meshes = editor.meshes(7).expect("Meshes erwartet");
        assert_eq!(meshes.lanes, lanes_before);
        assert_eq!(meshes.boundaries.len(), 3);
    }

    #[test]
    fn test_unbekannte_strasse() {
        let mut editor = editor_with_road();
        let result = editor.handle_command(EditCommand::RemoveRoad { road: 99 });
        assert_eq!(result, Err(EditError::RoadNotFound(99)));
        editor
            .handle_command(EditCommand::RemoveRoad { road: 7 })
            .expect("Entfernen erwartet");
        assert!(editor.road(7).is_none());
        assert!(editor.meshes(7).is_none());
    }
}
