//! JSON command protocol for the presentation layer.
//!
//! Every canvas and panel event has a command here; a front end (or a replay
//! script) sends them one by one and reads back a `CommandResponse`.

use serde::{Deserialize, Serialize};
use shared::{ElementId, Point2D, SectionId};

use crate::harness::TestHarness;
use crate::state::{
    ColorUpdate, ElementUpdate, PlacementConfig, PointerEvent, SectionUpdate, ToolMode,
};
use crate::transform::TransformRecord;

fn commit_default() -> bool {
    true
}

/// A command the presentation layer can send.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Pointer pressed on the canvas
    PointerDown {
        #[serde(flatten)]
        event: PointerEvent,
    },
    /// Pointer moved while pressed
    PointerMove {
        #[serde(flatten)]
        event: PointerEvent,
    },
    /// Pointer released
    PointerUp {
        #[serde(flatten)]
        event: PointerEvent,
    },
    PointerCancel,
    /// Resize/rotate handles released
    TransformEnd { records: Vec<TransformRecord> },
    /// Switch the active tool.
    SelectTool { tool: ToolMode },
    /// Attributes for the next placed element
    SetPlacementConfig { config: PlacementConfig },
    /// Properties panel edit of an element
    UpdateElement {
        id: ElementId,
        update: ElementUpdate,
        #[serde(default = "commit_default")]
        commit_now: bool,
    },
    /// Properties panel edit of a section
    UpdateSection {
        id: SectionId,
        update: SectionUpdate,
        #[serde(default = "commit_default")]
        commit_now: bool,
    },
    /// Recolor the selection
    SetColor {
        #[serde(flatten)]
        colors: ColorUpdate,
    },
    /// Delete the selection.
    Delete,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    Copy,
    Cut,
    /// Paste the clipboard, optionally at a drop position
    Paste {
        #[serde(default)]
        position: Option<Point2D>,
    },
    /// Clear the entire scene and its history.
    ClearAll,
    /// Select elements by IDs.
    Select { ids: Vec<ElementId> },
    /// Clear selection.
    ClearSelection,
    /// Inspect the editor: counts, selection, history availability.
    Inspect,
    /// Export the grouped layout.
    Export,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: EditorCommand) -> CommandResponse {
    let app = &mut harness.app;
    match cmd {
        EditorCommand::PointerDown { event } => {
            app.pointer_down(&event);
            CommandResponse::ok()
        }

        EditorCommand::PointerMove { event } => {
            app.pointer_move(&event);
            CommandResponse::ok()
        }

        EditorCommand::PointerUp { event } => {
            app.pointer_up(&event);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": app.selection.all() }))
        }

        EditorCommand::PointerCancel => {
            app.pointer_cancel();
            CommandResponse::ok()
        }

        EditorCommand::TransformEnd { records } => {
            let applied = app.transform_end(&records);
            CommandResponse::ok_with_data(serde_json::json!({ "applied": applied }))
        }

        EditorCommand::SelectTool { tool } => {
            app.select_tool(tool);
            CommandResponse::ok_with_data(serde_json::json!({ "tool": tool.label() }))
        }

        EditorCommand::SetPlacementConfig { config } => {
            app.set_placement_config(config);
            CommandResponse::ok()
        }

        EditorCommand::UpdateElement {
            id,
            update,
            commit_now,
        } => {
            if app.scene.get_element(&id).is_none() {
                return CommandResponse::err(format!("Element not found: {id}"));
            }
            let changed = app.update_element(&id, &update, commit_now);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::UpdateSection {
            id,
            update,
            commit_now,
        } => {
            if app.scene.get_section(&id).is_none() {
                return CommandResponse::err(format!("Section not found: {id}"));
            }
            let changed = app.update_section(&id, &update, commit_now);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::SetColor { colors } => {
            let changed = app.set_color(&colors);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::Delete => {
            let removed = app.delete_selected();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::Undo => {
            let success = app.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = app.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::Copy => {
            let copied = app.copy();
            CommandResponse::ok_with_data(serde_json::json!({ "copied": copied }))
        }

        EditorCommand::Cut => {
            let copied = app.cut();
            CommandResponse::ok_with_data(serde_json::json!({ "copied": copied }))
        }

        EditorCommand::Paste { position } => {
            if app.clipboard.is_empty() {
                return CommandResponse::err("Clipboard is empty");
            }
            let created = app.paste(position);
            CommandResponse::ok_with_data(serde_json::json!({ "created": created }))
        }

        EditorCommand::ClearAll => {
            app.clear_all();
            CommandResponse::ok()
        }

        EditorCommand::Select { ids } => {
            if let Some(missing) = ids.iter().find(|id| !app.scene.scene.contains(id)) {
                return CommandResponse::err(format!("Element not found: {missing}"));
            }
            app.selection.set(&app.scene.scene, &ids);
            CommandResponse::ok_with_data(serde_json::json!({ "selected": app.selection.all() }))
        }

        EditorCommand::ClearSelection => {
            app.selection.clear();
            CommandResponse::ok()
        }

        EditorCommand::Inspect => {
            let scene = &app.scene.scene;
            let elements: Vec<serde_json::Value> = scene
                .elements
                .iter()
                .filter(|e| !e.is_chair())
                .map(|e| {
                    serde_json::json!({
                        "id": e.id,
                        "type": e.element_type(),
                        "position": e.position,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "element_count": scene.elements.len(),
                "chair_count": scene.elements.iter().filter(|e| e.is_chair()).count(),
                "section_count": scene.sections.len(),
                "elements": elements,
                "selected": app.selection.all(),
                "selected_section": app.selection.selected_section(),
                "tool": app.tool.mode.label(),
                "can_undo": app.can_undo(),
                "can_redo": app.can_redo(),
                "version": app.scene.version(),
            }))
        }

        EditorCommand::Export => match serde_json::to_value(app.scene.prepare_export()) {
            Ok(layout) => CommandResponse::ok_with_data(layout),
            Err(e) => CommandResponse::err(format!("Export failed: {e}")),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
