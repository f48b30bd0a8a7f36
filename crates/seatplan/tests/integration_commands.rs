//! Integration tests for the EditorCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use seatplan_lib::command::{execute_json, execute_json_batch};
use seatplan_lib::fixtures;
use seatplan_lib::harness::TestHarness;

#[test]
fn test_command_draw_section_script() {
    let mut h = TestHarness::new();
    let script = r#"[
        {"command": "select_tool", "tool": "draw_section"},
        {"command": "pointer_down", "position": {"x": 0.0, "y": 0.0}},
        {"command": "pointer_move", "position": {"x": 150.0, "y": 120.0}},
        {"command": "pointer_up", "position": {"x": 150.0, "y": 120.0}},
        {"command": "inspect"}
    ]"#;

    let responses = execute_json_batch(&mut h, script).unwrap();
    assert!(responses.iter().all(|r| r.success));
    let data = responses[4].data.as_ref().unwrap();
    assert_eq!(data["section_count"], 1);
    assert_eq!(data["chair_count"], 6);
    assert_eq!(data["tool"], "Select");
    assert_eq!(data["can_undo"], true);
    assert!(data["selected_section"].is_string());
}

#[test]
fn test_command_place_table() {
    let mut h = TestHarness::new();
    let script = r#"[
        {"command": "set_placement_config", "config": {
            "shape": {"shape": "circle", "radius": 50.0},
            "chair_count": 8,
            "chair_spacing": 20.0
        }},
        {"command": "select_tool", "tool": {"place": "table"}},
        {"command": "pointer_down", "position": {"x": 300.0, "y": 300.0}},
        {"command": "export"}
    ]"#;

    let responses = execute_json_batch(&mut h, script).unwrap();
    let layout = responses[3].data.as_ref().unwrap();
    let tables = layout["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["chairs"].as_array().unwrap().len(), 8);
    assert_eq!(tables[0]["table"]["shape"], "circle");
}

#[test]
fn test_command_update_section_and_undo() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::demo_scene());

    let json = format!(
        r#"{{"command": "update_section", "id": "{}", "update": {{"rows": 3}}}}"#,
        fixtures::DEMO_SECTION
    );
    let resp = execute_json(&mut h, &json).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["changed"], true);
    assert_eq!(h.chair_count(), 13);

    let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["undone"], true);
    assert_eq!(h.chair_count(), 10);

    let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["redone"], true);
    assert_eq!(h.chair_count(), 13);
}

#[test]
fn test_command_update_missing_element() {
    let mut h = TestHarness::new();
    let resp = execute_json(
        &mut h,
        r#"{"command": "update_element", "id": "nope", "update": {"fill": "red"}}"#,
    )
    .unwrap();
    assert!(!resp.success);
    assert!(resp.error.unwrap().contains("nope"));
}

#[test]
fn test_command_select_color_delete() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::demo_scene());

    let select = format!(r#"{{"command": "select", "ids": ["{}"]}}"#, fixtures::DEMO_TABLE);
    assert!(execute_json(&mut h, &select).unwrap().success);

    let resp = execute_json(&mut h, r##"{"command": "set_color", "fill": "#ff0000"}"##).unwrap();
    assert_eq!(resp.data.unwrap()["changed"], 1);
    for chair in h.app.scene.scene.table_chairs(fixtures::DEMO_TABLE) {
        assert_eq!(chair.fill, "#ff0000");
    }

    let resp = execute_json(&mut h, r#"{"command": "delete"}"#).unwrap();
    assert!(resp.data.unwrap()["removed"].as_u64().unwrap() >= 1);
    assert_eq!(h.chair_count(), 6);
}

#[test]
fn test_command_cut_paste_at_position() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::demo_scene());
    let select = format!(r#"{{"command": "select", "ids": ["{}"]}}"#, fixtures::DEMO_STAGE);
    execute_json(&mut h, &select).unwrap();

    let resp = execute_json(&mut h, r#"{"command": "cut"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["copied"], 1);
    assert!(h.app.scene.get_element(fixtures::DEMO_STAGE).is_none());

    let resp = execute_json(
        &mut h,
        r#"{"command": "paste", "position": {"x": 10.0, "y": 20.0}}"#,
    )
    .unwrap();
    let created = resp.data.unwrap()["created"].as_array().unwrap().clone();
    assert_eq!(created.len(), 1);
    let id = created[0].as_str().unwrap();
    let stage = h.app.scene.get_element(id).unwrap();
    assert_eq!((stage.position.x, stage.position.y), (10.0, 20.0));
}

#[test]
fn test_command_transform_end() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::demo_scene());
    h.click(fixtures::DEMO_TABLE);

    let json = format!(
        r#"{{"command": "transform_end", "records": [{{"id": "{}",
            "position": {{"x": 400.0, "y": 400.0}}, "scale_x": 2.0, "scale_y": 2.0}}]}}"#,
        fixtures::DEMO_TABLE
    );
    let resp = execute_json(&mut h, &json).unwrap();
    assert_eq!(resp.data.unwrap()["applied"], 1);
    for chair in h.app.scene.scene.table_chairs(fixtures::DEMO_TABLE) {
        let d = (chair.position.x - 400.0).hypot(chair.position.y - 400.0);
        assert!((d - 145.0).abs() < 1e-6);
    }
}

#[test]
fn test_command_clear_all() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::demo_scene());
    let resp = execute_json(&mut h, r#"{"command": "clear_all"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.element_count(), 0);

    let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["undone"], false);
}

#[test]
fn test_command_invalid_batch() {
    let mut h = TestHarness::new();
    let err = execute_json_batch(&mut h, r#"[{"command": "fly_away"}]"#).unwrap_err();
    assert!(err.starts_with("Invalid commands JSON"));
}
