//! Replay driver end to end.

use crate::config::EditorConfig;
use crate::keybindings::KeyCommand;
use crate::replay::{run_script, ReplayScript};
use crate::widget::WidgetParams;

const PAINT_SCRIPT: &str = r#"{
    "resolution": [2000, 2000],
    "display": { "center": [0.0, 0.0], "extent": [1000.0, 1000.0] },
    "widget": {
        "module": 1,
        "param": 0,
        "kind": "draw",
        "mask_capacity_bytes": 256
    },
    "events": [
        { "type": "mouse_button", "button": "left", "action": "press", "position": [100.0, 100.0] },
        { "type": "mouse_moved", "position": [110.0, 100.0] },
        { "type": "mouse_moved", "position": [120.0, 100.0] },
        { "type": "mouse_button", "button": "left", "action": "release", "position": [120.0, 100.0] },
        { "type": "key", "key": "escape", "action": "press" }
    ]
}"#;

#[test]
fn test_replay_paint_script() {
    let script = ReplayScript::from_json(PAINT_SCRIPT).expect("script parses");
    assert_eq!(script.frames, 1);

    let summary = run_script(&script, EditorConfig::default()).expect("replay runs");
    assert_eq!(summary.mask_vertices, Some(2));
    assert_eq!(summary.mask_strokes, Some(1));
    assert_eq!(summary.runs, 2);
    assert_eq!(summary.commands, vec![KeyCommand::LeaveDarkroom]);
    assert_eq!(summary.rejected_events, 0);
    assert!(matches!(summary.widget, Some(WidgetParams::Draw { .. })));
    assert!(summary.viewport.is_fit());
}

#[test]
fn test_replay_summary_json() {
    let script = ReplayScript::from_json(PAINT_SCRIPT).expect("script parses");
    let summary = run_script(&script, EditorConfig::default()).expect("replay runs");
    let json = summary.to_json().expect("summary serializes");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["runs"], 2);
    assert_eq!(value["mask_vertices"], 2);
    assert_eq!(value["widget"]["kind"], "draw");
    assert_eq!(value["commands"][0], "leave_darkroom");
}

#[test]
fn test_replay_without_display_counts_rejections() {
    let json = r#"{
        "resolution": null,
        "display": { "center": [0.0, 0.0], "extent": [800.0, 600.0] },
        "events": [
            { "type": "mouse_button", "button": "middle", "action": "press", "position": [400.0, 300.0] },
            { "type": "mouse_moved", "position": [410.0, 300.0] },
            { "type": "key", "key": "space", "action": "press" }
        ]
    }"#;
    let script = ReplayScript::from_json(json).expect("script parses");
    let summary = run_script(&script, EditorConfig::default()).expect("replay runs");

    assert_eq!(summary.rejected_events, 2);
    assert_eq!(summary.commands, vec![KeyCommand::NextImage]);
    assert_eq!(summary.widget, None);
    assert_eq!(summary.mask_vertices, None);
    assert_eq!(summary.mask_strokes, None);
}

#[test]
fn test_replay_rejects_bad_script() {
    assert!(ReplayScript::from_json(r#"{ "events": 3 }"#).is_err());
}
