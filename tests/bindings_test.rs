use gilrs::Button;
use stacker_input::input::{BindingProfiles, BindingTable, LogicalAction, RawInput};

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bindings.json");

    let mut profiles = BindingProfiles::default();
    profiles
        .keyboard
        .rebind(LogicalAction::MoveLeft, RawInput::key("a"));
    profiles
        .gamepad_mut(0)
        .rebind(LogicalAction::Quit, RawInput::button(Button::Mode));
    profiles.save_to(&path).unwrap();

    let loaded = BindingProfiles::load_from(&path).unwrap();
    assert_eq!(loaded, profiles);
}

#[test]
fn loading_a_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = BindingProfiles::load_from(dir.path().join("nope.json")).unwrap();
    assert_eq!(loaded, BindingProfiles::default());
}

#[test]
fn loading_garbage_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bindings.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(BindingProfiles::load_from(&path).is_err());
}

#[test]
fn unknown_tokens_in_a_profile_are_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bindings.json");
    std::fs::write(
        &path,
        r#"{"keyboard": {"move_left": "button-NotAButton"}}"#,
    )
    .unwrap();
    assert!(BindingProfiles::load_from(&path).is_err());
}

#[test]
fn a_sparse_profile_leaves_missing_actions_unbound() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bindings.json");
    std::fs::write(&path, r#"{"keyboard": {"quit": "Escape"}}"#).unwrap();

    let loaded = BindingProfiles::load_from(&path).unwrap();
    assert_eq!(
        loaded.keyboard.resolve(&RawInput::key("Escape")),
        Some(LogicalAction::Quit)
    );
    // Every other action is unbound and matches nothing.
    assert_eq!(loaded.keyboard.resolve(&RawInput::key("ArrowLeft")), None);
    assert!(loaded.keyboard.binding(LogicalAction::MoveLeft).is_none());
}

#[test]
fn persisted_file_is_a_flat_action_to_token_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bindings.json");
    let mut profiles = BindingProfiles::default();
    profiles.gamepad_mut(0);
    profiles.save_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"move_left\": \"ArrowLeft\""));
    assert!(text.contains("\"rotate_left\": \"button-South\""));
    assert!(text.contains("\"move_right\": \"axis-LeftStickX:1\""));
}

#[test]
fn default_tables_cover_the_documented_layouts() {
    let keyboard = BindingTable::keyboard_defaults();
    for action in LogicalAction::all() {
        assert!(
            keyboard.binding(*action).is_some(),
            "keyboard leaves {action:?} unbound"
        );
    }

    let gamepad = BindingTable::gamepad_defaults();
    assert!(gamepad.binding(LogicalAction::MoveLeft).is_some());
    assert!(gamepad.binding(LogicalAction::Rewind).is_none());
}
