use lesson_core::input::wheel_lines_to_units;
use lesson_core::{KeyState, MoveKey, Toggle};

#[test]
fn keys_track_press_and_release() {
    let mut keys = KeyState::default();
    assert!(!keys.any_held());

    keys.set_held(MoveKey::Forward, true);
    keys.set_held(MoveKey::RollLeft, true);
    assert!(keys.is_held(MoveKey::Forward));
    assert!(keys.is_held(MoveKey::RollLeft));
    assert!(!keys.is_held(MoveKey::Back));
    assert!(keys.any_held());

    keys.set_held(MoveKey::Forward, false);
    assert!(!keys.is_held(MoveKey::Forward));
    assert!(keys.any_held());

    keys.set_held(MoveKey::RollLeft, false);
    assert!(!keys.any_held());
}

#[test]
fn every_key_has_a_distinct_slot() {
    for key in MoveKey::ALL {
        let mut keys = KeyState::default();
        keys.set_held(key, true);
        for other in MoveKey::ALL {
            assert_eq!(keys.is_held(other), key == other);
        }
    }
}

#[test]
fn toggle_flips_on_each_press() {
    let mut torch = Toggle::default();
    assert!(!torch.is_on());
    torch.flip();
    assert!(torch.is_on());
    torch.flip();
    assert!(!torch.is_on());
}

#[test]
fn wheel_lines_scale_to_eighth_degree_units() {
    assert_eq!(wheel_lines_to_units(1.0), 120.0);
    assert_eq!(wheel_lines_to_units(-2.5), -300.0);
    assert_eq!(wheel_lines_to_units(0.0), 0.0);
}
