//! Input interpretation: rotation and collision-aware movement.
mod common;

use approx::assert_relative_eq;
use common::border_room;
use raycaster::input::{Speeds, apply, try_move};
use raycaster::{Action, Control, InputState, Pose};
use rstest::rstest;

fn start_pose() -> Pose {
    Pose {
        pos: [2.5, 2.5],
        dir: [-1.0, 0.0],
        plane: [0.0, 0.66],
    }
}

#[rstest]
#[case(0.1)]
#[case(-0.75)]
#[case(std::f64::consts::PI)]
#[case(12.0)]
fn rotation_round_trips(#[case] angle: f64) {
    let original = start_pose();
    let mut pose = original;
    pose.rotate(angle);
    pose.rotate(-angle);

    for i in 0..2 {
        assert_relative_eq!(pose.dir[i], original.dir[i], epsilon = 1e-12);
        assert_relative_eq!(pose.plane[i], original.plane[i], epsilon = 1e-12);
    }
}

#[test]
fn rotate_right_turns_clockwise_by_rot_speed() {
    let map = border_room();
    let mut pose = start_pose();
    let mut input = InputState::default();
    input.press(Action::RotateRight);

    let before = pose.dir[1].atan2(pose.dir[0]);
    let control = apply(
        &input,
        &mut pose,
        &map,
        Speeds {
            movement: 0.0,
            rotation: 0.1,
        },
    );
    let after = pose.dir[1].atan2(pose.dir[0]);

    assert_eq!(control, Control::Continue);
    assert_relative_eq!(after - before, -0.1, epsilon = 1e-12);
    assert_relative_eq!(pose.dir[0].hypot(pose.dir[1]), 1.0, epsilon = 1e-12);
    assert_relative_eq!(pose.plane[0].hypot(pose.plane[1]), 0.66, epsilon = 1e-12);
    assert_eq!(pose.pos, [2.5, 2.5]);
}

#[test]
fn left_and_right_cancel() {
    let map = border_room();
    let mut pose = start_pose();
    let mut input = InputState::default();
    input.press(Action::RotateLeft).press(Action::RotateRight);
    apply(
        &input,
        &mut pose,
        &map,
        Speeds {
            movement: 0.0,
            rotation: 0.4,
        },
    );
    assert_relative_eq!(pose.dir[0], -1.0, epsilon = 1e-12);
    assert_relative_eq!(pose.dir[1], 0.0, epsilon = 1e-12);
}

#[rstest]
#[case::into_wall(1.5, 0.7, false)]
#[case::onto_floor(1.5, 0.3, true)]
#[case::backwards_into_wall(3.5, -0.7, false)]
#[case::backwards_onto_floor(3.5, -0.4, true)]
fn x_move_respects_walls(#[case] start_x: f64, #[case] amount: f64, #[case] moves: bool) {
    let map = border_room();
    let mut pose = start_pose();
    pose.pos = [start_x, 2.5];
    let candidate = start_x + pose.dir[0] * amount;

    try_move(&mut pose, &map, amount);

    let expected = if moves { candidate } else { start_x };
    assert_eq!(pose.pos[0], expected);
    assert_eq!(pose.pos[1], 2.5);
}

#[test]
fn diagonal_into_corner_slides_on_open_axis() {
    let map = border_room();
    let mut pose = start_pose();
    pose.pos = [1.2, 2.5];
    pose.dir = [-0.6, 0.8];

    try_move(&mut pose, &map, 0.5);

    // x would enter the wall column; y is free to move.
    assert_eq!(pose.pos[0], 1.2);
    assert_eq!(pose.pos[1], 2.5 + 0.8 * 0.5);
}

#[test]
fn backward_key_moves_opposite_to_facing() {
    let map = border_room();
    let mut pose = start_pose();
    let mut input = InputState::default();
    input.press(Action::Backward);
    apply(
        &input,
        &mut pose,
        &map,
        Speeds {
            movement: 0.25,
            rotation: 0.0,
        },
    );
    assert_eq!(pose.pos, [2.75, 2.5]);
}
