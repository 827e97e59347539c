use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::{camera::Pose, world::GridMap};

/// Something the player can ask for in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    RotateLeft,
    RotateRight,
    Sprint,
    Quit,
}

/// Maps a physical key to its action. Unbound keys map to `None`.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Action::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Action::Backward),
        KeyCode::KeyA => Some(Action::StrafeLeft),
        KeyCode::KeyD => Some(Action::StrafeRight),
        KeyCode::ArrowLeft => Some(Action::RotateLeft),
        KeyCode::ArrowRight => Some(Action::RotateRight),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Action::Sprint),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Snapshot of what is held down this frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    actions: HashSet<Action>,
}

impl InputState {
    /// Builds a snapshot from currently held keys and the window close signal.
    pub fn from_keys<'a>(
        keys: impl IntoIterator<Item = &'a KeyCode>,
        close_requested: bool,
    ) -> Self {
        let mut state = Self::default();
        state
            .actions
            .extend(keys.into_iter().filter_map(|&k| action_for(k)));
        if close_requested {
            state.press(Action::Quit);
        }
        state
    }

    pub fn press(&mut self, action: Action) -> &mut Self {
        self.actions.insert(action);
        self
    }

    #[inline]
    pub fn held(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// Per-frame motion scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Speeds {
    /// Grid units moved this frame.
    pub movement: f64,
    /// Radians turned this frame.
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Applies one frame of input to the pose.
///
/// Strafe actions are recognised but move nothing yet; only forward/backward
/// translation and rotation change the pose.
pub fn apply(input: &InputState, pose: &mut Pose, map: &GridMap, speeds: Speeds) -> Control {
    if input.held(Action::Quit) {
        return Control::Quit;
    }

    let step = if input.held(Action::Sprint) {
        speeds.movement * 2.0
    } else {
        speeds.movement
    };

    if input.held(Action::Forward) {
        try_move(pose, map, step);
    }
    if input.held(Action::Backward) {
        try_move(pose, map, -step);
    }
    if input.held(Action::RotateLeft) {
        pose.rotate(speeds.rotation);
    }
    if input.held(Action::RotateRight) {
        pose.rotate(-speeds.rotation);
    }
    if input.held(Action::StrafeLeft) || input.held(Action::StrafeRight) {
        log::trace!("strafe input ignored");
    }

    Control::Continue
}

/// Moves `amount` along the facing direction, each axis checked on its own so the
/// player slides along walls instead of sticking to them.
pub fn try_move(pose: &mut Pose, map: &GridMap, amount: f64) {
    let new_x = pose.pos[0] + pose.dir[0] * amount;
    let new_y = pose.pos[1] + pose.dir[1] * amount;

    if map.is_open_at(new_x, pose.pos[1]) {
        pose.pos[0] = new_x;
    }
    if map.is_open_at(pose.pos[0], new_y) {
        pose.pos[1] = new_y;
    }
}
