use crate::{camera::Pose, world::GridMap};

/// Stand-in for `|1 / 0|` when a ray runs parallel to a grid axis.
const HUGE_DELTA: f64 = 1e30;

/// Smallest distance handed to projection; keeps line heights finite.
pub const MIN_PERP_DIST: f64 = 1e-4;

/// Which family of grid lines the ray crossed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a line of constant x (an x-step).
    X,
    /// Crossed a line of constant y (a y-step).
    Y,
}

/// What stopped the ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A wall tile with a non-zero code.
    Wall(u8),
    /// The ray left the grid; the edge counts as a wall.
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub hit: Hit,
    /// Distance along the view direction, always finite and positive.
    pub perp_dist: f64,
    pub side: Side,
    /// Cell that terminated the walk; may lie one step outside the grid.
    pub cell: [i64; 2],
}

/// Per-axis DDA state.
#[derive(Clone, Copy)]
struct Axis {
    cell: i64,
    step: i64,
    side_dist: f64,
    delta: f64,
}

impl Axis {
    fn new(pos: f64, ray: f64) -> Self {
        let cell = pos.floor() as i64;
        let delta = if ray == 0.0 {
            HUGE_DELTA
        } else {
            (1.0 / ray).abs().min(HUGE_DELTA)
        };
        if ray < 0.0 {
            Self {
                cell,
                step: -1,
                side_dist: (pos - cell as f64) * delta,
                delta,
            }
        } else {
            Self {
                cell,
                step: 1,
                side_dist: (cell as f64 + 1.0 - pos) * delta,
                delta,
            }
        }
    }

    #[inline]
    fn advance(&mut self) {
        self.side_dist += self.delta;
        self.cell += self.step;
    }

    /// Distance from `pos` to the near face of the current cell, along `ray`.
    fn face_dist(&self, pos: f64, ray: f64) -> f64 {
        let near_face = self.cell as f64 + if self.step < 0 { 1.0 } else { 0.0 };
        (near_face - pos) / ray
    }
}

/// Maps a screen column to camera-plane space, `[-1, 1]` across the viewport.
#[inline]
pub fn camera_x(column: usize, viewport_width: usize) -> f64 {
    if viewport_width < 2 {
        return 0.0;
    }
    2.0 * column as f64 / (viewport_width - 1) as f64 - 1.0
}

/// Casts the ray for `column` and walks the grid until it meets a wall or the edge.
///
/// The walk always terminates: every iteration moves one axis a cell further in a
/// fixed direction, so the ray leaves any finite grid eventually.
pub fn cast(pose: &Pose, map: &GridMap, column: usize, viewport_width: usize) -> RayHit {
    let ray = pose.ray_dir(camera_x(column, viewport_width));
    let mut ax = Axis::new(pose.pos[0], ray[0]);
    let mut ay = Axis::new(pose.pos[1], ray[1]);
    let mut side;

    let hit = loop {
        if ax.side_dist < ay.side_dist {
            ax.advance();
            side = Side::X;
        } else {
            ay.advance();
            side = Side::Y;
        }

        match map.tile(ax.cell, ay.cell) {
            None => break Hit::Boundary,
            Some(0) => {}
            Some(code) => break Hit::Wall(code),
        }
    };

    let raw = match side {
        Side::X => ax.face_dist(pose.pos[0], ray[0]),
        Side::Y => ay.face_dist(pose.pos[1], ray[1]),
    };

    RayHit {
        hit,
        perp_dist: sanitize_dist(raw),
        side,
        cell: [ax.cell, ay.cell],
    }
}

/// Clamps degenerate distances (zero, negative, NaN, infinite) into a usable range.
#[inline]
pub fn sanitize_dist(d: f64) -> f64 {
    if d.is_nan() {
        return HUGE_DELTA;
    }
    d.clamp(MIN_PERP_DIST, HUGE_DELTA)
}
