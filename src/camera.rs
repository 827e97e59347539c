/// Player position plus the view basis used to generate rays.
///
/// `dir` is the facing vector and `plane` the camera plane; its length relative to
/// `dir` sets the field of view. The two are only ever rotated together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub pos: [f64; 2],   // (x, y) in grid units
    pub dir: [f64; 2],   // facing direction
    pub plane: [f64; 2], // camera plane, perpendicular to dir
}

/// Camera plane length for a ~66 degree horizontal field of view.
pub const DEFAULT_PLANE_LEN: f64 = 0.66;

impl Pose {
    /// Facing -x with the default field of view.
    pub fn new(pos: [f64; 2]) -> Self {
        Self {
            pos,
            dir: [-1.0, 0.0],
            plane: [0.0, DEFAULT_PLANE_LEN],
        }
    }

    /// Rotates direction and camera plane by `angle` radians (counter-clockwise).
    pub fn rotate(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        self.dir = rotate_vec(self.dir, c, s);
        self.plane = rotate_vec(self.plane, c, s);
    }

    /// Ray direction for a point on the camera plane, `camera_x` in [-1, 1].
    #[inline]
    pub fn ray_dir(&self, camera_x: f64) -> [f64; 2] {
        [
            self.dir[0] + self.plane[0] * camera_x,
            self.dir[1] + self.plane[1] * camera_x,
        ]
    }
}

#[inline]
fn rotate_vec(v: [f64; 2], c: f64, s: f64) -> [f64; 2] {
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_turn_keeps_plane_perpendicular() {
        let mut pose = Pose::new([2.0, 2.0]);
        pose.rotate(std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(pose.dir[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.dir[1], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.plane[0], -DEFAULT_PLANE_LEN, epsilon = 1e-12);
        let dot = pose.dir[0] * pose.plane[0] + pose.dir[1] * pose.plane[1];
        assert_abs_diff_eq!(dot, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_dir_spans_camera_plane() {
        let pose = Pose::new([0.0, 0.0]);
        assert_eq!(pose.ray_dir(0.0), [-1.0, 0.0]);
        assert_eq!(pose.ray_dir(1.0), [-1.0, DEFAULT_PLANE_LEN]);
        assert_eq!(pose.ray_dir(-1.0), [-1.0, -DEFAULT_PLANE_LEN]);
    }
}
