//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::time::{Duration, Instant};

use raycaster::{Clock, GridMap, Rgb, Surface};

/// 5x5 room with code-1 walls on every border.
pub const BORDER_ROOM: &str = "\
11111
10001
10001
10001
11111
";

pub fn border_room() -> GridMap {
    GridMap::parse(BORDER_ROOM).expect("fixture parses").map
}

/// One recorded vertical run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stripe {
    pub x: usize,
    pub y0: usize,
    pub y1: usize,
    pub color: Rgb,
}

/// Surface that remembers what was drawn instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub color: Option<Rgb>,
    pub stripes: Vec<Stripe>,
    pub points: usize,
    pub clears: usize,
}

impl Surface for RecordingSurface {
    fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }

    fn draw_point(&mut self, _x: usize, _y: usize) {
        self.points += 1;
    }

    fn vertical_line(&mut self, x: usize, y0: usize, y1: usize) {
        self.stripes.push(Stripe {
            x,
            y0,
            y1,
            color: self.color.expect("colour set before drawing"),
        });
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.stripes.clear();
    }
}

/// Clock that only moves when told to (or when slept on).
pub struct ManualClock {
    pub now: Instant,
    pub slept: Duration,
}

impl ManualClock {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            slept: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
        self.now += duration;
    }
}
