use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{
    camera::Pose,
    input::{self, Control, InputState, Speeds},
    raycast, renderer,
    renderer::Surface,
    world::GridMap,
};

/// Grid squares per second.
pub const MOVE_RATE: f64 = 5.0;
/// Radians per second.
pub const ROT_RATE: f64 = 3.0;
/// Longest frame time fed into the speed scalars.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// Time source for the loop, swapped out in tests.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Frame-time bookkeeping and the speed scalars derived from it.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    last_frame: Instant,
    target_period: Option<Duration>,
    elapsed: Duration,
    speeds: Speeds,
}

impl FrameTiming {
    /// `fps_cap` of zero means uncapped. Speeds start at zero so the first frame
    /// never moves the player.
    pub fn new(now: Instant, fps_cap: u32) -> Self {
        let target_period =
            (fps_cap > 0).then(|| Duration::from_secs_f64(1.0 / fps_cap as f64));
        Self {
            last_frame: now,
            target_period,
            elapsed: Duration::ZERO,
            speeds: Speeds::default(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn speeds(&self) -> Speeds {
        self.speeds
    }

    /// Closes out a frame: waits out the rest of the target period if there is
    /// one, then derives next frame's speeds from the time since the last frame.
    pub fn finish_frame<C: Clock>(&mut self, clock: &mut C) {
        if let Some(period) = self.target_period {
            let spent = clock.now().saturating_duration_since(self.last_frame);
            if spent < period {
                clock.sleep(period - spent);
            }
        }

        let now = clock.now();
        self.elapsed = now
            .saturating_duration_since(self.last_frame)
            .min(MAX_FRAME_TIME);
        self.last_frame = now;

        let secs = self.elapsed.as_secs_f64();
        self.speeds = Speeds {
            movement: secs * MOVE_RATE,
            rotation: secs * ROT_RATE,
        };
    }
}

/// Averages frames over windows of at least a second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
        }
    }

    /// Counts a frame and returns the average FPS when a window closes.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let window = now.saturating_duration_since(self.window_start).as_secs_f32();
        if window < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / window;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Owns the pose and map and drives input, projection and rendering for each frame.
pub struct FrameLoop {
    map: GridMap,
    pose: Pose,
    timing: FrameTiming,
    fps: FpsCounter,
    last_fps: Option<f32>,
    state: LoopState,
    width: usize,
    height: usize,
}

impl FrameLoop {
    pub fn new(
        map: GridMap,
        pose: Pose,
        width: usize,
        height: usize,
        fps_cap: u32,
        now: Instant,
    ) -> Self {
        debug!(
            "frame loop: {width}x{height}, fps cap {fps_cap}, start {:?}",
            pose.pos
        );
        Self {
            map,
            pose,
            timing: FrameTiming::new(now, fps_cap),
            fps: FpsCounter::new(now),
            last_fps: None,
            state: LoopState::Running,
            width,
            height,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// FPS sample produced by the most recent frame, if it closed a window.
    pub fn take_fps(&mut self) -> Option<f32> {
        self.last_fps.take()
    }

    /// Runs one iteration. Once quit has been requested the loop stays terminated
    /// and neither reads input nor touches the surface again.
    pub fn frame<S, C>(&mut self, input: &InputState, surface: &mut S, clock: &mut C) -> LoopState
    where
        S: Surface + ?Sized,
        C: Clock,
    {
        if self.state == LoopState::Terminated {
            return self.state;
        }

        let speeds = self.timing.speeds();
        if input::apply(input, &mut self.pose, &self.map, speeds) == Control::Quit {
            info!("quit requested");
            self.state = LoopState::Terminated;
            return self.state;
        }

        self.draw(surface);

        self.timing.finish_frame(clock);
        self.last_fps = self.fps.record(clock.now());

        self.state
    }

    /// Renders the current pose without touching input or timing.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for x in 0..self.width {
            let hit = raycast::cast(&self.pose, &self.map, x, self.width);
            renderer::render_column(surface, &hit, x, self.height);
        }
    }
}
