//! Grid raycasting renderer.
//!
//! The library holds everything that does not need a window: the tile grid, the
//! player pose, the DDA projector, column rendering onto a [`renderer::Surface`],
//! input interpretation and the frame loop. The binary wires it to winit.
pub mod camera;
pub mod config;
pub mod frame;
pub mod framebuffer;
pub mod input;
pub mod logging;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod world;

pub use camera::Pose;
pub use config::{Config, ConfigError, FpsMode};
pub use frame::{Clock, FrameLoop, FrameTiming, LoopState, SystemClock};
pub use framebuffer::Framebuffer;
pub use input::{Action, Control, InputState};
pub use logging::init as init_logging;
pub use raycast::{Hit, RayHit, Side, cast};
pub use renderer::{Material, Rgb, Surface};
pub use world::{GridMap, MapError};
