//! Camera shake built from per-axis oscillators.
//!
//! A [`ShakeController`] owns one [`Oscillator`] per [`Axis`] and layers their
//! combined offset on top of a host-owned camera transform, one tick per
//! rendered frame. Stopping a shake always returns the transform to where the
//! host left it.

pub mod axis;
pub mod config;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod oscillator;
pub mod recorder;
pub mod transform;
pub mod units;

pub use axis::{Axis, PerAxis};
pub use config::{AxisConfig, Preset, ShakeConfig};
pub use controller::ShakeController;
pub use envelope::{Curve, Envelope, Interpolation, Keyframe};
pub use error::ShakeError;
pub use oscillator::Oscillator;
pub use recorder::{FrameSample, Recording};
pub use transform::{ShakeTarget, Transform};
pub use units::{Degrees, Seconds};
