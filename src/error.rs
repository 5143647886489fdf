use std::fmt;
use std::io;

use crate::axis::Axis;

/// Error types that can occur while configuring or recording a shake
#[derive(Debug)]
pub enum ShakeError {
    /// Shake duration must be positive
    InvalidDuration(f32),
    /// Oscillator frequency must be positive
    InvalidFrequency(Axis, f32),
    /// Fixed phase must lie within [0, 1]
    InvalidPhase(Axis, f32),
    /// Envelope keyframes must be in ascending time order
    UnsortedKeyframes,
    /// Envelope keyframe times must be finite
    NonFiniteKeyframe(f32),
    /// Playback frame rate must be positive and finite
    InvalidFrameRate(f32),
    /// Reading or writing a config or recording failed
    Io(io::Error),
    /// A config file could not be parsed or written as JSON
    Json(serde_json::Error),
}

impl fmt::Display for ShakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShakeError::InvalidDuration(duration) => {
                write!(f, "Duration must be positive, got {duration}")
            }
            ShakeError::InvalidFrequency(axis, frequency) => {
                write!(f, "{axis} frequency must be positive, got {frequency}")
            }
            ShakeError::InvalidPhase(axis, phase) => {
                write!(f, "{axis} phase must be within [0, 1], got {phase}")
            }
            ShakeError::UnsortedKeyframes => write!(f, "Envelope keyframes are not sorted by time"),
            ShakeError::NonFiniteKeyframe(time) => {
                write!(f, "Envelope keyframe time must be finite, got {time}")
            }
            ShakeError::InvalidFrameRate(fps) => {
                write!(f, "Frame rate must be positive, got {fps}")
            }
            ShakeError::Io(error) => write!(f, "I/O error: {error}"),
            ShakeError::Json(error) => write!(f, "JSON error: {error}"),
        }
    }
}

impl std::error::Error for ShakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShakeError::Io(error) => Some(error),
            ShakeError::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for ShakeError {
    fn from(error: io::Error) -> Self {
        ShakeError::Io(error)
    }
}

impl From<serde_json::Error> for ShakeError {
    fn from(error: serde_json::Error) -> Self {
        ShakeError::Json(error)
    }
}
