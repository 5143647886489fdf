/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

//! Units for shake configuration
//!
//! Type-safe wrappers keep durations and angles from being confused
//! with plain translation amplitudes.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Time in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f32);

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Deref for Seconds {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Degrees {
    type Target = f32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Seconds {
    /// Frame duration at the given frame rate
    pub fn per_frame(fps: f32) -> Self {
        Self(1.0 / fps)
    }

    /// Fraction of `total` covered by this time
    pub fn ratio_of(self, total: Seconds) -> f32 {
        self.0 / total.0
    }
}

impl Degrees {
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}
