/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::envelope::Envelope;

/// Sine generator over normalized shake time, shaped by an envelope.
///
/// The phase is the only state: it is fixed, or rerolled on every shake
/// start when `use_random_phase` is set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Oscillator {
    /// Offset into the cycle, in [0, 1]
    pub phase: f32,
    pub use_random_phase: bool,
    /// Cycles over the full shake
    pub frequency: f32,
    /// Peak magnitude before the envelope
    pub amplitude: f32,
    #[serde(default)]
    pub envelope: Envelope,
}

impl Oscillator {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            phase: 0.0,
            use_random_phase: true,
            frequency,
            amplitude,
            envelope: Envelope::default(),
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self.use_random_phase = false;
        self
    }

    pub fn with_envelope(mut self, envelope: impl Into<Envelope>) -> Self {
        self.envelope = envelope.into();
        self
    }

    pub fn initialize_phase(&mut self, rng: &mut impl Rng) {
        if self.use_random_phase {
            self.phase = rng.random::<f32>();
        }
    }

    /// Offset at normalized time `t`. No clamping: the envelope decides what
    /// happens outside [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        ((t + self.phase) * self.frequency * TAU).sin() * (self.envelope.sample(t) * self.amplitude)
    }

    /// Upper bound on `|evaluate(t)|` for t in [0, 1].
    pub fn peak(&self) -> f32 {
        self.amplitude.abs() * self.envelope.peak()
    }
}
