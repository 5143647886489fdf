/*
 * Copyright (c) 2020. Beautiful Code BV, Rotterdam, Netherlands
 * Licensed under GNU GENERAL PUBLIC LICENSE Version 3.
 */

use glam::{EulerRot, Quat, Vec3};
use log::{debug, trace, warn};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::axis::Axis;
use crate::config::ShakeConfig;
use crate::oscillator::Oscillator;
use crate::transform::ShakeTarget;
use crate::units::{Degrees, Seconds};

/// Drives six oscillators over a fixed duration and layers their output on
/// top of a camera transform.
///
/// The transform is borrowed on every call that touches it. Each tick removes
/// the previous frame's offset and adds the new one, so motion applied by
/// other systems between ticks is preserved.
pub struct ShakeController {
    config: ShakeConfig,
    rng: ChaCha8Rng,
    elapsed: Seconds,
    shaking: bool,
    offset: Vec3,
    previous_offset: Vec3,
    /// Pitch, yaw and roll in degrees
    angles: Vec3,
    rotation_offset: Quat,
    previous_rotation_offset: Quat,
}

impl ShakeController {
    pub fn new(config: ShakeConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Reproducible phases for the same seed and config.
    pub fn with_seed(config: ShakeConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: ShakeConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            rng,
            elapsed: Seconds(0.0),
            shaking: false,
            offset: Vec3::ZERO,
            previous_offset: Vec3::ZERO,
            angles: Vec3::ZERO,
            rotation_offset: Quat::IDENTITY,
            previous_rotation_offset: Quat::IDENTITY,
        }
    }

    /// Begin a shake, cleanly ending any shake already in flight.
    pub fn start_shake(&mut self, target: &mut impl ShakeTarget) {
        self.stop_shake(target);
        // Every axis, so a later enable starts from a fresh phase
        for (_, axis) in self.config.axes.iter_mut() {
            axis.oscillator.initialize_phase(&mut self.rng);
        }
        self.elapsed = Seconds(0.0);
        self.shaking = true;
        debug!("Shake started for {}", self.config.duration);
    }

    /// End the shake and take its contribution back out of the transform.
    pub fn stop_shake(&mut self, target: &mut impl ShakeTarget) {
        if self.shaking {
            debug!("Shake stopped after {}", self.elapsed);
        }
        self.elapsed = Seconds(0.0);
        self.shaking = false;

        *target.local_position() -= self.offset;
        self.offset = Vec3::ZERO;
        self.previous_offset = Vec3::ZERO;

        let rotation = target.local_rotation();
        *rotation = *rotation * self.rotation_offset.inverse();
        self.angles = Vec3::ZERO;
        self.rotation_offset = Quat::IDENTITY;
        self.previous_rotation_offset = Quat::IDENTITY;
    }

    /// Once per rendered frame, after anything else that moves the camera.
    pub fn tick(&mut self, delta: Seconds, target: &mut impl ShakeTarget) {
        self.advance(delta, target);
        self.recompute();
        self.apply(target);
    }

    fn advance(&mut self, delta: Seconds, target: &mut impl ShakeTarget) {
        if !self.shaking {
            return;
        }
        if delta.is_finite() {
            self.elapsed = Seconds(*self.elapsed + *delta);
        } else {
            warn!("Ignoring frame time {delta}");
        }
        let duration = self.config.duration;
        if self.elapsed > duration || !(*duration > 0.0) {
            debug!("Shake expired");
            self.stop_shake(target);
        }
    }

    fn recompute(&mut self) {
        self.previous_offset = self.offset;
        self.previous_rotation_offset = self.rotation_offset;
        if !self.shaking {
            return;
        }
        let ratio = self.elapsed.ratio_of(self.config.duration);
        // Disabled translation axes keep their value; rotation starts from zero
        let mut angles = Vec3::ZERO;
        for (axis, config) in self.config.axes.iter() {
            if !config.enabled {
                continue;
            }
            let value = config.oscillator.evaluate(ratio);
            match axis {
                Axis::TranslateX => self.offset.x = value,
                Axis::TranslateY => self.offset.y = value,
                Axis::TranslateZ => self.offset.z = value,
                Axis::Pitch => angles.x = value,
                Axis::Yaw => angles.y = value,
                Axis::Roll => angles.z = value,
            }
        }
        self.angles = angles;
        self.rotation_offset = euler_to_quat(angles);
        trace!("ratio {ratio:.3} offset {} angles {}", self.offset, angles);
    }

    fn apply(&self, target: &mut impl ShakeTarget) {
        let position = target.local_position();
        *position -= self.previous_offset;
        *position += self.offset;

        let rotation = target.local_rotation();
        *rotation = *rotation * self.previous_rotation_offset.inverse();
        *rotation = *rotation * self.rotation_offset;
    }

    /// Replace the configuration. Refused while a shake is running.
    pub fn set_config(&mut self, config: ShakeConfig) -> bool {
        if self.shaking {
            warn!("Ignoring config change during a shake");
            return false;
        }
        self.config = config;
        true
    }

    /// Toggle an axis at any time. Its phase is left alone.
    pub fn set_axis_enabled(&mut self, axis: Axis, enabled: bool) {
        self.config.axes[axis].enabled = enabled;
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    pub fn oscillator(&self, axis: Axis) -> &Oscillator {
        &self.config.axes[axis].oscillator
    }

    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }

    /// Progress through the current shake, `None` when idle.
    pub fn ratio(&self) -> Option<f32> {
        self.shaking.then(|| self.elapsed.ratio_of(self.config.duration))
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn rotation_offset(&self) -> Quat {
        self.rotation_offset
    }

    /// The angle currently contributed by a rotation axis.
    pub fn angle(&self, axis: Axis) -> Option<Degrees> {
        match axis {
            Axis::Pitch => Some(Degrees(self.angles.x)),
            Axis::Yaw => Some(Degrees(self.angles.y)),
            Axis::Roll => Some(Degrees(self.angles.z)),
            _ => None,
        }
    }
}

/// Roll about Z first, then pitch about X, then yaw about Y.
fn euler_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        Degrees(degrees.y).to_radians(),
        Degrees(degrees.x).to_radians(),
        Degrees(degrees.z).to_radians(),
    )
}
