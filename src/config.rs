use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::{Display, EnumIter, EnumString};

use crate::axis::{Axis, PerAxis};
use crate::envelope::{Curve, Envelope};
use crate::error::ShakeError;
use crate::oscillator::Oscillator;
use crate::units::Seconds;

/// One axis of a shake: whether it is driven, and by what.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AxisConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub oscillator: Oscillator,
}

impl AxisConfig {
    pub fn enabled(oscillator: Oscillator) -> Self {
        Self {
            enabled: true,
            oscillator,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            oscillator: Oscillator::new(1.0, 0.0),
        }
    }
}

/// Everything a shake needs before it starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShakeConfig {
    pub duration: Seconds,
    pub axes: PerAxis<AxisConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Preset {
    Light,
    Medium,
    Heavy,
    Earthquake,
}

impl ShakeConfig {
    /// A shake with every axis switched off.
    pub fn still(duration: Seconds) -> Self {
        Self {
            duration,
            axes: PerAxis::from_fn(|_| AxisConfig::disabled()),
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Light => Self::still(Seconds(0.3))
                .with_axis(Axis::TranslateX, drive(6.0, 0.05, Curve::linear_decay()))
                .with_axis(Axis::TranslateY, drive(6.0, 0.05, Curve::linear_decay()))
                .with_axis(Axis::Roll, drive(5.0, 0.5, Curve::linear_decay())),
            Preset::Medium => Self::still(Seconds(0.5))
                .with_axis(Axis::TranslateX, drive(8.0, 0.15, Curve::smooth_decay()))
                .with_axis(Axis::TranslateY, drive(8.0, 0.15, Curve::smooth_decay()))
                .with_axis(Axis::TranslateZ, drive(6.0, 0.05, Curve::smooth_decay()))
                .with_axis(Axis::Pitch, drive(7.0, 1.0, Curve::smooth_decay()))
                .with_axis(Axis::Yaw, drive(7.0, 1.0, Curve::smooth_decay()))
                .with_axis(Axis::Roll, drive(7.0, 2.0, Curve::smooth_decay())),
            Preset::Heavy => Self::still(Seconds(0.8))
                .with_axis(Axis::TranslateX, drive(10.0, 0.3, Curve::smooth_decay()))
                .with_axis(Axis::TranslateY, drive(10.0, 0.3, Curve::smooth_decay()))
                .with_axis(Axis::TranslateZ, drive(8.0, 0.15, Curve::smooth_decay()))
                .with_axis(Axis::Pitch, drive(9.0, 2.0, Curve::smooth_decay()))
                .with_axis(Axis::Yaw, drive(9.0, 2.0, Curve::smooth_decay()))
                .with_axis(Axis::Roll, drive(9.0, 4.0, Curve::smooth_decay())),
            Preset::Earthquake => {
                let rumble = Curve::rumble();
                Self::still(Seconds(2.5))
                    .with_axis(Axis::TranslateX, drive(20.0, 0.2, rumble.clone()))
                    .with_axis(Axis::TranslateY, drive(20.0, 0.1, rumble.clone()))
                    .with_axis(Axis::TranslateZ, drive(20.0, 0.2, rumble.clone()))
                    .with_axis(Axis::Pitch, drive(16.0, 1.0, rumble.clone()))
                    .with_axis(Axis::Yaw, drive(16.0, 2.0, rumble.clone()))
                    .with_axis(Axis::Roll, drive(16.0, 1.5, rumble))
            }
        }
    }

    pub fn with_duration(mut self, duration: Seconds) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_axis(mut self, axis: Axis, config: AxisConfig) -> Self {
        self.axes[axis] = config;
        self
    }

    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        &self.axes[axis]
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisConfig {
        &mut self.axes[axis]
    }

    /// Reject values a host should never hand to a controller. The controller
    /// itself accepts anything.
    pub fn validate(&self) -> Result<(), ShakeError> {
        if !(*self.duration > 0.0) {
            return Err(ShakeError::InvalidDuration(*self.duration));
        }
        for (axis, config) in self.axes.iter() {
            let oscillator = &config.oscillator;
            if !(oscillator.frequency > 0.0) {
                return Err(ShakeError::InvalidFrequency(axis, oscillator.frequency));
            }
            if !(0.0..=1.0).contains(&oscillator.phase) {
                return Err(ShakeError::InvalidPhase(axis, oscillator.phase));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ShakeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ShakeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShakeError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ShakeError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self::preset(Preset::Medium)
    }
}

fn drive(frequency: f32, amplitude: f32, envelope: Curve) -> AxisConfig {
    AxisConfig::enabled(Oscillator::new(frequency, amplitude).with_envelope(Envelope::Curve(envelope)))
}
