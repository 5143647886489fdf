//! Amplitude envelopes sampled over normalized shake time.
//!
//! An envelope maps `t` in [0, 1] to a unitless multiplier. Keyframed curves
//! interpolate between keys and clamp outside them: before the first key the
//! first value holds, after the last key the last value holds. An empty curve
//! samples to zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::ShakeError;

/// How a [`Curve`] blends between neighbouring keyframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Hold the earlier key's value until the next key.
    Step,
    /// Smoothstep between keys, flat at every key.
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise curve over keyframes sorted by time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveData", into = "CurveData")]
pub struct Curve {
    keys: Vec<Keyframe>,
    interpolation: Interpolation,
}

/// Unchecked form of [`Curve`] as it appears in config files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurveData {
    pub keys: Vec<Keyframe>,
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl TryFrom<CurveData> for Curve {
    type Error = ShakeError;

    fn try_from(data: CurveData) -> Result<Self, Self::Error> {
        Curve::new(data.keys, data.interpolation)
    }
}

impl From<Curve> for CurveData {
    fn from(curve: Curve) -> Self {
        CurveData {
            keys: curve.keys,
            interpolation: curve.interpolation,
        }
    }
}

impl Curve {
    pub fn new(keys: Vec<Keyframe>, interpolation: Interpolation) -> Result<Self, ShakeError> {
        if let Some(key) = keys.iter().find(|key| !key.time.is_finite()) {
            return Err(ShakeError::NonFiniteKeyframe(key.time));
        }
        if keys.windows(2).any(|pair| pair[1].time < pair[0].time) {
            return Err(ShakeError::UnsortedKeyframes);
        }
        Ok(Self { keys, interpolation })
    }

    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value), Keyframe::new(1.0, value)],
            interpolation: Interpolation::Linear,
        }
    }

    /// Full strength at the start, fading linearly to nothing.
    pub fn linear_decay() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 1.0), Keyframe::new(1.0, 0.0)],
            interpolation: Interpolation::Linear,
        }
    }

    /// Full strength at the start, easing out to nothing.
    pub fn smooth_decay() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 1.0), Keyframe::new(1.0, 0.0)],
            interpolation: Interpolation::Smooth,
        }
    }

    /// Swells in, sustains, then dies away.
    pub fn rumble() -> Self {
        Self {
            keys: vec![
                Keyframe::new(0.0, 0.6),
                Keyframe::new(0.15, 1.0),
                Keyframe::new(0.7, 0.8),
                Keyframe::new(1.0, 0.0),
            ],
            interpolation: Interpolation::Smooth,
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn sample(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        // Key times are finite and sorted, and t lies strictly inside them
        let upper = self.keys.partition_point(|key| key.time <= t);
        let (Some(&before), Some(&after)) = (
            upper.checked_sub(1).and_then(|lower| self.keys.get(lower)),
            self.keys.get(upper),
        ) else {
            return last.value;
        };
        let local = (t - before.time) / (after.time - before.time);
        let blend = match self.interpolation {
            Interpolation::Linear => local,
            Interpolation::Step => 0.0,
            Interpolation::Smooth => local * local * (3.0 - 2.0 * local),
        };
        before.value + (after.value - before.value) * blend
    }
}

/// Multiplier applied to an oscillator's amplitude over the shake lifetime.
#[derive(Clone, Serialize, Deserialize)]
pub enum Envelope {
    Constant(f32),
    Curve(Curve),
    /// Host-supplied function, not serializable.
    #[serde(skip)]
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Envelope {
    pub fn custom(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Envelope::Custom(Arc::new(f))
    }

    pub fn sample(&self, t: f32) -> f32 {
        match self {
            Envelope::Constant(value) => *value,
            Envelope::Curve(curve) => curve.sample(t),
            Envelope::Custom(f) => f(t),
        }
    }

    /// Peak multiplier over [0, 1]. Custom envelopes are sampled at fixed steps.
    pub fn peak(&self) -> f32 {
        match self {
            Envelope::Constant(value) => value.abs(),
            Envelope::Curve(curve) => curve
                .keys()
                .iter()
                .map(|key| key.value.abs())
                .fold(0.0, f32::max),
            Envelope::Custom(f) => (0..=PEAK_SAMPLES)
                .map(|step| f(step as f32 / PEAK_SAMPLES as f32).abs())
                .fold(0.0, f32::max),
        }
    }
}

const PEAK_SAMPLES: usize = 256;

impl Default for Envelope {
    fn default() -> Self {
        Envelope::Curve(Curve::linear_decay())
    }
}

impl From<Curve> for Envelope {
    fn from(curve: Curve) -> Self {
        Envelope::Curve(curve)
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Envelope::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Envelope::Curve(curve) => f.debug_tuple("Curve").field(curve).finish(),
            Envelope::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_linear_interpolation() {
        let curve = Curve::linear_decay();
        assert_eq!(curve.sample(0.0), 1.0);
        assert!(approx(curve.sample(0.25), 0.75));
        assert!(approx(curve.sample(0.5), 0.5));
        assert_eq!(curve.sample(1.0), 0.0);
    }

    #[test]
    fn test_clamps_outside_keys() {
        let curve = Curve::new(
            vec![Keyframe::new(0.2, 0.4), Keyframe::new(0.8, 0.9)],
            Interpolation::Linear,
        )
        .unwrap();
        assert_eq!(curve.sample(-1.0), 0.4);
        assert_eq!(curve.sample(0.0), 0.4);
        assert_eq!(curve.sample(1.0), 0.9);
        assert_eq!(curve.sample(7.5), 0.9);
    }

    #[test]
    fn test_step_holds_previous_key() {
        let curve = Curve::new(
            vec![
                Keyframe::new(0.0, 1.0),
                Keyframe::new(0.5, 0.5),
                Keyframe::new(1.0, 0.0),
            ],
            Interpolation::Step,
        )
        .unwrap();
        assert_eq!(curve.sample(0.49), 1.0);
        assert_eq!(curve.sample(0.5), 0.5);
        assert_eq!(curve.sample(0.99), 0.5);
    }

    #[test]
    fn test_smooth_is_flat_at_keys() {
        let curve = Curve::smooth_decay();
        assert!(approx(curve.sample(0.5), 0.5));
        assert!(curve.sample(0.1) > Curve::linear_decay().sample(0.1));
        assert!(curve.sample(0.9) < Curve::linear_decay().sample(0.9));
    }

    #[test]
    fn test_rumble_sustains() {
        let curve = Curve::rumble();
        assert_eq!(curve.sample(0.15), 1.0);
        assert!(curve.sample(0.5) > 0.8);
        assert_eq!(curve.sample(1.0), 0.0);
        assert_eq!(Envelope::from(curve).peak(), 1.0);
    }

    #[test]
    fn test_empty_curve_is_silent() {
        let curve = Curve::new(Vec::new(), Interpolation::Linear).unwrap();
        assert_eq!(curve.sample(0.5), 0.0);
        assert_eq!(Envelope::Curve(curve).peak(), 0.0);
    }

    #[test]
    fn test_unsorted_keys_rejected() {
        let result = Curve::new(
            vec![Keyframe::new(0.5, 1.0), Keyframe::new(0.1, 0.0)],
            Interpolation::Linear,
        );
        assert!(matches!(result, Err(ShakeError::UnsortedKeyframes)));
    }

    #[test]
    fn test_non_finite_key_times_rejected() {
        for time in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let result = Curve::new(
                vec![Keyframe::new(time, 1.0), Keyframe::new(1.0, 0.0)],
                Interpolation::Linear,
            );
            assert!(matches!(result, Err(ShakeError::NonFiniteKeyframe(_))));
        }
        let json = r#"{"keys":[{"time":0.0,"value":1.0},{"time":1e40,"value":0.0}]}"#;
        assert!(serde_json::from_str::<Curve>(json).is_err());
    }

    #[test]
    fn test_nan_time_samples_first_key() {
        let curve = Curve::rumble();
        assert_eq!(curve.sample(f32::NAN), 0.6);
        assert_eq!(Envelope::from(Curve::linear_decay()).sample(f32::NAN), 1.0);
    }

    #[test]
    fn test_duplicate_key_times_jump() {
        let curve = Curve::new(
            vec![
                Keyframe::new(0.0, 1.0),
                Keyframe::new(0.5, 1.0),
                Keyframe::new(0.5, 0.2),
                Keyframe::new(1.0, 0.2),
            ],
            Interpolation::Linear,
        )
        .unwrap();
        assert_eq!(curve.sample(0.25), 1.0);
        assert_eq!(curve.sample(0.75), 0.2);
    }

    #[test]
    fn test_envelope_variants() {
        assert_eq!(Envelope::Constant(0.3).sample(0.9), 0.3);
        let custom = Envelope::custom(|t| 1.0 - t * t);
        assert!(approx(custom.sample(0.5), 0.75));
        assert!(approx(custom.peak(), 1.0));
        assert_eq!(Envelope::from(Curve::constant(2.0)).peak(), 2.0);
        assert_eq!(format!("{:?}", custom), "Custom(..)");
    }

    #[test]
    fn test_unsorted_json_rejected() {
        let json = r#"{"keys":[{"time":1.0,"value":0.0},{"time":0.0,"value":1.0}]}"#;
        assert!(serde_json::from_str::<Curve>(json).is_err());
        let json = r#"{"keys":[{"time":0.0,"value":1.0},{"time":1.0,"value":0.0}]}"#;
        let curve: Curve = serde_json::from_str(json).unwrap();
        assert_eq!(curve.interpolation(), Interpolation::Linear);
    }

    #[test]
    fn test_curve_json() {
        let envelope = Envelope::Curve(Curve::smooth_decay());
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&json).unwrap();
        match back {
            Envelope::Curve(curve) => assert_eq!(curve, Curve::smooth_decay()),
            other => panic!("unexpected envelope {:?}", other),
        }
    }
}
