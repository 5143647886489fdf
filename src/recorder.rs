use glam::Vec3;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::axis::Axis;
use crate::controller::ShakeController;
use crate::error::ShakeError;
use crate::transform::Transform;
use crate::units::Seconds;

const MAX_FRAMES: usize = 100_000;

/// What the shake contributed on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub frame: usize,
    pub time: Seconds,
    pub shaking: bool,
    pub offset: Vec3,
    /// Pitch, yaw and roll in degrees
    pub angles: Vec3,
}

/// A complete shake played back at a fixed frame rate.
#[derive(Debug, Clone)]
pub struct Recording {
    pub fps: f32,
    pub samples: Vec<FrameSample>,
    /// The camera after the shake ended; identity when nothing leaked.
    pub final_transform: Transform,
}

impl Recording {
    /// Run one full shake against an identity camera.
    pub fn capture(controller: &mut ShakeController, fps: f32) -> Result<Self, ShakeError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ShakeError::InvalidFrameRate(fps));
        }
        let delta = Seconds::per_frame(fps);
        let mut transform = Transform::default();
        let mut samples = Vec::new();
        controller.start_shake(&mut transform);
        let mut time = 0.0;
        for frame in 0..MAX_FRAMES {
            controller.tick(delta, &mut transform);
            time += *delta;
            samples.push(FrameSample {
                frame,
                time: Seconds(time),
                shaking: controller.is_shaking(),
                offset: controller.offset(),
                angles: angles(controller),
            });
            if !controller.is_shaking() {
                break;
            }
        }
        if controller.is_shaking() {
            warn!("Shake still running after {MAX_FRAMES} frames, stopping it");
            controller.stop_shake(&mut transform);
        }
        info!("Recorded {} frames at {fps} fps", samples.len());
        Ok(Self {
            fps,
            samples,
            final_transform: transform,
        })
    }

    /// Largest absolute offset seen on each translation axis.
    pub fn peak_offset(&self) -> Vec3 {
        self.samples
            .iter()
            .fold(Vec3::ZERO, |peak, sample| peak.max(sample.offset.abs()))
    }

    pub fn write_csv(&self, title: &str, out: &mut impl Write) -> Result<(), ShakeError> {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        writeln!(out, "# {}, {:.0} fps, Created: {}", title, self.fps, now)?;
        writeln!(out, "Frame,Time(s),Shaking,X,Y,Z,Pitch,Yaw,Roll")?;
        for sample in &self.samples {
            writeln!(
                out,
                "{},{:.4},{},{:.6},{:.6},{:.6},{:.4},{:.4},{:.4}",
                sample.frame,
                *sample.time,
                sample.shaking,
                sample.offset.x,
                sample.offset.y,
                sample.offset.z,
                sample.angles.x,
                sample.angles.y,
                sample.angles.z,
            )?;
        }
        Ok(())
    }

    pub fn save_csv(&self, title: &str, path: impl AsRef<Path>) -> Result<(), ShakeError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_csv(title, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

fn angles(controller: &ShakeController) -> Vec3 {
    let [pitch, yaw, roll] = [Axis::Pitch, Axis::Yaw, Axis::Roll]
        .map(|axis| controller.angle(axis).map(|degrees| *degrees).unwrap_or_default());
    Vec3::new(pitch, yaw, roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Preset, ShakeConfig};

    #[test]
    fn test_capture_runs_to_completion() {
        let mut controller = ShakeController::with_seed(ShakeConfig::preset(Preset::Light), 1);
        let recording = Recording::capture(&mut controller, 60.0).unwrap();
        // 0.3s at 60fps expires on frame 18 or 19 depending on rounding
        assert!((18..=19).contains(&recording.samples.len()));
        let last = recording.samples.last().unwrap();
        assert!(!last.shaking);
        assert_eq!(last.offset, Vec3::ZERO);
        assert!(recording.final_transform.abs_diff_eq(&Transform::default(), 1e-6));
        assert!(!controller.is_shaking());
    }

    #[test]
    fn test_peak_within_amplitude() {
        let mut controller = ShakeController::with_seed(ShakeConfig::preset(Preset::Light), 1);
        let recording = Recording::capture(&mut controller, 120.0).unwrap();
        let peak = recording.peak_offset();
        assert!(peak.x <= 0.05 + 1e-6);
        assert!(peak.y <= 0.05 + 1e-6);
        assert_eq!(peak.z, 0.0);
        assert!(recording.samples.iter().all(|sample| sample.angles.x == 0.0));
    }

    #[test]
    fn test_csv_layout() {
        let mut controller = ShakeController::with_seed(ShakeConfig::preset(Preset::Medium), 2);
        let recording = Recording::capture(&mut controller, 30.0).unwrap();
        let mut out = Vec::new();
        recording.write_csv("medium", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("# medium, 30 fps"));
        assert_eq!(lines[1], "Frame,Time(s),Shaking,X,Y,Z,Pitch,Yaw,Roll");
        assert_eq!(lines.len(), recording.samples.len() + 2);
        assert!(lines[2].starts_with("0,0.0333,true,"));
        assert_eq!(lines[2].split(',').count(), 9);
    }

    #[test]
    fn test_bad_frame_rate_rejected() {
        let mut controller = ShakeController::with_seed(ShakeConfig::default(), 3);
        for fps in [0.0, -30.0, f32::NAN, f32::INFINITY] {
            let result = Recording::capture(&mut controller, fps);
            assert!(matches!(result, Err(ShakeError::InvalidFrameRate(_))));
            assert!(!controller.is_shaking());
        }
    }
}
