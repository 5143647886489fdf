use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// The six degrees of freedom a shake can drive.
///
/// Translation axes are in world units, rotation axes in degrees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, EnumCount, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Axis {
    TranslateX,
    TranslateY,
    TranslateZ,
    Pitch,
    Yaw,
    Roll,
}

impl Axis {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, Axis::Pitch | Axis::Yaw | Axis::Roll)
    }

    pub fn translations() -> impl Iterator<Item = Axis> {
        Axis::iter().filter(|axis| !axis.is_rotation())
    }

    pub fn rotations() -> impl Iterator<Item = Axis> {
        Axis::iter().filter(|axis| axis.is_rotation())
    }
}

/// One value per axis, indexed by [`Axis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerAxis<T>(pub [T; Axis::COUNT]);

impl<T> PerAxis<T> {
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        let mut axes = Axis::iter();
        Self(std::array::from_fn(|_| {
            // EnumIter yields exactly COUNT variants in declaration order
            let axis = axes.next().unwrap_or(Axis::Roll);
            f(axis)
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Axis, &mut T)> {
        Axis::iter().zip(self.0.iter_mut())
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.0[axis.index()]
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis.index()]
    }
}
