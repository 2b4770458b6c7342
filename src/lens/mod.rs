//! The radial lens distortion kernel.

pub mod warp;
