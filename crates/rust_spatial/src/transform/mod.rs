//! Object placement: local Euler poses and cached world transforms
//!
//! - [`EulerTransform`]: parent-relative scale / rotation / position
//! - [`RelatedTransform`]: the same pose plus an absolute transform that is
//!   recomposed at re-parent events

pub mod euler;
pub mod related;

pub use euler::{decompose_euler, translation_of, EulerTransform};
pub use related::RelatedTransform;
