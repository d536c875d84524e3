//! Pose with a cached absolute (world-space) transform
//!
//! The absolute scale and rotation-translation are written at re-parent
//! events only. Changing an ancestor's pose afterwards leaves every
//! descendant's cache stale until it is explicitly re-synced; readers get
//! their world matrix in O(1) without walking the hierarchy.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::transform::{decompose_euler, translation_of, EulerTransform};
use crate::{Result, SpatialError};

/// Local pose plus cached world-space scale and rotation-translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelatedTransform {
    local: EulerTransform,
    abs_scale: Vec3,
    abs_rotation_translation: Mat4,
    parented: bool,
}

impl Default for RelatedTransform {
    fn default() -> Self {
        Self::new(EulerTransform::default())
    }
}

impl From<EulerTransform> for RelatedTransform {
    fn from(local: EulerTransform) -> Self {
        Self::new(local)
    }
}

impl RelatedTransform {
    /// Root transform: the absolute fields mirror the local pose
    pub fn new(local: EulerTransform) -> Self {
        let mut transform = Self {
            local,
            abs_scale: Vec3::new(1.0, 1.0, 1.0),
            abs_rotation_translation: Mat4::identity(),
            parented: false,
        };
        transform.sync_root();
        transform
    }

    /// The local (parent-relative) pose
    pub fn local(&self) -> &EulerTransform {
        &self.local
    }

    /// Whether a re-parent has attached this transform under another
    pub fn is_parented(&self) -> bool {
        self.parented
    }

    /// Edit the local pose
    ///
    /// While the transform has never been parented the absolute fields are
    /// refreshed afterwards, so a root always reports its own pose. Once
    /// parented, edits stay local until the next [`Self::on_reparent`].
    pub fn modify<R>(&mut self, edit: impl FnOnce(&mut EulerTransform) -> R) -> R {
        let result = edit(&mut self.local);
        if !self.parented {
            self.sync_root();
        }
        result
    }

    /// Recompose the absolute fields after a topology change
    ///
    /// `old_parent` is the parent the node had before this move, `None` if it
    /// had none. Scale is divided out and in component-wise; the
    /// rotation-translation reads left to right as "local transform, undo the
    /// stale parent, apply the new parent".
    pub fn on_reparent(
        &mut self,
        new_parent: &RelatedTransform,
        old_parent: Option<&RelatedTransform>,
    ) -> Result<()> {
        let (undo_scale, undo_rotation_translation) = match old_parent {
            Some(old) => {
                if old.abs_scale.iter().any(|s| *s == 0.0) {
                    return Err(SpatialError::SingularMatrix("old parent absolute scale"));
                }
                let inverse = old
                    .abs_rotation_translation
                    .try_inverse()
                    .ok_or(SpatialError::SingularMatrix("old parent rotation-translation"))?;
                (old.abs_scale.map(|s| 1.0 / s), inverse)
            }
            None => (Vec3::new(1.0, 1.0, 1.0), Mat4::identity()),
        };

        self.abs_scale = self
            .local
            .scale()
            .component_mul(&undo_scale)
            .component_mul(&new_parent.abs_scale);
        self.abs_rotation_translation = self.local.rotation_translation_matrix()
            * undo_rotation_translation
            * new_parent.abs_rotation_translation;
        self.parented = true;

        log::trace!(
            "Re-parented transform: abs scale {:?}, abs position {:?}",
            self.abs_scale,
            self.abs_position()
        );
        Ok(())
    }

    /// Turn back into a root; the absolute fields mirror the local pose again
    pub fn detach(&mut self) {
        self.parented = false;
        self.sync_root();
    }

    fn sync_root(&mut self) {
        self.abs_scale = self.local.scale();
        self.abs_rotation_translation = self.local.rotation_translation_matrix();
    }

    // ------------------------------------------------------------------
    // Absolute getters
    // ------------------------------------------------------------------

    /// World-space scale
    pub fn abs_scale(&self) -> Vec3 {
        self.abs_scale
    }

    /// World-space rotation followed by translation
    pub fn abs_rotation_translation_matrix(&self) -> Mat4 {
        self.abs_rotation_translation
    }

    /// World-space Euler angles
    pub fn abs_rotation(&self) -> Vec3 {
        decompose_euler(&self.abs_rotation_translation)
    }

    /// World-space position
    pub fn abs_position(&self) -> Vec3 {
        translation_of(&self.abs_rotation_translation)
    }

    /// World-space X axis
    pub fn abs_right_axis(&self) -> Vec3 {
        self.abs_rotation_translation.row3(0)
    }

    /// World-space Y axis
    pub fn abs_up_axis(&self) -> Vec3 {
        self.abs_rotation_translation.row3(1)
    }

    /// World-space Z axis
    pub fn abs_forward_axis(&self) -> Vec3 {
        self.abs_rotation_translation.row3(2)
    }

    /// World matrix handed to the renderer
    pub fn abs_local_to_world_matrix(&self) -> Mat4 {
        Mat4::scaling(&self.abs_scale) * self.abs_rotation_translation
    }

    /// Inverse of [`Self::abs_local_to_world_matrix`]
    pub fn abs_world_to_local_matrix(&self) -> Result<Mat4> {
        self.abs_local_to_world_matrix()
            .try_inverse()
            .ok_or(SpatialError::SingularMatrix("absolute local-to-world"))
    }
}
