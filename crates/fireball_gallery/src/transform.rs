//! Transform calculator
//!
//! World objects get `projection * view * translate(position) * scale`. The
//! crosshair is the exception: it is drawn in screen space with the bare
//! model matrix and ignores the camera.

use gallery_engine::foundation::math::{Mat4, Mat4Ext, Point3};
use gallery_engine::render::RenderBackend;

use crate::renderable::RenderableObject;

/// Builds and uploads MVP matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformCalculator {
    base_scale: f32,
}

impl TransformCalculator {
    /// Create a calculator applying `base_scale` to every model
    pub fn new(base_scale: f32) -> Self {
        Self { base_scale }
    }

    /// Model matrix placing an object at `position`
    pub fn model_matrix(&self, position: &Point3) -> Mat4 {
        Mat4::translation_scale(&position.coords, self.base_scale)
    }

    /// Full model-view-projection matrix
    pub fn mvp(&self, position: &Point3, projection: &Mat4, view: &Mat4) -> Mat4 {
        projection * view * self.model_matrix(position)
    }

    /// Bind the object's program and upload its world-space MVP
    pub fn apply<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        object: &RenderableObject,
        position: &Point3,
        projection: &Mat4,
        view: &Mat4,
    ) {
        backend.use_program(object.program);
        backend.set_matrix(object.mvp_location, &self.mvp(position, projection, view));
    }

    /// Bind the object's program and upload the bare model matrix
    pub fn apply_screen_space<B: RenderBackend + ?Sized>(&self, backend: &mut B, object: &RenderableObject, position: &Point3) {
        backend.use_program(object.program);
        backend.set_matrix(object.mvp_location, &self.model_matrix(position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dummy_renderable, RecordingBackend};
    use approx::assert_relative_eq;
    use gallery_engine::foundation::math::{Vec3, Vec4};

    #[test]
    fn test_model_translates_then_scales() {
        let transform = TransformCalculator::new(0.7);
        let model = transform.model_matrix(&Point3::new(1.0, 2.0, 3.0));

        let corner = model.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(corner, Point3::new(1.7, 2.7, 3.7), epsilon = 1e-6);
    }

    #[test]
    fn test_mvp_composes_projection_view_model() {
        let transform = TransformCalculator::new(0.7);
        let projection = Mat4::perspective(std::f32::consts::FRAC_PI_4, 4.0 / 3.0, 0.1, 100.0);
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y());
        let position = Point3::new(-2.0, 1.0, 0.5);

        let expected = projection * view * transform.model_matrix(&position);
        assert_relative_eq!(transform.mvp(&position, &projection, &view), expected);
    }

    #[test]
    fn test_object_at_aim_point_lands_in_screen_centre() {
        let transform = TransformCalculator::new(0.7);
        let projection = Mat4::perspective(std::f32::consts::FRAC_PI_4, 4.0 / 3.0, 0.1, 100.0);
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y());

        let clip = transform.mvp(&Point3::origin(), &projection, &view) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_apply_binds_program_and_uploads_mvp() {
        let mut backend = RecordingBackend::new();
        let object = dummy_renderable(7);
        let transform = TransformCalculator::new(0.7);
        let projection = Mat4::new_scaling(2.0);
        let view = Mat4::identity();
        let position = Point3::new(0.0, 0.0, -3.0);

        transform.apply(&mut backend, &object, &position, &projection, &view);

        assert_eq!(backend.bound_programs, vec![object.program]);
        assert_eq!(backend.matrices.len(), 1);
        assert_eq!(backend.matrices[0].0, object.mvp_location);
        assert_relative_eq!(backend.matrices[0].1, transform.mvp(&position, &projection, &view));
    }

    #[test]
    fn test_screen_space_ignores_camera() {
        let mut backend = RecordingBackend::new();
        let object = dummy_renderable(1);
        let transform = TransformCalculator::new(0.7);

        transform.apply_screen_space(&mut backend, &object, &Point3::origin());

        assert_relative_eq!(backend.matrices[0].1, Mat4::new_scaling(0.7));
    }
}
