use crate::cache::Cached;
use crate::config::CameraConfig;
use glam::{Mat4, Vec3};

/// Width over height, guarding against a zero-height surface.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Model rotation for the given (x, y, z) angles: `Rz * Ry * Rx`, so X is
/// applied first and Z last.
pub fn model_matrix(orientation: Vec3) -> Mat4 {
    Mat4::from_rotation_z(orientation.z)
        * Mat4::from_rotation_y(orientation.y)
        * Mat4::from_rotation_x(orientation.x)
}

/// Immutable camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub distance: f32,
    pub field_of_view: f32,
    pub near: f32,
    pub far: f32,
}

impl From<CameraConfig> for CameraState {
    fn from(c: CameraConfig) -> Self {
        Self {
            distance: c.distance,
            field_of_view: c.field_of_view,
            near: c.near,
            far: c.far,
        }
    }
}

impl CameraState {
    /// Camera sits on +Z looking down -Z at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }

    /// Right-handed perspective with depth mapped to [0, 1].
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.field_of_view, aspect, self.near, self.far)
    }
}

/// Builds the per-frame model-view-projection matrix.
///
/// The view matrix is computed once. The projection is cached against the
/// computed aspect ratio (not raw dimensions) and rebuilt when that changes or
/// after [`MvpBuilder::invalidate_projection`].
#[derive(Debug, Clone)]
pub struct MvpBuilder {
    camera: CameraState,
    view: Mat4,
    projection: Cached<Mat4>,
    cached_aspect: Option<f32>,
    projection_recomputes: u64,
}

impl MvpBuilder {
    pub fn new(camera: impl Into<CameraState>) -> Self {
        let camera = camera.into();
        Self {
            view: camera.view_matrix(),
            camera,
            projection: Cached::new(),
            cached_aspect: None,
            projection_recomputes: 0,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Aspect ratio the cached projection was built for, if any.
    pub fn cached_aspect(&self) -> Option<f32> {
        self.cached_aspect
    }

    /// How many times the projection has been (re)built.
    pub fn projection_recompute_count(&self) -> u64 {
        self.projection_recomputes
    }

    /// Force the next build to recompute the projection. Called on resize.
    pub fn invalidate_projection(&mut self) {
        self.projection.invalidate();
        self.cached_aspect = None;
    }

    /// Projection for a surface of the given pixel size, reusing the cache when
    /// the aspect ratio is unchanged.
    pub fn projection(&mut self, width: u32, height: u32) -> Mat4 {
        let aspect = aspect_ratio(width, height);
        if self.cached_aspect != Some(aspect) {
            self.projection.invalidate();
        }

        let camera = self.camera;
        let recomputes = &mut self.projection_recomputes;
        let projection = *self.projection.get_or_update(|| {
            *recomputes += 1;
            tracing::debug!(aspect, "rebuilding projection matrix");
            camera.projection_matrix(aspect)
        });
        self.cached_aspect = Some(aspect);
        projection
    }

    /// `projection * view * model` for the given surface size and orientation.
    pub fn build_mvp(&mut self, width: u32, height: u32, orientation: Vec3) -> Mat4 {
        let projection = self.projection(width, height);
        projection * self.view * model_matrix(orientation)
    }
}
