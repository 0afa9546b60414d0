use glam::{DMat4, DQuat, DVec3, EulerRot, UVec2};

/// Which parts of the camera a reset restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Orientation, position and zoom.
    View,
    /// Everything, including the per-axis scale.
    All,
}

/// The calls the input mapper and window issue against a camera.
///
/// Kept as a trait so the mapping can be driven against a recording double
/// in tests; [`Camera`] is the only production implementation.
pub trait CameraControl {
    /// Resize the viewport the camera projects into (pixels).
    fn set_viewport_bounds(&mut self, size: UVec2);

    /// Rotate the viewpoint by the given yaw / pitch / roll, in degrees.
    fn delta_viewpoint(&mut self, yaw_deg: f64, pitch_deg: f64, roll_deg: f64);

    /// Translate the camera by `offset` in world space.
    fn offset_position_world(&mut self, offset: DVec3);

    /// Multiply the viewpoint (zoom) scale per axis.
    fn scale_viewpoint(&mut self, sx: f64, sy: f64, sz: f64);

    /// Replace the per-axis world scale.
    fn set_scale(&mut self, scale: DVec3);

    fn scale(&self) -> DVec3;
}

/// Orbit-style camera used by the viewer scenes.
///
/// The camera looks at `position` from `ORBIT_DISTANCE` units away along
/// its rotated +Z axis; the distance is multiplied by the Z viewpoint scale,
/// so zooming moves the eye without touching the target.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- view parameters --------------------------------------------------
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
    pub position: DVec3,
    pub scale: DVec3,
    pub viewpoint_scale: DVec3,
    // --- projection parameters --------------------------------------------
    pub viewport: UVec2,
    pub fovy_deg: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Camera {
    pub const ORBIT_DISTANCE: f64 = 5.0;

    pub fn new(viewport: UVec2) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Restore the defaults selected by `kind`.  The viewport is kept.
    pub fn reset(&mut self, kind: ResetKind) {
        let fresh = Camera::new(self.viewport);
        let scale = self.scale;
        *self = fresh;
        if kind == ResetKind::View {
            self.scale = scale;
        }
    }

    pub fn orientation(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::YXZ,
            self.yaw_deg.to_radians(),
            self.pitch_deg.to_radians(),
            self.roll_deg.to_radians(),
        )
    }

    /// World-space eye position.
    pub fn eye(&self) -> DVec3 {
        let distance = Self::ORBIT_DISTANCE * self.viewpoint_scale.z;
        self.position + self.orientation() * DVec3::new(0.0, 0.0, distance)
    }

    /// Width / height of the viewport, or 1.0 before the first resize.
    pub fn aspect(&self) -> f64 {
        if self.viewport.y == 0 {
            1.0
        } else {
            self.viewport.x as f64 / self.viewport.y as f64
        }
    }

    /// World-to-view matrix, with the per-axis scale applied to the scene.
    pub fn view_matrix(&self) -> DMat4 {
        let up = self.orientation() * DVec3::Y;
        DMat4::look_at_rh(self.eye(), self.position, up) * DMat4::from_scale(self.scale)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        let squash = DMat4::from_scale(DVec3::new(
            self.viewpoint_scale.x,
            self.viewpoint_scale.y,
            1.0,
        ));
        squash
            * DMat4::perspective_rh(
                self.fovy_deg.to_radians(),
                self.aspect(),
                self.znear,
                self.zfar,
            )
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            position: DVec3::ZERO,
            scale: DVec3::ONE,
            viewpoint_scale: DVec3::ONE,
            viewport: UVec2::ZERO,
            fovy_deg: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraControl for Camera {
    fn set_viewport_bounds(&mut self, size: UVec2) {
        self.viewport = size;
    }

    fn delta_viewpoint(&mut self, yaw_deg: f64, pitch_deg: f64, roll_deg: f64) {
        self.yaw_deg += yaw_deg;
        self.pitch_deg += pitch_deg;
        self.roll_deg += roll_deg;
    }

    fn offset_position_world(&mut self, offset: DVec3) {
        self.position += offset;
    }

    fn scale_viewpoint(&mut self, sx: f64, sy: f64, sz: f64) {
        self.viewpoint_scale *= DVec3::new(sx, sy, sz);
    }

    fn set_scale(&mut self, scale: DVec3) {
        self.scale = scale;
    }

    fn scale(&self) -> DVec3 {
        self.scale
    }
}
