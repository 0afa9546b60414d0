use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::mask::{AxisModifier, ButtonMask, PointerButton};
use crate::camera::CameraControl;

/// Gains applied to pointer deltas.
///
/// The defaults give the viewer's usual feel; a config file may override
/// any of them.
///
/// ```rust,ignore
/// let settings = MapperSettings { rotate_gain: 0.2, ..Default::default() };
/// let mapper = InputMapper::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperSettings {
    /// Degrees of rotation per pixel of left-drag.
    ///
    /// Default: `0.1`
    pub rotate_gain: f64,

    /// World units of pan per pixel of vertical left-drag.
    ///
    /// Default: `0.1`
    pub pan_gain: f64,

    /// Scale change per pixel of vertical right-drag.  A drag of `dy`
    /// multiplies by `1.0 + dy * scale_gain`.
    ///
    /// Default: `0.005`
    pub scale_gain: f64,
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            rotate_gain: 0.1,
            pan_gain: 0.1,
            scale_gain: 0.005,
        }
    }
}

/// Turns pointer drags into camera manipulation.
///
/// Which operation a move performs is decided from the two masks at the
/// moment of the move:
///
/// | Mouse | Modifiers | Operation                                  |
/// |-------|-----------|--------------------------------------------|
/// | left  | none      | rotate (`delta_viewpoint`)                 |
/// | left  | any       | pan the selected axes (`offset_position_world`) |
/// | right | none      | zoom (`scale_viewpoint`, Z only)           |
/// | right | any       | scale the selected axes (`set_scale`)      |
///
/// Left wins when both buttons are held.  Only the vertical component of
/// the delta feeds pan and scale.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    mouse: ButtonMask<PointerButton>,
    modifiers: ButtonMask<AxisModifier>,
    last_position: DVec2,
    settings: MapperSettings,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: MapperSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &MapperSettings {
        &self.settings
    }

    pub fn mouse_mask(&self) -> ButtonMask<PointerButton> {
        self.mouse
    }

    pub fn modifier_mask(&self) -> ButtonMask<AxisModifier> {
        self.modifiers
    }

    pub fn last_position(&self) -> DVec2 {
        self.last_position
    }

    /// Press or release of a mouse button.  Untracked buttons are ignored.
    pub fn on_button_change(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button) = PointerButton::from_mouse(button) {
            self.mouse.update(button, pressed);
        }
    }

    /// Press or release of an axis-selector key.  Any other key is ignored.
    pub fn on_modifier_key_change(&mut self, key: KeyCode, pressed: bool) {
        if let Some(modifier) = AxisModifier::from_key(key) {
            self.modifiers.update(modifier, pressed);
        }
    }

    /// Cursor moved to `position`; applies the drag to `camera`.
    pub fn on_pointer_move<C: CameraControl + ?Sized>(&mut self, position: DVec2, camera: &mut C) {
        let delta = position - self.last_position;

        if self.mouse.contains(PointerButton::Left) {
            if self.modifiers.is_empty() {
                self.rotate(delta, camera);
            } else {
                self.pan(delta, camera);
            }
        } else if self.mouse.contains(PointerButton::Right) {
            if self.modifiers.is_empty() {
                self.zoom(delta, camera);
            } else {
                self.scale_axes(delta, camera);
            }
        }

        self.last_position = position;
    }

    /// Scroll wheel input does not drive the camera.
    pub fn on_scroll(&mut self, _offset: DVec2) {}

    fn rotate<C: CameraControl + ?Sized>(&self, delta: DVec2, camera: &mut C) {
        let delta = delta * self.settings.rotate_gain;
        camera.delta_viewpoint(-delta.x, delta.y, 0.0);
    }

    fn pan<C: CameraControl + ?Sized>(&self, delta: DVec2, camera: &mut C) {
        let mut offset = DVec3::ZERO;
        for modifier in self.held_modifiers() {
            offset[modifier.axis()] = delta.y * self.settings.pan_gain;
        }
        camera.offset_position_world(offset);
    }

    fn zoom<C: CameraControl + ?Sized>(&self, delta: DVec2, camera: &mut C) {
        camera.scale_viewpoint(1.0, 1.0, self.scale_factor(delta));
    }

    fn scale_axes<C: CameraControl + ?Sized>(&self, delta: DVec2, camera: &mut C) {
        let factor = self.scale_factor(delta);
        let mut scale = camera.scale();
        for modifier in self.held_modifiers() {
            scale[modifier.axis()] *= factor;
        }
        camera.set_scale(scale);
    }

    #[inline]
    fn scale_factor(&self, delta: DVec2) -> f64 {
        1.0 + delta.y * self.settings.scale_gain
    }

    fn held_modifiers(&self) -> impl Iterator<Item = AxisModifier> + '_ {
        AxisModifier::ALL
            .into_iter()
            .filter(|m| self.modifiers.contains(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Viewport(UVec2),
        Delta(f64, f64, f64),
        Offset(DVec3),
        ScaleViewpoint(f64, f64, f64),
        SetScale(DVec3),
    }

    #[derive(Default)]
    struct RecordingCamera {
        calls: Vec<Call>,
        scale: DVec3,
    }

    impl RecordingCamera {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                scale: DVec3::ONE,
            }
        }
    }

    impl CameraControl for RecordingCamera {
        fn set_viewport_bounds(&mut self, size: UVec2) {
            self.calls.push(Call::Viewport(size));
        }
        fn delta_viewpoint(&mut self, yaw: f64, pitch: f64, roll: f64) {
            self.calls.push(Call::Delta(yaw, pitch, roll));
        }
        fn offset_position_world(&mut self, offset: DVec3) {
            self.calls.push(Call::Offset(offset));
        }
        fn scale_viewpoint(&mut self, sx: f64, sy: f64, sz: f64) {
            self.calls.push(Call::ScaleViewpoint(sx, sy, sz));
        }
        fn set_scale(&mut self, scale: DVec3) {
            self.scale = scale;
            self.calls.push(Call::SetScale(scale));
        }
        fn scale(&self) -> DVec3 {
            self.scale
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn approx_vec(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn move_without_buttons_only_records_position() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_pointer_move(DVec2::new(12.0, 7.0), &mut cam);
        assert!(cam.calls.is_empty());
        assert_eq!(mapper.last_position(), DVec2::new(12.0, 7.0));
    }

    #[test]
    fn left_drag_rotates() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_pointer_move(DVec2::new(10.0, -20.0), &mut cam);

        match cam.calls.as_slice() {
            [Call::Delta(yaw, pitch, roll)] => {
                assert!(approx(*yaw, -1.0));
                assert!(approx(*pitch, -2.0));
                assert_eq!(*roll, 0.0);
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn left_drag_with_modifiers_pans_selected_axes() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_modifier_key_change(KeyCode::KeyV, true);
        mapper.on_pointer_move(DVec2::new(0.0, 10.0), &mut cam);

        mapper.on_modifier_key_change(KeyCode::KeyN, true);
        mapper.on_pointer_move(DVec2::new(0.0, 0.0), &mut cam);
        mapper.on_pointer_move(DVec2::new(0.0, 10.0), &mut cam);

        let offsets: Vec<DVec3> = cam
            .calls
            .iter()
            .map(|c| match c {
                Call::Offset(o) => *o,
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        assert_eq!(offsets.len(), 3);
        assert!(approx_vec(offsets[0], DVec3::new(1.0, 0.0, 0.0)));
        assert!(approx_vec(offsets[2], DVec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn pan_ignores_horizontal_motion() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_modifier_key_change(KeyCode::KeyB, true);
        mapper.on_pointer_move(DVec2::new(50.0, 0.0), &mut cam);
        assert_eq!(cam.calls, vec![Call::Offset(DVec3::ZERO)]);
    }

    #[test]
    fn right_drag_zooms_on_z_only() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Right, true);
        mapper.on_pointer_move(DVec2::new(0.0, 100.0), &mut cam);

        match cam.calls.as_slice() {
            [Call::ScaleViewpoint(sx, sy, sz)] => {
                assert_eq!((*sx, *sy), (1.0, 1.0));
                assert!(approx(*sz, 1.5));
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn right_drag_with_modifiers_scales_selected_axes() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        cam.scale = DVec3::new(2.0, 3.0, 4.0);
        mapper.on_button_change(MouseButton::Right, true);
        mapper.on_modifier_key_change(KeyCode::KeyN, true);
        mapper.on_modifier_key_change(KeyCode::KeyB, true);
        mapper.on_pointer_move(DVec2::new(0.0, 100.0), &mut cam);

        assert_eq!(cam.calls.len(), 1);
        assert!(approx_vec(cam.scale, DVec3::new(2.0, 4.5, 6.0)));
    }

    #[test]
    fn left_takes_precedence_over_right() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Right, true);
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_pointer_move(DVec2::new(4.0, 4.0), &mut cam);
        assert!(matches!(cam.calls.as_slice(), [Call::Delta(..)]));

        mapper.on_modifier_key_change(KeyCode::KeyV, true);
        mapper.on_pointer_move(DVec2::new(4.0, 8.0), &mut cam);
        assert!(matches!(cam.calls.last(), Some(Call::Offset(_))));
        assert!(!cam
            .calls
            .iter()
            .any(|c| matches!(c, Call::ScaleViewpoint(..) | Call::SetScale(_))));
    }

    #[test]
    fn zero_delta_still_calls_camera() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_pointer_move(DVec2::ZERO, &mut cam);
        mapper.on_button_change(MouseButton::Left, false);
        mapper.on_button_change(MouseButton::Right, true);
        mapper.on_pointer_move(DVec2::ZERO, &mut cam);

        assert_eq!(
            cam.calls,
            vec![
                Call::Delta(-0.0, 0.0, 0.0),
                Call::ScaleViewpoint(1.0, 1.0, 1.0),
            ]
        );
    }

    #[test]
    fn middle_button_alone_does_nothing_but_tracks_position() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Middle, true);
        assert!(!mapper.mouse_mask().is_empty());
        mapper.on_pointer_move(DVec2::new(3.0, 9.0), &mut cam);
        assert!(cam.calls.is_empty());
        assert_eq!(mapper.last_position(), DVec2::new(3.0, 9.0));
    }

    #[test]
    fn position_updates_after_every_branch() {
        let mut mapper = InputMapper::new();
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_pointer_move(DVec2::new(10.0, 0.0), &mut cam);
        mapper.on_pointer_move(DVec2::new(20.0, 0.0), &mut cam);
        // second move only sees the 10px step since the first one
        assert_eq!(cam.calls[1], Call::Delta(-1.0, 0.0, 0.0));
        assert_eq!(mapper.last_position(), DVec2::new(20.0, 0.0));
    }

    #[test]
    fn unknown_buttons_and_keys_are_ignored() {
        let mut mapper = InputMapper::new();
        mapper.on_button_change(MouseButton::Back, true);
        mapper.on_modifier_key_change(KeyCode::KeyQ, true);
        assert!(mapper.mouse_mask().is_empty());
        assert!(mapper.modifier_mask().is_empty());
    }

    #[test]
    fn custom_gains_are_used() {
        let mut mapper = InputMapper::with_settings(MapperSettings {
            rotate_gain: 1.0,
            ..Default::default()
        });
        let mut cam = RecordingCamera::new();
        mapper.on_button_change(MouseButton::Left, true);
        mapper.on_pointer_move(DVec2::new(2.0, 3.0), &mut cam);
        assert_eq!(cam.calls, vec![Call::Delta(-2.0, 3.0, 0.0)]);
    }
}
