//! Per-frame input snapshot and the controller that turns it into camera
//! movement and scene edits.
//!
//! The host samples its window once per frame and fills an [`InputState`].
//! [`Controller::apply`] is then called on the main thread, between frames,
//! so the renderer never sees a half-applied edit.

use std::collections::HashSet;
use std::f64::consts::PI;

use glint_math::{normalize, Vec3};

use crate::{Camera, Rgb, Scene};

/// Keys the controller reacts to. Hosts map their own key codes onto these
/// and drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Shift,
    Q,
    E,
    Up,
    Down,
    Left,
    Right,
    R,
    T,
    P,
    J,
    L,
    Escape,
}

/// Everything the controller needs to know about one frame of input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Keys currently held down (continuous actions)
    pub held: HashSet<Key>,
    /// Keys that went down this frame (one-shot actions)
    pub pressed: HashSet<Key>,
    /// Mouse movement since the previous frame, in pixels
    pub mouse_delta: (f64, f64),
    /// Seconds since the previous frame
    pub dt: f64,
}

impl InputState {
    /// An empty snapshot covering `dt` seconds.
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    /// Mark a key as held (builder style).
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Mark a key as pressed this frame (builder style).
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.insert(key);
        self
    }

    /// Set the mouse delta (builder style).
    pub fn with_mouse_delta(mut self, dx: f64, dy: f64) -> Self {
        self.mouse_delta = (dx, dy);
        self
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

/// Movement and look tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// World units per second for walking and flying
    pub move_speed: f64,
    /// Radians per pixel of mouse travel, in units of pi
    pub mouse_sensitivity: f64,
    /// Radians per second for keyboard turning
    pub rotate_speed: f64,
    /// Sphere spawned by `J`
    pub spawn_color: Rgb,
    pub spawn_radius: u32,
    pub spawn_specular: Option<u32>,
    pub spawn_reflectivity: f64,
    /// Intensity of the point light spawned by `L`
    pub spawn_light_intensity: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 0.001,
            rotate_speed: 1.5,
            spawn_color: Rgb::PURPLE,
            spawn_radius: 2,
            spawn_specular: Some(600),
            spawn_reflectivity: 0.1,
            spawn_light_intensity: 0.5,
        }
    }
}

impl ControlConfig {
    /// Set movement speed.
    pub fn with_move_speed(mut self, move_speed: f64) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Set mouse sensitivity.
    pub fn with_mouse_sensitivity(mut self, sensitivity: f64) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }
}

/// Applies input snapshots to the camera and scene.
#[derive(Debug, Clone)]
pub struct Controller {
    config: ControlConfig,
    cursor_locked: bool,
}

impl Controller {
    /// Create a controller. The cursor starts locked, so mouse-look is live.
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            cursor_locked: true,
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Whether mouse-look is active. Hosts hide the cursor while this is set.
    pub fn cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Apply one frame of input.
    pub fn apply(&mut self, input: &InputState, camera: &mut Camera, scene: &mut Scene) {
        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };

        if input.was_pressed(Key::Escape) {
            self.cursor_locked = !self.cursor_locked;
            log::info!(
                "Cursor {}",
                if self.cursor_locked { "locked" } else { "released" }
            );
        }

        // Resets first so movement this frame starts from the reset state.
        if input.was_pressed(Key::R) {
            camera.reset();
            log::info!("Camera reset to origin");
        } else if input.was_pressed(Key::T) {
            camera.reset_rotation();
            log::info!("Camera rotation reset");
        }
        if input.was_pressed(Key::P) {
            camera.flip_yaw();
        }

        self.apply_look(input, dt, camera);
        self.apply_movement(input, dt, camera);

        if input.was_pressed(Key::J) {
            let c = &self.config;
            match scene.add_sphere(
                camera.position,
                c.spawn_color,
                c.spawn_radius,
                c.spawn_specular,
                c.spawn_reflectivity,
            ) {
                Ok(_) => log::info!(
                    "Spawned sphere at {:?} ({} spheres)",
                    camera.position,
                    scene.len()
                ),
                Err(e) => log::warn!("Could not spawn sphere: {}", e),
            }
        }
        if input.was_pressed(Key::L) {
            match scene
                .lights
                .add_point(camera.position, self.config.spawn_light_intensity)
            {
                Ok(()) => log::info!(
                    "Spawned point light at {:?} ({} point lights)",
                    camera.position,
                    scene.lights.point().len()
                ),
                Err(e) => log::warn!("Could not spawn light: {}", e),
            }
        }
    }

    fn apply_look(&self, input: &InputState, dt: f64, camera: &mut Camera) {
        let mut d_pitch = 0.0;
        let mut d_yaw = 0.0;
        let mut d_roll = 0.0;

        if self.cursor_locked {
            let (dx, dy) = input.mouse_delta;
            if dx.is_finite() && dy.is_finite() {
                d_yaw += dx * self.config.mouse_sensitivity * PI;
                d_pitch += dy * self.config.mouse_sensitivity * PI;
            }
        }

        let step = self.config.rotate_speed * dt;
        if input.is_held(Key::Q) {
            d_yaw -= step;
        }
        if input.is_held(Key::E) {
            d_yaw += step;
        }
        if input.is_held(Key::Up) {
            d_pitch -= step;
        }
        if input.is_held(Key::Down) {
            d_pitch += step;
        }
        if input.is_held(Key::Left) {
            d_roll -= step;
        }
        if input.is_held(Key::Right) {
            d_roll += step;
        }

        if d_pitch != 0.0 || d_yaw != 0.0 || d_roll != 0.0 {
            camera.rotate(d_pitch, d_yaw, d_roll);
        }
    }

    fn apply_movement(&self, input: &InputState, dt: f64, camera: &mut Camera) {
        let (right, forward) = camera.walk_basis();
        let mut walk = Vec3::ZERO;
        if input.is_held(Key::W) {
            walk += forward;
        }
        if input.is_held(Key::S) {
            walk -= forward;
        }
        if input.is_held(Key::D) {
            walk += right;
        }
        if input.is_held(Key::A) {
            walk -= right;
        }

        let step = self.config.move_speed * dt;
        // Opposite keys cancel to zero, which must not be normalized.
        if walk.length_squared() > 1e-12 {
            camera.position += normalize(walk) * step;
        }

        if input.is_held(Key::Space) {
            camera.position.y += step;
        }
        if input.is_held(Key::Shift) {
            camera.position.y -= step;
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-9
    }

    fn setup() -> (Controller, Camera, Scene) {
        (Controller::default(), Camera::default(), Scene::new())
    }

    #[test]
    fn test_walk_forward() {
        let (mut controller, mut camera, mut scene) = setup();
        controller.apply(&InputState::new(0.5).hold(Key::W), &mut camera, &mut scene);
        assert!(close(camera.position, Vec3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn test_diagonal_walk_is_not_faster() {
        let (mut controller, mut camera, mut scene) = setup();
        let input = InputState::new(1.0).hold(Key::W).hold(Key::D);
        controller.apply(&input, &mut camera, &mut scene);
        assert!((camera.position.length() - 5.0).abs() < 1e-9);
        assert!(camera.position.x > 0.0 && camera.position.z > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let (mut controller, mut camera, mut scene) = setup();
        let input = InputState::new(1.0).hold(Key::W).hold(Key::S).hold(Key::A).hold(Key::D);
        controller.apply(&input, &mut camera, &mut scene);
        assert_eq!(camera.position, Vec3::ZERO);
    }

    #[test]
    fn test_walk_stays_horizontal_when_pitched() {
        let (mut controller, _, mut scene) = setup();
        let mut camera = Camera::default().with_rotation(1.0, FRAC_PI_2, 0.0);
        controller.apply(&InputState::new(1.0).hold(Key::W), &mut camera, &mut scene);
        assert!(close(camera.position, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_fly_up_and_down() {
        let (mut controller, mut camera, mut scene) = setup();
        controller.apply(&InputState::new(0.2).hold(Key::Space), &mut camera, &mut scene);
        assert!(close(camera.position, Vec3::new(0.0, 1.0, 0.0)));
        controller.apply(&InputState::new(0.4).hold(Key::Shift), &mut camera, &mut scene);
        assert!(close(camera.position, Vec3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_mouse_look() {
        let (mut controller, mut camera, mut scene) = setup();
        let input = InputState::new(0.0).with_mouse_delta(100.0, 50.0);
        controller.apply(&input, &mut camera, &mut scene);
        assert!((camera.yaw() - 0.1 * PI).abs() < 1e-12);
        assert!((camera.pitch() - 0.05 * PI).abs() < 1e-12);
        assert_eq!(*camera.rotation(), glint_math::euler_rotation(0.0, camera.yaw(), camera.pitch()));
    }

    #[test]
    fn test_tuned_speed_and_sensitivity() {
        let config = ControlConfig::default()
            .with_move_speed(2.0)
            .with_mouse_sensitivity(0.002);
        let mut controller = Controller::new(config);
        let (_, mut camera, mut scene) = setup();

        let input = InputState::new(0.5).hold(Key::W).with_mouse_delta(100.0, 0.0);
        controller.apply(&input, &mut camera, &mut scene);
        assert!((camera.yaw() - 0.2 * PI).abs() < 1e-12);
        // Movement uses the yaw already applied this frame
        assert!((camera.position.length() - 1.0).abs() < 1e-12);
        assert_eq!(camera.position.y, 0.0);
    }

    #[test]
    fn test_escape_toggles_mouse_look() {
        let (mut controller, mut camera, mut scene) = setup();
        assert!(controller.cursor_locked());

        let input = InputState::new(0.0).press(Key::Escape).with_mouse_delta(100.0, 0.0);
        controller.apply(&input, &mut camera, &mut scene);
        assert!(!controller.cursor_locked());
        assert_eq!(camera.yaw(), 0.0);

        controller.apply(&InputState::new(0.0).press(Key::Escape), &mut camera, &mut scene);
        assert!(controller.cursor_locked());
    }

    #[test]
    fn test_keyboard_turning() {
        let (mut controller, mut camera, mut scene) = setup();
        controller.apply(&InputState::new(1.0).hold(Key::E), &mut camera, &mut scene);
        assert!((camera.yaw() - 1.5).abs() < 1e-12);
        controller.apply(&InputState::new(1.0).hold(Key::Right), &mut camera, &mut scene);
        assert!((camera.roll() - 1.5).abs() < 1e-12);
        controller.apply(&InputState::new(1.0).hold(Key::Down), &mut camera, &mut scene);
        assert!((camera.pitch() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_reset_keys() {
        let (mut controller, _, mut scene) = setup();
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0)).with_rotation(0.5, 0.5, 0.5);

        controller.apply(&InputState::new(0.0).press(Key::T), &mut camera, &mut scene);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!((camera.pitch(), camera.yaw(), camera.roll()), (0.0, 0.0, 0.0));

        let mut camera = camera.with_rotation(0.5, 0.5, 0.5);
        controller.apply(&InputState::new(0.0).press(Key::R), &mut camera, &mut scene);
        assert_eq!(camera.position, Vec3::ZERO);
        assert_eq!(*camera.rotation(), glint_math::Mat3::IDENTITY);
    }

    #[test]
    fn test_flip_key() {
        let (mut controller, mut camera, mut scene) = setup();
        controller.apply(&InputState::new(0.0).press(Key::P), &mut camera, &mut scene);
        assert!((camera.yaw() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_spawn_sphere_and_light() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (mut controller, _, mut scene) = setup();
        let mut camera = Camera::new(Vec3::new(1.0, 1.0, 1.0));

        let input = InputState::new(0.0).press(Key::J).press(Key::L);
        controller.apply(&input, &mut camera, &mut scene);

        assert_eq!(scene.len(), 1);
        let sphere = &scene.spheres()[0];
        assert_eq!(sphere.center, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(sphere.color, Rgb::PURPLE);
        assert_eq!(sphere.radius(), 2);
        assert_eq!(sphere.r_square(), 4);
        assert_eq!(sphere.specular, Some(600));
        assert_eq!(sphere.reflectivity, 0.1);

        assert_eq!(scene.lights.point().len(), 1);
        assert_eq!(scene.lights.point()[0].position, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(scene.lights.point()[0].intensity, 0.5);
    }

    #[test]
    fn test_held_spawn_key_does_not_repeat() {
        let (mut controller, mut camera, mut scene) = setup();
        for _ in 0..3 {
            controller.apply(&InputState::new(0.016).hold(Key::J), &mut camera, &mut scene);
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let (mut controller, mut camera, mut scene) = setup();
        controller.apply(&InputState::new(f64::NAN).hold(Key::W), &mut camera, &mut scene);
        controller.apply(&InputState::new(-1.0).hold(Key::W), &mut camera, &mut scene);
        assert_eq!(camera.position, Vec3::ZERO);
    }
}
