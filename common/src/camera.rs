//! 2D camera for scenes spanning many orders of magnitude
//!
//! World coordinates are f64 meters. The camera maps them to view pixels
//! (origin at screen center, y down) as `world * scale + offset`, all in f64,
//! so only the final on-screen numbers are narrowed to f32.

use glam::{DVec2, Mat4, Vec2};

/// Pixels per meter at startup
pub const DEFAULT_SCALE: f64 = 1e-6;
pub const MIN_SCALE: f64 = 1e-12;
pub const MAX_SCALE: f64 = 1e-2;

/// Scale multiplier per mouse-wheel notch
pub const ZOOM_STEP: f64 = 1.1;

/// 2D orthographic camera with pixel offset and zoom scale
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub offset: DVec2, // pixels
    pub scale: f64,    // pixels per meter
    pub min_scale: f64,
    pub max_scale: f64,
    pub viewport: Vec2, // window size in pixels
    pub following: bool,
}

impl Camera2D {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            offset: DVec2::ZERO,
            scale: DEFAULT_SCALE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            viewport,
            following: true,
        }
    }

    /// Position of a world point in view pixels relative to screen center
    pub fn world_to_view(&self, world: DVec2) -> Vec2 {
        (world * self.scale + self.offset).as_vec2()
    }

    /// World point under a cursor given in window pixels (top-left origin)
    pub fn screen_to_world(&self, cursor: Vec2) -> DVec2 {
        (self.cursor_to_view(cursor) - self.offset) / self.scale
    }

    fn cursor_to_view(&self, cursor: Vec2) -> DVec2 {
        cursor.as_dvec2() - self.viewport.as_dvec2() * 0.5
    }

    /// Multiply the scale by `factor`, clamped to the allowed range. When
    /// free-roaming, the world point under the cursor stays put.
    pub fn zoom_at(&mut self, factor: f64, cursor: Vec2) {
        let anchor = self.screen_to_world(cursor);
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);

        if !self.following {
            self.offset = self.cursor_to_view(cursor) - anchor * new_scale;
        }

        self.scale = new_scale;
    }

    /// Center the view on a world point
    pub fn follow(&mut self, target: DVec2) {
        self.offset = -target * self.scale;
    }

    pub fn toggle_following(&mut self) {
        self.following = !self.following;
    }

    /// Orthographic projection over the view pixels, y pointing down
    pub fn view_projection(&self) -> Mat4 {
        let half = self.viewport * 0.5;
        Mat4::orthographic_rh(-half.x, half.x, half.y, -half.y, -1.0, 1.0)
    }

    pub fn update_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            viewport: [camera.viewport.x, camera.viewport.y, camera.scale as f32, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        Camera2D::new(Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn follow_centers_target() {
        let mut camera = camera();
        let ship = DVec2::new(1.0e13, -3.0e9);
        camera.follow(ship);
        assert!(camera.world_to_view(ship).length() < 1e-3);
    }

    #[test]
    fn free_zoom_keeps_point_under_cursor() {
        let mut camera = camera();
        camera.following = false;
        let cursor = Vec2::new(900.0, 200.0);
        let before = camera.screen_to_world(cursor);

        camera.zoom_at(ZOOM_STEP, cursor);
        let after = camera.screen_to_world(cursor);

        assert!((before - after).length() / before.length() < 1e-9);
        assert!((camera.scale - DEFAULT_SCALE * ZOOM_STEP).abs() < 1e-18);
    }

    #[test]
    fn following_zoom_leaves_offset_alone() {
        let mut camera = camera();
        camera.offset = DVec2::new(12.0, -7.0);
        camera.zoom_at(0.5, Vec2::new(10.0, 10.0));
        assert_eq!(camera.offset, DVec2::new(12.0, -7.0));
    }

    #[test]
    fn scale_is_clamped() {
        let mut camera = camera();
        for _ in 0..1000 {
            camera.zoom_at(ZOOM_STEP, Vec2::ZERO);
        }
        assert_eq!(camera.scale, MAX_SCALE);

        for _ in 0..2000 {
            camera.zoom_at(1.0 / ZOOM_STEP, Vec2::ZERO);
        }
        assert_eq!(camera.scale, MIN_SCALE);
    }
}
