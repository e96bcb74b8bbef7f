use nalgebra::{Isometry3, Matrix4, Point3, Unit, UnitQuaternion, Vector3};

use crate::gpu::GpuCamera;
use crate::math;

/// Radians of rotation per unit of mouse motion.
pub const LOOK_SENSITIVITY: f32 = 0.0025;

/// First-person camera whose basis is uploaded alongside the body buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    forward: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    view_matrix: Matrix4<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 3.0))
    }
}

impl Camera {
    /// Camera at `position` looking down -Z with +Y up.
    pub fn new(position: Point3<f32>) -> Camera {
        let mut ret = Camera {
            position,
            forward: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::y(),
            right: Vector3::x(),
            view_matrix: Matrix4::identity(),
        };

        ret.update_view();

        ret
    }

    pub fn set_position(&mut self, pos: Point3<f32>) {
        self.position = pos;

        self.update_view();
    }

    /// Mouse-look from a cursor delta in pixels.
    ///
    /// Yaw turns `forward` and `right` about `up`, pitch turns `forward`
    /// about `right`, then `right` is rebuilt as `forward × up`.
    pub fn look(&mut self, dx: f32, dy: f32) {
        let yaw = -dx * LOOK_SENSITIVITY;
        let pitch = -dy * LOOK_SENSITIVITY;

        let yaw_rot = UnitQuaternion::from_axis_angle(&Unit::new_unchecked(self.up), yaw);
        self.forward = math::rotate(&yaw_rot, &self.forward);
        self.right = math::rotate(&yaw_rot, &self.right);

        let right = math::normalize_or_zero(&self.right);
        if right != Vector3::zeros() {
            let pitch_rot = UnitQuaternion::from_axis_angle(&Unit::new_unchecked(right), pitch);
            self.forward = math::rotate(&pitch_rot, &self.forward);
        }

        let right = math::normalize_or_zero(&self.forward.cross(&self.up));
        // Looking straight along `up` leaves the old right vector in place.
        if right != Vector3::zeros() {
            self.right = right;
        }

        self.update_view();
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view_matrix
    }

    /// Uniform record for the ray-marching shader.
    pub fn to_gpu(&self) -> GpuCamera {
        let p = self.position;
        GpuCamera::new(
            [p.x, p.y, p.z],
            [self.forward.x, self.forward.y, self.forward.z],
            [self.up.x, self.up.y, self.up.z],
            [self.right.x, self.right.y, self.right.z],
        )
    }

    fn update_view(&mut self) {
        let target = self.position + self.forward;
        let view = Isometry3::look_at_rh(&self.position, &target, &self.up);

        self.view_matrix = view.to_homogeneous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_vec_eq(a: &Vector3<f32>, b: &Vector3<f32>) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.up(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.right(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_camera_set_position() {
        let mut camera = Camera::default();
        let initial_view = *camera.view_matrix();
        camera.set_position(Point3::new(5.0, 10.0, 15.0));
        assert_eq!(camera.position, Point3::new(5.0, 10.0, 15.0));
        assert_ne!(*camera.view_matrix(), initial_view);
    }

    #[test]
    fn test_view_matrix_maps_forward_to_negative_z() {
        let camera = Camera::default();
        let ahead = camera.position + camera.forward() * 2.0;
        let eye_space = camera.view_matrix().transform_point(&ahead);
        assert!((eye_space.z + 2.0).abs() < 1e-5);
        assert!(eye_space.x.abs() < 1e-5 && eye_space.y.abs() < 1e-5);
    }

    #[test]
    fn test_look_zero_delta_keeps_basis() {
        let mut camera = Camera::default();
        camera.look(0.0, 0.0);
        assert!(approx_vec_eq(&camera.forward(), &Vector3::new(0.0, 0.0, -1.0)));
        assert!(approx_vec_eq(&camera.right(), &Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_look_right_turns_right() {
        // Moving the mouse right (positive dx) yaws toward +X.
        let mut camera = Camera::default();
        camera.look(100.0, 0.0);
        assert!(camera.forward().x > 0.0);
        assert!(approx_vec_eq(&camera.up(), &Vector3::y()));
        assert!(camera.right().dot(&camera.forward()).abs() < 1e-5);
        assert!((camera.right().norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_down_pitches_down() {
        let mut camera = Camera::default();
        camera.look(0.0, 100.0);
        assert!(camera.forward().y < 0.0);
        assert!(approx_vec_eq(&camera.right(), &Vector3::x()));
    }

    #[test]
    fn test_to_gpu_copies_basis() {
        let mut camera = Camera::default();
        camera.look(40.0, -20.0);
        let gpu = camera.to_gpu();
        assert_eq!(gpu.position, [0.0, 0.0, 3.0]);
        assert_eq!(gpu.forward[0], camera.forward().x);
        assert_eq!(gpu.right[2], camera.right().z);
        assert_eq!(gpu.up, [0.0, 1.0, 0.0]);
    }
}
