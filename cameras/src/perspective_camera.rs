//! Perspective Camera

use lumen_core::camera::*;
use lumen_core::geometry::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;

/// Perspective camera with an optional thin lens for depth of field.
pub struct PerspectiveCamera {
    /// Camera position.
    eye: Point3f,

    /// Camera space x-axis in world space.
    right: Vector3f,

    /// Camera space y-axis in world space.
    up: Vector3f,

    /// Viewing direction in world space.
    forward: Vector3f,

    /// Image resolution in pixels.
    resolution: Point2i,

    /// Half extents of the image plane at unit distance.
    screen_half: Vector2f,

    /// Radius of camera lens.
    lens_radius: Float,

    /// Distance to the plane of focus.
    focal_distance: Float,
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `eye`            - Camera position.
    /// * `look_at`        - Point the camera looks at.
    /// * `up`             - Up vector hint.
    /// * `fov`            - The field-of-view angle in degrees along the
    ///                      shorter image axis.
    /// * `resolution`     - Image resolution in pixels.
    /// * `lens_radius`    - Radius of camera lens. 0 gives a pinhole camera.
    /// * `focal_distance` - Focal distance.
    pub fn new(
        eye: Point3f,
        look_at: Point3f,
        up: Vector3f,
        fov: Float,
        resolution: Point2i,
        lens_radius: Float,
        focal_distance: Float,
    ) -> Self {
        assert!(
            resolution.x > 0 && resolution.y > 0,
            "Camera resolution {} must be positive",
            resolution
        );
        assert!(fov > 0.0 && fov < 180.0, "Field of view {} out of range", fov);

        let forward = (look_at - eye).normalize();
        let mut right = forward.cross(&up);
        if right.length_squared() == 0.0 {
            warn!("Camera up vector is parallel to the viewing direction");
            right = coordinate_system(&forward).0;
        }
        let right = right.normalize();
        let true_up = right.cross(&forward);

        // Fit the field of view to the shorter axis.
        let aspect = resolution.x as Float / resolution.y as Float;
        let scale = (fov.to_radians() * 0.5).tan();
        let screen_half = if aspect > 1.0 {
            Vector2f::new(aspect * scale, scale)
        } else {
            Vector2f::new(scale, scale / aspect)
        };

        Self {
            eye,
            right,
            up: true_up,
            forward,
            resolution,
            screen_half,
            lens_radius,
            focal_distance,
        }
    }

    /// Maps a camera space vector to world space.
    ///
    /// * `v` - Camera space vector.
    fn camera_to_world(&self, v: &Vector3f) -> Vector3f {
        self.right * v.x + self.up * v.y + self.forward * v.z
    }
}

impl Camera for PerspectiveCamera {
    /// Returns a ray corresponding to a given sample. It also returns, a floating
    /// point value that affects how much the radiance arriving at the film plane
    /// will contribute to final image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float) {
        // Compute raster and camera sample positions.
        let sx = 2.0 * sample.p_film.x / self.resolution.x as Float - 1.0;
        let sy = 1.0 - 2.0 * sample.p_film.y / self.resolution.y as Float;
        let p_camera = Vector3f::new(sx * self.screen_half.x, sy * self.screen_half.y, 1.0);

        let mut o = Vector3f::ZERO;
        let mut d = p_camera.normalize();

        // Modify ray for depth of field.
        if self.lens_radius > 0.0 {
            // Sample point on lens.
            let p_lens = self.lens_radius * concentric_sample_disk(&sample.p_lens);

            // Compute point on plane of focus.
            let ft = self.focal_distance / d.z;
            let p_focus = d * ft;

            // Update ray for effect of lens.
            o = Vector3f::new(p_lens.x, p_lens.y, 0.0);
            d = (p_focus - o).normalize();
        }

        let ray = Ray::new(self.eye + self.camera_to_world(&o), self.camera_to_world(&d), INFINITY);
        (ray, 1.0)
    }

    /// Returns the image resolution the camera projects onto.
    fn get_resolution(&self) -> Point2i {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn camera(lens_radius: Float) -> PerspectiveCamera {
        PerspectiveCamera::new(
            Point3f::new(0.0, 0.0, -5.0),
            Point3f::ZERO,
            Vector3f::new(0.0, 1.0, 0.0),
            90.0,
            Point2i::new(200, 100),
            lens_radius,
            5.0,
        )
    }

    #[test]
    fn center_ray_looks_at_target() {
        let cam = camera(0.0);
        let sample = CameraSample::new(Point2f::new(100.0, 50.0), Point2f::new(0.5, 0.5));
        let (ray, weight) = cam.generate_ray(&sample);
        assert!(approx_eq!(f32, weight, 1.0));
        assert!(approx_eq!(f32, ray.d.z, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, ray.o.z, -5.0, epsilon = 1e-6));
    }

    #[test]
    fn field_of_view_spans_shorter_axis() {
        let cam = camera(0.0);
        // Top edge at 45 degrees for a 90 degree field of view.
        let (ray, _) = cam.generate_ray(&CameraSample::new(Point2f::new(100.0, 0.0), Point2f::zero()));
        assert!(approx_eq!(f32, ray.d.y, ray.d.z, epsilon = 1e-5));
        assert!(ray.d.y > 0.0);
    }

    #[test]
    fn image_x_maps_to_camera_right() {
        let cam = camera(0.0);
        let (ray, _) = cam.generate_ray(&CameraSample::new(Point2f::new(199.0, 50.0), Point2f::zero()));
        // Looking down +z with +y up, right is -x in a right-handed frame.
        assert!(ray.d.x < 0.0);
    }

    proptest! {
        #[test]
        fn thin_lens_rays_converge_on_focal_plane(
            u0 in 0.0f32..1.0,
            u1 in 0.0f32..1.0,
        ) {
            let pinhole = camera(0.0);
            let lens = camera(0.5);
            let sample = CameraSample::new(Point2f::new(60.0, 30.0), Point2f::new(u0, u1));
            let (r0, _) = pinhole.generate_ray(&sample);
            let (r1, _) = lens.generate_ray(&sample);

            // Both rays pass through the same point on the plane z = 0.
            let p0 = r0.at(5.0 / r0.d.z);
            let p1 = r1.at(-r1.o.z / r1.d.z);
            prop_assert!((p0.x - p1.x).abs() < 1e-3);
            prop_assert!((p0.y - p1.y).abs() < 1e-3);
            prop_assert!((r1.d.length() - 1.0).abs() < 1e-4);
        }
    }
}
