//! Built-in demo scene

use cameras::*;
use lights::*;
use lumen_core::camera::*;
use lumen_core::geometry::*;
use lumen_core::light::*;
use lumen_core::material::*;
use lumen_core::primitive::*;
use lumen_core::scene::*;
use lumen_core::spectrum::*;
use materials::*;
use shapes::*;
use std::sync::Arc;

/// A matte sphere resting on a matte ground disk, lit by a spherical area
/// light, a distant light, a spot light and a faint environment.
///
/// * `resolution` - Image resolution for the camera.
pub fn demo_scene(resolution: Point2i) -> (Scene, ArcCamera) {
    let mut primitives: Vec<ArcPrimitive> = vec![];
    let mut lights: Vec<ArcLight> = vec![];

    // Ground.
    let ground = Arc::new(Disk::new(Point3f::ZERO, Vector3f::new(0.0, 1.0, 0.0), 20.0));
    let ground_material: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::from_rgb(0.5, 0.5, 0.45), 0.0));
    primitives.push(Arc::new(GeometricPrimitive::new(ground, Some(ground_material), None)));

    // Rough sphere resting on the ground.
    let ball = Arc::new(Sphere::new(Point3f::new(0.0, 1.0, 0.0), 1.0));
    let ball_material: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::from_rgb(0.7, 0.25, 0.2), 20.0));
    primitives.push(Arc::new(GeometricPrimitive::new(ball, Some(ball_material), None)));

    // Spherical area light above and to the left.
    let bulb: ArcShape = Arc::new(Sphere::new(Point3f::new(-2.5, 3.5, 1.0), 0.5));
    let bulb_light: ArcLight = Arc::new(DiffuseAreaLight::new(
        Spectrum::from_rgb(8.0, 7.5, 6.5),
        4,
        Arc::clone(&bulb),
        false,
    ));
    primitives.push(Arc::new(GeometricPrimitive::new(bulb, None, Some(Arc::clone(&bulb_light)))));
    lights.push(bulb_light);

    // Dim sun fill.
    lights.push(Arc::new(DistantLight::new(
        Spectrum::from_rgb(0.3, 0.35, 0.45),
        Vector3f::new(1.0, 2.0, 1.5),
    )));

    // Spot from the right.
    lights.push(Arc::new(SpotLight::new(
        Point3f::new(3.0, 4.0, -2.0),
        Point3f::new(0.0, 0.5, 0.0),
        Spectrum::new(25.0),
        30.0,
        20.0,
    )));

    // Faint sky seen by rays leaving the scene.
    lights.push(Arc::new(InfiniteAreaLight::new(Spectrum::from_rgb(0.03, 0.04, 0.06), 4)));

    let scene = Scene::new(Arc::new(PrimitiveList::new(primitives)), lights);
    let camera: ArcCamera = Arc::new(PerspectiveCamera::new(
        Point3f::new(0.0, 2.0, 6.0),
        Point3f::new(0.0, 0.8, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        40.0,
        resolution,
        0.0,
        6.0,
    ));
    (scene, camera)
}
