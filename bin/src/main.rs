//! Renders the built-in demo scene with the direct lighting integrator.

#[macro_use]
extern crate log;

mod demo_scene;
mod image_io;
mod options;

use clap::Parser;
use demo_scene::*;
use image_io::*;
use integrators::*;
use lumen_core::film::*;
use lumen_core::geometry::*;
use lumen_core::integrator::*;
use options::*;
use samplers::*;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    match render(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Render the demo scene and write the image.
///
/// * `options` - Command line options.
fn render(options: &Options) -> Result<(), String> {
    options.validate()?;

    let resolution = Point2i::new(options.width as i32, options.height as i32);
    let (scene, camera) = demo_scene(resolution);
    let film = Arc::new(Film::new(resolution));

    let sampler = create_sampler(
        options.sampler,
        film.get_sample_bounds(),
        options.samples_per_pixel,
        options.order,
        options.seed,
    );
    let integrator = Box::new(DirectLightingSurfaceIntegrator::new(options.strategy));

    let mut renderer = SamplerRenderer::new(
        sampler,
        camera,
        integrator,
        film,
        options.tile_size,
        options.threads(),
        options.quiet,
    );
    renderer.render(&scene)?;

    write_image(&options.image_file, &renderer.get_film())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameras::*;
    use lights::*;
    use lumen_core::camera::*;
    use lumen_core::light::*;
    use lumen_core::primitive::*;
    use lumen_core::sampler::*;
    use lumen_core::scene::*;
    use lumen_core::spectrum::*;

    #[test]
    fn escaped_camera_rays_see_the_environment() {
        let environment: ArcLight = Arc::new(InfiniteAreaLight::new(Spectrum::new(0.25), 1));
        let scene = Scene::new(Arc::new(PrimitiveList::new(vec![])), vec![environment]);

        let resolution = Point2i::new(8, 6);
        let camera: ArcCamera = Arc::new(PerspectiveCamera::new(
            Point3f::ZERO,
            Point3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 1.0, 0.0),
            60.0,
            resolution,
            0.0,
            1.0,
        ));
        let film = Arc::new(Film::new(resolution));
        let sampler = create_sampler(
            SamplerKind::Stratified,
            film.get_sample_bounds(),
            4,
            PixelsOrderKind::Random,
            7,
        );
        let integrator = Box::new(DirectLightingSurfaceIntegrator::new(LightStrategy::UniformSampleAll));
        let mut renderer = SamplerRenderer::new(sampler, camera, integrator, film, 4, 2, true);
        assert!(renderer.render(&scene).is_ok());

        let film = renderer.get_film();
        for p in film.get_sample_bounds() {
            for v in film.get_pixel_rgb(&p) {
                assert!((v - 0.25).abs() < 1e-5, "pixel {} has {}", p, v);
            }
        }
    }
}
