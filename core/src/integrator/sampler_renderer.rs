//! Sampler Renderer

use super::*;
use crate::camera::*;
use crate::film::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Drives rendering with a stream of samples from a `Sampler`. The image is
/// split into tiles, each tile gets its own `SubSampler` and a fixed pool of
/// worker threads renders them. Each worker owns its `Sample` buffer and its
/// `MemoryPool`.
pub struct SamplerRenderer {
    /// Sampler responsible for choosing points on the image plane from which
    /// to trace rays and for supplying sample values used by integrators.
    sampler: Box<dyn Sampler>,

    /// The camera.
    camera: ArcCamera,

    /// The surface integrator.
    integrator: Box<dyn SurfaceIntegrator>,

    /// The film receiving the image.
    film: Arc<Film>,

    /// Width and height of the tiles in pixels.
    tile_size: usize,

    /// Number of worker threads.
    n_threads: usize,

    /// Hide the progress bar.
    quiet: bool,
}

impl SamplerRenderer {
    /// Create a new `SamplerRenderer`.
    ///
    /// * `sampler`    - The sampler.
    /// * `camera`     - The camera.
    /// * `integrator` - The surface integrator.
    /// * `film`       - The film receiving the image.
    /// * `tile_size`  - Width and height of the tiles in pixels.
    /// * `n_threads`  - Number of worker threads.
    /// * `quiet`      - Hide the progress bar.
    pub fn new(
        sampler: Box<dyn Sampler>,
        camera: ArcCamera,
        integrator: Box<dyn SurfaceIntegrator>,
        film: Arc<Film>,
        tile_size: usize,
        n_threads: usize,
        quiet: bool,
    ) -> Self {
        assert!(n_threads > 0, "need at least one rendering thread");
        Self {
            sampler,
            camera,
            integrator,
            film,
            tile_size,
            n_threads,
            quiet,
        }
    }

    /// Returns the film receiving the image.
    pub fn get_film(&self) -> Arc<Film> {
        Arc::clone(&self.film)
    }

    /// Render the scene into the film.
    ///
    /// * `scene` - The scene.
    pub fn render(&mut self, scene: &Scene) -> Result<(), String> {
        info!(
            "Rendering with {} sampler, {} integrator, {} samples per pixel",
            self.sampler.get_type(),
            self.integrator.get_name(),
            self.sampler.samples_per_pixel()
        );

        // Sequences must be known before the sampler hands out sub-samplers.
        self.integrator.request_samples(self.sampler.as_mut(), scene);
        let sub_samplers = self.sampler.sub_samplers(self.tile_size);
        let tile_count = sub_samplers.len();
        info!("Rendering {} tiles on {} threads", tile_count, self.n_threads);

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(tile_count as u64)
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tiles")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let renderer = &*self;
        crossbeam::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<Box<dyn SubSampler>>(renderer.n_threads);

            // Spawn worker threads.
            for _ in 0..renderer.n_threads {
                let rxc = rx.clone();
                let progress = &progress;
                scope.spawn(move |_| {
                    let mut sample = renderer.sampler.create_sample();
                    let mut arena = MemoryPool::new();
                    for mut sub_sampler in rxc.iter() {
                        let film_tile =
                            renderer.render_tile(scene, sub_sampler.as_mut(), &mut sample, &mut arena);
                        renderer.film.merge_film_tile(&film_tile);
                        progress.inc(1);
                    }
                });
            }
            drop(rx); // Drop extra rx since we've cloned one for each worker.

            // Send work.
            for sub_sampler in sub_samplers {
                if tx.send(sub_sampler).is_err() {
                    error!("All rendering threads stopped before the image was complete");
                    break;
                }
            }
        })
        .map_err(|_| String::from("A rendering thread panicked"))?;

        progress.finish_with_message("Render complete");
        Ok(())
    }

    /// Render the pixels of one sub-sampler.
    ///
    /// * `scene`       - The scene.
    /// * `sub_sampler` - The sub-sampler for the tile.
    /// * `sample`      - Sample buffer owned by the worker.
    /// * `arena`       - Memory pool owned by the worker.
    fn render_tile(
        &self,
        scene: &Scene,
        sub_sampler: &mut dyn SubSampler,
        sample: &mut Sample,
        arena: &mut MemoryPool,
    ) -> FilmTile {
        let tile_bounds = sub_sampler.pixel_bounds();
        debug!("Starting image tile {}", tile_bounds);

        let mut film_tile = self.film.get_film_tile(tile_bounds);
        while sub_sampler.get_next_sample(sample) {
            let camera_sample = CameraSample::new(sample.image_point, sample.lens_uv);
            let (mut ray, ray_weight) = self.camera.generate_ray(&camera_sample);

            // Evaluate radiance along camera ray.
            let mut l = Spectrum::ZERO;
            if ray_weight > 0.0 {
                l = self.li(scene, &mut ray, sample, arena);
            }
            let l = check_radiance(l, &sample.pixel, sample.index);

            film_tile.add_sample(&camera_sample.p_film, l, ray_weight);
            arena.reset();
        }

        debug!(
            "Finished image tile {}, memory pool holds {} bytes",
            tile_bounds,
            arena.allocated_bytes()
        );
        film_tile
    }

    /// Returns the radiance arriving along a camera ray.
    ///
    /// * `scene`  - The scene.
    /// * `ray`    - The camera ray.
    /// * `sample` - The current sample.
    /// * `arena`  - Memory pool for the sample.
    fn li(&self, scene: &Scene, ray: &mut Ray, sample: &Sample, arena: &MemoryPool) -> Spectrum {
        match scene.intersect(ray) {
            Some(isect) => self.integrator.radiance(scene, ray, &isect, sample, arena),
            None => scene
                .infinite_lights
                .iter()
                .fold(Spectrum::ZERO, |l, light| l + light.le(ray)),
        }
    }
}

/// Replaces radiance values that cannot be stored in the image with black and
/// logs them.
///
/// * `l`            - The radiance value.
/// * `pixel`        - Pixel the value was computed for.
/// * `sample_index` - Index of the sample in the pixel.
fn check_radiance(l: Spectrum, pixel: &Point2i, sample_index: usize) -> Spectrum {
    if l.has_nans() {
        error!(
            "Not-a-number radiance value returned for pixel {}, sample {}. Setting to black.",
            pixel, sample_index
        );
        Spectrum::ZERO
    } else if l.y() < -1e-5 {
        error!(
            "Negative luminance value, {}, returned for pixel {}, sample {}. Setting to black.",
            l.y(),
            pixel,
            sample_index
        );
        Spectrum::ZERO
    } else if l.has_infs() || l.y().is_infinite() {
        error!(
            "Infinite luminance value returned for pixel {}, sample {}. Setting to black.",
            pixel, sample_index
        );
        Spectrum::ZERO
    } else {
        l
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::*;

    #[test]
    fn invalid_radiance_becomes_black() {
        let p = Point2i::new(1, 2);
        assert!(check_radiance(Spectrum::new(Float::NAN), &p, 0).is_black());
        assert!(check_radiance(Spectrum::new(-1.0), &p, 0).is_black());
        assert!(check_radiance(Spectrum::new(INFINITY), &p, 0).is_black());
        assert_eq!(check_radiance(Spectrum::new(0.5), &p, 0), Spectrum::new(0.5));
    }
}
