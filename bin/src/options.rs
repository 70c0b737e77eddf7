//! Command line options

use clap::Parser;
use integrators::LightStrategy;
use lumen_core::sampler::PixelsOrderKind;
use samplers::SamplerKind;

/// Renderer options.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about = "Renders the built-in demo scene with direct lighting.", long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 uses all logical CPUs)."
    )]
    n_threads: usize,

    /// Samples per pixel.
    #[clap(
        long = "spp",
        value_name = "NUM",
        default_value_t = 16,
        help = "Samples per pixel; rounded up as the sampler requires."
    )]
    pub samples_per_pixel: usize,

    /// Sampler implementation.
    #[clap(
        long = "sampler",
        value_name = "NAME",
        default_value_t = SamplerKind::Stratified,
        help = "Pixel sampler: random, stratified or 02sequence."
    )]
    pub sampler: SamplerKind,

    /// Light sampling strategy.
    #[clap(
        long = "strategy",
        value_name = "NAME",
        default_value_t = LightStrategy::UniformSampleAll,
        help = "Direct lighting strategy: all, one or power."
    )]
    pub strategy: LightStrategy,

    /// Pixel visiting order within a tile.
    #[clap(
        long = "order",
        value_name = "NAME",
        default_value_t = PixelsOrderKind::Consecutive,
        help = "Pixel order inside tiles: consecutive, serpentine or random."
    )]
    pub order: PixelsOrderKind,

    /// Tile size.
    #[clap(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Base seed for the samplers.
    #[clap(long = "seed", value_name = "NUM", default_value_t = 0, help = "Base random seed.")]
    pub seed: u64,

    /// Image width.
    #[clap(long = "width", value_name = "NUM", default_value_t = 400, help = "Image width in pixels.")]
    pub width: u32,

    /// Image height.
    #[clap(long = "height", value_name = "NUM", default_value_t = 300, help = "Image height in pixels.")]
    pub height: u32,

    /// Path to the image file.
    #[clap(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "lumen.png",
        help = "Write the final image to the given filename (png or tga)."
    )]
    pub image_file: String,

    /// Suppress the progress bar.
    #[clap(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads {} > max logical CPUs {}", n, max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Check option values that clap cannot validate on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.samples_per_pixel == 0 {
            return Err(String::from("--spp must be positive"));
        }
        if self.tile_size == 0 {
            return Err(String::from("--tilesize must be positive"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!("Invalid image size {}x{}", self.width, self.height));
        }
        Ok(())
    }
}
