//! Image output

use image::{ImageFormat, RgbImage};
use lumen_core::film::Film;
use std::path::Path;

/// Write the film to an 8-bit image. The format follows the file extension.
///
/// * `path` - Output file path.
/// * `film` - The film.
pub fn write_image(path: &str, film: &Film) -> Result<(), String> {
    let image_format = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("png") => ImageFormat::Png,
        Some("tga") => ImageFormat::Tga,
        Some(extension) => return Err(format!("Extension .{extension} is not supported")),
        None => return Err(format!("Can't determine file type from suffix of filename {path}")),
    };

    let res = film.full_resolution;
    let (res_x, res_y) = (res.x as u32, res.y as u32);
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let imgbuf = RgbImage::from_raw(res_x, res_y, film.to_srgb8())
        .ok_or_else(|| format!("Film pixel data does not match resolution {res_x}x{res_y}"))?;
    imgbuf
        .save_with_format(path, image_format)
        .map_err(|err| format!("Error saving output image {path}: {err}."))
}
