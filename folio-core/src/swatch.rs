use std::collections::BTreeMap;

use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::color::srgb_to_oklab;
use crate::error::SwatchError;
use crate::model::Color;

/// Side length of the working image. Artwork is shrunk to this size before
/// sampling so per-image cost is fixed regardless of source resolution.
pub const SAMPLE_SIZE: u32 = 50;

/// Exponent applied to accumulated weights before averaging. Skews the mean
/// toward the dominant colors instead of treating every pixel equally.
const WEIGHT_SHARPNESS: i32 = 4;

/// Oklab lightness above which a background needs dark foreground text.
const LIGHTNESS_THRESHOLD: f64 = 0.6;

/// A unique RGB value and its accumulated sampling weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedColor {
    pub rgb: [u8; 3],
    pub weight: f64,
}

/// Extract a representative background color from encoded image bytes.
pub fn extract_color(bytes: &[u8]) -> Result<Color, SwatchError> {
    let colors = sample(bytes)?;
    aggregate(&colors)
}

/// Decode an image and collect weighted colors from its border region.
pub fn sample(bytes: &[u8]) -> Result<Vec<WeightedColor>, SwatchError> {
    let img = image::load_from_memory(bytes)?.into_rgb8();
    let img = imageops::resize(&img, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle);
    Ok(sample_pixels(&img))
}

/// Collect weighted colors from the border region of a small image.
///
/// The centered middle two-thirds of both axes is skipped so a face or logo
/// in the middle of the artwork cannot dominate the pick, and rows weigh
/// progressively more toward the bottom, where album backgrounds usually sit.
/// Identical RGB values are merged up front; aggregating merged colors gives
/// the same numbers as aggregating raw pixels.
pub(crate) fn sample_pixels(img: &RgbImage) -> Vec<WeightedColor> {
    let (w, h) = (img.width(), img.height());
    let margin_x = w / 6;
    let margin_y = h / 6;

    let mut weights: BTreeMap<[u8; 3], f64> = BTreeMap::new();
    for (x, y, pixel) in img.enumerate_pixels() {
        let in_center =
            x >= margin_x && x < w - margin_x && y >= margin_y && y < h - margin_y;
        if in_center {
            continue;
        }
        let weight = (y + 1) as f64 / h as f64;
        *weights.entry(pixel.0).or_insert(0.0) += weight;
    }

    weights
        .into_iter()
        .map(|(rgb, weight)| WeightedColor { rgb, weight })
        .collect()
}

/// Reduce weighted colors to one representative background color.
///
/// Each unique color is converted to Oklab once, its weight is raised to the
/// sharpness exponent, and L, a, b are averaged over the adjusted weights.
pub fn aggregate(colors: &[WeightedColor]) -> Result<Color, SwatchError> {
    let mut total = 0.0;
    let mut l_sum = 0.0;
    let mut a_sum = 0.0;
    let mut b_sum = 0.0;

    for color in colors {
        let lab = srgb_to_oklab(color.rgb);
        let weight = color.weight.powi(WEIGHT_SHARPNESS);
        l_sum += lab.l * weight;
        a_sum += lab.a * weight;
        b_sum += lab.b * weight;
        total += weight;
    }

    if total <= 0.0 {
        return Err(SwatchError::empty_sample("total sample weight is zero"));
    }

    let l = l_sum / total;
    Ok(Color {
        l,
        a: a_sum / total,
        b: b_sum / total,
        is_light: l > LIGHTNESS_THRESHOLD,
    })
}

#[cfg(test)]
#[path = "tests/swatch_tests.rs"]
mod tests;
