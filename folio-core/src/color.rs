/// A color in the Oklab perceptual space.
///
/// Numeric distance in this space tracks perceived color difference far
/// better than raw RGB, which is what makes weighted averaging of pixel
/// colors meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Convert an 8-bit sRGB triple to Oklab.
pub fn srgb_to_oklab(rgb: [u8; 3]) -> Oklab {
    let r = srgb_decode(rgb[0]);
    let g = srgb_decode(rgb[1]);
    let b = srgb_decode(rgb[2]);

    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

/// Convert an Oklab color back to 8-bit sRGB.
///
/// Out-of-gamut results are clamped to the displayable range before encoding.
pub fn oklab_to_srgb(lab: Oklab) -> [u8; 3] {
    let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
    let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
    let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
    let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
    let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

    [srgb_encode(r), srgb_encode(g), srgb_encode(b)]
}

/// Inverse sRGB transfer function: gamma-encoded 8-bit channel to linear light.
fn srgb_decode(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function: linear light back to a gamma-encoded 8-bit channel.
fn srgb_encode(linear: f64) -> u8 {
    let linear = linear.clamp(0.0, 1.0);
    let c = if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round() as u8
}

#[cfg(test)]
#[path = "tests/color_tests.rs"]
mod tests;
