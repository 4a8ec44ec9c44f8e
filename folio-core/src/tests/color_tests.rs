use crate::color::{Oklab, oklab_to_srgb, srgb_to_oklab};

#[test]
fn test_black_is_origin() {
    let lab = srgb_to_oklab([0, 0, 0]);
    assert_eq!(lab.l, 0.0);
    assert_eq!(lab.a, 0.0);
    assert_eq!(lab.b, 0.0);
}

#[test]
fn test_white_is_full_lightness() {
    // sRGB white maps to L = 1 with no chroma
    let lab = srgb_to_oklab([255, 255, 255]);
    assert!((lab.l - 1.0).abs() < 1e-6);
    assert!(lab.a.abs() < 1e-6);
    assert!(lab.b.abs() < 1e-6);
}

#[test]
fn test_red_reference_value() {
    // Published Oklab coordinates for sRGB red: (0.62796, 0.22486, 0.12585)
    let lab = srgb_to_oklab([255, 0, 0]);
    assert!((lab.l - 0.62796).abs() < 1e-4);
    assert!((lab.a - 0.22486).abs() < 1e-4);
    assert!((lab.b - 0.12585).abs() < 1e-4);
}

#[test]
fn test_grays_have_no_chroma() {
    for v in [1u8, 32, 64, 128, 180, 254] {
        let lab = srgb_to_oklab([v, v, v]);
        assert!(lab.a.abs() < 1e-9, "gray {v} has chroma a = {}", lab.a);
        assert!(lab.b.abs() < 1e-9, "gray {v} has chroma b = {}", lab.b);
    }
}

#[test]
fn test_lightness_is_monotonic_in_gray_level() {
    let mut last = -1.0;
    for v in [0u8, 16, 64, 128, 192, 255] {
        let lab = srgb_to_oklab([v, v, v]);
        assert!(lab.l > last);
        last = lab.l;
    }
}

#[test]
fn test_round_trip_within_one_step() {
    // Sample the RGB cube on a 16^3 grid (steps of 17 cover 0 and 255 exactly);
    // every triple must survive the round trip within integer rounding.
    for r in (0..=255u16).step_by(17) {
        for g in (0..=255u16).step_by(17) {
            for b in (0..=255u16).step_by(17) {
                let rgb = [r as u8, g as u8, b as u8];
                let back = oklab_to_srgb(srgb_to_oklab(rgb));
                for i in 0..3 {
                    let diff = (rgb[i] as i16 - back[i] as i16).abs();
                    assert!(diff <= 1, "{rgb:?} came back as {back:?}");
                }
            }
        }
    }
}

#[test]
fn test_out_of_gamut_clamps() {
    // Lightness far above/below the displayable range pins to white/black
    let too_bright = Oklab {
        l: 2.0,
        a: 0.0,
        b: 0.0,
    };
    assert_eq!(oklab_to_srgb(too_bright), [255, 255, 255]);

    let too_dark = Oklab {
        l: -1.0,
        a: 0.0,
        b: 0.0,
    };
    assert_eq!(oklab_to_srgb(too_dark), [0, 0, 0]);
}
