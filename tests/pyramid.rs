mod common;

use cascade_pyramid::image::{ImageU8, ImageView, SourceImage};
use cascade_pyramid::stages::{build_pyramid, Pyramid, PyramidOptions};
use common::synthetic_image::{checkerboard_u8, gradient_u8};

fn build(image: ImageU8<'_>, options: PyramidOptions) -> Pyramid {
    build_pyramid(&SourceImage::gray(image), options)
        .unwrap()
        .pyramid
}

#[test]
fn level_dimensions_halve_with_floor() {
    let buffer = gradient_u8(640, 481);
    let image = ImageU8::packed(640, 481, &buffer).unwrap();
    let pyramid = build(image, PyramidOptions::new(5));

    let dims: Vec<(usize, usize)> = pyramid
        .levels
        .iter()
        .map(|l| (l.width(), l.height()))
        .collect();
    assert_eq!(
        dims,
        vec![(640, 481), (320, 240), (160, 120), (80, 60), (40, 30)]
    );
    for level in 1..pyramid.len() {
        let scaling = pyramid.scaling(level).unwrap();
        assert_eq!(scaling.nominal, (1u32 << level) as f32);
        assert_eq!(scaling.actual_x, scaling.nominal);
    }
}

#[test]
fn halving_a_constant_image_keeps_it_constant() {
    let buffer = vec![77u8; 64 * 48];
    let image = ImageU8::packed(64, 48, &buffer).unwrap();
    let pyramid = build(image, PyramidOptions::default());

    for level in &pyramid.levels {
        assert!(level.rows().all(|row| row.iter().all(|&v| v == 77)));
    }
}

#[test]
fn coarse_levels_average_fine_checkerboards() {
    // 1-pixel cells: every 2x2 block holds two dark and two bright samples
    let buffer = checkerboard_u8(32, 32, 1);
    let image = ImageU8::packed(32, 32, &buffer).unwrap();
    let pyramid = build(image, PyramidOptions::new(2));

    let level1 = pyramid.level(1).unwrap();
    assert_eq!((level1.width(), level1.height()), (16, 16));
    for row in level1.rows() {
        for &v in row {
            assert!((125..=127).contains(&v), "unexpected sample {v}");
        }
    }
}

#[test]
fn disabled_pyramid_ignores_the_requested_depth() {
    let buffer = gradient_u8(50, 20);
    let source = SourceImage::gray(ImageU8::packed(50, 20, &buffer).unwrap());
    let mut options = PyramidOptions::new(4);
    options.enabled = false;

    let result = build_pyramid(&source, options).unwrap();

    assert_eq!(result.pyramid.len(), 1);
    assert_eq!(result.pyramid.levels[0].as_view().data, &buffer[..]);
}
