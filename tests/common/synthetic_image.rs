/// Diagonal gradient, packed row-major.
pub fn gradient_u8(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            img[y * width + x] = ((x + 2 * y) % 256) as u8;
        }
    }
    img
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}

/// Copy of `packed` with `pad` filler bytes (0xEE) after every row.
pub fn with_row_padding(packed: &[u8], width: usize, height: usize, pad: usize) -> Vec<u8> {
    let stride = width + pad;
    let mut out = vec![0xEEu8; stride * height];
    for y in 0..height {
        out[y * stride..y * stride + width].copy_from_slice(&packed[y * width..(y + 1) * width]);
    }
    out
}

/// Interleaved RGB frame where every pixel is `rgb`.
pub fn uniform_rgb(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    rgb.iter().copied().cycle().take(width * height * 3).collect()
}
