/// Generates a strip-chart-like image: white background, full-width dark
/// rulings, and a wandering sine trace through the middle.
pub fn strip_chart_u8(width: usize, height: usize, rulings: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(rulings > 0, "at least one ruling required");

    let mut img = vec![255u8; width * height];
    let spacing = height / (rulings + 1);
    for i in 1..=rulings {
        let y = i * spacing;
        for x in 0..width {
            img[y * width + x] = 40;
        }
    }

    let mid = height as f32 / 2.0;
    let amplitude = height as f32 * 0.08;
    for x in 0..width {
        let y = (mid + (x as f32 / 9.0).sin() * amplitude).round() as usize;
        let y = y.min(height - 1);
        img[y * width + x] = 0;
    }
    img
}
