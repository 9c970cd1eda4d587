//! ASCII preview of a rendered frame for terminals.

use lustre_math::Vec3;
use lustre_renderer::ImageBuffer;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Downsample `image` to `columns` characters wide, using luminance of the
/// display-clamped color. Terminal cells are about twice as tall as wide.
pub fn ascii(image: &ImageBuffer, columns: u32) -> String {
    if image.width == 0 || image.height == 0 || columns == 0 {
        return String::new();
    }

    let columns = columns.min(image.width);
    let rows = ((columns as f32 * image.height as f32 / image.width as f32) / 2.0)
        .round()
        .max(1.0) as u32;

    let mut out = String::with_capacity((columns as usize + 1) * rows as usize);
    for row in 0..rows {
        let y = (row as u64 * image.height as u64 / rows as u64) as u32;
        for col in 0..columns {
            let x = (col as u64 * image.width as u64 / columns as u64) as u32;
            let rgb = image.get(x, y).truncate().clamp(Vec3::ZERO, Vec3::ONE);
            let luminance = rgb.dot(Vec3::new(0.2126, 0.7152, 0.0722));
            let idx = (luminance * (RAMP.len() - 1) as f32).round() as usize;
            out.push(RAMP[idx.min(RAMP.len() - 1)] as char);
        }
        out.push('\n');
    }
    out
}
