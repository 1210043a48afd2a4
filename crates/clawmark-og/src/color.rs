//! Hex colour parsing and gradient interpolation.

/// An RGB triple.
pub type Rgb8 = [u8; 3];

/// Parse `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Option<Rgb8> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

/// `start + (end - start) * row / height`, truncated toward zero.
pub fn interpolate_channel(start: u8, end: u8, row: u32, height: u32) -> u8 {
    if height == 0 {
        return start;
    }
    let start = f64::from(start);
    let value = start + (f64::from(end) - start) * f64::from(row) / f64::from(height);
    value as u8
}

/// Colour of gradient row `row` out of `height`, top to bottom.
pub fn gradient_color(start: Rgb8, end: Rgb8, row: u32, height: u32) -> Rgb8 {
    [
        interpolate_channel(start[0], end[0], row, height),
        interpolate_channel(start[1], end[1], row, height),
        interpolate_channel(start[2], end[2], row, height),
    ]
}
