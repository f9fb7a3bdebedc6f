/// Color parsing and path-progress color mapping
use crate::models::Rgba;
use palette::{encoding, FromColor, Hsl, Srgb};

/// Parse a hex color string into RGBA
/// Accepts:
/// - "transparent" => (0, 0, 0, 0)
/// - #RRGGBB or RRGGBB => (r, g, b, 255)
/// - #RRGGBBAA or RRGGBBAA => (r, g, b, a)
pub fn parse_color_result(color_str: &str) -> Result<Rgba, String> {
    let trimmed = color_str.trim();
    if trimmed.eq_ignore_ascii_case("transparent") {
        return Ok(Rgba::TRANSPARENT);
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.is_ascii() {
        return Err(format!("Invalid color '{color_str}'"));
    }

    let component = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| format!("Invalid hex digit in {name} component"))
    };

    match hex.len() {
        6 => Ok(Rgba::new(
            component(0..2, "R")?,
            component(2..4, "G")?,
            component(4..6, "B")?,
            255,
        )),
        8 => Ok(Rgba::new(
            component(0..2, "R")?,
            component(2..4, "G")?,
            component(4..6, "B")?,
            component(6..8, "A")?,
        )),
        _ => Err(format!(
            "Expected 6 or 8 hex digits (RRGGBB or RRGGBBAA), got {}",
            hex.len()
        )),
    }
}

/// Format a color as `#rrggbbaa`
pub fn format_color(color: Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        color.r, color.g, color.b, color.a
    )
}

/// Fully saturated, half-lightness color for a progress value in [0, 1].
/// The hue wraps, so 0.0 and 1.0 are both red.
pub fn rainbow_color(progress: f64) -> Rgba {
    let hue = progress.rem_euclid(1.0) * 360.0;
    let hsl: Hsl<encoding::Srgb, f64> = Hsl::new(hue, 1.0, 0.5);
    let rgb: Srgb<f64> = Srgb::from_color(hsl);
    let (r, g, b) = rgb.into_components();
    Rgba::new(to_channel(r), to_channel(g), to_channel(b), 255)
}

fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
