use crate::error::{AnimationError, AnimationResult};
use crate::models::{Config, PacketSpriteKind, Rgba};
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbaImage};
use std::path::Path;
use tiny_skia::{ColorU8, Paint, Pixmap, Rect, Transform};

/// Raster pasted centered on every in-flight packet.
#[derive(Debug, Clone)]
pub struct PacketSprite {
    pixmap: Pixmap,
}

impl PacketSprite {
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// Load the icon or build the square, depending on `packet_sprite`.
    pub fn from_config(config: &Config) -> AnimationResult<Self> {
        match config.packet_sprite {
            PacketSpriteKind::Icon => {
                let mirror = config.direction.is_reversed() && config.auto_flip_icon;
                let pixmap =
                    load_icon(&config.icon, config.icon_width, config.icon_height, mirror)?;
                Ok(Self::from_pixmap(pixmap))
            }
            PacketSpriteKind::Square => Ok(Self::from_pixmap(square_sprite(
                config.packet_size,
                config.packet_fill,
                config.packet_outline,
            )?)),
        }
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// Read, scale and optionally mirror the packet icon.
///
/// The file is decoded once and released before any frame work starts.
pub fn load_icon(path: &Path, width: u32, height: u32, mirror: bool) -> AnimationResult<Pixmap> {
    if !path.exists() {
        return Err(AnimationError::MissingAsset {
            path: path.to_path_buf(),
        });
    }

    // format comes from the file's magic bytes, not its extension
    let decoded = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| AnimationError::AssetDecode {
            path: path.to_path_buf(),
            source,
        })?;
    let mut scaled = imageops::resize(&decoded.to_rgba8(), width, height, FilterType::Lanczos3);
    if mirror {
        imageops::flip_horizontal_in_place(&mut scaled);
    }

    tracing::debug!(
        path = %path.display(),
        width,
        height,
        mirror,
        "icon loaded"
    );
    rgba_image_to_pixmap(&scaled)
}

/// Convert straight-alpha RGBA8 into a premultiplied pixmap.
pub fn rgba_image_to_pixmap(image: &RgbaImage) -> AnimationResult<Pixmap> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        AnimationError::invalid_config(format!("cannot allocate a {width}x{height} sprite"))
    })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Filled square with a one pixel outline.
///
/// Both edges of `[c - size/2, c + size/2]` are covered, so the side is
/// `2 * (size / 2) + 1` pixels: 13 for the default size of 12.
pub fn square_sprite(size: u32, fill: Rgba, outline: Rgba) -> AnimationResult<Pixmap> {
    if size == 0 {
        return Err(AnimationError::invalid_config(
            "packet_size must be positive, got 0",
        ));
    }
    let side = 2 * (size / 2) + 1;
    let mut pixmap = Pixmap::new(side, side).ok_or_else(|| {
        AnimationError::invalid_config(format!("cannot allocate a {side}x{side} packet"))
    })?;
    pixmap.fill(outline.to_skia());

    if side > 2 {
        let inner = side as f32 - 2.0;
        if let Some(rect) = Rect::from_xywh(1.0, 1.0, inner, inner) {
            let mut paint = Paint::default();
            paint.set_color(fill.to_skia());
            paint.blend_mode = tiny_skia::BlendMode::Source;
            paint.anti_alias = false;
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
    Ok(pixmap)
}
