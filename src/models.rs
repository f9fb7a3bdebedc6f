use crate::color_utils::{format_color, parse_color_result};
use crate::error::{AnimationError, AnimationResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl std::str::FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color_result(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color_result(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        format_color(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PathShape {
    Straight,
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right
    Ltr,
    /// Right to left
    Rtl,
}

impl Direction {
    pub fn is_reversed(self) -> bool {
        self == Direction::Rtl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PacketSpriteKind {
    /// The configured icon image
    Icon,
    /// A plain outlined square
    Square,
}

/// Everything a run needs, read once before any frame is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub path_shape: PathShape,
    pub direction: Direction,
    pub auto_flip_icon: bool,
    pub arc_height: f64,

    pub output: PathBuf,
    pub icon: PathBuf,

    pub width: u32,
    pub height: u32,
    pub icon_width: u32,
    pub icon_height: u32,
    pub fps: u32,

    pub duration_seconds: f64,
    pub packet_interval_seconds: f64,

    pub dot_size: u32,
    pub dot_spacing: u32,
    /// Pixels the dot pattern advances per frame
    pub march_speed: u32,
    pub line_y: f64,
    /// Horizontal inset of both endpoints from the canvas edges
    pub margin: f64,
    /// Resolution of the arc-length table
    pub path_steps: usize,

    pub line_color: Rgba,
    pub rainbow: bool,
    /// Colors cycled per dot; ignored when empty or when `rainbow` is set
    pub line_palette: Vec<Rgba>,
    pub background: Rgba,

    pub packet_sprite: PacketSpriteKind,
    pub packet_size: u32,
    pub packet_fill: Rgba,
    pub packet_outline: Rgba,

    /// Quantization speed handed to the GIF encoder (1 = best, 30 = fastest)
    pub gif_speed: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_shape: PathShape::Arc,
            direction: Direction::Rtl,
            auto_flip_icon: true,
            arc_height: 80.0,
            output: PathBuf::from("media/output/drawing-animatie.gif"),
            icon: PathBuf::from("media/drawing.png"),
            width: 600,
            height: 200,
            icon_width: 24,
            icon_height: 24,
            fps: 15,
            duration_seconds: 30.0,
            packet_interval_seconds: 3.0,
            dot_size: 4,
            dot_spacing: 10,
            march_speed: 2,
            line_y: 180.0,
            margin: 50.0,
            path_steps: 500,
            line_color: Rgba::new(0, 0, 139, 255),
            rainbow: false,
            line_palette: Vec::new(),
            background: Rgba::TRANSPARENT,
            packet_sprite: PacketSpriteKind::Icon,
            packet_size: 12,
            packet_fill: Rgba::WHITE,
            packet_outline: Rgba::BLACK,
            gif_speed: 10,
        }
    }
}

impl Config {
    /// Distance between the starts of two consecutive dots
    pub fn dot_pitch(&self) -> u32 {
        self.dot_size + self.dot_spacing
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::from_config(self)
    }

    /// Reject values that would divide by zero, loop forever or overflow the GIF header.
    pub fn validate(&self) -> AnimationResult<()> {
        if self.fps == 0 {
            return Err(AnimationError::invalid_config("fps must be positive"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AnimationError::invalid_config(
                "canvas width and height must be positive",
            ));
        }
        if self.width > u16::MAX as u32 || self.height > u16::MAX as u32 {
            return Err(AnimationError::invalid_config(format!(
                "canvas {}x{} exceeds the GIF limit of {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if self.icon_width == 0 || self.icon_height == 0 {
            return Err(AnimationError::invalid_config("icon size must be positive"));
        }
        if self.dot_pitch() == 0 {
            return Err(AnimationError::invalid_config(
                "dot_size + dot_spacing must be positive",
            ));
        }
        if self.path_steps == 0 {
            return Err(AnimationError::invalid_config("path_steps must be positive"));
        }
        if !(1..=30).contains(&self.gif_speed) {
            return Err(AnimationError::invalid_config(format!(
                "gif_speed must be in 1..=30, got {}",
                self.gif_speed
            )));
        }

        let timeline = self.timeline();
        if timeline.total_frames == 0 {
            return Err(AnimationError::invalid_config(
                "duration_seconds * fps must yield at least one frame",
            ));
        }
        if timeline.packet_interval_frames == 0 {
            return Err(AnimationError::invalid_config(
                "packet_interval_seconds * fps must yield at least one frame",
            ));
        }
        Ok(())
    }
}

/// Frame counts derived from the configured rates and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub total_frames: u32,
    pub frame_duration_ms: u32,
    pub packet_interval_frames: u32,
}

impl Timeline {
    pub fn from_config(config: &Config) -> Self {
        let fps = config.fps as f64;
        Self {
            total_frames: seconds_to_frames(config.duration_seconds, fps),
            frame_duration_ms: 1000 / config.fps.max(1),
            packet_interval_frames: seconds_to_frames(config.packet_interval_seconds, fps),
        }
    }
}

fn seconds_to_frames(seconds: f64, fps: f64) -> u32 {
    let frames = (seconds * fps).round();
    if frames.is_finite() && frames > 0.0 {
        frames.min(u32::MAX as f64) as u32
    } else {
        0
    }
}
