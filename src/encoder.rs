use crate::error::{AnimationError, AnimationResult};
use crate::utils::{ensure_parent_dir, straight_rgba};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tiny_skia::Pixmap;

/// Parameters handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub frame_duration_ms: u32,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing frame order; sinks reject anything else.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> AnimationResult<()>;
    fn push_frame(&mut self, index: u32, frame: &Pixmap) -> AnimationResult<()>;
    fn end(&mut self) -> AnimationResult<()>;
}

fn check_order(last: Option<u32>, index: u32) -> AnimationResult<()> {
    match last {
        Some(prev) if index <= prev => Err(AnimationError::encode(format!(
            "frame {index} pushed after frame {prev}"
        ))),
        _ => Ok(()),
    }
}

fn check_size(cfg: &SinkConfig, frame: &Pixmap) -> AnimationResult<()> {
    if frame.width() != cfg.width || frame.height() != cfg.height {
        return Err(AnimationError::encode(format!(
            "frame is {}x{}, sink expects {}x{}",
            frame.width(),
            frame.height(),
            cfg.width,
            cfg.height
        )));
    }
    Ok(())
}

/// Looping GIF with restore-to-background disposal, so transparent frames never stack.
pub struct GifSink<W: Write = BufWriter<File>> {
    target: Option<W>,
    encoder: Option<gif::Encoder<W>>,
    cfg: Option<SinkConfig>,
    speed: i32,
    last_index: Option<u32>,
    frames_written: u32,
}

impl GifSink<BufWriter<File>> {
    pub fn create(path: &Path, speed: i32) -> AnimationResult<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), speed))
    }
}

impl<W: Write> GifSink<W> {
    pub fn new(writer: W, speed: i32) -> Self {
        Self {
            target: Some(writer),
            encoder: None,
            cfg: None,
            speed: speed.clamp(1, 30),
            last_index: None,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Hand back the underlying writer, writing the trailer if `end` was not called.
    pub fn into_inner(mut self) -> AnimationResult<W> {
        match self.encoder.take() {
            Some(encoder) => Ok(encoder.into_inner()?),
            None => self
                .target
                .take()
                .ok_or_else(|| AnimationError::encode("gif sink has no writer")),
        }
    }
}

/// GIF delays are in hundredths of a second.
pub fn gif_delay(frame_duration_ms: u32) -> u16 {
    (frame_duration_ms / 10).min(u16::MAX as u32) as u16
}

impl<W: Write> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> AnimationResult<()> {
        if self.cfg.is_some() {
            return Err(AnimationError::encode("gif sink already started"));
        }
        let writer = self
            .target
            .take()
            .ok_or_else(|| AnimationError::encode("gif sink has no writer"))?;
        let width = u16::try_from(cfg.width)
            .map_err(|_| AnimationError::encode(format!("width {} too large", cfg.width)))?;
        let height = u16::try_from(cfg.height)
            .map_err(|_| AnimationError::encode(format!("height {} too large", cfg.height)))?;

        let mut encoder = gif::Encoder::new(writer, width, height, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, index: u32, frame: &Pixmap) -> AnimationResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| AnimationError::encode("push_frame called before begin"))?;
        check_order(self.last_index, index)?;
        check_size(&cfg, frame)?;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| AnimationError::encode("gif sink already finished"))?;

        let mut rgba = straight_rgba(frame);
        let mut gif_frame = gif::Frame::from_rgba_speed(
            cfg.width as u16,
            cfg.height as u16,
            &mut rgba,
            self.speed,
        );
        gif_frame.delay = gif_delay(cfg.frame_duration_ms);
        gif_frame.dispose = gif::DisposalMethod::Background;
        encoder.write_frame(&gif_frame)?;

        self.last_index = Some(index);
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> AnimationResult<()> {
        if let Some(encoder) = self.encoder.take() {
            let mut writer = encoder.into_inner()?;
            writer.flush()?;
            self.target = Some(writer);
        }
        Ok(())
    }
}

/// Keeps frames in memory; used by tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    pub frames: Vec<(u32, Pixmap)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> AnimationResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, index: u32, frame: &Pixmap) -> AnimationResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| AnimationError::encode("push_frame called before begin"))?;
        check_order(self.frames.last().map(|(i, _)| *i), index)?;
        check_size(&cfg, frame)?;
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> AnimationResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Output path with `.gif` forced on, matching what the sink writes.
pub fn gif_output_path(path: &Path) -> PathBuf {
    let mut out = path.to_path_buf();
    let is_gif = out
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("gif"))
        .unwrap_or(false);
    if !is_gif {
        out.set_extension("gif");
    }
    out
}
