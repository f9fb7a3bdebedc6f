use crate::curve::QuadraticCurve;
use crate::dots::{Dot, DotPlacer, LineColoring};
use crate::encoder::{FrameSink, SinkConfig};
use crate::error::{AnimationError, AnimationResult};
use crate::icon::PacketSprite;
use crate::models::{Config, Timeline};
use crate::packets::{Packet, PacketScheduler};
use crate::path_table::PathTable;
use rayon::prelude::*;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

/// Threading and chunking controls for multi-frame rendering.
#[derive(Debug, Clone)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames rendered per batch before they are pushed to a sink
    pub chunk_size: usize,
    /// Explicit worker count; rayon picks one when `None`
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Immutable per-run state plus the per-frame compositing.
///
/// Every frame is a function of its index alone, so frames can be rendered in any order or
/// concurrently.
#[derive(Debug)]
pub struct FrameRenderer {
    config: Config,
    timeline: Timeline,
    curve: QuadraticCurve,
    table: PathTable,
    coloring: LineColoring,
    scheduler: PacketScheduler,
    sprite: PacketSprite,
}

impl FrameRenderer {
    /// Validate the configuration, load the sprite and precompute the path.
    pub fn from_config(config: Config) -> AnimationResult<Self> {
        config.validate()?;
        let sprite = PacketSprite::from_config(&config)?;
        Self::new(config, sprite)
    }

    pub fn new(config: Config, sprite: PacketSprite) -> AnimationResult<Self> {
        config.validate()?;
        let timeline = config.timeline();
        let curve = QuadraticCurve::from_config(&config);
        let table = PathTable::build(&curve, config.path_steps);
        let coloring = LineColoring::from_config(&config);
        let scheduler = PacketScheduler::from_config(curve, &config);

        tracing::debug!(
            p0 = ?curve.p0,
            p1 = ?curve.p1,
            p2 = ?curve.p2,
            total_distance = table.total_distance(),
            "path prepared"
        );

        Ok(Self {
            config,
            timeline,
            curve,
            table,
            coloring,
            scheduler,
            sprite,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub fn curve(&self) -> &QuadraticCurve {
        &self.curve
    }

    pub fn path_table(&self) -> &PathTable {
        &self.table
    }

    pub fn sprite(&self) -> &PacketSprite {
        &self.sprite
    }

    pub fn dot_placer(&self) -> DotPlacer<'_> {
        DotPlacer::new(&self.table, &self.config).with_coloring(self.coloring.clone())
    }

    pub fn scheduler(&self) -> &PacketScheduler {
        &self.scheduler
    }

    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.config.width,
            height: self.config.height,
            frame_duration_ms: self.timeline.frame_duration_ms,
        }
    }

    pub fn render_frame(&self, frame: u32) -> AnimationResult<Pixmap> {
        let dots = self.dot_placer().dots_for_frame(frame);
        let packets = self.scheduler.active_packets_for_frame(frame);
        self.composite(&dots, &packets)
    }

    fn composite(&self, dots: &[Dot], packets: &[Packet]) -> AnimationResult<Pixmap> {
        let mut pixmap = Pixmap::new(self.config.width, self.config.height)
            .ok_or_else(|| AnimationError::invalid_config("Failed to create pixmap"))?;
        pixmap.fill(self.config.background.to_skia());

        let radius = self.config.dot_size as f32 / 2.0;
        if radius > 0.0 {
            let mut paint = Paint::default();
            // GIF transparency is binary, soft edges would turn into fringes
            paint.anti_alias = false;
            for dot in dots {
                let Some(circle) =
                    PathBuilder::from_circle(dot.position.x as f32, dot.position.y as f32, radius)
                else {
                    continue;
                };
                paint.set_color(dot.color.to_skia());
                pixmap.fill_path(
                    &circle,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }

        let sprite = self.sprite.pixmap();
        let half_w = (sprite.width() / 2) as f64;
        let half_h = (sprite.height() / 2) as f64;
        for packet in packets {
            let x = (packet.position.x - half_w) as i32;
            let y = (packet.position.y - half_h) as i32;
            pixmap.draw_pixmap(
                x,
                y,
                sprite.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }

        Ok(pixmap)
    }

    /// Render every frame of the timeline, in index order.
    pub fn render_all(&self, threading: &RenderThreading) -> AnimationResult<Vec<Pixmap>> {
        let total = self.timeline.total_frames;
        if !threading.parallel {
            return (0..total).map(|f| self.render_frame(f)).collect();
        }
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            (0..total)
                .into_par_iter()
                .map(|f| self.render_frame(f))
                .collect()
        })
    }

    /// Render the timeline and stream it into `sink`, returning the number of frames pushed.
    pub fn render_into(
        &self,
        sink: &mut dyn FrameSink,
        threading: &RenderThreading,
    ) -> AnimationResult<u32> {
        let total = self.timeline.total_frames;
        tracing::info!(
            frames = total,
            shape = ?self.config.path_shape,
            direction = ?self.config.direction,
            parallel = threading.parallel,
            "rendering animation"
        );

        sink.begin(self.sink_config())?;
        if !threading.parallel {
            for f in 0..total {
                let frame = self.render_frame(f)?;
                sink.push_frame(f, &frame)?;
            }
        } else {
            let pool = build_thread_pool(threading.threads)?;
            let chunk = threading.chunk_size.max(1) as u32;
            let mut start = 0;
            while start < total {
                let end = start.saturating_add(chunk).min(total);
                let frames: Vec<Pixmap> = pool.install(|| {
                    (start..end)
                        .into_par_iter()
                        .map(|f| self.render_frame(f))
                        .collect::<AnimationResult<Vec<_>>>()
                })?;
                for (f, frame) in (start..end).zip(frames.iter()) {
                    sink.push_frame(f, frame)?;
                }
                tracing::debug!(start, end, "chunk pushed");
                start = end;
            }
        }
        sink.end()?;
        Ok(total)
    }
}

fn build_thread_pool(threads: Option<usize>) -> AnimationResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        if n == 0 {
            return Err(AnimationError::invalid_config("threads must be positive"));
        }
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AnimationError::invalid_config(format!("failed to build thread pool: {e}")))
}
