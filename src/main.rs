use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use packetline::color_utils::parse_color_result;
use packetline::encoder::gif_output_path;
use packetline::{
    save_png_with_quality, Config, Direction, FrameRenderer, GifSink, PacketSpriteKind,
    PathShape, RenderThreading, Rgba,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "packetline")]
#[command(about = "Render a dotted line with travelling packets as a looping GIF", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full animation as a GIF
    Render(RenderArgs),
    /// Render a single frame as a PNG
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output GIF path (overrides the configuration file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Render frames on a worker pool
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for --parallel
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (0-based)
    #[arg(long)]
    index: u32,

    /// Output PNG path
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// PNG compression quality (0-100)
    #[arg(long, default_value_t = 90)]
    quality: u8,
}

/// Overrides applied on top of the JSON configuration (or the defaults).
#[derive(Args, Debug, Default)]
struct ConfigArgs {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    shape: Option<PathShape>,

    #[arg(long, value_enum)]
    direction: Option<Direction>,

    /// Keep the icon unmirrored for right-to-left runs
    #[arg(long)]
    no_flip: bool,

    #[arg(long)]
    arc_height: Option<f64>,

    /// Icon image path
    #[arg(long, value_name = "FILE")]
    icon: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    icon_width: Option<u32>,

    #[arg(long)]
    icon_height: Option<u32>,

    #[arg(long)]
    fps: Option<u32>,

    /// Animation length in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Seconds between packet spawns
    #[arg(long)]
    interval: Option<f64>,

    #[arg(long)]
    dot_size: Option<u32>,

    #[arg(long)]
    dot_spacing: Option<u32>,

    #[arg(long)]
    line_y: Option<f64>,

    /// Line color as #RRGGBB, #RRGGBBAA or "transparent"
    #[arg(long, value_parser = parse_color_result)]
    line_color: Option<Rgba>,

    /// Color the line by path progress
    #[arg(long)]
    rainbow: bool,

    /// Background color as #RRGGBB, #RRGGBBAA or "transparent"
    #[arg(long, value_parser = parse_color_result)]
    background: Option<Rgba>,

    #[arg(long, value_enum)]
    sprite: Option<PacketSpriteKind>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let json_content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {path:?}"))?;
                serde_json::from_str::<Config>(&json_content)
                    .with_context(|| format!("Failed to parse config file: {path:?}"))?
            }
            None => Config::default(),
        };

        if let Some(shape) = self.shape {
            config.path_shape = shape;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if self.no_flip {
            config.auto_flip_icon = false;
        }
        if let Some(arc_height) = self.arc_height {
            config.arc_height = arc_height;
        }
        if let Some(icon) = &self.icon {
            config.icon = icon.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(w) = self.icon_width {
            config.icon_width = w;
        }
        if let Some(h) = self.icon_height {
            config.icon_height = h;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(duration) = self.duration {
            config.duration_seconds = duration;
        }
        if let Some(interval) = self.interval {
            config.packet_interval_seconds = interval;
        }
        if let Some(size) = self.dot_size {
            config.dot_size = size;
        }
        if let Some(spacing) = self.dot_spacing {
            config.dot_spacing = spacing;
        }
        if let Some(line_y) = self.line_y {
            config.line_y = line_y;
        }
        if let Some(color) = self.line_color {
            config.line_color = color;
        }
        if self.rainbow {
            config.rainbow = true;
        }
        if let Some(background) = self.background {
            config.background = background;
        }
        if let Some(sprite) = self.sprite {
            config.packet_sprite = sprite;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render(args) => {
            let mut config = args.config.resolve()?;
            if let Some(output) = args.output {
                config.output = output;
            }
            let output_path = gif_output_path(&config.output);
            let speed = config.gif_speed;

            let renderer =
                FrameRenderer::from_config(config).context("Failed to prepare animation")?;
            let timeline = renderer.timeline();
            println!(
                "Rendering {} frames ({:?}, {:?})...",
                timeline.total_frames,
                renderer.config().path_shape,
                renderer.config().direction
            );

            let threading = RenderThreading {
                parallel: args.parallel,
                chunk_size: args.chunk_size,
                threads: args.threads,
            };
            let mut sink = GifSink::create(&output_path, speed)
                .with_context(|| format!("Failed to create GIF file: {output_path:?}"))?;
            renderer
                .render_into(&mut sink, &threading)
                .with_context(|| format!("Failed to render GIF: {output_path:?}"))?;

            println!("Done! Saved animation to {}", output_path.display());
        }
        Command::Frame(args) => {
            let config = args.config.resolve()?;
            let renderer =
                FrameRenderer::from_config(config).context("Failed to prepare animation")?;
            let total = renderer.timeline().total_frames;
            if args.index >= total {
                tracing::warn!(
                    index = args.index,
                    total,
                    "frame index is past the end of the animation"
                );
            }

            let frame = renderer.render_frame(args.index)?;
            packetline::utils::ensure_parent_dir(&args.out)?;
            save_png_with_quality(&frame, &args.out, args.quality)
                .with_context(|| format!("Failed to write PNG: {:?}", args.out))?;

            println!("Saved frame {} to {}", args.index, args.out.display());
        }
    }

    Ok(())
}
