pub mod color_utils;
pub mod curve;
pub mod dots;
pub mod encoder;
pub mod error;
pub mod icon;
pub mod math_utils;
pub mod models;
pub mod packets;
pub mod path_table;
pub mod renderer;
pub mod utils;

pub use curve::QuadraticCurve;
pub use dots::{Dot, DotPlacer, LineColoring};
pub use encoder::{FrameSink, GifSink, InMemorySink, SinkConfig};
pub use error::{AnimationError, AnimationResult};
pub use icon::{load_icon, PacketSprite};
pub use models::{Config, Direction, PacketSpriteKind, PathShape, Rgba, Timeline};
pub use packets::{Packet, PacketScheduler};
pub use path_table::{PathCursor, PathSample, PathTable};
pub use renderer::{FrameRenderer, RenderThreading};
pub use utils::save_png_with_quality;
