//! Frame-driven pipeline tying landmark sources, the gesture state machine
//! and the event protocol together.
//!
//! ```text
//! LandmarkSource ──frame──▶ pinch metric ──samples──▶ HandTracker ──events──▶ EventSink
//!                                 ▲
//!                               Clock (one reading per frame)
//! ```

mod clock;
mod pipeline;

pub use clock::{Clock, ManualClock, SystemClock};
pub use pipeline::{PipelineConfig, PipelineError, PipelineStats, PointerPipeline};
