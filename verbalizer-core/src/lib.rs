//! # verbalizer-core
//!
//! Reusable transcript-to-document engine.
//!
//! ## Architecture
//!
//! ```text
//! Transcription JSON → Vec<Segment> → group_segments → Vec<TopicBlock>
//!                                                            │
//!                                                  DocumentRenderer
//!                                                            │
//!                                              layout pass → PDF bytes → sink
//! ```
//!
//! Both stages are pure, synchronous transformations over immutable value
//! types. The only fallible step is the terminal sink write in the renderer.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod grouping;
pub mod naming;
pub mod render;
pub mod transcript;

// Convenience re-exports for downstream crates
pub use error::VerbalizerError;
pub use grouping::{group_segments, GroupingConfig};
pub use naming::sanitize_stem;
pub use render::{DocumentRenderer, RenderOptions};
pub use transcript::{Segment, TopicBlock, TranscriptionOutput};
