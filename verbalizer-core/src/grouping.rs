//! Timing/length topic segmentation.
//!
//! ## Algorithm
//!
//! Single left-to-right pass over the ordered segment list:
//!
//! 1. Open a block from the first segment.
//! 2. For each following segment, compute the silence gap to its
//!    predecessor (`curr.start - prev.end`) and the length of the block
//!    accumulated so far.
//! 3. If the gap exceeds `gap_threshold` or the block already exceeds
//!    `length_threshold` chars, close the block and open a new one from the
//!    current segment; otherwise append the segment's trimmed text.
//! 4. Close the final in-progress block.
//!
//! The two thresholds approximate "the speaker paused" and "this paragraph
//! is getting too long" without any semantic understanding. The length
//! check runs *before* the append, so a block may exceed `length_threshold`
//! by the text of the segment that closed it.

use tracing::debug;

use crate::transcript::{Segment, TopicBlock};

/// Tuning parameters for topic segmentation.
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    /// Silence between consecutive segments (seconds) above which a new
    /// block starts. Strict comparison: a gap exactly at the threshold does
    /// not split. Default: 1.5.
    pub gap_threshold: f64,
    /// Accumulated block length (chars) above which the next segment starts
    /// a new block. Default: 400.
    pub length_threshold: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            gap_threshold: 1.5,
            length_threshold: 400,
        }
    }
}

/// Merge an ordered segment list into topic blocks.
///
/// Total function: any well-formed input produces a result, an empty input
/// produces an empty block list. Overlapping segments yield a negative gap,
/// which simply never splits.
pub fn group_segments(segments: &[Segment], config: &GroupingConfig) -> Vec<TopicBlock> {
    let Some(first) = segments.first() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let mut current = TopicBlock {
        start: first.start,
        text: first.text.trim().to_string(),
    };

    for (prev, curr) in segments.iter().zip(segments.iter().skip(1)) {
        let gap = curr.start - prev.end;
        let len = current.text.chars().count();

        if gap > config.gap_threshold || len > config.length_threshold {
            blocks.push(current);
            current = TopicBlock {
                start: curr.start,
                text: curr.text.trim().to_string(),
            };
        } else {
            current.text.push(' ');
            current.text.push_str(curr.text.trim());
        }
    }
    blocks.push(current);

    debug!(
        segments = segments.len(),
        blocks = blocks.len(),
        "grouped transcript"
    );
    blocks
}
