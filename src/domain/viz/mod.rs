//! Visualisation transforms - pure functions turning model output into
//! highlightable spans, verb trees and saliency rankings

mod hierplane;
mod labels;
mod log_scale;
mod saliency;
mod tags;

pub use hierplane::{
    to_hierplane_trees, HierplaneTree, Node, Span, SpanType, TreeError, VerbFrame, VerbPrediction,
};
pub use labels::{attribute_display_label, NodeType, SpanLabel};
pub use log_scale::LogScale;
pub use saliency::{
    rank_saliency, shade_index, InterpretResponse, TokenSaliency, DEFAULT_SHADES, DEFAULT_TOP_K,
    MAX_SHADES, MIN_SHADES,
};
pub use tags::{format_tokens, format_tokens_lenient, FormattedToken, TagDecodeError};
