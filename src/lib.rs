//! LoCon rank rewriter
//!
//! Takes a kohya_ss training config, sets `conv_dim`/`conv_alpha` to a new
//! rank, derives a descriptive run name from the config values and writes
//! the updated config into a freshly created output directory named after
//! the run.

pub mod document;
pub mod error;
pub mod rewrite;

pub use document::{ConfigDocument, SourceFormat};
pub use error::{ErrorKind, RewriteError};
pub use locon_naming::{derive_name, format_learning_rate, NameFields};
pub use rewrite::{rewrite, OutputLayout, PlanSummary, RewritePlan};
