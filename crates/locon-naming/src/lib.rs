//! Derived output names for LoCon training runs.
//!
//! A run name encodes the network shape, the conv rank, the schedule and the
//! learning rate, e.g. `locon,d8,al4,conv16,conval16,epo10,cosin,AdamW8bit,1e-4`.
//! The same string is used as `output_name`, as the output directory name and
//! as the stem of the rewritten config file, so the format must stay stable.

mod learning_rate;

pub use learning_rate::format_learning_rate;

use serde::{Deserialize, Serialize};

/// Prefix for every derived name.
pub const NAME_PREFIX: &str = "locon";

/// Number of characters of the scheduler name kept in the derived name.
pub const SCHEDULER_PREFIX_LEN: usize = 5;

/// Errors produced while deriving a name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NameError {
    #[error("learning rate is not a finite number: {0}")]
    NonFiniteLearningRate(f64),
}

/// Field values that make up a derived name.
///
/// `network_dim`, `network_alpha` and `epoch` are kept as already-rendered
/// text because training configs carry them as integers, floats or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameFields {
    pub network_dim: String,
    pub network_alpha: String,
    pub rank: i64,
    pub epoch: String,
    pub lr_scheduler: String,
    pub optimizer: String,
    pub learning_rate: f64,
}

/// Keep the first [`SCHEDULER_PREFIX_LEN`] characters of a scheduler name.
///
/// Distinct schedulers sharing a prefix (`cosine` and `cosine_with_restarts`)
/// collide; existing output trees already depend on this.
pub fn truncate_scheduler(name: &str) -> &str {
    match name.char_indices().nth(SCHEDULER_PREFIX_LEN) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

/// Build the derived name for a run.
pub fn derive_name(fields: &NameFields) -> Result<String, NameError> {
    let lr = format_learning_rate(fields.learning_rate)?;

    Ok(format!(
        "{prefix},d{dim},al{alpha},conv{rank},conval{rank},epo{epoch},{sched},{opt},{lr}",
        prefix = NAME_PREFIX,
        dim = fields.network_dim,
        alpha = fields.network_alpha,
        rank = fields.rank,
        epoch = fields.epoch,
        sched = truncate_scheduler(&fields.lr_scheduler),
        opt = fields.optimizer,
        lr = lr,
    ))
}
