//! Config rewriting for a new conv rank.
//!
//! A rewrite is split into a pure [`RewritePlan::build`] step, which loads the
//! source and derives every output value, and [`RewritePlan::apply`], which
//! creates the directories and writes the new config. Nothing touches the
//! filesystem until every required field has been read.

mod layout;

pub use layout::{OutputLayout, CONFIG_EXTENSION, LOG_DIR_NAME};

use locon_naming::{derive_name, NameError, NameFields};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::ConfigDocument;
use crate::error::RewriteError;

/// Value written to `distributed_type`; accelerate rejects configs without it.
pub const DISTRIBUTED_TYPE_SINGLE: &str = "NO";

/// Config keys read and written by a rewrite.
pub mod keys {
    pub const NETWORK_DIM: &str = "network_dim";
    pub const NETWORK_ALPHA: &str = "network_alpha";
    pub const LR_SCHEDULER: &str = "lr_scheduler";
    pub const OPTIMIZER: &str = "optimizer";
    pub const EPOCH: &str = "epoch";
    pub const LEARNING_RATE: &str = "learning_rate";
    pub const OUTPUT_DIR: &str = "output_dir";

    pub const DISTRIBUTED_TYPE: &str = "distributed_type";
    pub const CONV_DIM: &str = "conv_dim";
    pub const CONV_ALPHA: &str = "conv_alpha";
    pub const OUTPUT_NAME: &str = "output_name";
    pub const LOGGING_DIR: &str = "logging_dir";
}

/// A fully derived rewrite, not yet persisted.
#[derive(Debug, Clone)]
pub struct RewritePlan {
    pub rank: i64,
    pub output_name: String,
    pub layout: OutputLayout,
    document: ConfigDocument,
}

/// Serializable description of a plan, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub config_path: String,
    pub output_name: String,
    pub output_dir: String,
    pub logging_dir: String,
}

impl RewritePlan {
    /// Load `source_path` and derive the rewritten document for `rank`.
    pub fn build(rank: i64, source_path: &Path) -> Result<Self, RewriteError> {
        let document = ConfigDocument::load(source_path)?;
        Self::from_document(rank, document)
    }

    /// Derive the rewritten document for `rank` from an already-loaded source.
    pub fn from_document(rank: i64, mut document: ConfigDocument) -> Result<Self, RewriteError> {
        document.set(keys::DISTRIBUTED_TYPE, DISTRIBUTED_TYPE_SINGLE);
        document.set(keys::CONV_DIM, rank);
        document.set(keys::CONV_ALPHA, rank);

        let fields = NameFields {
            network_dim: document.require_text(keys::NETWORK_DIM)?,
            network_alpha: document.require_text(keys::NETWORK_ALPHA)?,
            rank,
            epoch: document.require_text(keys::EPOCH)?,
            lr_scheduler: document.require_str(keys::LR_SCHEDULER)?.to_string(),
            optimizer: document.require_str(keys::OPTIMIZER)?.to_string(),
            learning_rate: document.require_f64(keys::LEARNING_RATE)?,
        };
        let output_name = derive_name(&fields).map_err(|e| match e {
            NameError::NonFiniteLearningRate(_) => {
                RewriteError::invalid(keys::LEARNING_RATE, "finite number")
            }
        })?;

        document.set(keys::OUTPUT_NAME, output_name.as_str());

        let original_output_dir = PathBuf::from(document.require_str(keys::OUTPUT_DIR)?);
        let layout = OutputLayout::derive(&original_output_dir, &output_name);

        document.set(
            keys::LOGGING_DIR,
            layout.logging_dir.to_string_lossy().into_owned(),
        );

        tracing::debug!(
            rank,
            output_name = %output_name,
            output_dir = %layout.output_dir.display(),
            "derived rewrite plan"
        );

        Ok(Self {
            rank,
            output_name,
            layout,
            document,
        })
    }

    /// The rewritten document.
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Path the rewritten config will be written to.
    pub fn config_path(&self) -> &Path {
        &self.layout.config_path
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            config_path: self.layout.config_path.to_string_lossy().into_owned(),
            output_name: self.output_name.clone(),
            output_dir: self.layout.output_dir.to_string_lossy().into_owned(),
            logging_dir: self.layout.logging_dir.to_string_lossy().into_owned(),
        }
    }

    /// Create the output directories and write the rewritten config.
    ///
    /// Directories created before a failed write are left in place.
    pub fn apply(&self) -> Result<PathBuf, RewriteError> {
        let json = self.document.to_pretty_json()?;

        self.layout.create_dirs()?;

        let path = &self.layout.config_path;
        fs::write(path, json).map_err(|e| RewriteError::io(path, e))?;

        tracing::info!(
            source = %self.document.source().display(),
            path = %path.display(),
            rank = self.rank,
            "wrote rewritten config"
        );

        Ok(path.clone())
    }
}

/// Rewrite the config at `source_path` for `rank`, returning the new config path.
pub fn rewrite(rank: i64, source_path: &Path) -> Result<PathBuf, RewriteError> {
    RewritePlan::build(rank, source_path)?.apply()
}
