//! Treebank-level dispatch.
//!
//! A treebank with a dev split has each split prepared independently. A
//! treebank without one has its train file split into train and dev first;
//! the test split is always prepared as is.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::PrepConfig;
use crate::error::{Error, Result};
use crate::extract::TextExtractor;
use crate::prepare::{prepare_labels, prepare_split, SplitFiles};
use crate::split::{split_train_file, SplitOutcome, SplitOutputs};
use crate::treebank::{
    find_treebank_file, list_ud_treebanks, require_treebank_file, Split, TreebankName,
};

/// Treebank arguments that stand for every treebank under the UD base
pub const ALL_TREEBANKS: &[&str] = &["ud_all", "all_ud"];

/// What happened to one treebank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TreebankOutcome {
    /// All three splits were written
    Prepared {
        #[serde(flatten)]
        name: TreebankName,
        synthesized_dev: bool,
    },
    /// Train was too small to carve out a dev split
    SkippedSmallDev {
        #[serde(flatten)]
        name: TreebankName,
        total: usize,
    },
    /// Found in the catalog, but its language has no known code
    SkippedUnknownLanguage { treebank: String, language: String },
}

impl TreebankOutcome {
    /// Whether the treebank was left unprepared
    pub fn is_skipped(&self) -> bool {
        !matches!(self, TreebankOutcome::Prepared { .. })
    }
}

/// Prepare train, dev and test of a treebank that has all three
pub fn process_ud_treebank(config: &PrepConfig, name: &TreebankName) -> Result<()> {
    for split in Split::ALL {
        prepare_split(&config.ud_base, &config.output_dir, name, split)?;
    }
    Ok(())
}

/// Prepare a treebank with only train and test, synthesizing dev.
///
/// Returns the split outcome; on [`SplitOutcome::TooSmall`] nothing is
/// prepared.
pub fn process_partial_ud_treebank(
    config: &PrepConfig,
    name: &TreebankName,
    extractor: &dyn TextExtractor,
) -> Result<SplitOutcome> {
    let train_input = require_treebank_file(&config.ud_base, &name.treebank, Split::Train, "conllu")?;

    std::fs::create_dir_all(&config.output_dir)?;
    let dir: &Path = &config.output_dir;
    let train = SplitFiles::new(dir, &name.short_name, Split::Train);
    let dev = SplitFiles::new(dir, &name.short_name, Split::Dev);
    let outputs = SplitOutputs {
        train_conllu: train.conllu.clone(),
        train_txt: train.txt.clone(),
        dev_conllu: dev.conllu.clone(),
        dev_txt: dev.txt.clone(),
    };

    let outcome = split_train_file(&train_input, &outputs, extractor)?;
    if let SplitOutcome::TooSmall { .. } = outcome {
        return Ok(outcome);
    }

    prepare_labels(&train, dir, name, Split::Train)?;
    prepare_labels(&dev, dir, name, Split::Dev)?;

    prepare_split(&config.ud_base, dir, name, Split::Test)?;
    Ok(outcome)
}

/// Prepare a single treebank
pub fn process_treebank(treebank: &str, config: &PrepConfig) -> Result<TreebankOutcome> {
    if find_treebank_file(&config.ud_base, treebank, Split::Train, "txt")?.is_none() {
        return Err(Error::MissingTrainFile(treebank.to_string()));
    }

    let name = TreebankName::parse(treebank)?;
    info!(
        "Preparing data for {}: {}, {}",
        name.treebank, name.short_name, name.language
    );

    if find_treebank_file(&config.ud_base, treebank, Split::Dev, "txt")?.is_some() {
        process_ud_treebank(config, &name)?;
        return Ok(TreebankOutcome::Prepared {
            name,
            synthesized_dev: false,
        });
    }

    let extractor = config.extractor.build();
    match process_partial_ud_treebank(config, &name, extractor.as_ref())? {
        SplitOutcome::TooSmall { total } => {
            warn!(
                "Skipping {}: {} train sentences are too few for a dev split",
                name.treebank, total
            );
            Ok(TreebankOutcome::SkippedSmallDev { name, total })
        }
        SplitOutcome::Split { .. } => Ok(TreebankOutcome::Prepared {
            name,
            synthesized_dev: true,
        }),
    }
}

/// Whether a treebank argument stands for the whole catalog
pub fn is_catalog_keyword(treebank: &str) -> bool {
    ALL_TREEBANKS.contains(&treebank.to_lowercase().as_str())
}

/// Prepare a treebank found by catalog expansion.
///
/// Treebanks in languages without a known code are skipped, not fatal.
fn process_catalog_treebank(treebank: &str, config: &PrepConfig) -> Result<TreebankOutcome> {
    match process_treebank(treebank, config) {
        Err(Error::UnknownLanguage { treebank, language }) => {
            warn!("Skipping {}: no language code for {}", treebank, language);
            Ok(TreebankOutcome::SkippedUnknownLanguage { treebank, language })
        }
        other => other,
    }
}

/// Prepare each treebank in turn, stopping at the first hard error.
///
/// `ud_all` / `all_ud` expand into every treebank under the UD base.
pub fn process_all(treebanks: &[String], config: &PrepConfig) -> Result<Vec<TreebankOutcome>> {
    let mut outcomes = Vec::new();
    for treebank in treebanks {
        if !is_catalog_keyword(treebank) {
            outcomes.push(process_treebank(treebank, config)?);
            continue;
        }

        let catalog = list_ud_treebanks(&config.ud_base)?;
        info!(
            "Processing {} treebanks from {}",
            catalog.len(),
            config.ud_base.display()
        );
        for treebank in &catalog {
            outcomes.push(process_catalog_treebank(treebank, config)?);
        }
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_train_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = PrepConfig::new(dir.path(), dir.path().join("out"));
        let err = process_treebank("UD_English-EWT", &config).unwrap_err();
        assert!(matches!(err, Error::MissingTrainFile(ref tb) if tb == "UD_English-EWT"));
    }

    #[test]
    fn test_catalog_keywords() {
        assert!(is_catalog_keyword("ud_all"));
        assert!(is_catalog_keyword("ALL_UD"));
        assert!(!is_catalog_keyword("UD_English-EWT"));
    }

    #[test]
    fn test_explicit_unknown_language_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let tb = dir.path().join("UD_Klingon-QO");
        fs::create_dir_all(&tb).unwrap();
        fs::write(tb.join("tlh_qo-ud-train.txt"), "").unwrap();

        let config = PrepConfig::new(dir.path(), dir.path().join("out"));
        let err = process_all(&["UD_Klingon-QO".to_string()], &config).unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage { .. }));
    }

    #[test]
    fn test_outcome_json() {
        let outcome = TreebankOutcome::SkippedSmallDev {
            name: TreebankName::parse("UD_Welsh-CCG").unwrap(),
            total: 3,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped_small_dev");
        assert_eq!(json["short_name"], "cy_ccg");
        assert_eq!(json["total"], 3);
        assert!(outcome.is_skipped());
    }
}
