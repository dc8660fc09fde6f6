//! Paths and collaborators used while preparing treebanks.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extract::{ScriptExtractor, SentenceTextExtractor, TextExtractor};

/// Default location of the extracted UD release
pub const DEFAULT_UD_BASE: &str = "extern_data/ud2/ud-treebanks-v2.8";

/// Default directory for prepared tokenizer data
pub const DEFAULT_OUTPUT_DIR: &str = "data/tokenize";

/// How plain text is derived from synthesized splits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractorConfig {
    /// Built-in one-line-per-sentence extraction
    #[default]
    Builtin,
    /// An external script such as `conllu_to_text.pl`
    Script { interpreter: String, script: PathBuf },
}

impl ExtractorConfig {
    /// Instantiate the configured extractor
    pub fn build(&self) -> Box<dyn TextExtractor> {
        match self {
            ExtractorConfig::Builtin => Box::new(SentenceTextExtractor),
            ExtractorConfig::Script {
                interpreter,
                script,
            } => Box::new(ScriptExtractor {
                interpreter: interpreter.clone(),
                script: script.clone(),
            }),
        }
    }
}

/// Settings for a preparation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepConfig {
    /// Directory holding the `UD_*` treebank directories
    pub ud_base: PathBuf,
    /// Directory receiving the prepared files
    pub output_dir: PathBuf,
    /// Text extraction for synthesized splits
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl PrepConfig {
    /// Create a config with the built-in extractor
    pub fn new(ud_base: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        PrepConfig {
            ud_base: ud_base.into(),
            output_dir: output_dir.into(),
            extractor: ExtractorConfig::Builtin,
        }
    }
}

impl Default for PrepConfig {
    fn default() -> Self {
        PrepConfig::new(DEFAULT_UD_BASE, DEFAULT_OUTPUT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PrepConfig::default();
        assert!(config.ud_base.ends_with("ud-treebanks-v2.8"));
        assert_eq!(config.output_dir, PathBuf::from("data/tokenize"));
        assert_eq!(config.extractor, ExtractorConfig::Builtin);
    }

    #[test]
    fn test_extractor_from_json() {
        let json = r#"{"ud_base": "ud", "output_dir": "out",
                       "extractor": {"kind": "script", "interpreter": "perl", "script": "conllu_to_text.pl"}}"#;
        let config: PrepConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.extractor,
            ExtractorConfig::Script {
                interpreter: "perl".to_string(),
                script: PathBuf::from("conllu_to_text.pl"),
            }
        );

        let config: PrepConfig = serde_json::from_str(r#"{"ud_base": "ud", "output_dir": "out"}"#).unwrap();
        assert_eq!(config.extractor, ExtractorConfig::Builtin);
    }
}
