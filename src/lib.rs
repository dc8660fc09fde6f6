//! # tokprep-rs
//!
//! Prepares tokenizer training data from Universal Dependencies treebanks.
//!
//! For each treebank the train, dev and test files are copied (or
//! transformed) into an output directory, a dev split is synthesized when
//! the treebank ships without one, and character-level token boundary
//! labels are generated for the tokenizer trainer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokprep_rs::{process_treebank, PrepConfig};
//!
//! let config = PrepConfig::new("extern_data/ud2/ud-treebanks-v2.8", "data/tokenize");
//! let outcome = process_treebank("UD_English-EWT", &config)?;
//! println!("{:?}", outcome);
//! # Ok::<(), tokprep_rs::Error>(())
//! ```
//!
//! ## Splitting Sentences
//!
//! ```rust
//! use tokprep_rs::conllu::parse_sentences;
//! use tokprep_rs::split::{split_sentences, DEV_RATIO, SPLIT_SEED};
//!
//! let conllu: String = (0..10)
//!     .map(|i| format!("# text = w{i}\n1\tw{i}\n\n"))
//!     .collect();
//! let sentences = parse_sentences(&conllu);
//!
//! let split = split_sentences(sentences, DEV_RATIO, SPLIT_SEED).unwrap();
//! assert_eq!(split.dev.len(), 2);
//! assert_eq!(split.train.len(), 8);
//! ```

pub mod config;
pub mod conllu;
pub mod error;
pub mod extract;
pub mod labels;
pub mod mwt;
pub mod pipeline;
pub mod prepare;
pub mod split;
pub mod ssj;
pub mod treebank;
pub mod vietnamese;

// Re-export main types for convenience
pub use config::{ExtractorConfig, PrepConfig};
pub use conllu::{parse_sentences, read_sentences, write_sentences, Sentence};
pub use error::{Error, Result};
pub use extract::{ScriptExtractor, SentenceTextExtractor, TextExtractor};
pub use pipeline::{process_all, process_treebank, TreebankOutcome};
pub use prepare::{PostProcess, Preprocess};
pub use split::{split_sentences, DevTrainSplit, DEV_RATIO, SPLIT_SEED};
pub use treebank::{treebank_to_short_name, Split, TreebankName};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
