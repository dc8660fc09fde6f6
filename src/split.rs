//! Synthesizing a dev split for treebanks that only ship train and test.
//!
//! The train sentences are shuffled and the first fifth becomes dev. The
//! random generator is created per call from a fixed seed, so a treebank
//! gets the same split no matter what else is processed in the same run.

use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::conllu::{read_sentences, write_sentences, Sentence};
use crate::error::{Error, Result};
use crate::extract::TextExtractor;

/// Fraction of train sentences moved to dev
pub const DEV_RATIO: f64 = 0.2;

/// Seed used for every split
pub const SPLIT_SEED: u64 = 1234;

/// Sentences divided into dev and train
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevTrainSplit {
    pub dev: Vec<Sentence>,
    pub train: Vec<Sentence>,
}

/// Shuffle `sentences` with a generator seeded by `seed` and split off dev.
///
/// Fails with [`Error::DevTooSmall`] if `floor(len * ratio)` is zero.
pub fn split_sentences(mut sentences: Vec<Sentence>, ratio: f64, seed: u64) -> Result<DevTrainSplit> {
    let total = sentences.len();
    let n_dev = (total as f64 * ratio).floor() as usize;
    if n_dev < 1 {
        return Err(Error::DevTooSmall { total });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    sentences.shuffle(&mut rng);

    let train = sentences.split_off(n_dev);
    Ok(DevTrainSplit {
        dev: sentences,
        train,
    })
}

/// Where the synthesized splits are written
#[derive(Debug, Clone)]
pub struct SplitOutputs {
    pub train_conllu: PathBuf,
    pub train_txt: PathBuf,
    pub dev_conllu: PathBuf,
    pub dev_txt: PathBuf,
}

/// What happened to a train file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Both splits were written
    Split { total: usize, train: usize, dev: usize },
    /// Too few sentences for a dev split; nothing was written
    TooSmall { total: usize },
}

/// Split a train file into train and dev files and derive their text
pub fn split_train_file(
    train_input: &Path,
    outputs: &SplitOutputs,
    extractor: &dyn TextExtractor,
) -> Result<SplitOutcome> {
    let sentences = read_sentences(train_input)?;

    let split = match split_sentences(sentences, DEV_RATIO, SPLIT_SEED) {
        Ok(split) => split,
        Err(Error::DevTooSmall { total }) => return Ok(SplitOutcome::TooSmall { total }),
        Err(e) => return Err(e),
    };

    let (n_train, n_dev) = (split.train.len(), split.dev.len());
    let total = n_train + n_dev;
    info!("Train/dev split not present. Randomly splitting train file");
    info!(
        "{} total sentences found: {} in train, {} in dev.",
        total, n_train, n_dev
    );

    write_sentences(&outputs.train_conllu, &split.train)?;
    write_sentences(&outputs.dev_conllu, &split.dev)?;

    extractor.extract(&outputs.train_conllu, &outputs.train_txt)?;
    extractor.extract(&outputs.dev_conllu, &outputs.dev_txt)?;

    Ok(SplitOutcome::Split {
        total,
        train: n_train,
        dev: n_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sentences(n: usize) -> Vec<Sentence> {
        (0..n)
            .map(|i| Sentence::new(vec![format!("# sent_id = {}", i), format!("1\tw{}", i)]))
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        let split = split_sentences(sentences(10), DEV_RATIO, SPLIT_SEED).unwrap();
        assert_eq!(split.dev.len(), 2);
        assert_eq!(split.train.len(), 8);

        let split = split_sentences(sentences(14), DEV_RATIO, SPLIT_SEED).unwrap();
        assert_eq!(split.dev.len(), 2);
        assert_eq!(split.train.len(), 12);
    }

    #[test]
    fn test_split_is_partition() {
        let input = sentences(37);
        let split = split_sentences(input.clone(), DEV_RATIO, SPLIT_SEED).unwrap();

        assert_eq!(split.dev.len() + split.train.len(), input.len());
        let all: HashSet<&Sentence> = split.dev.iter().chain(&split.train).collect();
        let expected: HashSet<&Sentence> = input.iter().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_split_is_deterministic() {
        let first = split_sentences(sentences(50), DEV_RATIO, SPLIT_SEED).unwrap();
        // an unrelated split in between must not change the result
        let _ = split_sentences(sentences(23), DEV_RATIO, SPLIT_SEED).unwrap();
        let second = split_sentences(sentences(50), DEV_RATIO, SPLIT_SEED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_small() {
        for n in 0..5 {
            let err = split_sentences(sentences(n), DEV_RATIO, SPLIT_SEED).unwrap_err();
            assert!(matches!(err, Error::DevTooSmall { total } if total == n));
        }
        assert!(split_sentences(sentences(5), DEV_RATIO, SPLIT_SEED).is_ok());
    }

    #[test]
    fn test_too_small_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("train.conllu");
        write_sentences(&input, &sentences(3)).unwrap();
        let outputs = SplitOutputs {
            train_conllu: dir.path().join("t.gold.conllu"),
            train_txt: dir.path().join("t.txt"),
            dev_conllu: dir.path().join("d.gold.conllu"),
            dev_txt: dir.path().join("d.txt"),
        };

        let outcome =
            split_train_file(&input, &outputs, &crate::extract::SentenceTextExtractor).unwrap();
        assert_eq!(outcome, SplitOutcome::TooSmall { total: 3 });
        assert!(!outputs.train_conllu.exists());
        assert!(!outputs.dev_conllu.exists());
        assert!(!outputs.train_txt.exists());
    }
}
