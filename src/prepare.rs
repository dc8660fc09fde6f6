//! Preparing one split of one treebank.
//!
//! Source files are copied (or transformed) into the output directory as
//! `{short}.{split}.txt` and `{short}.{split}.gold.conllu`, then labels are
//! generated next to them. Treebank- and language-specific handling is
//! chosen from the lookup tables below.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Result;
use crate::labels::prepare_tokenizer_labels;
use crate::treebank::{require_treebank_file, Split, TreebankName};
use crate::{mwt, ssj, vietnamese};

/// How source files are brought into the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preprocess {
    /// Copy text and annotation verbatim
    Copy,
    /// Copy text, drop multi-word-token rows from the annotation
    StripMwt,
    /// Apply the SSJ sentence-final spacing fix
    SsjSpacing,
}

/// Extra processing after labels are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Chunk character labels into syllable groups
    Vietnamese,
}

/// Preprocessing by treebank short name; anything else is copied
pub static PREPROCESS_TABLE: &[(&str, Preprocess)] = &[
    // other English datasets have no MWTs, so EWT drops them to stay mixable
    ("en_ewt", Preprocess::StripMwt),
    ("sl_ssj", Preprocess::SsjSpacing),
];

/// Post-processing by language code
pub static POSTPROCESS_TABLE: &[(&str, PostProcess)] = &[("vi", PostProcess::Vietnamese)];

/// Look up the preprocessing for a short name
pub fn preprocess_for(short_name: &str) -> Preprocess {
    PREPROCESS_TABLE
        .iter()
        .find(|(name, _)| *name == short_name)
        .map_or(Preprocess::Copy, |(_, p)| *p)
}

/// Look up the post-processing for a language code
pub fn postprocess_for(language: &str) -> Option<PostProcess> {
    POSTPROCESS_TABLE
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, p)| *p)
}

impl Preprocess {
    /// Bring one split's text and annotation into place
    pub fn apply(
        &self,
        input_txt: &Path,
        input_conllu: &Path,
        output_txt: &Path,
        output_conllu: &Path,
    ) -> Result<()> {
        match self {
            Preprocess::Copy => {
                fs::copy(input_txt, output_txt)?;
                fs::copy(input_conllu, output_conllu)?;
            }
            Preprocess::StripMwt => {
                mwt::strip_mwt_from_conllu(input_conllu, output_conllu)?;
                fs::copy(input_txt, output_txt)?;
            }
            Preprocess::SsjSpacing => {
                ssj::process(input_txt, input_conllu, output_txt, output_conllu)?;
            }
        }
        Ok(())
    }
}

/// Prepared text and annotation of one split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitFiles {
    pub txt: PathBuf,
    pub conllu: PathBuf,
}

impl SplitFiles {
    /// `{dir}/{short}.{split}.txt` and `{dir}/{short}.{split}.gold.conllu`
    pub fn new(dir: &Path, short_name: &str, split: Split) -> Self {
        SplitFiles {
            txt: dir.join(format!("{}.{}.txt", short_name, split)),
            conllu: dir.join(format!("{}.{}.gold.conllu", short_name, split)),
        }
    }
}

/// Label outputs of one split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFiles {
    pub toklabels: PathBuf,
    pub mwt_json: PathBuf,
    pub chunks_json: PathBuf,
}

impl LabelFiles {
    /// `{dir}/{short}-ud-{split}.toklabels`, `-mwt.json` and `.json`
    pub fn new(dir: &Path, short_name: &str, split: Split) -> Self {
        let stem = format!("{}-ud-{}", short_name, split);
        LabelFiles {
            toklabels: dir.join(format!("{}.toklabels", stem)),
            mwt_json: dir.join(format!("{}-mwt.json", stem)),
            chunks_json: dir.join(format!("{}.json", stem)),
        }
    }
}

impl PostProcess {
    /// Run on a split's prepared text and generated labels
    pub fn apply(&self, txt: &Path, labels: &LabelFiles) -> Result<()> {
        match self {
            PostProcess::Vietnamese => {
                vietnamese::postprocess(txt, &labels.toklabels, &labels.chunks_json)
            }
        }
    }
}

/// Generate labels for a prepared split, then any language post-processing
pub fn prepare_labels(
    files: &SplitFiles,
    output_dir: &Path,
    name: &TreebankName,
    split: Split,
) -> Result<LabelFiles> {
    let labels = LabelFiles::new(output_dir, &name.short_name, split);
    debug!("Generating labels for {} {}", name.short_name, split);
    prepare_tokenizer_labels(
        &files.txt,
        &files.conllu,
        &labels.toklabels,
        Some(&labels.mwt_json),
    )?;

    if let Some(post) = postprocess_for(&name.language) {
        debug!("Post-processing {} {} with {:?}", name.short_name, split, post);
        post.apply(&files.txt, &labels)?;
    }
    Ok(labels)
}

/// Copy or transform one split into `output_dir` and label it
pub fn prepare_split(
    ud_base: &Path,
    output_dir: &Path,
    name: &TreebankName,
    split: Split,
) -> Result<SplitFiles> {
    fs::create_dir_all(output_dir)?;

    let input_txt = require_treebank_file(ud_base, &name.treebank, split, "txt")?;
    let input_conllu = require_treebank_file(ud_base, &name.treebank, split, "conllu")?;
    let files = SplitFiles::new(output_dir, &name.short_name, split);

    let preprocess = preprocess_for(&name.short_name);
    info!(
        "Preparing {} {} ({:?})",
        name.short_name, split, preprocess
    );
    preprocess.apply(&input_txt, &input_conllu, &files.txt, &files.conllu)?;

    prepare_labels(&files, output_dir, name, split)?;
    Ok(files)
}
