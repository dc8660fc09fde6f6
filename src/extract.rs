//! Deriving plain text files from CoNLL-U annotation.
//!
//! The UD tools ship `conllu_to_text.pl`, which writes the text to stdout.
//! [`ScriptExtractor`] runs it with stdout redirected into the target file.
//! [`SentenceTextExtractor`] is a built-in replacement emitting one line
//! per sentence.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::conllu::{read_sentences, Sentence, TokenId};
use crate::error::{Error, Result};

/// Produces a plain text file from an annotation file
pub trait TextExtractor {
    /// Write the text of `conllu` to `txt`
    fn extract(&self, conllu: &Path, txt: &Path) -> Result<()>;
}

/// Runs an external script as `<interpreter> <script> <conllu> > <txt>`
#[derive(Debug, Clone)]
pub struct ScriptExtractor {
    pub interpreter: String,
    pub script: PathBuf,
}

impl ScriptExtractor {
    /// Run `script` with `perl`
    pub fn perl(script: impl Into<PathBuf>) -> Self {
        ScriptExtractor {
            interpreter: "perl".to_string(),
            script: script.into(),
        }
    }
}

impl TextExtractor for ScriptExtractor {
    fn extract(&self, conllu: &Path, txt: &Path) -> Result<()> {
        let command = format!(
            "{} {} {}",
            self.interpreter,
            self.script.display(),
            conllu.display()
        );
        debug!("Running {} > {}", command, txt.display());

        let output = File::create(txt)?;
        let result = Command::new(&self.interpreter)
            .arg(&self.script)
            .arg(conllu)
            .stdout(Stdio::from(output))
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::ExternalTool {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !result.status.success() {
            return Err(Error::ExternalTool {
                command,
                message: format!(
                    "{}: {}",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

/// Built-in extractor: one line of text per sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceTextExtractor;

impl TextExtractor for SentenceTextExtractor {
    fn extract(&self, conllu: &Path, txt: &Path) -> Result<()> {
        let sentences = read_sentences(conllu)?;
        let mut out = BufWriter::new(File::create(txt)?);
        for sentence in &sentences {
            writeln!(out, "{}", sentence_text(sentence))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// The text of a sentence.
///
/// Uses the `# text = ` comment when present, otherwise joins surface
/// tokens, honoring `SpaceAfter=No`. Words covered by a multi-word token
/// are represented by that token; empty nodes are skipped.
pub fn sentence_text(sentence: &Sentence) -> String {
    if let Some(text) = sentence.text_comment() {
        return text.to_string();
    }

    let mut text = String::new();
    let mut covered_until = 0;
    for row in sentence.token_rows() {
        match row.id {
            TokenId::Empty => continue,
            TokenId::Word(id) if id <= covered_until => continue,
            TokenId::Range(_, end) => covered_until = end,
            TokenId::Word(_) => {}
        }
        text.push_str(row.form);
        if !row.no_space_after() {
            text.push(' ');
        }
    }
    text.truncate(text.trim_end().len());
    text
}
