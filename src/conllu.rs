//! Reading and writing blank-line-delimited CoNLL-U sentence blocks.
//!
//! A sentence is kept as its raw, trimmed lines so that rewriting a file
//! reproduces exactly the same rows in the same order. A few helpers look
//! inside token rows for the modules that need column access.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Prefix of the comment carrying a sentence's raw text
pub const TEXT_COMMENT: &str = "# text = ";

/// A sentence block: ordered, non-empty annotation lines
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    lines: Vec<String>,
}

/// The ID column of a token row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenId {
    /// A regular word, e.g. `3`
    Word(usize),
    /// A multi-word token spanning words, e.g. `3-4`
    Range(usize, usize),
    /// An empty node, e.g. `3.1`
    Empty,
}

impl TokenId {
    /// Parse the ID column, returning `None` if it is not a valid ID
    pub fn parse(id: &str) -> Option<TokenId> {
        if id.contains('.') {
            return Some(TokenId::Empty);
        }
        if let Some((start, end)) = id.split_once('-') {
            let start = start.parse().ok()?;
            let end = end.parse().ok()?;
            return Some(TokenId::Range(start, end));
        }
        id.parse().ok().map(TokenId::Word)
    }
}

/// A borrowed view of one token row
#[derive(Debug, Clone, Copy)]
pub struct TokenRow<'a> {
    /// Parsed ID column
    pub id: TokenId,
    /// Surface form (second column)
    pub form: &'a str,
    /// MISC column (tenth column), `_` when absent
    pub misc: &'a str,
}

impl<'a> TokenRow<'a> {
    /// Parse a token row. Comments and malformed rows yield `None`.
    pub fn parse(line: &'a str) -> Option<TokenRow<'a>> {
        if line.starts_with('#') {
            return None;
        }
        let mut columns = line.split('\t');
        let id = TokenId::parse(columns.next()?)?;
        let form = columns.next().unwrap_or("");
        let misc = columns.nth(7).unwrap_or("_");
        Some(TokenRow { id, form, misc })
    }

    /// Whether the MISC column marks this token as not followed by a space
    pub fn no_space_after(&self) -> bool {
        self.misc.split('|').any(|entry| entry == "SpaceAfter=No")
    }
}

impl Sentence {
    /// Create a sentence from its lines
    pub fn new(lines: Vec<String>) -> Self {
        Sentence { lines }
    }

    /// All lines of the sentence, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Mutable access to the lines, for in-place row edits
    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sentence has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Comment lines (starting with `#`)
    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with('#'))
    }

    /// Parsed token rows
    pub fn token_rows(&self) -> impl Iterator<Item = TokenRow<'_>> {
        self.lines.iter().filter_map(|l| TokenRow::parse(l))
    }

    /// Value of the `# text = ` comment, if any
    pub fn text_comment(&self) -> Option<&str> {
        self.comments().find_map(|c| c.strip_prefix(TEXT_COMMENT))
    }

    /// Render the block, one line per row, with a trailing blank line
    pub fn to_conllu(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

/// Split text into sentence blocks.
///
/// Lines are trimmed. Blank lines end the current sentence; runs of blank
/// lines never produce empty sentences, and a final sentence with no
/// trailing blank line is kept.
pub fn parse_sentences(content: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut cache: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !cache.is_empty() {
                sentences.push(Sentence::new(std::mem::take(&mut cache)));
            }
            continue;
        }
        cache.push(line.to_string());
    }

    if !cache.is_empty() {
        sentences.push(Sentence::new(cache));
    }

    sentences
}

/// Read all sentences from a CoNLL-U file
pub fn read_sentences(path: &Path) -> Result<Vec<Sentence>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_sentences(&content))
}

/// Write sentences, each followed by exactly one blank line
pub fn write_sentences(path: &Path, sentences: &[Sentence]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for sentence in sentences {
        out.write_all(sentence.to_conllu().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
