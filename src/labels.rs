//! Character-level token boundary labels.
//!
//! The plain text of a split is aligned with the surface tokens of its
//! annotation, and every character gets a label:
//!
//! | label | meaning                                  |
//! |-------|------------------------------------------|
//! | `0`   | inside a token, or whitespace before one |
//! | `1`   | last character of a token                |
//! | `2`   | last character of a sentence             |
//! | `3`   | last character of a multi-word token     |
//! | `4`   | multi-word token ending a sentence       |
//!
//! Paragraphs of the text (separated by a blank line) become lines of
//! labels separated by a blank line. Multi-word token expansions found on
//! the way are counted and saved as JSON.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use crate::conllu::{read_sentences, Sentence, TokenId};
use crate::error::{Error, Result};

/// A multi-word token and the words it expands to (lowercased)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MwtExpansion {
    pub surface: String,
    pub words: Vec<String>,
}

/// The result of aligning a text with its annotation
#[derive(Debug, Clone, Default)]
pub struct TokenLabels {
    /// Label characters, paragraphs separated by `\n\n`
    pub labels: String,
    /// Expansion counts, in order of first occurrence
    pub mwts: Vec<(MwtExpansion, usize)>,
}

impl TokenLabels {
    /// Serialize expansions as `[[surface, [words...]], count]` entries
    pub fn mwt_json(&self) -> Result<String> {
        let entries: Vec<((&str, &[String]), usize)> = self
            .mwts
            .iter()
            .map(|(mwt, count)| ((mwt.surface.as_str(), mwt.words.as_slice()), *count))
            .collect();
        Ok(serde_json::to_string(&entries)?)
    }
}

/// Walks the text while tokens are matched against it
struct Aligner<'a> {
    text: Vec<char>,
    index: usize,
    output: String,
    source: &'a Path,
}

impl<'a> Aligner<'a> {
    /// Consume text up to and including the next occurrence of `word`.
    ///
    /// Returns how many characters belong to the token, counting leading
    /// whitespace. Paragraph breaks met on the way go straight to output.
    fn next_word(&mut self, word: &str) -> Result<usize> {
        let word: Vec<char> = word.chars().collect();
        let mut idx = 0;
        let mut found = 0;
        let mut found_only_space = true;

        while self.index < self.text.len() && idx < word.len() {
            let c = self.text[self.index];
            let next = self.text.get(self.index + 1).copied();

            if c == '\n' && next == Some('\n') {
                if found > 0 && !found_only_space {
                    return Err(self.error(format!(
                        "text before paragraph break does not match token '{}'",
                        word.iter().collect::<String>()
                    )));
                }
                found = 0;
                found_only_space = true;
                self.output.push_str("\n\n");
                self.index += 1;
            } else if c.is_whitespace() && !word[idx].is_whitespace() {
                found += 1;
            } else {
                let c = if c == '\n' { ' ' } else { c };
                if c != word[idx] {
                    return Err(self.error(format!(
                        "character '{}' does not match '{}' in token '{}'",
                        c,
                        word[idx],
                        word.iter().collect::<String>()
                    )));
                }
                found += 1;
                found_only_space = false;
                idx += 1;
            }
            self.index += 1;
        }

        if idx < word.len() {
            return Err(self.error(format!(
                "text ended before token '{}'",
                word.iter().collect::<String>()
            )));
        }
        Ok(found)
    }

    fn error(&self, message: String) -> Error {
        Error::alignment(self.source, format!("at character {}: {}", self.index, message))
    }
}

/// Align `text` with `sentences` and compute labels and MWT counts
pub fn label_text(text: &str, sentences: &[Sentence], source: &Path) -> Result<TokenLabels> {
    let mut aligner = Aligner {
        text: text.chars().collect(),
        index: 0,
        output: String::new(),
        source,
    };

    let mut counts: HashMap<MwtExpansion, usize> = HashMap::new();
    let mut order: Vec<MwtExpansion> = Vec::new();

    for sentence in sentences {
        let mut buf = String::new();
        let mut mwt: Option<(usize, usize, String)> = None;
        let mut expanded: Vec<String> = Vec::new();
        let first_comment = sentence.comments().next().unwrap_or("");

        for row in sentence.token_rows() {
            let is_range = match row.id {
                TokenId::Empty => continue,
                TokenId::Range(begin, end) => {
                    mwt = Some((begin, end, row.form.to_string()));
                    expanded.clear();
                    true
                }
                TokenId::Word(id) => {
                    let span = mwt.as_ref().map(|(begin, end, _)| (*begin, *end));
                    match span {
                        Some((begin, end)) if begin <= id && id < end => {
                            expanded.push(row.form.to_string());
                            continue;
                        }
                        Some((_, end)) if id == end => {
                            expanded.push(row.form.to_string());
                            let words: Vec<String> =
                                expanded.drain(..).map(|w| w.to_lowercase()).collect();
                            if let Some((_, _, surface)) = mwt.take() {
                                if starts_lowercase(&surface) && !starts_lowercase(&words[0]) {
                                    warn!(
                                        "Sentence with potential wrong MWT expansion: {}",
                                        first_comment
                                    );
                                }
                                let expansion = MwtExpansion { surface, words };
                                let count = counts.entry(expansion.clone()).or_insert(0);
                                if *count == 0 {
                                    order.push(expansion);
                                }
                                *count += 1;
                            }
                            continue;
                        }
                        _ => false,
                    }
                }
            };

            aligner.output.push_str(&buf);
            let found = aligner.next_word(row.form)?;
            buf = "0".repeat(found.saturating_sub(1));
            buf.push(if is_range { '3' } else { '1' });
        }

        if let Some(last) = buf.pop() {
            let end = match last {
                '3' => '4',
                _ => '2',
            };
            buf.push(end);
            aligner.output.push_str(&buf);
        }
    }

    let mwts = order
        .into_iter()
        .map(|mwt| {
            let count = counts.get(&mwt).copied().unwrap_or(0);
            (mwt, count)
        })
        .collect();

    Ok(TokenLabels {
        labels: aligner.output,
        mwts,
    })
}

fn starts_lowercase(s: &str) -> bool {
    s.chars().next().map_or(false, char::is_lowercase)
}

/// Write token labels and, optionally, MWT expansions for a text/annotation pair
pub fn prepare_tokenizer_labels(
    txt: &Path,
    conllu: &Path,
    labels_output: &Path,
    mwt_output: Option<&Path>,
) -> Result<TokenLabels> {
    let text = fs::read_to_string(txt)?;
    let sentences = read_sentences(conllu)?;
    let labels = label_text(&text, &sentences, conllu)?;

    debug!(
        "Writing {} labels to {}",
        labels.labels.len(),
        labels_output.display()
    );
    fs::write(labels_output, &labels.labels)?;

    if let Some(path) = mwt_output {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(labels.mwt_json()?.as_bytes())?;
        out.flush()?;
    }

    Ok(labels)
}
