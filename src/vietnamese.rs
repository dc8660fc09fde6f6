//! Vietnamese post-processing of character labels.
//!
//! Vietnamese words are written as space-separated syllables, so the
//! tokenizer is trained on chunks instead of characters: each run of word
//! characters (with the whitespace before it) or each punctuation mark
//! becomes one chunk, labelled with the label of its last character.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// A chunk of text and its boundary label
pub type Chunk = (String, u32);

/// Unicode `\w`, which includes combining marks of decomposed text
static WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w$").unwrap());

fn is_word_char(c: char) -> bool {
    WORD_CHAR.is_match(c.encode_utf8(&mut [0; 4]))
}

fn label_at(labels: &[char], idx: usize, source: &Path) -> Result<u32> {
    let c = labels.get(idx).copied().ok_or_else(|| {
        Error::alignment(source, format!("no label for character {}", idx))
    })?;
    c.to_digit(10)
        .ok_or_else(|| Error::alignment(source, format!("invalid label '{}' at {}", c, idx)))
}

/// Chunk one paragraph of text using its character labels
pub fn paragraph_to_chunks(text: &str, labels: &str, source: &Path) -> Result<Vec<Chunk>> {
    let labels: Vec<char> = labels.chars().collect();
    let mut chunks = Vec::new();
    let mut last_chunk = String::new();
    let mut last_label = None;

    for (idx, c) in text.chars().enumerate() {
        let label = label_at(&labels, idx, source)?;
        if is_word_char(c) {
            last_chunk.push(c);
        } else {
            if last_chunk.chars().any(is_word_char) {
                chunks.push((std::mem::take(&mut last_chunk), last_label.unwrap_or(label)));
            }
            if c.is_whitespace() {
                // leading whitespace separates "2 , 2" from "2,2"
                last_chunk.push(c);
            } else {
                chunks.push((c.to_string(), label));
                last_chunk.clear();
            }
        }
        last_label = Some(label);
    }

    if !last_chunk.is_empty() {
        if let Some(label) = last_label {
            chunks.push((last_chunk, label));
        }
    }

    Ok(chunks)
}

/// Chunk every paragraph; paragraphs are separated by a blank line
pub fn paragraphs_to_chunks(text: &str, labels: &str, source: &Path) -> Result<Vec<Vec<Chunk>>> {
    let text_paragraphs: Vec<&str> = text.trim_end().split("\n\n").collect();
    let label_paragraphs: Vec<&str> = labels.trim_end().split("\n\n").collect();

    if text_paragraphs.len() != label_paragraphs.len() {
        return Err(Error::alignment(
            source,
            format!(
                "{} text paragraphs but {} label paragraphs",
                text_paragraphs.len(),
                label_paragraphs.len()
            ),
        ));
    }

    text_paragraphs
        .iter()
        .zip(&label_paragraphs)
        .map(|(paragraph, labels)| {
            let normalized: String = paragraph
                .chars()
                .map(|c| if c.is_whitespace() { ' ' } else { c })
                .collect();
            paragraph_to_chunks(normalized.trim_end(), labels, source)
        })
        .collect()
}

/// Write the chunked form of `txt` to `output` as JSON
pub fn postprocess(txt: &Path, char_level_pred: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(txt)?;
    let labels = fs::read_to_string(char_level_pred)?;
    let paragraphs = paragraphs_to_chunks(&text, &labels, char_level_pred)?;

    debug!(
        "Writing {} Vietnamese paragraphs to {}",
        paragraphs.len(),
        output.display()
    );
    let mut out = BufWriter::new(File::create(output)?);
    serde_json::to_writer(&mut out, &paragraphs)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(text: &str, labels: &str) -> Vec<Chunk> {
        paragraph_to_chunks(text, labels, Path::new("vi")).unwrap()
    }

    #[test]
    fn test_syllables_keep_leading_space() {
        let result = chunks("Tôi là sinh viên.", "00100100000000012");
        let texts: Vec<&str> = result.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["Tôi", " là", " sinh", " viên", "."]);
        let labels: Vec<u32> = result.iter().map(|(_, l)| *l).collect();
        assert_eq!(labels, vec![1, 1, 0, 1, 2]);
    }

    #[test]
    fn test_space_before_punctuation_dropped() {
        let result = chunks("2 , 2", "10101");
        assert_eq!(
            result,
            vec![
                ("2".to_string(), 1),
                (",".to_string(), 1),
                (" 2".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_decomposed_diacritics_stay_in_syllable() {
        let result = chunks("Ca\u{300}m o\u{31b}n", "00010001");
        assert_eq!(
            result,
            vec![
                ("Ca\u{300}m".to_string(), 1),
                (" o\u{31b}n".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_missing_labels_is_error() {
        let err = paragraph_to_chunks("abc", "01", Path::new("vi")).unwrap_err();
        assert!(matches!(err, Error::Alignment { .. }));
    }

    #[test]
    fn test_paragraphs() {
        let paragraphs =
            paragraphs_to_chunks("Xin chào.\n\nCảm ơn.\n", "001000012\n\n0001012", Path::new("vi"))
                .unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1][0], ("Cảm".to_string(), 0));
        assert_eq!(paragraphs[1][1], (" ơn".to_string(), 1));
        assert_eq!(paragraphs[1][2], (".".to_string(), 2));
    }

    #[test]
    fn test_paragraph_count_mismatch() {
        let err = paragraphs_to_chunks("a\n\nb", "1", Path::new("vi")).unwrap_err();
        assert!(matches!(err, Error::Alignment { .. }));
    }
}
