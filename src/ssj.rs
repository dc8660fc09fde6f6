//! Spacing fix for the Slovenian SSJ treebank.
//!
//! SSJ marks the last token of every sentence `SpaceAfter=No`, even though
//! sentences are separated in running text. The marker is removed from the
//! annotation, and where the raw text really runs two sentences together a
//! space is inserted after the first one.

use std::fs;
use std::path::Path;

use log::debug;

use crate::conllu::{read_sentences, write_sentences, Sentence};
use crate::error::{Error, Result};

const SPACE_AFTER_NO: &str = "SpaceAfter=No";

/// Remove a sentence-final `SpaceAfter=No` from a token row.
///
/// Returns `Ok(None)` if the row has no such marker.
fn strip_space_after(line: &str, source: &Path) -> Result<Option<String>> {
    let mut columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < 10 {
        return Err(Error::format(
            source,
            format!("sentence does not end with a token row: {}", line),
        ));
    }

    let misc: Vec<&str> = columns[9].split('|').collect();
    if !misc.contains(&SPACE_AFTER_NO) {
        return Ok(None);
    }

    let kept: Vec<&str> = misc.into_iter().filter(|m| *m != SPACE_AFTER_NO).collect();
    if kept.iter().any(|m| m.starts_with("SpaceAfter=")) {
        return Err(Error::format(
            source,
            format!("unusual SpaceAfter in row: {}", line),
        ));
    }

    let joined = if kept.is_empty() {
        "_".to_string()
    } else {
        kept.join("|")
    };
    columns[9] = &joined;
    Ok(Some(columns.join("\t")))
}

/// Fix sentence-final spacing in place and return the corrected raw text
pub fn fix_sentence_spacing(
    text: &str,
    sentences: &mut [Sentence],
    source: &Path,
) -> Result<String> {
    let raw: Vec<char> = text.chars().collect();
    let mut cursor = 0;
    let mut inserts = Vec::new();

    for sentence in sentences.iter_mut() {
        let sentence_text: Vec<char> = sentence
            .text_comment()
            .ok_or_else(|| Error::format(source, "sentence without '# text = ' comment"))?
            .chars()
            .collect();

        while cursor < raw.len() && raw[cursor].is_whitespace() {
            cursor += 1;
        }
        for expected in &sentence_text {
            let matches = match raw.get(cursor) {
                Some(c) if c.is_whitespace() => expected.is_whitespace(),
                Some(c) => c == expected,
                None => false,
            };
            if !matches {
                return Err(Error::alignment(
                    source,
                    format!(
                        "raw text at character {} does not match sentence '{}'",
                        cursor,
                        sentence_text.iter().collect::<String>()
                    ),
                ));
            }
            cursor += 1;
        }

        let last = match sentence.lines_mut().last_mut() {
            Some(last) => last,
            None => continue,
        };
        if let Some(fixed) = strip_space_after(last, source)? {
            *last = fixed;
            if raw.get(cursor).map_or(false, |c| !c.is_whitespace()) {
                inserts.push(cursor);
            }
        }
    }

    debug!("Inserting {} spaces into {}", inserts.len(), source.display());

    let mut fixed = String::with_capacity(text.len() + inserts.len());
    let mut pending = inserts.iter().peekable();
    for (i, c) in raw.iter().enumerate() {
        if pending.peek() == Some(&&i) {
            fixed.push(' ');
            pending.next();
        }
        fixed.push(*c);
    }
    Ok(fixed)
}

/// Write SSJ text and annotation copies with the spacing fix applied
pub fn process(
    input_txt: &Path,
    input_conllu: &Path,
    output_txt: &Path,
    output_conllu: &Path,
) -> Result<()> {
    let text = fs::read_to_string(input_txt)?;
    let mut sentences = read_sentences(input_conllu)?;

    let fixed = fix_sentence_spacing(&text, &mut sentences, input_conllu)?;

    fs::write(output_txt, fixed)?;
    write_sentences(output_conllu, &sentences)?;
    Ok(())
}
