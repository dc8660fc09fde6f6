//! Stripping multi-word-token rows from CoNLL-U files.
//!
//! Some treebanks are mixed with data that has no multi-word tokens, so the
//! `N-M` range rows are dropped while the underlying words stay.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Matches a multi-word-token row by its `N-M` ID at line start
static MWT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+-[0-9]+").unwrap());

/// Whether a line is a multi-word-token row
pub fn is_mwt_line(line: &str) -> bool {
    MWT_RE.is_match(line)
}

/// Remove multi-word-token rows, keeping every other line as is.
///
/// Line terminators of kept lines are preserved.
pub fn strip_mwt_lines(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !is_mwt_line(line))
        .collect()
}

/// Copy `input` to `output` without its multi-word-token rows
pub fn strip_mwt_from_conllu(input: &Path, output: &Path) -> Result<()> {
    let content = fs::read_to_string(input)?;
    let mut out = BufWriter::new(File::create(output)?);
    out.write_all(strip_mwt_lines(&content).as_bytes())?;
    out.flush()?;
    Ok(())
}
