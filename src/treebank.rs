//! Treebank naming and file discovery.
//!
//! UD treebanks live in directories named `UD_<Language>-<Corpus>` and hold
//! files named `<lcode>_<corpus>-ud-<split>.<ext>`. Output files use the
//! short name `<lcode>_<corpus>`, e.g. `UD_English-EWT` becomes `en_ewt`.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Error, Result};

/// One of the three dataset splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Dev,
    Test,
}

impl Split {
    /// All splits in processing order
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    /// Convert to the name used in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UD language names (with underscores) to language codes
static LANGUAGE_CODES: &[(&str, &str)] = &[
    ("Abaza", "abq"),
    ("Afrikaans", "af"),
    ("Akkadian", "akk"),
    ("Akuntsu", "aqz"),
    ("Albanian", "sq"),
    ("Amharic", "am"),
    ("Ancient_Greek", "grc"),
    ("Apurina", "apu"),
    ("Arabic", "ar"),
    ("Armenian", "hy"),
    ("Assyrian", "aii"),
    ("Bambara", "bm"),
    ("Basque", "eu"),
    ("Belarusian", "be"),
    ("Bhojpuri", "bho"),
    ("Breton", "br"),
    ("Bulgarian", "bg"),
    ("Buryat", "bxr"),
    ("Cantonese", "yue"),
    ("Catalan", "ca"),
    ("Chinese", "zh"),
    ("Chukchi", "ckt"),
    ("Classical_Chinese", "lzh"),
    ("Coptic", "cop"),
    ("Croatian", "hr"),
    ("Czech", "cs"),
    ("Danish", "da"),
    ("Dutch", "nl"),
    ("English", "en"),
    ("Erzya", "myv"),
    ("Estonian", "et"),
    ("Faroese", "fo"),
    ("Finnish", "fi"),
    ("French", "fr"),
    ("Frisian_Dutch", "qfn"),
    ("Galician", "gl"),
    ("German", "de"),
    ("Gothic", "got"),
    ("Greek", "el"),
    ("Guajajara", "gub"),
    ("Hebrew", "he"),
    ("Hindi", "hi"),
    ("Hindi_English", "qhe"),
    ("Hungarian", "hu"),
    ("Icelandic", "is"),
    ("Indonesian", "id"),
    ("Irish", "ga"),
    ("Italian", "it"),
    ("Japanese", "ja"),
    ("Kaapor", "urb"),
    ("Kangri", "xnr"),
    ("Karelian", "krl"),
    ("Kazakh", "kk"),
    ("Khunsari", "kfm"),
    ("Kiche", "quc"),
    ("Komi_Permyak", "koi"),
    ("Komi_Zyrian", "kpv"),
    ("Korean", "ko"),
    ("Kurmanji", "kmr"),
    ("Latin", "la"),
    ("Latvian", "lv"),
    ("Ligurian", "lij"),
    ("Lithuanian", "lt"),
    ("Livvi", "olo"),
    ("Low_Saxon", "nds"),
    ("Makurap", "mpu"),
    ("Maltese", "mt"),
    ("Manx", "gv"),
    ("Marathi", "mr"),
    ("Mbya_Guarani", "gun"),
    ("Moksha", "mdf"),
    ("Munduruku", "myu"),
    ("Naija", "pcm"),
    ("Nayini", "nyq"),
    ("Neapolitan", "nap"),
    ("North_Sami", "sme"),
    ("Norwegian_Bokmaal", "nb"),
    ("Norwegian_Nynorsk", "nn"),
    ("Old_Church_Slavonic", "cu"),
    ("Old_East_Slavic", "orv"),
    ("Old_French", "fro"),
    ("Old_Russian", "orv"),
    ("Old_Turkish", "otk"),
    ("Persian", "fa"),
    ("Polish", "pl"),
    ("Portuguese", "pt"),
    ("Romanian", "ro"),
    ("Russian", "ru"),
    ("Sanskrit", "sa"),
    ("Scottish_Gaelic", "gd"),
    ("Serbian", "sr"),
    ("Skolt_Sami", "sms"),
    ("Slovak", "sk"),
    ("Slovenian", "sl"),
    ("Soi", "soj"),
    ("South_Levantine_Arabic", "ajp"),
    ("Spanish", "es"),
    ("Swedish", "sv"),
    ("Swedish_Sign_Language", "swl"),
    ("Swiss_German", "gsw"),
    ("Tagalog", "tl"),
    ("Tamil", "ta"),
    ("Tatar", "tt"),
    ("Telugu", "te"),
    ("Thai", "th"),
    ("Tupinamba", "tpn"),
    ("Turkish", "tr"),
    ("Turkish_German", "qtd"),
    ("Ukrainian", "uk"),
    ("Upper_Sorbian", "hsb"),
    ("Urdu", "ur"),
    ("Uyghur", "ug"),
    ("Vietnamese", "vi"),
    ("Warlpiri", "wbp"),
    ("Welsh", "cy"),
    ("Western_Armenian", "hyw"),
    ("Wolof", "wo"),
    ("Yoruba", "yo"),
    ("Yupik", "ess"),
];

static LANGUAGE_MAP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    LANGUAGE_CODES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

/// Look up the language code for a UD language name (case-insensitive)
pub fn language_code(language: &str) -> Option<&'static str> {
    LANGUAGE_MAP.get(&language.to_lowercase()).copied()
}

/// A treebank with its derived short name and language code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreebankName {
    /// Directory name, e.g. `UD_English-EWT`
    pub treebank: String,
    /// Short name, e.g. `en_ewt`
    pub short_name: String,
    /// Language code, e.g. `en`
    pub language: String,
}

impl TreebankName {
    /// Derive the short name and language code of a treebank
    pub fn parse(treebank: &str) -> Result<Self> {
        let short_name = treebank_to_short_name(treebank)?;
        let language = short_language(&short_name).to_string();
        Ok(TreebankName {
            treebank: treebank.to_string(),
            short_name,
            language,
        })
    }
}

/// Map `UD_<Language>-<Corpus>` to `<lcode>_<corpus>`
pub fn treebank_to_short_name(treebank: &str) -> Result<String> {
    let name = treebank.strip_prefix("UD_").unwrap_or(treebank);
    let (language, corpus) = name
        .split_once('-')
        .filter(|(lang, corpus)| !lang.is_empty() && !corpus.is_empty() && !corpus.contains('-'))
        .ok_or_else(|| Error::InvalidTreebankName(treebank.to_string()))?;

    let mut code = language_code(language).ok_or_else(|| Error::UnknownLanguage {
        treebank: treebank.to_string(),
        language: language.to_string(),
    })?;

    if code == "zh" {
        let corpus = corpus.to_lowercase();
        if corpus.ends_with("simp") {
            code = "zh-hans";
        } else if corpus == "gsd" || corpus == "hk" || corpus == "cfl" || corpus == "pud" {
            code = "zh-hant";
        }
    }

    Ok(format!("{}_{}", code, corpus.to_lowercase()))
}

/// Language code of a short name: everything before the first `_`
pub fn short_language(short_name: &str) -> &str {
    short_name.split('_').next().unwrap_or(short_name)
}

/// Find the single `*-ud-<split>.<ext>` file of a treebank.
///
/// Returns `Ok(None)` when no file matches and an error when several do.
pub fn find_treebank_file(
    ud_base: &Path,
    treebank: &str,
    split: Split,
    extension: &str,
) -> Result<Option<PathBuf>> {
    let dir = ud_base.join(treebank);
    let pattern = format!(
        "{}/*-ud-{}.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        split,
        extension
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        files.push(entry?);
    }

    match files.len() {
        0 => Ok(None),
        1 => Ok(files.pop()),
        count => Err(Error::AmbiguousFile { pattern, count }),
    }
}

/// Like [`find_treebank_file`], but a missing file is an error
pub fn require_treebank_file(
    ud_base: &Path,
    treebank: &str,
    split: Split,
    extension: &str,
) -> Result<PathBuf> {
    find_treebank_file(ud_base, treebank, split, extension)?.ok_or_else(|| Error::MissingFile {
        treebank: treebank.to_string(),
        split: split.to_string(),
        extension: extension.to_string(),
    })
}

/// List the `UD_*` treebanks under `ud_base` that have train and test data
pub fn list_ud_treebanks(ud_base: &Path) -> Result<Vec<String>> {
    let pattern = format!("{}/UD_*", glob::Pattern::escape(&ud_base.to_string_lossy()));

    let mut treebanks = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if !path.is_dir() {
            continue;
        }
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        if find_treebank_file(ud_base, &name, Split::Train, "conllu")?.is_some()
            && find_treebank_file(ud_base, &name, Split::Test, "conllu")?.is_some()
        {
            treebanks.push(name);
        }
    }

    treebanks.sort();
    Ok(treebanks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_short_names() {
        assert_eq!(treebank_to_short_name("UD_English-EWT").unwrap(), "en_ewt");
        assert_eq!(treebank_to_short_name("UD_Slovenian-SSJ").unwrap(), "sl_ssj");
        assert_eq!(treebank_to_short_name("UD_Vietnamese-VTB").unwrap(), "vi_vtb");
        assert_eq!(
            treebank_to_short_name("UD_Old_Church_Slavonic-PROIEL").unwrap(),
            "cu_proiel"
        );
        assert_eq!(
            treebank_to_short_name("UD_Chinese-GSDSimp").unwrap(),
            "zh-hans_gsdsimp"
        );
        assert_eq!(treebank_to_short_name("UD_Chinese-GSD").unwrap(), "zh-hant_gsd");
        assert_eq!(
            treebank_to_short_name("UD_Old_East_Slavic-RNC").unwrap(),
            "orv_rnc"
        );
        assert_eq!(
            treebank_to_short_name("UD_Western_Armenian-ArmTDP").unwrap(),
            "hyw_armtdp"
        );
        assert_eq!(treebank_to_short_name("UD_Ligurian-GLT").unwrap(), "lij_glt");
    }

    #[test]
    fn test_short_name_errors() {
        assert!(matches!(
            treebank_to_short_name("UD_English"),
            Err(Error::InvalidTreebankName(_))
        ));
        assert!(matches!(
            treebank_to_short_name("UD_Klingon-QO"),
            Err(Error::UnknownLanguage { .. })
        ));
    }

    #[test]
    fn test_treebank_name_language() {
        let name = TreebankName::parse("UD_Chinese-GSDSimp").unwrap();
        assert_eq!(name.language, "zh-hans");
        let name = TreebankName::parse("UD_North_Sami-Giella").unwrap();
        assert_eq!(name.short_name, "sme_giella");
        assert_eq!(name.language, "sme");
    }

    #[test]
    fn test_find_treebank_file() {
        let dir = tempfile::tempdir().unwrap();
        let tb = dir.path().join("UD_English-EWT");
        fs::create_dir_all(&tb).unwrap();
        fs::write(tb.join("en_ewt-ud-train.txt"), "x").unwrap();

        let found = find_treebank_file(dir.path(), "UD_English-EWT", Split::Train, "txt").unwrap();
        assert_eq!(found, Some(tb.join("en_ewt-ud-train.txt")));

        let missing = find_treebank_file(dir.path(), "UD_English-EWT", Split::Dev, "txt").unwrap();
        assert!(missing.is_none());

        fs::write(tb.join("other-ud-train.txt"), "y").unwrap();
        let err = find_treebank_file(dir.path(), "UD_English-EWT", Split::Train, "txt");
        assert!(matches!(err, Err(Error::AmbiguousFile { count: 2, .. })));
    }

    #[test]
    fn test_list_ud_treebanks() {
        let dir = tempfile::tempdir().unwrap();
        for (name, files) in [
            ("UD_Welsh-CCG", vec!["cy_ccg-ud-train.conllu", "cy_ccg-ud-test.conllu"]),
            ("UD_English-EWT", vec!["en_ewt-ud-train.conllu", "en_ewt-ud-test.conllu"]),
            ("UD_English-PUD", vec!["en_pud-ud-test.conllu"]),
            ("notes", vec!["x-ud-train.conllu"]),
        ] {
            let tb = dir.path().join(name);
            fs::create_dir_all(&tb).unwrap();
            for file in files {
                fs::write(tb.join(file), "").unwrap();
            }
        }

        let treebanks = list_ud_treebanks(dir.path()).unwrap();
        assert_eq!(treebanks, vec!["UD_English-EWT", "UD_Welsh-CCG"]);
    }
}
