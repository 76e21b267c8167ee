//! Pronunciation dictionary: word (or single character) to its candidate readings.
use crate::cedict;
use crate::errors::{G2pError, Result};
use crate::token::{AnalyzedToken, Token};
use log::{info, warn};
use miniserde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Index-aligned readings, glosses and traditional forms for one key. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    prons: Vec<String>,
    meanings: Vec<String>,
    trads: Vec<String>,
}

/// One reading out of a [`CandidateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub pron: &'a str,
    pub meaning: &'a str,
    pub trad: &'a str,
}

impl CandidateSet {
    pub fn new(prons: Vec<String>, meanings: Vec<String>, trads: Vec<String>) -> Result<CandidateSet> {
        if prons.is_empty() {
            return Err(G2pError::invalid_dictionary("candidate set has no readings"));
        }
        if prons.len() != meanings.len() || prons.len() != trads.len() {
            return Err(G2pError::invalid_dictionary(format!(
                "candidate lists differ in length: {} readings, {} meanings, {} traditional forms",
                prons.len(),
                meanings.len(),
                trads.len()
            )));
        }
        Ok(CandidateSet { prons, meanings, trads })
    }

    /// The stand-in for a key the dictionary doesn't have: the word reads as itself.
    pub fn identity(word: &str) -> CandidateSet {
        CandidateSet {
            prons: vec![word.to_string()],
            meanings: vec![String::new()],
            trads: vec![word.to_string()],
        }
    }

    pub fn single(pron: &str, meaning: &str, trad: &str) -> CandidateSet {
        CandidateSet {
            prons: vec![pron.to_string()],
            meanings: vec![meaning.to_string()],
            trads: vec![trad.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.prons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prons.is_empty()
    }

    pub fn prons(&self) -> &[String] {
        &self.prons
    }

    pub fn meanings(&self) -> &[String] {
        &self.meanings
    }

    pub fn trads(&self) -> &[String] {
        &self.trads
    }

    pub fn get(&self, i: usize) -> Option<Candidate<'_>> {
        Some(Candidate {
            pron: self.prons.get(i)?,
            meaning: self.meanings.get(i)?,
            trad: self.trads.get(i)?,
        })
    }

    /// Adds a reading, or folds the glosses into the existing candidate when the reading is already listed.
    pub fn push(&mut self, pron: &str, meaning: &str, trad: &str) {
        match self.prons.iter().position(|p| p == pron) {
            Some(i) => merge_glosses(&mut self.meanings[i], meaning),
            None => {
                self.prons.push(pron.to_string());
                self.meanings.push(meaning.to_string());
                self.trads.push(trad.to_string());
            }
        }
    }
}

// Glosses are slash-delimited ("/row/line/"), so two of them join on a single slash.
fn merge_glosses(existing: &mut String, extra: &str) {
    if extra.is_empty() {
        return;
    }
    if existing.ends_with('/') && extra.starts_with('/') {
        existing.push_str(&extra[1..]);
    } else {
        existing.push_str(extra);
    }
}

#[derive(Deserialize)]
struct RawEntry {
    pron: Vec<String>,
    meaning: Vec<String>,
    trad: Vec<String>,
}

/// Read-only after construction; the pipeline holds one for its whole life.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, CandidateSet>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            entries: HashMap::new(),
        }
    }

    pub fn insert<S: Into<String>>(&mut self, key: S, candidates: CandidateSet) {
        self.entries.insert(key.into(), candidates);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// `{"行": {"pron": ["hang2", "xing2"], "meaning": ["/row/", "/to walk/"], "trad": ["行", "行"]}, ...}`
    pub fn from_json(text: &str) -> Result<Dictionary> {
        let raw: HashMap<String, RawEntry> = miniserde::json::from_str(text)
            .map_err(|_| G2pError::invalid_dictionary("expected a JSON object of {pron, meaning, trad} entries"))?;
        let mut dict = Dictionary::new();
        for (key, entry) in raw {
            let candidates = CandidateSet::new(entry.pron, entry.meaning, entry.trad)
                .map_err(|e| G2pError::invalid_dictionary(format!("{}: {}", key, e)))?;
            dict.insert(key, candidates);
        }
        info!("loaded {} dictionary entries from json", dict.len());
        Ok(dict)
    }

    /// Builds from CC-CEDICT text, keyed by the simplified form with readings in file order.
    pub fn from_cedict(text: &str) -> Dictionary {
        let mut dict = Dictionary::new();
        let mut skipped = 0usize;
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match cedict::parse_line(line) {
                Some(entry) => match dict.entries.get_mut(entry.simplified) {
                    Some(candidates) => candidates.push(entry.pron, entry.meaning, entry.traditional),
                    None => dict.insert(
                        entry.simplified,
                        CandidateSet::single(entry.pron, entry.meaning, entry.traditional),
                    ),
                },
                None => {
                    skipped += 1;
                    warn!("skipping malformed cedict line {}: {}", lineno + 1, line);
                }
            }
        }
        info!("loaded {} dictionary entries from cedict ({} lines skipped)", dict.len(), skipped);
        dict
    }

    /// `.json` files go through [`Dictionary::from_json`], anything else is read as CC-CEDICT.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Dictionary::from_json(&text),
            _ => Ok(Dictionary::from_cedict(&text)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CandidateSet> {
        self.entries.get(key)
    }

    /// The stored candidates for `word`, or the identity reading when it isn't a key.
    pub fn resolve(&self, word: &str) -> CandidateSet {
        self.entries
            .get(word)
            .cloned()
            .unwrap_or_else(|| CandidateSet::identity(word))
    }

    /// Whole word when it's a key, otherwise one analyzed token per character, all sharing `pos`.
    pub fn resolve_token(&self, word: &str, pos: &str) -> Vec<AnalyzedToken> {
        if let Some(candidates) = self.entries.get(word) {
            return vec![AnalyzedToken {
                token: Token::new(word, pos),
                candidates: candidates.clone(),
            }];
        }
        word.chars()
            .map(|c| {
                let ch = c.to_string();
                AnalyzedToken {
                    candidates: self.resolve(&ch),
                    token: Token::new(ch, pos),
                }
            })
            .collect()
    }
}
