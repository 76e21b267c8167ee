//! The records a text passes through on its way to pinyin, one struct per stage.
use crate::dictionary::CandidateSet;

/// A word and its part-of-speech tag as the segmenter produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub pos: String,
}

impl Token {
    pub fn new<S: Into<String>, P: Into<String>>(surface: S, pos: P) -> Token {
        Token {
            surface: surface.into(),
            pos: pos.into(),
        }
    }
}

/// A token paired with every reading the dictionary knows for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedToken {
    pub token: Token,
    pub candidates: CandidateSet,
}

impl AnalyzedToken {
    pub fn surface(&self) -> &str {
        &self.token.surface
    }

    pub fn pos(&self) -> &str {
        &self.token.pos
    }
}

/// The reading picked for a token, before any sandhi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledToken {
    pub surface: String,
    pub pos: String,
    pub pron: String,
    pub meaning: String,
    pub trad: String,
}

impl LabeledToken {
    pub fn syllable_count(&self) -> usize {
        self.pron.split_whitespace().count()
    }
}

/// Final output unit: the chosen reading plus its sandhi-adjusted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandhiToken {
    pub surface: String,
    pub pos: String,
    pub pron: String,
    pub sandhi_pron: String,
    pub meaning: String,
    pub trad: String,
}

impl SandhiToken {
    pub fn from_labeled(labeled: LabeledToken, sandhi_pron: String) -> SandhiToken {
        SandhiToken {
            surface: labeled.surface,
            pos: labeled.pos,
            pron: labeled.pron,
            sandhi_pron,
            meaning: labeled.meaning,
            trad: labeled.trad,
        }
    }

    /// `(surface, pos, pron, sandhi_pron, meaning, trad)`
    pub fn as_tuple(&self) -> (&str, &str, &str, &str, &str, &str) {
        (
            &self.surface,
            &self.pos,
            &self.pron,
            &self.sandhi_pron,
            &self.meaning,
            &self.trad,
        )
    }

    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.surface, self.pos, self.pron, self.sandhi_pron, self.meaning, self.trad
        )
    }
}
