use crate::token::{AnalyzedToken, LabeledToken};

/// Labelers join syllables with `-`; everywhere else they're space-separated.
pub fn normalize_label(label: &str) -> String {
    label.replace('-', " ")
}

/// Picks the candidate the decoder named, or the dictionary's first reading when it named
/// something that isn't a candidate. Gloss and traditional form come from the same index.
///
/// Readings are compared and returned with `-` normalized to spaces.
pub fn reconcile(analyzed: &AnalyzedToken, label: &str) -> LabeledToken {
    let label = normalize_label(label);
    let candidates = &analyzed.candidates;
    let index = candidates
        .prons()
        .iter()
        .position(|pron| normalize_label(pron) == label)
        .unwrap_or(0);
    let (pron, meaning, trad) = match candidates.get(index) {
        Some(c) => (normalize_label(c.pron), c.meaning.to_string(), c.trad.to_string()),
        None => (analyzed.surface().to_string(), String::new(), analyzed.surface().to_string()),
    };
    LabeledToken {
        surface: analyzed.token.surface.clone(),
        pos: analyzed.token.pos.clone(),
        pron,
        meaning,
        trad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::CandidateSet;
    use crate::token::Token;

    fn hang() -> AnalyzedToken {
        AnalyzedToken {
            token: Token::new("行", "q"),
            candidates: CandidateSet::new(
                vec!["hang2".into(), "xing2".into()],
                vec!["/row/line/".into(), "/to walk/".into()],
                vec!["行".into(), "行".into()],
            )
            .unwrap(),
        }
    }

    #[test]
    fn matching_label_selects_its_candidate() {
        let labeled = reconcile(&hang(), "xing2");
        assert_eq!(labeled.pron, "xing2");
        assert_eq!(labeled.meaning, "/to walk/");
        assert_eq!(labeled.pos, "q");
    }

    #[test]
    fn unknown_label_falls_back_to_first() {
        let labeled = reconcile(&hang(), "heng2");
        assert_eq!(labeled.pron, "hang2");
        assert_eq!(labeled.meaning, "/row/line/");
        assert_eq!(labeled.trad, "行");
    }

    #[test]
    fn hyphenated_label_matches_spaced_reading() {
        let analyzed = AnalyzedToken {
            token: Token::new("老鼠", "n"),
            candidates: CandidateSet::single("lao3 shu3", "/rat/", "老鼠"),
        };
        let labeled = reconcile(&analyzed, "lao3-shu3");
        assert_eq!(labeled.pron, "lao3 shu3");
        assert_eq!(labeled.meaning, "/rat/");
    }

    #[test]
    fn hyphenated_reading_comes_out_spaced() {
        let analyzed = AnalyzedToken {
            token: Token::new("老鼠", "n"),
            candidates: CandidateSet::single("lao3-shu3", "/rat/", "老鼠"),
        };
        assert_eq!(reconcile(&analyzed, "lao3 shu3").pron, "lao3 shu3");
        assert_eq!(reconcile(&analyzed, "wo3").pron, "lao3 shu3");
    }

    #[test]
    fn identity_candidate() {
        let analyzed = AnalyzedToken {
            token: Token::new("。", "w"),
            candidates: CandidateSet::identity("。"),
        };
        let labeled = reconcile(&analyzed, "ju4");
        assert_eq!((labeled.pron.as_str(), labeled.meaning.as_str()), ("。", ""));
    }
}
