//! Context-window features for the sequence labeler.
//!
//! Each token gets its own codepoint key and POS tag, the same pair for up to three
//! neighbours either side, and `BOS`/`EOS` flags at the sentence edges.
use crate::token::AnalyzedToken;
use miniserde::ser::Fragment;
use miniserde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

const WINDOW: isize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Str(String),
    Bool(bool),
    Float(f64),
}

impl FeatureValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Serialize for FeatureValue {
    fn begin(&self) -> Fragment {
        match self {
            FeatureValue::Str(s) => Fragment::Str(Cow::Borrowed(s.as_str())),
            FeatureValue::Bool(b) => Fragment::Bool(*b),
            FeatureValue::Float(f) => Fragment::F64(*f),
        }
    }
}

pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// `/`-joined decimal codepoints, e.g. `"我们"` -> `"25105/20204"`.
pub fn codepoint_key(text: &str) -> String {
    text.chars()
        .map(|c| (c as u32).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`codepoint_key`]. `None` if any segment isn't a valid codepoint.
pub fn decode_codepoint_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some(String::new());
    }
    key.split('/')
        .map(|n| n.parse::<u32>().ok().and_then(char::from_u32))
        .collect()
}

fn token_features(sentence: &[AnalyzedToken], i: usize) -> FeatureMap {
    let mut features = FeatureMap::new();
    let token = &sentence[i];
    features.insert("bias".to_string(), FeatureValue::Float(1.0));
    features.insert("word".to_string(), FeatureValue::Str(codepoint_key(token.surface())));
    features.insert("postag".to_string(), FeatureValue::Str(token.pos().to_string()));

    for offset in (-WINDOW..=WINDOW).filter(|k| *k != 0) {
        let j = i as isize + offset;
        if j < 0 || j >= sentence.len() as isize {
            continue;
        }
        let neighbour = &sentence[j as usize];
        features.insert(
            format!("{:+}:word", offset),
            FeatureValue::Str(codepoint_key(neighbour.surface())),
        );
        features.insert(
            format!("{:+}:postag", offset),
            FeatureValue::Str(neighbour.pos().to_string()),
        );
    }

    if i == 0 {
        features.insert("BOS".to_string(), FeatureValue::Bool(true));
    }
    if i + 1 == sentence.len() {
        features.insert("EOS".to_string(), FeatureValue::Bool(true));
    }
    features
}

/// One feature map per token, in order.
pub fn extract(sentence: &[AnalyzedToken]) -> Vec<FeatureMap> {
    (0..sentence.len()).map(|i| token_features(sentence, i)).collect()
}

/// JSON array (one per sentence) of arrays of feature objects.
pub fn features_to_json(sentences: &[Vec<FeatureMap>]) -> String {
    miniserde::json::to_string(&sentences.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::CandidateSet;
    use crate::token::Token;

    fn sentence(words: &[(&str, &str)]) -> Vec<AnalyzedToken> {
        words
            .iter()
            .map(|(w, p)| AnalyzedToken {
                token: Token::new(*w, *p),
                candidates: CandidateSet::identity(w),
            })
            .collect()
    }

    #[test]
    fn codepoint_keys() {
        assert_eq!(codepoint_key("我们"), "25105/20204");
        assert_eq!(codepoint_key("a"), "97");
        assert_eq!(codepoint_key(""), "");
        assert_eq!(decode_codepoint_key("25105/20204").as_deref(), Some("我们"));
        assert_eq!(decode_codepoint_key("97/x"), None);
        assert_eq!(decode_codepoint_key("55296"), None);
    }

    #[test]
    fn window_is_gated_by_bounds() {
        let sent = sentence(&[("我", "r"), ("写", "v"), ("了", "u"), ("几", "m"), ("行", "q"), ("代码", "n")]);
        let features = extract(&sent);
        assert_eq!(features.len(), 6);

        let first = &features[0];
        assert_eq!(first.get("BOS"), Some(&FeatureValue::Bool(true)));
        assert!(first.get("EOS").is_none());
        assert!(first.get("-1:word").is_none());
        assert_eq!(first.get("+3:postag").and_then(|v| v.as_str()), Some("m"));
        assert_eq!(first.get("bias"), Some(&FeatureValue::Float(1.0)));

        let middle = &features[3];
        assert_eq!(middle.get("word").and_then(|v| v.as_str()), Some("20960"));
        assert_eq!(middle.get("-3:word").and_then(|v| v.as_str()), Some("25105"));
        assert_eq!(middle.get("+2:word").and_then(|v| v.as_str()), Some("20195/30721"));
        assert!(middle.get("+3:word").is_none());
        assert!(middle.get("BOS").is_none() && middle.get("EOS").is_none());
        // bias, word, postag, and five neighbours with two keys each
        assert_eq!(middle.len(), 13);

        assert_eq!(features[5].get("EOS"), Some(&FeatureValue::Bool(true)));
    }

    #[test]
    fn single_token_gets_both_flags_only() {
        let features = extract(&sentence(&[("好", "a")]));
        let keys: Vec<&str> = features[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["BOS", "EOS", "bias", "postag", "word"]);
    }

    #[test]
    fn json_export() {
        let features = vec![extract(&sentence(&[("好", "a")]))];
        let json = features_to_json(&features);
        assert!(json.starts_with(r#"[[{"BOS":true,"EOS":true,"bias":"#));
        assert!(json.ends_with(r#""postag":"a","word":"22909"}]]"#));
    }
}
