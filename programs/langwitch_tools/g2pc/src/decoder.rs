//! The sequence labeler is an injected capability: feature sequences in, one label per token out.
use crate::errors::BoxError;
use crate::features::{decode_codepoint_key, FeatureMap};
use pinyin::ToPinyin;

pub trait Decoder {
    /// One label sequence per sentence, index-aligned with that sentence's tokens.
    /// Multi-syllable labels may separate syllables with `-`.
    fn decode(&self, sentences: &[Vec<FeatureMap>]) -> Result<Vec<Vec<String>>, BoxError>;
}

impl<F> Decoder for F
where
    F: Fn(&[Vec<FeatureMap>]) -> Result<Vec<Vec<String>>, BoxError>,
{
    fn decode(&self, sentences: &[Vec<FeatureMap>]) -> Result<Vec<Vec<String>>, BoxError> {
        self(sentences)
    }
}

/// Context-free stand-in for a trained model: labels every token with the `pinyin` crate's
/// most common reading of each character, e.g. `行走` -> `xing2-zou3`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinyinDecoder;

impl PinyinDecoder {
    pub fn label(word: &str) -> String {
        let syllables: Vec<String> = word
            .chars()
            .filter_map(|c| c.to_pinyin())
            .map(|p| {
                let mut syllable = p.with_tone_num_end().to_string();
                if !syllable.ends_with(|c: char| c.is_ascii_digit()) {
                    syllable.push('5');
                }
                syllable
            })
            .collect();
        if syllables.is_empty() {
            word.to_string()
        } else {
            syllables.join("-")
        }
    }
}

fn label_features(features: &FeatureMap) -> Result<String, BoxError> {
    let key = features
        .get("word")
        .and_then(|v| v.as_str())
        .ok_or("feature map has no word")?;
    let word = decode_codepoint_key(key).ok_or_else(|| format!("not a codepoint key: {}", key))?;
    Ok(PinyinDecoder::label(&word))
}

impl Decoder for PinyinDecoder {
    fn decode(&self, sentences: &[Vec<FeatureMap>]) -> Result<Vec<Vec<String>>, BoxError> {
        sentences
            .iter()
            .map(|sentence| sentence.iter().map(label_features).collect::<Result<Vec<_>, _>>())
            .collect()
    }
}

#[test]
fn pinyin_labels() {
    assert_eq!(PinyinDecoder::label("老鼠"), "lao3-shu3");
    assert_eq!(PinyinDecoder::label("的"), "de5");
    assert_eq!(PinyinDecoder::label("abc"), "abc");
}

#[test]
fn decodes_from_features() {
    use crate::features::{codepoint_key, FeatureValue};
    let mut features = FeatureMap::new();
    features.insert("word".to_string(), FeatureValue::Str(codepoint_key("你好")));
    let labels = PinyinDecoder.decode(&[vec![features]]).unwrap();
    assert_eq!(labels, vec![vec!["ni3-hao3".to_string()]]);

    let missing = PinyinDecoder.decode(&[vec![FeatureMap::new()]]);
    assert!(missing.is_err());
}
