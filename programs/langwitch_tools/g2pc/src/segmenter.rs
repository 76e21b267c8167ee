//! Word segmentation + POS tagging sits outside this crate; these are the adapters for it.
use crate::errors::BoxError;
use crate::token::Token;

pub trait Segmenter {
    fn segment(&self, sentence: &str) -> Result<Vec<Token>, BoxError>;
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> Result<Vec<Token>, BoxError>,
{
    fn segment(&self, sentence: &str) -> Result<Vec<Token>, BoxError> {
        self(sentence)
    }
}

/// Dictionary-based segmentation from the `chinese_segmenter` crate.
///
/// It doesn't tag parts of speech, so every word gets the same tag.
pub struct ChineseSegmenter {
    pos: String,
}

impl ChineseSegmenter {
    pub fn new() -> ChineseSegmenter {
        ChineseSegmenter::with_pos("n")
    }

    pub fn with_pos<S: Into<String>>(pos: S) -> ChineseSegmenter {
        chinese_segmenter::initialize();
        ChineseSegmenter { pos: pos.into() }
    }
}

impl Default for ChineseSegmenter {
    fn default() -> Self {
        ChineseSegmenter::new()
    }
}

impl Segmenter for ChineseSegmenter {
    fn segment(&self, sentence: &str) -> Result<Vec<Token>, BoxError> {
        Ok(chinese_segmenter::tokenize(sentence)
            .into_iter()
            .map(|word| word.to_string())
            .filter(|word| !word.trim().is_empty())
            .map(|word| Token::new(word, self.pos.as_str()))
            .collect())
    }
}

/// Reads text an external tagger already segmented: whitespace-separated `word/pos` pairs.
/// A pair without a slash gets the fallback tag.
///
/// Sentences are split before segmentation, so `。/w` arrives as `。` closing one sentence and
/// `/w` opening the next; the bare `/w` is dropped and the mark gets the fallback tag.
pub struct TaggedSegmenter {
    fallback_pos: String,
}

impl TaggedSegmenter {
    pub fn new<S: Into<String>>(fallback_pos: S) -> TaggedSegmenter {
        TaggedSegmenter {
            fallback_pos: fallback_pos.into(),
        }
    }
}

impl Segmenter for TaggedSegmenter {
    fn segment(&self, sentence: &str) -> Result<Vec<Token>, BoxError> {
        Ok(sentence
            .split_whitespace()
            .filter_map(|pair| match pair.rsplit_once('/') {
                Some(("", _)) => None,
                Some((word, pos)) if !pos.is_empty() => Some(Token::new(word, pos)),
                _ => Some(Token::new(pair, self.fallback_pos.as_str())),
            })
            .collect())
    }
}

#[test]
fn tagged_pairs() {
    let tokens = TaggedSegmenter::new("x").segment("我/r 写/v 了/u 代码 。/w").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new("我", "r"),
            Token::new("写", "v"),
            Token::new("了", "u"),
            Token::new("代码", "x"),
            Token::new("。", "w"),
        ]
    );
}

#[test]
fn dangling_tags_from_sentence_splits() {
    let seg = TaggedSegmenter::new("w");
    assert_eq!(seg.segment("好/a 。").unwrap(), vec![Token::new("好", "a"), Token::new("。", "w")]);
    assert_eq!(seg.segment("/w 你/r").unwrap(), vec![Token::new("你", "r")]);
}

#[test]
fn closures_are_segmenters() {
    fn by_char(sentence: &str) -> Result<Vec<Token>, BoxError> {
        Ok(sentence.chars().map(|c| Token::new(c.to_string(), "x")).collect())
    }
    assert_eq!(by_char.segment("好人").unwrap().len(), 2);
}

#[test]
fn chinese_segmenter_keeps_words_whole() {
    let tokens = ChineseSegmenter::with_pos("x").segment("我喜欢学习中文").unwrap();
    assert!(!tokens.is_empty());
    assert!(tokens.iter().all(|t| !t.surface.is_empty() && t.pos == "x"));
    let joined: String = tokens.iter().map(|t| t.surface.as_str()).collect();
    assert_eq!(joined, "我喜欢学习中文");
}
