//! Context-aware grapheme-to-pinyin for Mandarin.
//!
//! Text is split into sentences, segmented, looked up in a pronunciation dictionary, and
//! handed to a sequence labeler that picks one reading per word from its context. The chosen
//! readings are then rewritten for tone sandhi across the whole text.
//!
//! ```no_run
//! use g2pc::G2p;
//!
//! let g2p = G2p::load("cedict_ts.u8")?;
//! for token in g2p.convert("我写了几行代码。")? {
//!     println!("{}", token.to_tsv());
//! }
//! # Ok::<(), g2pc::errors::G2pError>(())
//! ```
pub mod cedict;
pub mod decoder;
pub mod dictionary;
pub mod errors;
pub mod features;
pub mod reconcile;
pub mod sandhi;
pub mod segmenter;
pub mod sentence;
pub mod token;

pub use decoder::{Decoder, PinyinDecoder};
pub use dictionary::{CandidateSet, Dictionary};
pub use errors::{G2pError, Result};
pub use features::{FeatureMap, FeatureValue};
pub use segmenter::{ChineseSegmenter, Segmenter, TaggedSegmenter};
pub use token::{AnalyzedToken, LabeledToken, SandhiToken, Token};

use log::debug;
use rayon::prelude::*;
use std::path::Path;

/// The pipeline. Owns the dictionary, segmenter and decoder and never mutates them, so one
/// instance can serve any number of calls.
pub struct G2p<S, D> {
    dictionary: Dictionary,
    segmenter: S,
    decoder: D,
}

impl G2p<ChineseSegmenter, PinyinDecoder> {
    /// Dictionary from `path`, `chinese_segmenter` for words and the `pinyin` crate as labeler.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(G2p::new(Dictionary::load(path)?, ChineseSegmenter::new(), PinyinDecoder))
    }
}

impl<S: Segmenter, D: Decoder> G2p<S, D> {
    pub fn new(dictionary: Dictionary, segmenter: S, decoder: D) -> G2p<S, D> {
        G2p {
            dictionary,
            segmenter,
            decoder,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Sentences of dictionary-resolved tokens. Sentences the segmenter finds no words in are dropped.
    pub fn analyze(&self, text: &str) -> Result<Vec<Vec<AnalyzedToken>>> {
        let mut sentences = Vec::new();
        for sentence in sentence::split_sentences(text) {
            let tokens = self.segmenter.segment(sentence).map_err(G2pError::Segmenter)?;
            let analyzed: Vec<AnalyzedToken> = tokens
                .iter()
                .flat_map(|t| self.dictionary.resolve_token(&t.surface, &t.pos))
                .collect();
            if !analyzed.is_empty() {
                sentences.push(analyzed);
            }
        }
        Ok(sentences)
    }

    pub fn features(&self, text: &str) -> Result<Vec<Vec<FeatureMap>>> {
        Ok(self.analyze(text)?.iter().map(|s| features::extract(s)).collect())
    }

    /// Readings picked by the decoder, before sandhi.
    pub fn label(&self, text: &str) -> Result<Vec<LabeledToken>> {
        let sentences = self.analyze(text)?;
        if sentences.is_empty() {
            return Ok(Vec::new());
        }
        let features: Vec<Vec<FeatureMap>> = sentences.iter().map(|s| features::extract(s)).collect();
        let labels = self.decoder.decode(&features).map_err(G2pError::Decoder)?;
        if labels.len() != sentences.len() {
            return Err(G2pError::DecoderShape {
                expected: sentences.len(),
                got: labels.len(),
            });
        }
        let mut labeled = Vec::with_capacity(sentences.iter().map(|s| s.len()).sum());
        for (sentence, sentence_labels) in sentences.iter().zip(&labels) {
            if sentence_labels.len() != sentence.len() {
                return Err(G2pError::DecoderShape {
                    expected: sentence.len(),
                    got: sentence_labels.len(),
                });
            }
            labeled.extend(
                sentence
                    .iter()
                    .zip(sentence_labels)
                    .map(|(token, label)| reconcile::reconcile(token, label)),
            );
        }
        debug!("{} sentences, {} tokens", sentences.len(), labeled.len());
        Ok(labeled)
    }

    /// Full conversion: one output token per (possibly character-split) word, in text order.
    pub fn convert(&self, text: &str) -> Result<Vec<SandhiToken>> {
        Ok(sandhi::apply_sandhi(self.label(text)?))
    }
}

impl<S, D> G2p<S, D>
where
    S: Segmenter + Sync,
    D: Decoder + Sync,
{
    /// Converts independent texts in parallel. Sandhi never crosses from one text into another.
    pub fn convert_many(&self, texts: &[&str]) -> Vec<Result<Vec<SandhiToken>>> {
        texts.par_iter().map(|text| self.convert(text)).collect()
    }
}
