//! Tone sandhi over a whole text's pinyin.
//!
//! Rules run in a fixed order, each seeing the previous one's output:
//! third-tone (once inside each token, once across the joined stream), then 不, then 一.
//! Every rule is a left-to-right scan over the flattened syllables; a rule that rewrites a
//! syllable because of its right neighbour consumes that neighbour, so the neighbour can't
//! start another match in the same pass.
use crate::token::{LabeledToken, SandhiToken};
use std::ops::Range;

const BU: char = '不';
const YI: char = '一';
const ORDINAL: char = '第';

/// Tone digit at the end of a syllable, if it has one.
pub fn tone(syllable: &str) -> Option<char> {
    syllable.chars().last().filter(|c| c.is_ascii_digit())
}

fn has_tone(syllable: &str, tones: &[char]) -> bool {
    tone(syllable).map_or(false, |t| tones.contains(&t))
}

fn set_tone(syllable: &mut String, new_tone: char) {
    if tone(syllable).is_some() {
        syllable.pop();
        syllable.push(new_tone);
    }
}

/// `3 3` -> `2 3`, consuming the second syllable of each pair.
pub fn third_tone(syllables: &mut [String]) {
    let mut i = 0;
    while i + 1 < syllables.len() {
        if has_tone(&syllables[i], &['3']) && has_tone(&syllables[i + 1], &['3']) {
            set_tone(&mut syllables[i], '2');
            i += 2;
        } else {
            i += 1;
        }
    }
}

/// Rewrites `target` to `replacement` wherever the next syllable carries one of `next_tones`.
/// Positions flagged in `keep` are left alone.
fn rewrite_before(syllables: &mut [String], target: &str, replacement: &str, next_tones: &[char], keep: &[bool]) {
    let mut i = 0;
    while i + 1 < syllables.len() {
        let hit = syllables[i] == target
            && !keep.get(i).copied().unwrap_or(false)
            && has_tone(&syllables[i + 1], next_tones);
        if hit {
            syllables[i] = replacement.to_string();
            i += 2;
        } else {
            i += 1;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    syllable: Option<usize>,
}

/// Flattened syllables of a text, with its characters laid alongside.
///
/// A token's characters line up with its syllables only when it has exactly one syllable per
/// character; characters of any other token point at no syllable, so the character patterns
/// (`X不X`, `X一X`, `第一`) never rewrite them.
#[derive(Debug, Clone)]
pub struct SyllableStream {
    syllables: Vec<String>,
    cells: Vec<Cell>,
    spans: Vec<Range<usize>>,
}

impl SyllableStream {
    pub fn new(tokens: &[LabeledToken]) -> SyllableStream {
        let mut syllables = Vec::new();
        let mut cells = Vec::new();
        let mut spans = Vec::with_capacity(tokens.len());
        for token in tokens {
            let start = syllables.len();
            syllables.extend(token.pron.split_whitespace().map(|s| s.to_string()));
            let span = start..syllables.len();
            let aligned = token.surface.chars().count() == span.len();
            cells.extend(token.surface.chars().enumerate().map(|(k, ch)| Cell {
                ch,
                syllable: if aligned { Some(start + k) } else { None },
            }));
            spans.push(span);
        }
        SyllableStream { syllables, cells, spans }
    }

    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }

    pub fn third_tone_per_token(&mut self) {
        for span in &self.spans {
            third_tone(&mut self.syllables[span.clone()]);
        }
    }

    pub fn third_tone(&mut self) {
        third_tone(&mut self.syllables);
    }

    /// Syllables of every `marker` sitting between two identical characters.
    fn reduplicated(&self, marker: char) -> Vec<usize> {
        self.cells
            .windows(3)
            .filter(|w| w[1].ch == marker && w[0].ch == w[2].ch)
            .filter_map(|w| w[1].syllable)
            .collect()
    }

    fn ordinal_yi(&self) -> Vec<bool> {
        let mut keep = vec![false; self.syllables.len()];
        for w in self.cells.windows(2) {
            if w[0].ch == ORDINAL && w[1].ch == YI {
                if let Some(s) = w[1].syllable {
                    keep[s] = true;
                }
            }
        }
        keep
    }

    /// `X不X` -> `bu5`, then `bu4` before a fourth tone -> `bu2`.
    pub fn bu_sandhi(&mut self) {
        for s in self.reduplicated(BU) {
            self.syllables[s] = "bu5".to_string();
        }
        rewrite_before(&mut self.syllables, "bu4", "bu2", &['4'], &[]);
    }

    /// `X一X` -> `yi5`, then `yi1` before a fourth tone -> `yi2`, then `yi1` before tones 1-3 -> `yi4`.
    /// 一 right after 第 is an ordinal and keeps its tone.
    pub fn yi_sandhi(&mut self) {
        for s in self.reduplicated(YI) {
            self.syllables[s] = "yi5".to_string();
        }
        let keep = self.ordinal_yi();
        rewrite_before(&mut self.syllables, "yi1", "yi2", &['4'], &keep);
        rewrite_before(&mut self.syllables, "yi1", "yi4", &['1', '2', '3'], &keep);
    }

    /// Hands the syllables back out, `counts[i]` at a time from the front.
    fn regroup(self, counts: impl Iterator<Item = usize>) -> Vec<String> {
        let mut rest = self.syllables.into_iter();
        counts
            .map(|n| rest.by_ref().take(n).collect::<Vec<_>>().join(" "))
            .collect()
    }
}

/// Runs every rule over a whole text and pairs each token with its adjusted reading.
pub fn apply_sandhi(tokens: Vec<LabeledToken>) -> Vec<SandhiToken> {
    let mut stream = SyllableStream::new(&tokens);
    // TODO: the per-token pass may be redundant next to the joined one; drop it if no reading depends on it.
    stream.third_tone_per_token();
    stream.third_tone();
    stream.bu_sandhi();
    stream.yi_sandhi();
    let adjusted = stream.regroup(tokens.iter().map(|t| t.syllable_count()));
    tokens
        .into_iter()
        .zip(adjusted)
        .map(|(token, sandhi)| SandhiToken::from_labeled(token, sandhi))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(surface: &str, pron: &str) -> LabeledToken {
        LabeledToken {
            surface: surface.to_string(),
            pos: "x".to_string(),
            pron: pron.to_string(),
            meaning: String::new(),
            trad: surface.to_string(),
        }
    }

    fn sandhi(tokens: &[(&str, &str)]) -> Vec<String> {
        apply_sandhi(tokens.iter().map(|(s, p)| labeled(s, p)).collect())
            .into_iter()
            .map(|t| t.sandhi_pron)
            .collect()
    }

    fn syllables(text: &str) -> Vec<String> {
        text.split_whitespace().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tone_digits() {
        assert_eq!(tone("hao3"), Some('3'));
        assert_eq!(tone("de5"), Some('5'));
        assert_eq!(tone("。"), None);
        assert_eq!(tone(""), None);
    }

    #[test]
    fn third_tone_pairs_consume() {
        let mut s = syllables("ni3 hao3 ma3");
        third_tone(&mut s);
        assert_eq!(s, syllables("ni2 hao3 ma3"));
        third_tone(&mut s);
        assert_eq!(s, syllables("ni2 hao2 ma3"));

        let mut s = syllables("wo3 hen3 hao3 a5");
        third_tone(&mut s);
        assert_eq!(s, syllables("wo2 hen3 hao3 a5"));
    }

    #[test]
    fn third_tone_ignores_untoned() {
        let mut s = syllables("3 abc hao3");
        third_tone(&mut s);
        assert_eq!(s, syllables("3 abc hao3"));
    }

    #[test]
    fn stream_flattens_token_syllables() {
        let mut stream = SyllableStream::new(&[labeled("你好", "ni3 hao3"), labeled("吗", "ma3")]);
        assert_eq!(stream.syllables(), syllables("ni3 hao3 ma3").as_slice());
        stream.third_tone_per_token();
        assert_eq!(stream.syllables(), syllables("ni2 hao3 ma3").as_slice());
    }

    #[test]
    fn laoshu() {
        assert_eq!(sandhi(&[("老鼠", "lao3 shu3")]), vec!["lao2 shu3"]);
    }

    #[test]
    fn third_tone_across_words() {
        assert_eq!(sandhi(&[("我", "wo3"), ("想", "xiang3")]), vec!["wo2", "xiang3"]);
        // 你好吗: the per-token pass fixes 你好, the joined pass then pairs 好 with 吗
        assert_eq!(sandhi(&[("你好", "ni3 hao3"), ("吗", "ma3")]), vec!["ni2 hao2", "ma3"]);
    }

    #[test]
    fn bu_before_fourth_tone() {
        assert_eq!(sandhi(&[("不是", "bu4 shi4")]), vec!["bu2 shi4"]);
        assert_eq!(sandhi(&[("不", "bu4"), ("去", "qu4")]), vec!["bu2", "qu4"]);
        assert_eq!(sandhi(&[("不好", "bu4 hao3")]), vec!["bu4 hao3"]);
    }

    #[test]
    fn bu_reduplication() {
        assert_eq!(sandhi(&[("是", "shi4"), ("不", "bu4"), ("是", "shi4")]), vec!["shi4", "bu5", "shi4"]);
        assert_eq!(sandhi(&[("好不好", "hao3 bu4 hao3")]), vec!["hao3 bu5 hao3"]);
    }

    #[test]
    fn yi_rules() {
        assert_eq!(sandhi(&[("一定", "yi1 ding4")]), vec!["yi2 ding4"]);
        assert_eq!(sandhi(&[("一天", "yi1 tian1")]), vec!["yi4 tian1"]);
        assert_eq!(sandhi(&[("一", "yi1"), ("年", "nian2")]), vec!["yi4", "nian2"]);
        assert_eq!(sandhi(&[("一起", "yi1 qi3")]), vec!["yi4 qi3"]);
        assert_eq!(sandhi(&[("看", "kan4"), ("一", "yi1"), ("看", "kan4")]), vec!["kan4", "yi5", "kan4"]);
        // nothing follows
        assert_eq!(sandhi(&[("一", "yi1")]), vec!["yi1"]);
    }

    #[test]
    fn ordinal_yi_keeps_tone() {
        assert_eq!(sandhi(&[("第一", "di4 yi1"), ("天", "tian1")]), vec!["di4 yi1", "tian1"]);
    }

    #[test]
    fn misaligned_tokens_skip_character_rules() {
        // three characters over two syllables: 不 has no syllable of its own here
        assert_eq!(sandhi(&[("是不是", "shi4 bu4")]), vec!["shi4 bu4"]);
        // the pattern itself only looks at characters, wherever they come from
        assert_eq!(sandhi(&[("ok", "ok"), ("不", "bu4"), ("k", "k")]), vec!["ok", "bu5", "k"]);
    }

    #[test]
    fn syllable_counts_survive() {
        let tokens = [("我们", "wo3 men5"), ("。", "。"), ("", ""), ("一起", "yi1 qi3"), ("走", "zou3")];
        let out = apply_sandhi(tokens.iter().map(|(s, p)| labeled(s, p)).collect());
        assert_eq!(out.len(), tokens.len());
        for t in &out {
            assert_eq!(t.pron.split_whitespace().count(), t.sandhi_pron.split_whitespace().count());
        }
        // 起 picks up tone 2 from 走 before the 一 rules look at it
        assert_eq!(out[3].sandhi_pron, "yi4 qi2");
        assert_eq!(out[3].pron, "yi1 qi3");
        assert_eq!(out[4].sandhi_pron, "zou3");
    }

    #[test]
    fn adjusted_text_is_stable() {
        let inputs: Vec<Vec<(&str, &str)>> = vec![
            vec![("老鼠", "lao3 shu3")],
            vec![("不是", "bu4 shi4")],
            vec![("是", "shi4"), ("不", "bu4"), ("是", "shi4")],
            vec![("一定", "yi1 ding4")],
            vec![("看", "kan4"), ("一", "yi1"), ("看", "kan4")],
        ];
        for input in inputs {
            let once = sandhi(&input);
            let again: Vec<(&str, &str)> = input.iter().zip(&once).map(|((s, _), p)| (*s, p.as_str())).collect();
            assert_eq!(sandhi(&again), once);
        }
    }
}
