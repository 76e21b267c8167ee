use once_cell::sync::Lazy;
use regex::Regex;

// A run ending in a terminal mark, or whatever trails after the last one.
static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^！？。]*[！？。]|[^！？。]+").unwrap());

/// Splits after every `！`, `？` and `。`, keeping the mark with the text before it.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .collect()
}

#[test]
fn splits_on_terminal_marks() {
    assert_eq!(
        split_sentences("我写了几行代码。你呢？好！"),
        vec!["我写了几行代码。", "你呢？", "好！"]
    );
    assert_eq!(split_sentences("没有句号"), vec!["没有句号"]);
    assert_eq!(split_sentences("好。。还有"), vec!["好。", "。", "还有"]);
    assert!(split_sentences("").is_empty());
}
