//! CC-CEDICT line parser: `傳統 传统 [chuan2 tong3] /tradition/traditional/`
use nom::{
    bytes::complete::{take_till1, take_until},
    character::complete::{char, space1},
    combinator::{all_consuming, rest, verify},
    sequence::{delimited, tuple},
    IResult,
};

#[derive(Debug, PartialEq, Eq)]
pub struct CedictEntry<'a> {
    pub traditional: &'a str,
    pub simplified: &'a str,
    pub pron: &'a str,
    pub meaning: &'a str,
}

fn headword(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ' ' || c == '\t')(input)
}

fn reading(input: &str) -> IResult<&str, &str> {
    delimited(char('['), take_until("]"), char(']'))(input)
}

fn glosses(input: &str) -> IResult<&str, &str> {
    verify(rest, |s: &str| s.starts_with('/'))(input)
}

fn entry(input: &str) -> IResult<&str, CedictEntry<'_>> {
    let (input, (traditional, _, simplified, _, pron, _, meaning)) =
        all_consuming(tuple((headword, space1, headword, space1, reading, space1, glosses)))(input)?;
    Ok((
        input,
        CedictEntry {
            traditional,
            simplified,
            pron: pron.trim(),
            meaning: meaning.trim_end(),
        },
    ))
}

pub fn parse_line(line: &str) -> Option<CedictEntry<'_>> {
    entry(line).ok().map(|(_, e)| e)
}

#[test]
fn parses_entry() {
    let e = parse_line("傳統 传统 [chuan2 tong3] /tradition/traditional/").unwrap();
    assert_eq!(
        e,
        CedictEntry {
            traditional: "傳統",
            simplified: "传统",
            pron: "chuan2 tong3",
            meaning: "/tradition/traditional/",
        }
    );
}

#[test]
fn rejects_broken_lines() {
    assert!(parse_line("傳統 传统 chuan2 tong3 /tradition/").is_none());
    assert!(parse_line("傳統 传统 [chuan2 tong3]").is_none());
    assert!(parse_line("傳統").is_none());
}
