//! Tokenized-XML reading: `<s id="...">`, `<w>token</w>`, and
//! `<time value="HH:MM:SS,mmm"/>` elements.
//!
//! Modeled as a pull parser over [`quick_xml`] that maintains its own small
//! state machine (`Outside`, `InS`, `InW`) and a running character counter,
//! per Design Notes §9's replacement for dynamic XML-handler callbacks.
//! Unknown elements and attributes are traversed transparently.

use crate::core::formats::{Document, Sentence};
use crate::error::{AlignError, AlignResult};
use crate::time::time_to_sec;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
enum State {
    Outside,
    InS,
    InW,
}

/// Read a tokenized-XML file (or its `.gz` sibling) into a [`Document`].
pub fn read(path: &Path) -> AlignResult<Document> {
    let content = crate::core::io_util::read_text_tolerant(path)?;
    parse(&content)
}

/// Parse tokenized-XML content into a [`Document`].
pub fn parse(content: &str) -> AlignResult<Document> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut sentences = Vec::new();
    let mut state = State::Outside;
    let mut cur_id = String::new();
    let mut cur_tokens: Vec<String> = Vec::new();
    // Counts characters monotonically across the whole document (not reset
    // per sentence), per spec §4.1's "monotonically increasing character
    // position" — this is what makes a marker position copied from one
    // sentence into a neighbour's (the scan-forward case in
    // `interpolate::fill_times`) comparable to that neighbour's own
    // positions instead of colliding back at zero.
    let mut doc_pos: u32 = 0;
    let mut any_token_emitted = false;
    let mut sentence_start_pos: u32 = 0;
    let mut cur_first: Option<(f64, u32)> = None;
    let mut cur_last: Option<(f64, u32)> = None;
    let mut word_buf = String::new();
    let mut next_auto_id: usize = 0;

    loop {
        match reader.read_event() {
            Err(e) => return Err(AlignError::parse(format!("XML error at byte {}: {e}", reader.buffer_position()))),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match local_name(&e).as_slice() {
                b"s" => {
                    next_auto_id += 1;
                    cur_id = attr(&e, "id").unwrap_or_else(|| next_auto_id.to_string());
                    cur_tokens = Vec::new();
                    sentence_start_pos = doc_pos;
                    cur_first = None;
                    cur_last = None;
                    state = State::InS;
                }
                b"w" if state == State::InS => {
                    word_buf.clear();
                    state = State::InW;
                }
                _ => {}
            },
            Ok(Event::Text(e)) if state == State::InW => {
                word_buf.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(e)) => match local_name(&e).as_slice() {
                b"w" if state == State::InW => {
                    if !word_buf.is_empty() {
                        if any_token_emitted {
                            doc_pos += 1; // joining space
                        }
                        doc_pos += word_buf.chars().count() as u32;
                        any_token_emitted = true;
                        cur_tokens.push(std::mem::take(&mut word_buf));
                    }
                    state = State::InS;
                }
                b"s" if state == State::InS => {
                    let mut sentence = Sentence::new(std::mem::take(&mut cur_id), std::mem::take(&mut cur_tokens));
                    sentence.start_pos = sentence_start_pos;
                    sentence.end_pos = doc_pos;
                    if let Some((t, p)) = cur_first.take() {
                        sentence.first_time = Some(t);
                        sentence.first_pos = Some(p);
                    }
                    if let Some((t, p)) = cur_last.take() {
                        sentence.last_time = Some(t);
                        sentence.last_pos = Some(p);
                    }
                    sentences.push(sentence);
                    state = State::Outside;
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if local_name(&e) == b"time" && state == State::InS {
                    if let Some(value) = attr(&e, "value") {
                        if let Some(sec) = time_to_sec(&value) {
                            if cur_first.is_none() {
                                cur_first = Some((sec, doc_pos));
                            } else {
                                cur_last = Some((sec, doc_pos));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Ok(Document { sentences })
}

fn local_name(e: &BytesStart) -> Vec<u8> {
    e.local_name().as_ref().to_vec()
}

fn attr(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        if a.key.local_name().as_ref() == name.as_bytes() {
            a.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_sentence() {
        let xml = r#"<doc><s id="s1"><time value="00:00:01,000"/><w>Hello</w><w>world</w><time value="00:00:03,000"/></s></doc>"#;
        let doc = parse(xml).unwrap();
        assert_eq!(doc.sentences.len(), 1);
        let s = &doc.sentences[0];
        assert_eq!(s.id, "s1");
        assert_eq!(s.tokens, vec!["Hello", "world"]);
        assert_eq!(s.first_time, Some(1.0));
        assert_eq!(s.first_pos, Some(0));
        assert_eq!(s.last_time, Some(3.0));
        assert_eq!(s.last_pos, Some("Hello world".chars().count() as u32));
    }

    #[test]
    fn test_parse_single_marker() {
        let xml = r#"<doc><s id="s1"><w>Hi</w><time value="00:00:02,000"/></s></doc>"#;
        let doc = parse(xml).unwrap();
        let s = &doc.sentences[0];
        assert_eq!(s.first_time, Some(2.0));
        assert_eq!(s.last_time, None);
    }

    #[test]
    fn test_unknown_elements_traversed_transparently() {
        let xml = r#"<corpus><meta lang="en"/><s id="s1"><foo><w>X</w></foo></s></corpus>"#;
        let doc = parse(xml).unwrap();
        assert_eq!(doc.sentences[0].tokens, vec!["X"]);
    }

    #[test]
    fn test_auto_id_when_missing() {
        let xml = r#"<doc><s><w>A</w></s><s><w>B</w></s></doc>"#;
        let doc = parse(xml).unwrap();
        assert_eq!(doc.sentences[0].id, "1");
        assert_eq!(doc.sentences[1].id, "2");
    }

    #[test]
    fn test_multiple_sentences() {
        let xml = r#"<doc>
            <s id="a"><w>One</w></s>
            <s id="b"><w>Two</w><w>words</w></s>
        </doc>"#;
        let doc = parse(xml).unwrap();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[1].tokens, vec!["Two", "words"]);
    }

    #[test]
    fn test_positions_monotonic_across_sentences() {
        // Sentence `a`'s only marker sits mid-sentence (after "one", before
        // "two"/"three"); sentence `b`'s only marker sits at its very start.
        // `fill_times`'s scan-forward copies `b`'s marker position into
        // `a.last_pos` — with a per-document counter that stays comparable
        // to `a.end_pos` instead of colliding back at zero.
        let xml = concat!(
            r#"<doc><s id="a"><w>one</w><time value="00:00:01,000"/>"#,
            r#"<w>two</w><w>three</w></s>"#,
            r#"<s id="b"><time value="00:00:05,000"/><w>hi</w></s></doc>"#,
        );
        let doc = parse(xml).unwrap();
        let a = &doc.sentences[0];
        let b = &doc.sentences[1];
        assert_eq!(a.start_pos, 0);
        assert_eq!(a.first_pos, Some(3)); // right after "one"
        assert!(a.end_pos > a.first_pos.unwrap());
        assert!(a.end_pos <= b.start_pos);
        assert_eq!(b.first_pos, Some(b.start_pos));
    }
}
