//! Deterministic rendering of a sentence back to canonical CoNLL-U text (C6).

use crate::error::RenderError;
use crate::model::{DepsValue, Element, EmptyNode, FeatsValue, Multiword, Sentence, Word};

/// Renders a single sentence's comments and elements, including the
/// trailing blank line that separates it from the next sentence.
pub fn render_sentence(sentence: &Sentence) -> Result<String, RenderError> {
    let mut out = String::new();
    for comment in &sentence.comments {
        out.push_str("# ");
        out.push_str(comment);
        out.push('\n');
    }
    for element in &sentence.elements {
        render_element(element, &mut out)?;
    }
    out.push('\n');
    Ok(out)
}

fn render_element(element: &Element, out: &mut String) -> Result<(), RenderError> {
    match element {
        Element::Word(word) => render_word(word, out),
        Element::Multiword(multiword) => render_multiword(multiword, out),
        Element::EmptyNode(empty_node) => render_empty_node(empty_node, out),
    }
}

fn render_word(word: &Word, out: &mut String) -> Result<(), RenderError> {
    let columns = [
        render_index(word.index),
        render_string_literal(&word.form),
        render_string_literal(&word.lemma),
        render_optional(word.upos.map(|tag| tag.as_str().to_string())),
        render_optional(word.xpos.clone()),
        render_feats(&word.feats)?,
        render_optional(word.head.map(|h| h.to_string())),
        render_optional(word.deprel.clone()),
        render_deps(&word.deps)?,
        render_optional(word.misc.clone()),
    ];
    push_row(out, &columns);
    Ok(())
}

fn render_multiword(multiword: &Multiword, out: &mut String) -> Result<(), RenderError> {
    let id = format!(
        "{}-{}",
        render_index(multiword.first_index),
        render_index(multiword.last_index)
    );
    let columns = [
        id,
        render_string_literal(&multiword.form),
        "_".to_string(),
        "_".to_string(),
        "_".to_string(),
        "_".to_string(),
        "_".to_string(),
        "_".to_string(),
        "_".to_string(),
        render_optional(multiword.misc.clone()),
    ];
    push_row(out, &columns);
    Ok(())
}

fn render_empty_node(empty_node: &EmptyNode, out: &mut String) -> Result<(), RenderError> {
    let id = format!(
        "{}.{}",
        render_index(empty_node.main_index),
        render_index(empty_node.sub_index)
    );
    let columns = [
        id,
        render_string_literal(&empty_node.form),
        render_string_literal(&empty_node.lemma),
        render_optional(empty_node.upos.map(|tag| tag.as_str().to_string())),
        render_optional(empty_node.xpos.clone()),
        render_feats(&empty_node.feats)?,
        "_".to_string(),
        "_".to_string(),
        render_deps(&empty_node.deps)?,
        render_optional(empty_node.misc.clone()),
    ];
    push_row(out, &columns);
    Ok(())
}

fn push_row(out: &mut String, columns: &[String; 10]) {
    out.push_str(&columns.join("\t"));
    out.push('\n');
}

/// FORM/LEMMA render `_` both when the stored value is the literal `"_"`
/// and when it is absent — the source's original ambiguity, preserved
/// deliberately (§4.4).
fn render_string_literal(value: &Option<String>) -> String {
    match value {
        Some(text) => text.clone(),
        None => "_".to_string(),
    }
}

fn render_optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "_".to_string())
}

/// Renders an id component, or the literal string `"None"` when absent —
/// a deliberate quirk (§7/§9) letting a caller round-trip a hand-built,
/// otherwise-invalid element through the serializer.
fn render_index(value: Option<u32>) -> String {
    match value {
        Some(index) => index.to_string(),
        None => "None".to_string(),
    }
}

fn render_feats(value: &Option<FeatsValue>) -> Result<String, RenderError> {
    match value {
        None => Ok("_".to_string()),
        Some(FeatsValue::Raw(text)) => Ok(text.clone()),
        Some(FeatsValue::Structured(pairs)) => {
            if pairs.is_empty() {
                return Err(RenderError::unsupported_rendering("feats"));
            }
            let mut rendered = Vec::with_capacity(pairs.len());
            for (key, values) in pairs {
                if key.is_empty() || values.is_empty() {
                    return Err(RenderError::unsupported_rendering("feats"));
                }
                rendered.push(format!("{key}={}", values.join(",")));
            }
            Ok(rendered.join("|"))
        }
    }
}

fn render_deps(value: &Option<DepsValue>) -> Result<String, RenderError> {
    match value {
        None => Ok("_".to_string()),
        Some(DepsValue::Raw(text)) => Ok(text.clone()),
        Some(DepsValue::Structured(pairs)) => {
            if pairs.is_empty() {
                return Err(RenderError::unsupported_rendering("deps"));
            }
            let rendered: Vec<String> = pairs
                .iter()
                .map(|(head, relation)| format!("{head}:{relation}"))
                .collect();
            Ok(rendered.join("|"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upos::UposTag;

    fn word(index: u32) -> Word {
        Word {
            index: Some(index),
            form: None,
            lemma: None,
            upos: None,
            xpos: None,
            feats: None,
            head: None,
            deprel: None,
            deps: None,
            misc: None,
        }
    }

    #[test]
    fn minimal_word_round_trips() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Word(Word {
                form: Some("Foo".into()),
                lemma: Some("_".into()),
                ..word(1)
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert_eq!(rendered, "1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n");
    }

    #[test]
    fn comments_render_with_a_single_leading_space() {
        let sentence = Sentence {
            comments: vec!["Foo".into(), "Bar".into()],
            elements: vec![Element::Word(Word {
                form: Some("Foo".into()),
                lemma: Some("_".into()),
                ..word(1)
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.starts_with("# Foo\n# Bar\n"));
    }

    #[test]
    fn upos_renders_as_tag_name() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Word(Word {
                upos: Some(UposTag::Verb),
                ..word(1)
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.contains("\tVERB\t"));
    }

    #[test]
    fn structured_feats_render_in_key_and_value_order() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Word(Word {
                feats: Some(FeatsValue::Structured(vec![
                    ("Ab".into(), vec!["Cd".into()]),
                    ("Hij".into(), vec!["Klm".into(), "Nop".into()]),
                ])),
                ..word(1)
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.contains("Ab=Cd|Hij=Klm,Nop"));
    }

    #[test]
    fn raw_feats_render_verbatim() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Word(Word {
                feats: Some(FeatsValue::Raw("whatever=text|here".into())),
                ..word(1)
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.contains("whatever=text|here"));
    }

    #[test]
    fn empty_structured_feats_is_unsupported_rendering() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Word(Word {
                feats: Some(FeatsValue::Structured(vec![])),
                ..word(1)
            })],
        };
        assert_eq!(
            render_sentence(&sentence).unwrap_err(),
            RenderError::unsupported_rendering("feats")
        );
    }

    #[test]
    fn multiword_id_renders_as_first_dash_last() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![
                Element::Multiword(Multiword {
                    first_index: Some(1),
                    last_index: Some(2),
                    form: Some("don't".into()),
                    misc: None,
                }),
                Element::Word(word(1)),
                Element::Word(word(2)),
            ],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.starts_with("1-2\tdon't\t_\t_\t_\t_\t_\t_\t_\t_\n"));
    }

    #[test]
    fn empty_node_id_renders_as_main_dot_sub() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![
                Element::Word(word(1)),
                Element::EmptyNode(EmptyNode {
                    main_index: Some(1),
                    sub_index: Some(1),
                    form: None,
                    lemma: None,
                    upos: None,
                    xpos: None,
                    feats: None,
                    deps: None,
                    misc: None,
                }),
            ],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.contains("1.1\t_\t_\t_\t_\t_\t_\t_\t_\t_\n"));
    }

    #[test]
    fn missing_index_renders_as_the_literal_none() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Word(Word {
                index: None,
                ..word(1)
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.starts_with("None\t_\t_\t_\t_\t_\t_\t_\t_\t_\n"));
    }

    #[test]
    fn multiword_with_one_missing_component_renders_partial_none() {
        let sentence = Sentence {
            comments: vec![],
            elements: vec![Element::Multiword(Multiword {
                first_index: Some(1),
                last_index: None,
                form: None,
                misc: None,
            })],
        };
        let rendered = render_sentence(&sentence).unwrap();
        assert!(rendered.starts_with("1-None\t"));
    }
}
