//! Recursive-descent parser assembling lexer tokens into sentences (C5).
//!
//! The grammar is LL(1) once the id token of a line has been read (Design
//! Notes §9), so a hand-written recursive-descent parser over the token
//! stream is adequate — no parser-generator table is needed here, unlike
//! `canopy-treebank`'s own line-splitting approach, which is too loose for
//! the strict per-field grammar this crate enforces in the lexer.
//!
//! ```text
//! document := sentence+
//! sentence := comment* word_line+ NEWLINE
//! comment  := COMMENT NEWLINE
//! word_line := id TAB FORM TAB LEMMA TAB UPOS TAB XPOS TAB FEATS
//!              TAB HEAD TAB DEPREL TAB DEPS TAB MISC NEWLINE
//! id       := INTEGER_ID | RANGE_ID | DECIMAL_ID
//! ```

use crate::error::{ConlluError, ConlluResult};
use crate::lexer::{Lexer, Token};
use crate::model::{DepsValue, Element, EmptyNode, FeatsValue, Multiword, Sentence, Word};
use tracing::debug;

/// Parses a whole document into its sequence of sentences.
pub fn parse_document(text: &str) -> ConlluResult<Vec<Sentence>> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let mut sentences = Vec::new();
    while !parser.is_at_end() {
        sentences.push(parser.parse_sentence()?);
    }
    debug!(count = sentences.len(), "parsed document");
    Ok(sentences)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_newline(&mut self) -> ConlluResult<()> {
        match self.advance() {
            Some(Token::Newline { .. }) => Ok(()),
            Some(other) => Err(ConlluError::illegal_token(
                other.kind(),
                token_lexeme(other),
                other.line(),
                other.column(),
            )),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn expect_tab(&mut self) -> ConlluResult<()> {
        match self.advance() {
            Some(Token::Tab { .. }) => Ok(()),
            Some(other) => Err(ConlluError::illegal_token(
                other.kind(),
                token_lexeme(other),
                other.line(),
                other.column(),
            )),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    /// `sentence := comment* word_line+ NEWLINE`.
    fn parse_sentence(&mut self) -> ConlluResult<Sentence> {
        let mut comments = Vec::new();
        while let Some(Token::Comment { .. }) = self.peek() {
            let Token::Comment { text, .. } = self.advance().unwrap().clone() else {
                unreachable!()
            };
            self.expect_newline()?;
            comments.push(text);
        }

        let mut elements = Vec::new();
        loop {
            match self.peek() {
                Some(Token::IntegerId { .. })
                | Some(Token::RangeId { .. })
                | Some(Token::DecimalId { .. }) => {
                    elements.push(self.parse_word_line()?);
                }
                Some(Token::Newline { .. }) if !elements.is_empty() => {
                    self.advance();
                    break;
                }
                Some(other) => return Err(unexpected(other)),
                None => return Err(ConlluError::illegal_eof()),
            }
        }

        Ok(Sentence { comments, elements })
    }

    /// `word_line := id TAB FORM TAB LEMMA TAB UPOS TAB XPOS TAB FEATS
    ///               TAB HEAD TAB DEPREL TAB DEPS TAB MISC NEWLINE`.
    fn parse_word_line(&mut self) -> ConlluResult<Element> {
        let id_token = self.advance().unwrap().clone();
        let line = id_token.line();

        self.expect_tab()?;
        let form = self.take_form()?;
        self.expect_tab()?;
        let lemma = self.take_lemma()?;
        self.expect_tab()?;
        let upos = self.take_upos()?;
        self.expect_tab()?;
        let xpos = self.take_xpos()?;
        self.expect_tab()?;
        let feats = self.take_feats()?;
        self.expect_tab()?;
        let head = self.take_head()?;
        self.expect_tab()?;
        let deprel = self.take_deprel()?;
        self.expect_tab()?;
        let deps = self.take_deps()?;
        self.expect_tab()?;
        let misc = self.take_misc()?;
        self.expect_newline()?;

        match id_token {
            Token::IntegerId { value, .. } => Ok(Element::Word(Word {
                index: Some(value),
                form,
                lemma,
                upos,
                xpos,
                feats,
                head,
                deprel,
                deps,
                misc,
            })),
            Token::RangeId { first, last, .. } => {
                // LEMMA has no absent sentinel of its own (§4.1); "absent"
                // for a Multiword's purposes means the literal underscore.
                if lemma.as_deref() != Some("_")
                    || upos.is_some()
                    || xpos.is_some()
                    || feats.is_some()
                    || head.is_some()
                    || deprel.is_some()
                    || deps.is_some()
                {
                    return Err(ConlluError::illegal_multiword(line));
                }
                Ok(Element::Multiword(Multiword {
                    first_index: Some(first),
                    last_index: Some(last),
                    form,
                    misc,
                }))
            }
            Token::DecimalId { main, sub, .. } => {
                if head.is_some() || deprel.is_some() {
                    return Err(ConlluError::illegal_empty_node(line));
                }
                Ok(Element::EmptyNode(EmptyNode {
                    main_index: Some(main),
                    sub_index: Some(sub),
                    form,
                    lemma,
                    upos,
                    xpos,
                    feats,
                    deps,
                    misc,
                }))
            }
            _ => unreachable!("only id tokens are dispatched into parse_word_line"),
        }
    }

    fn take_form(&mut self) -> ConlluResult<Option<String>> {
        match self.advance() {
            Some(Token::Form { value, .. }) => Ok(Some(value.clone())),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_lemma(&mut self) -> ConlluResult<Option<String>> {
        match self.advance() {
            Some(Token::Lemma { value, .. }) => Ok(Some(value.clone())),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_upos(&mut self) -> ConlluResult<Option<crate::upos::UposTag>> {
        match self.advance() {
            Some(Token::Upos { value, .. }) => Ok(*value),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_xpos(&mut self) -> ConlluResult<Option<String>> {
        match self.advance() {
            Some(Token::Xpos { value, .. }) => Ok(value.clone()),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_feats(&mut self) -> ConlluResult<Option<FeatsValue>> {
        match self.advance() {
            Some(Token::Feats { value, .. }) => Ok(value.clone()),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_head(&mut self) -> ConlluResult<Option<u32>> {
        match self.advance() {
            Some(Token::Head { value, .. }) => Ok(*value),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_deprel(&mut self) -> ConlluResult<Option<String>> {
        match self.advance() {
            Some(Token::Deprel { value, .. }) => Ok(value.clone()),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_deps(&mut self) -> ConlluResult<Option<DepsValue>> {
        match self.advance() {
            Some(Token::Deps { value, .. }) => Ok(value.clone()),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }

    fn take_misc(&mut self) -> ConlluResult<Option<String>> {
        match self.advance() {
            Some(Token::Misc { value, .. }) => Ok(value.clone()),
            Some(other) => Err(unexpected(other)),
            None => Err(ConlluError::illegal_eof()),
        }
    }
}

fn unexpected(token: &Token) -> ConlluError {
    ConlluError::illegal_token(token.kind(), token_lexeme(token), token.line(), token.column())
}

/// A human-readable lexeme for an `IllegalToken` diagnostic. Only the kind
/// and position are load-bearing for error identity (§6); this just keeps
/// messages informative.
fn token_lexeme(token: &Token) -> String {
    match token {
        Token::Comment { text, .. } => format!("# {text}"),
        Token::IntegerId { value, .. } => value.to_string(),
        Token::RangeId { first, last, .. } => format!("{first}-{last}"),
        Token::DecimalId { main, sub, .. } => format!("{main}.{sub}"),
        Token::Form { value, .. } | Token::Lemma { value, .. } => value.clone(),
        Token::Upos { value, .. } => value.map(|v| v.as_str().to_string()).unwrap_or_default(),
        Token::Xpos { value, .. } | Token::Deprel { value, .. } | Token::Misc { value, .. } => {
            value.clone().unwrap_or_default()
        }
        Token::Feats { .. } => "FEATS".to_string(),
        Token::Head { value, .. } => value.map(|v| v.to_string()).unwrap_or_default(),
        Token::Deps { .. } => "DEPS".to_string(),
        Token::Tab { .. } => "\t".to_string(),
        Token::Newline { .. } => "\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upos::UposTag;

    #[test]
    fn minimal_sentence() {
        let sentences = parse_document("1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n").unwrap();
        assert_eq!(sentences.len(), 1);
        let Element::Word(word) = &sentences[0].elements[0] else {
            panic!("expected a Word");
        };
        assert_eq!(word.index, Some(1));
        assert_eq!(word.form.as_deref(), Some("Foo"));
        assert_eq!(word.lemma.as_deref(), Some("_"));
        assert!(word.upos.is_none());
    }

    #[test]
    fn comments_retained_before_first_word_line() {
        let sentences =
            parse_document("# Foo\n# Bar\n1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n").unwrap();
        assert_eq!(sentences[0].comments, vec!["Foo".to_string(), "Bar".to_string()]);
        assert_eq!(sentences[0].elements.len(), 1);
    }

    #[test]
    fn mixed_variants_in_document_order() {
        let text = "1-2\tFoobar\t_\t_\t_\t_\t_\t_\t_\t_\n\
1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\
2\tbar\t_\t_\t_\t_\t_\t_\t_\t_\n\
3\tx\t_\t_\t_\t_\t_\t_\t_\t_\n\
3.1\talpha\t_\t_\t_\t_\t_\t_\t_\t_\n\
3.2\tbeta\t_\t_\t_\t_\t_\t_\t_\t_\n\n";
        let sentences = parse_document(text).unwrap();
        let elements = &sentences[0].elements;
        assert_eq!(elements.len(), 6);
        assert!(matches!(elements[0], Element::Multiword(_)));
        assert!(matches!(elements[1], Element::Word(_)));
        assert!(matches!(elements[2], Element::Word(_)));
        assert!(matches!(elements[3], Element::Word(_)));
        assert!(matches!(elements[4], Element::EmptyNode(_)));
        assert!(matches!(elements[5], Element::EmptyNode(_)));
    }

    #[test]
    fn structured_feats_preserve_key_and_value_order() {
        let text = "1\t_\t_\t_\t_\tAb=Cd|Ef[01]=G3|Hij=Klm,Nop\t_\t_\t_\t_\n\n";
        let sentences = parse_document(text).unwrap();
        let Element::Word(word) = &sentences[0].elements[0] else {
            panic!("expected a Word");
        };
        assert_eq!(
            word.feats,
            Some(FeatsValue::Structured(vec![
                ("Ab".to_string(), vec!["Cd".to_string()]),
                ("Ef[01]".to_string(), vec!["G3".to_string()]),
                ("Hij".to_string(), vec!["Klm".to_string(), "Nop".to_string()]),
            ]))
        );
    }

    #[test]
    fn upos_parses_into_the_closed_tag_set() {
        let text = "1\tdog\tdog\tNOUN\t_\t_\t_\t_\t_\t_\n\n";
        let sentences = parse_document(text).unwrap();
        let Element::Word(word) = &sentences[0].elements[0] else {
            panic!("expected a Word");
        };
        assert_eq!(word.upos, Some(UposTag::Noun));
    }

    #[test]
    fn multiword_with_non_absent_lemma_is_illegal() {
        let text = "1-2\tFoobar\tnotabsent\t_\t_\t_\t_\t_\t_\t_\n\n";
        let err = parse_document(text).unwrap_err();
        assert_eq!(err, ConlluError::illegal_multiword(1));
    }

    #[test]
    fn empty_node_with_head_is_illegal() {
        let text = "1.1\t_\t_\t_\t_\t_\t2\t_\t_\t_\n\n";
        let err = parse_document(text).unwrap_err();
        assert_eq!(err, ConlluError::illegal_empty_node(1));
    }

    #[test]
    fn trailing_comments_without_a_word_line_is_illegal_eof() {
        let err = parse_document("# Foo\n").unwrap_err();
        assert_eq!(err, ConlluError::illegal_eof());
    }

    #[test]
    fn missing_terminating_blank_line_is_illegal_eof() {
        let err = parse_document("1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n").unwrap_err();
        assert_eq!(err, ConlluError::illegal_eof());
    }

    #[test]
    fn multiple_sentences_parse_in_order() {
        let text = "1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n1\tBar\t_\t_\t_\t_\t_\t_\t_\t_\n\n";
        let sentences = parse_document(text).unwrap();
        assert_eq!(sentences.len(), 2);
        let Element::Word(first) = &sentences[0].elements[0] else {
            panic!()
        };
        let Element::Word(second) = &sentences[1].elements[0] else {
            panic!()
        };
        assert_eq!(first.form.as_deref(), Some("Foo"));
        assert_eq!(second.form.as_deref(), Some("Bar"));
    }
}
