//! CoNLL-U lexing, parsing, validation and serialization.
//!
//! This crate is the format pipeline for Universal Dependencies treebank
//! data: a character-driven lexer with per-field micro-grammars and precise
//! line/column diagnostics, a recursive-descent parser that assembles
//! sentences out of `Word`/`Multiword`/`EmptyNode` elements, a structural
//! validator over the cross-element invariants of a well-formed sentence,
//! and a deterministic serializer back to canonical CoNLL-U text.
//!
//! # Usage
//!
//! ```
//! let sentences = canopy_treebank::parse("1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n").unwrap();
//! assert_eq!(sentences.len(), 1);
//! assert!(sentences[0].is_valid());
//!
//! let text = canopy_treebank::to_conllu(&sentences).unwrap();
//! assert_eq!(text, "1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n");
//! ```
//!
//! Linguistic interpretation of tag inventories beyond the closed UPOS set,
//! downstream NLP analysis, document discovery and I/O transport are all
//! external collaborators' concerns — this crate consumes a `&str` and
//! produces in-memory [`Sentence`] values, and vice versa.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod serializer;
pub mod upos;

pub use error::{ConlluError, ConlluResult, RenderError, TokenKind};
pub use model::{DepsValue, Element, EmptyNode, FeatsValue, Multiword, Sentence, Word};
pub use upos::UposTag;

/// Parses a complete CoNLL-U document into its sequence of sentences.
///
/// Lexing and parsing are fail-fast (§1 Non-goals): the first illegal
/// character or token aborts the whole document and is returned as a
/// [`ConlluError`]; there is no partial result.
#[tracing::instrument(skip(text))]
pub fn parse(text: &str) -> ConlluResult<Vec<Sentence>> {
    parser::parse_document(text)
}

/// Renders a sequence of sentences back to canonical CoNLL-U text.
///
/// The empty slice renders to the empty string. Each sentence's rendering
/// already includes its own trailing blank line, so the results concatenate
/// directly into a valid multi-sentence document.
#[tracing::instrument(skip(sentences))]
pub fn to_conllu(sentences: &[Sentence]) -> Result<String, RenderError> {
    let mut out = String::new();
    for sentence in sentences {
        out.push_str(&serializer::render_sentence(sentence)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_round_trips_a_minimal_sentence() {
        let text = "1\tFoo\t_\t_\t_\t_\t_\t_\t_\t_\n\n";
        let sentences = parse(text).unwrap();
        assert_eq!(to_conllu(&sentences).unwrap(), text);
    }

    #[test]
    fn facade_renders_empty_document_as_empty_string() {
        assert_eq!(to_conllu(&[]).unwrap(), "");
    }

    #[test]
    fn facade_surfaces_the_first_lex_error() {
        let err = parse("0\t_\t_\t_\t_\t_\t_\t_\t_\t_\n\n").unwrap_err();
        assert_eq!(err, ConlluError::illegal_character(1, 1));
    }
}
