//! Diagnostics raised by the CoNLL-U lexer, parser and serializer.

use thiserror::Error;

/// Result type for lexing and parsing operations.
pub type ConlluResult<T> = Result<T, ConlluError>;

/// Token kinds named in an [`ConlluError::IllegalToken`] diagnostic.
///
/// Mirrors the lexer's token set (§4.1) without carrying each kind's typed
/// payload — only what a diagnostic needs to describe where parsing failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[error("COMMENT")]
    Comment,
    #[error("INTEGER_ID")]
    IntegerId,
    #[error("RANGE_ID")]
    RangeId,
    #[error("DECIMAL_ID")]
    DecimalId,
    #[error("FORM")]
    Form,
    #[error("LEMMA")]
    Lemma,
    #[error("UPOS")]
    Upos,
    #[error("XPOS")]
    Xpos,
    #[error("FEATS")]
    Feats,
    #[error("HEAD")]
    Head,
    #[error("DEPREL")]
    Deprel,
    #[error("DEPS")]
    Deps,
    #[error("MISC")]
    Misc,
    #[error("TAB")]
    Tab,
    #[error("NEWLINE")]
    Newline,
}

/// Unified error type for lexing and parsing a CoNLL-U document.
///
/// Errors are fail-fast: the first diagnostic raised aborts the call, per
/// the core's Non-goals (no recovery, no partial AST).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConlluError {
    #[error("illegal character at line {line}, column {column}")]
    IllegalCharacter { line: u32, column: u32 },

    #[error("illegal token {kind} ('{lexeme}') at line {line}, column {column}")]
    IllegalToken {
        kind: TokenKind,
        lexeme: String,
        line: u32,
        column: u32,
    },

    #[error("unexpected end of input")]
    IllegalEof,

    #[error("illegal multiword token at line {line}")]
    IllegalMultiword { line: u32 },

    #[error("illegal empty node token at line {line}")]
    IllegalEmptyNode { line: u32 },
}

impl ConlluError {
    /// Creates an [`ConlluError::IllegalCharacter`] diagnostic.
    pub fn illegal_character(line: u32, column: u32) -> Self {
        Self::IllegalCharacter { line, column }
    }

    /// Creates an [`ConlluError::IllegalToken`] diagnostic.
    pub fn illegal_token<S: Into<String>>(kind: TokenKind, lexeme: S, line: u32, column: u32) -> Self {
        Self::IllegalToken {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Creates an [`ConlluError::IllegalEof`] diagnostic.
    pub fn illegal_eof() -> Self {
        Self::IllegalEof
    }

    /// Creates an [`ConlluError::IllegalMultiword`] diagnostic.
    pub fn illegal_multiword(line: u32) -> Self {
        Self::IllegalMultiword { line }
    }

    /// Creates an [`ConlluError::IllegalEmptyNode`] diagnostic.
    pub fn illegal_empty_node(line: u32) -> Self {
        Self::IllegalEmptyNode { line }
    }
}

/// The single diagnostic the serializer can raise (§4.4, §6).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot render {field}: value is neither a raw string nor structured pairs")]
    UnsupportedRendering { field: &'static str },
}

impl RenderError {
    /// Creates an [`RenderError::UnsupportedRendering`] diagnostic.
    pub fn unsupported_rendering(field: &'static str) -> Self {
        Self::UnsupportedRendering { field }
    }
}
