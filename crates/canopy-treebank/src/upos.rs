//! The closed Universal Part-of-Speech tag set (C1).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 17 universal part-of-speech tags.
///
/// Parsing is an exact match against the tag's name; `_` is not a member of
/// this type — absence is represented by `Option<UposTag> == None` at the
/// element level, not by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UposTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl UposTag {
    /// All 17 tags, in the order they appear in the spec.
    pub const ALL: [UposTag; 17] = [
        UposTag::Adj,
        UposTag::Adp,
        UposTag::Adv,
        UposTag::Aux,
        UposTag::Cconj,
        UposTag::Det,
        UposTag::Intj,
        UposTag::Noun,
        UposTag::Num,
        UposTag::Part,
        UposTag::Pron,
        UposTag::Propn,
        UposTag::Punct,
        UposTag::Sconj,
        UposTag::Sym,
        UposTag::Verb,
        UposTag::X,
    ];

    /// Exact-match parse against the 17 tag names. Returns `None` for any
    /// string that isn't one of them (including `_`, which the lexer
    /// handles separately as the absent sentinel).
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "ADJ" => UposTag::Adj,
            "ADP" => UposTag::Adp,
            "ADV" => UposTag::Adv,
            "AUX" => UposTag::Aux,
            "CCONJ" => UposTag::Cconj,
            "DET" => UposTag::Det,
            "INTJ" => UposTag::Intj,
            "NOUN" => UposTag::Noun,
            "NUM" => UposTag::Num,
            "PART" => UposTag::Part,
            "PRON" => UposTag::Pron,
            "PROPN" => UposTag::Propn,
            "PUNCT" => UposTag::Punct,
            "SCONJ" => UposTag::Sconj,
            "SYM" => UposTag::Sym,
            "VERB" => UposTag::Verb,
            "X" => UposTag::X,
            _ => return None,
        })
    }

    /// The tag's canonical name, as rendered by the serializer.
    pub fn as_str(&self) -> &'static str {
        match self {
            UposTag::Adj => "ADJ",
            UposTag::Adp => "ADP",
            UposTag::Adv => "ADV",
            UposTag::Aux => "AUX",
            UposTag::Cconj => "CCONJ",
            UposTag::Det => "DET",
            UposTag::Intj => "INTJ",
            UposTag::Noun => "NOUN",
            UposTag::Num => "NUM",
            UposTag::Part => "PART",
            UposTag::Pron => "PRON",
            UposTag::Propn => "PROPN",
            UposTag::Punct => "PUNCT",
            UposTag::Sconj => "SCONJ",
            UposTag::Sym => "SYM",
            UposTag::Verb => "VERB",
            UposTag::X => "X",
        }
    }
}

impl fmt::Display for UposTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
