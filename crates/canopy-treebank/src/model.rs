//! The element and sentence data model (C2, C3).
//!
//! The source permits arbitrary opaque objects in `feats`/`deps`; here they
//! are represented as a tagged sum of a raw string or structured pairs
//! (Design Notes §9), and the single-root inheritance hierarchy the source
//! uses for its three line shapes is replaced by a tagged sum `Element`
//! rather than a shared base type.

use crate::upos::UposTag;
use serde::{Deserialize, Serialize};

/// The value of a `FEATS` field: either the raw column text, or a
/// structured sequence of `(key, values)` pairs in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatsValue {
    Raw(String),
    Structured(Vec<(String, Vec<String>)>),
}

/// The value of a `DEPS` field: either the raw column text, or a structured
/// sequence of `(head, relation)` pairs in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepsValue {
    Raw(String),
    Structured(Vec<(u32, String)>),
}

/// A single dependency-parsed word.
///
/// `index` is `Option` rather than a bare integer so that a hand-built,
/// otherwise-invalid `Word` can still be handed to the serializer (§7's
/// "rendering latitude") — the parser always produces `Some(..)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub index: Option<u32>,
    pub form: Option<String>,
    pub lemma: Option<String>,
    pub upos: Option<UposTag>,
    pub xpos: Option<String>,
    pub feats: Option<FeatsValue>,
    pub head: Option<u32>,
    pub deprel: Option<String>,
    pub deps: Option<DepsValue>,
    pub misc: Option<String>,
}

impl Word {
    /// Per-element validity (§4.3): a present, positive index.
    pub fn is_valid(&self) -> bool {
        matches!(self.index, Some(index) if index >= 1)
    }
}

/// A surface token spanning several word indices (e.g. English "don't").
///
/// Only `form` and `misc` carry through; every other field must be absent
/// at parse time or the parser raises `IllegalMultiword` (§4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiword {
    pub first_index: Option<u32>,
    pub last_index: Option<u32>,
    pub form: Option<String>,
    pub misc: Option<String>,
}

impl Multiword {
    /// Per-element validity (§4.3): both indices present, `first_index >=
    /// 1` and `last_index > first_index`.
    pub fn is_valid(&self) -> bool {
        matches!(
            (self.first_index, self.last_index),
            (Some(first), Some(last)) if first >= 1 && last > first
        )
    }
}

/// A syntactic null element inserted into the enhanced dependency graph.
///
/// `head`/`deprel` never appear; violation raises `IllegalEmptyNode`
/// (§4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyNode {
    pub main_index: Option<u32>,
    pub sub_index: Option<u32>,
    pub form: Option<String>,
    pub lemma: Option<String>,
    pub upos: Option<UposTag>,
    pub xpos: Option<String>,
    pub feats: Option<FeatsValue>,
    pub deps: Option<DepsValue>,
    pub misc: Option<String>,
}

impl EmptyNode {
    /// Per-element validity (§4.3): both indices present and `sub_index >=
    /// 1` (`main_index >= 0` always holds for a `u32`).
    pub fn is_valid(&self) -> bool {
        matches!((self.main_index, self.sub_index), (Some(_), Some(sub)) if sub >= 1)
    }
}

/// A single line's element, tagged by which id variant produced it (§4.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Word(Word),
    Multiword(Multiword),
    EmptyNode(EmptyNode),
}

impl Element {
    /// Dispatches to the per-variant validity check (§4.3).
    pub fn is_valid(&self) -> bool {
        match self {
            Element::Word(w) => w.is_valid(),
            Element::Multiword(m) => m.is_valid(),
            Element::EmptyNode(e) => e.is_valid(),
        }
    }
}

/// An ordered sequence of elements plus its header comments (C3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub comments: Vec<String>,
    pub elements: Vec<Element>,
}

impl Sentence {
    /// Checks the eight ordered structural invariants of §4.3. Never
    /// raises; it is a predicate, not a parser (§7).
    pub fn is_valid(&self) -> bool {
        // 1. non-empty
        if self.elements.is_empty() {
            return false;
        }

        // 2. at least one Word
        if !self.elements.iter().any(|e| matches!(e, Element::Word(_))) {
            return false;
        }

        // 3. every element's own validity
        if !self.elements.iter().all(Element::is_valid) {
            return false;
        }

        // Step 3 guarantees every index/sub_index below is `Some`.

        // 4. first element's index rule
        match &self.elements[0] {
            Element::Word(w) if w.index != Some(1) => return false,
            Element::Multiword(m) if m.first_index != Some(1) => return false,
            Element::EmptyNode(e) if e.main_index != Some(0) => return false,
            _ => {}
        }

        // 5. word indices form 1..=n with no gaps/repeats, in order
        let word_indices: Vec<u32> = self
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Word(w) => w.index,
                _ => None,
            })
            .collect();
        for (i, &index) in word_indices.iter().enumerate() {
            if index != (i as u32) + 1 {
                return false;
            }
        }
        let n = word_indices.len() as u32;

        // 6. multiword placement, bounds, no overlap
        let mut next_allowed_first = 1u32;
        for (i, element) in self.elements.iter().enumerate() {
            if let Element::Multiword(m) = element {
                let (first, last) = (m.first_index.unwrap(), m.last_index.unwrap());
                if last > n {
                    return false;
                }
                if first < next_allowed_first {
                    return false;
                }
                // must be immediately followed (skipping only other
                // multiwords/empty-nodes at this point is not permitted:
                // the very next element must be the Word first_index).
                match self.elements.get(i + 1) {
                    Some(Element::Word(w)) if w.index == Some(first) => {}
                    _ => return false,
                }
                next_allowed_first = last + 1;
            }
        }

        // 7. empty-node contiguity and sub-index sequencing per attachment
        //    point (including main_index == 0 at the very top).
        let mut i = 0usize;
        while i < self.elements.len() {
            if let Element::EmptyNode(first) = &self.elements[i] {
                let main = first.main_index;

                // A run must be anchored: either at the very top with
                // main_index == 0, or immediately after the Word whose
                // index equals main_index. Without this, a run with no
                // corresponding word (or misattached to the wrong word)
                // would still pass the sub-index sequencing check below.
                let anchored = if i == 0 {
                    main == Some(0)
                } else {
                    matches!(&self.elements[i - 1], Element::Word(w) if w.index == main)
                };
                if !anchored {
                    return false;
                }

                let mut expected_sub = 1u32;
                let mut j = i;
                while j < self.elements.len() {
                    match &self.elements[j] {
                        Element::EmptyNode(e) if e.main_index == main => {
                            if e.sub_index != Some(expected_sub) {
                                return false;
                            }
                            expected_sub += 1;
                            j += 1;
                        }
                        _ => break,
                    }
                }
                // Ensure no empty node with this main_index appears again
                // later, non-contiguously.
                if self.elements[j..]
                    .iter()
                    .any(|e| matches!(e, Element::EmptyNode(e) if e.main_index == main))
                {
                    return false;
                }
                i = j;
            } else {
                i += 1;
            }
        }

        // 8. every Word's head, when present, is within [0, n]
        for element in &self.elements {
            if let Element::Word(w) = element {
                if let Some(head) = w.head {
                    if head > n {
                        return false;
                    }
                }
            }
        }

        true
    }
}
