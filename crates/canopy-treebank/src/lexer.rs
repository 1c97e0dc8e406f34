//! Character-driven lexer for CoNLL-U text (C4).
//!
//! The lexer is positional: which micro-grammar lexes the next field is
//! chosen by `field_index`, an explicit per-instance counter of TAB tokens
//! seen since the last NEWLINE (Design Notes §9). There is no global
//! mutable state — every `Lexer` owns its own `field_index` and `Cursor`.

use crate::cursor::Cursor;
use crate::error::{ConlluError, ConlluResult, TokenKind};
use crate::model::{DepsValue, FeatsValue};
use crate::upos::UposTag;

/// A single lexical token, carrying its typed value and 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Comment { text: String, line: u32, column: u32 },
    IntegerId { value: u32, line: u32, column: u32 },
    RangeId { first: u32, last: u32, line: u32, column: u32 },
    DecimalId { main: u32, sub: u32, line: u32, column: u32 },
    Form { value: String, line: u32, column: u32 },
    Lemma { value: String, line: u32, column: u32 },
    Upos { value: Option<UposTag>, line: u32, column: u32 },
    Xpos { value: Option<String>, line: u32, column: u32 },
    Feats { value: Option<FeatsValue>, line: u32, column: u32 },
    Head { value: Option<u32>, line: u32, column: u32 },
    Deprel { value: Option<String>, line: u32, column: u32 },
    Deps { value: Option<DepsValue>, line: u32, column: u32 },
    Misc { value: Option<String>, line: u32, column: u32 },
    Tab { line: u32, column: u32 },
    Newline { line: u32, column: u32 },
}

impl Token {
    /// The token's coarse kind, for `IllegalToken` diagnostics.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Comment { .. } => TokenKind::Comment,
            Token::IntegerId { .. } => TokenKind::IntegerId,
            Token::RangeId { .. } => TokenKind::RangeId,
            Token::DecimalId { .. } => TokenKind::DecimalId,
            Token::Form { .. } => TokenKind::Form,
            Token::Lemma { .. } => TokenKind::Lemma,
            Token::Upos { .. } => TokenKind::Upos,
            Token::Xpos { .. } => TokenKind::Xpos,
            Token::Feats { .. } => TokenKind::Feats,
            Token::Head { .. } => TokenKind::Head,
            Token::Deprel { .. } => TokenKind::Deprel,
            Token::Deps { .. } => TokenKind::Deps,
            Token::Misc { .. } => TokenKind::Misc,
            Token::Tab { .. } => TokenKind::Tab,
            Token::Newline { .. } => TokenKind::Newline,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Token::Comment { line, .. }
            | Token::IntegerId { line, .. }
            | Token::RangeId { line, .. }
            | Token::DecimalId { line, .. }
            | Token::Form { line, .. }
            | Token::Lemma { line, .. }
            | Token::Upos { line, .. }
            | Token::Xpos { line, .. }
            | Token::Feats { line, .. }
            | Token::Head { line, .. }
            | Token::Deprel { line, .. }
            | Token::Deps { line, .. }
            | Token::Misc { line, .. }
            | Token::Tab { line, .. }
            | Token::Newline { line, .. } => *line,
        }
    }

    pub fn column(&self) -> u32 {
        match self {
            Token::Comment { column, .. }
            | Token::IntegerId { column, .. }
            | Token::RangeId { column, .. }
            | Token::DecimalId { column, .. }
            | Token::Form { column, .. }
            | Token::Lemma { column, .. }
            | Token::Upos { column, .. }
            | Token::Xpos { column, .. }
            | Token::Feats { column, .. }
            | Token::Head { column, .. }
            | Token::Deprel { column, .. }
            | Token::Deps { column, .. }
            | Token::Misc { column, .. }
            | Token::Tab { column, .. }
            | Token::Newline { column, .. } => *column,
        }
    }
}

/// Tokenizes CoNLL-U text one character at a time.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// Count of TAB tokens seen since the last NEWLINE; 0 means the next
    /// data token lexed is field 1 (the id column).
    field_index: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            field_index: 0,
        }
    }

    /// Tokenizes the entire input up front (the core buffers the whole
    /// document rather than streaming, per §5's resource model).
    pub fn tokenize(mut self) -> ConlluResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> ConlluResult<Option<Token>> {
        if self.cursor.is_at_end() {
            return Ok(None);
        }

        match self.cursor.current_char() {
            '\n' => {
                let (line, column) = (self.cursor.line(), self.cursor.column());
                self.cursor.advance();
                self.field_index = 0;
                Ok(Some(Token::Newline { line, column }))
            }
            '\t' => {
                let (line, column) = (self.cursor.line(), self.cursor.column());
                self.cursor.advance();
                self.field_index += 1;
                Ok(Some(Token::Tab { line, column }))
            }
            '#' if self.field_index == 0 => self.lex_comment().map(Some),
            _ => {
                let field_number = self.field_index + 1;
                let token = match field_number {
                    1 => self.lex_id()?,
                    2 => self.lex_form()?,
                    3 => self.lex_lemma()?,
                    4 => self.lex_upos()?,
                    5 => self.lex_xpos()?,
                    6 => self.lex_feats()?,
                    7 => self.lex_head()?,
                    8 => self.lex_deprel()?,
                    9 => self.lex_deps()?,
                    10 => self.lex_misc()?,
                    _ => {
                        return Err(ConlluError::illegal_character(
                            self.cursor.line(),
                            self.cursor.column(),
                        ))
                    }
                };
                Ok(Some(token))
            }
        }
    }

    fn lex_comment(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance(); // '#'
        let start = self.cursor.position();
        while !matches!(self.cursor.current_char(), '\n' | '\0') {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).trim().to_string();
        Ok(Token::Comment { text, line, column })
    }

    // --- field 1: id -------------------------------------------------

    fn lex_id(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        if !self.cursor.current_char().is_ascii_digit() {
            return Err(ConlluError::illegal_character(line, column));
        }
        let main = self.consume_zero_or_positive();

        let token = match self.cursor.current_char() {
            '-' => {
                let snapshot = self.cursor.snapshot();
                self.cursor.advance();
                match self.consume_strict_positive() {
                    Some(last) => {
                        // RANGE_ID's first component is an INTEGER_ID in its
                        // own right (§4.1) and so never allows zero, unlike
                        // DECIMAL_ID's main component.
                        if main == 0 {
                            return Err(ConlluError::illegal_character(line, column));
                        }
                        Token::RangeId {
                            first: main,
                            last,
                            line,
                            column,
                        }
                    }
                    None => {
                        self.cursor.restore(snapshot);
                        if main == 0 {
                            return Err(ConlluError::illegal_character(line, column));
                        }
                        Token::IntegerId {
                            value: main,
                            line,
                            column,
                        }
                    }
                }
            }
            '.' => {
                let snapshot = self.cursor.snapshot();
                self.cursor.advance();
                match self.consume_strict_positive() {
                    Some(sub) => Token::DecimalId {
                        main,
                        sub,
                        line,
                        column,
                    },
                    None => {
                        self.cursor.restore(snapshot);
                        if main == 0 {
                            return Err(ConlluError::illegal_character(line, column));
                        }
                        Token::IntegerId {
                            value: main,
                            line,
                            column,
                        }
                    }
                }
            }
            _ => {
                if main == 0 {
                    return Err(ConlluError::illegal_character(line, column));
                }
                Token::IntegerId {
                    value: main,
                    line,
                    column,
                }
            }
        };

        self.expect_field_separator()?;
        Ok(token)
    }

    // --- fields 2-3: form/lemma ---------------------------------------

    fn lex_form(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let value = self.consume_raw_field()?;
        Ok(Token::Form { value, line, column })
    }

    fn lex_lemma(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let value = self.consume_raw_field()?;
        Ok(Token::Lemma { value, line, column })
    }

    // --- field 4: upos --------------------------------------------------

    fn lex_upos(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let text = self.consume_raw_field()?;
        let value = if text == "_" {
            None
        } else {
            match UposTag::parse(&text) {
                Some(tag) => Some(tag),
                None => return Err(ConlluError::illegal_character(line, column)),
            }
        };
        Ok(Token::Upos { value, line, column })
    }

    // --- field 5: xpos ----------------------------------------------------

    fn lex_xpos(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let text = self.consume_field_no_space()?;
        let value = if text == "_" { None } else { Some(text) };
        Ok(Token::Xpos { value, line, column })
    }

    // --- field 6: feats ------------------------------------------------

    fn lex_feats(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let text = self.consume_raw_field()?;
        let value = if text == "_" {
            None
        } else {
            match parse_feats(&text) {
                Some(pairs) => Some(FeatsValue::Structured(pairs)),
                None => return Err(ConlluError::illegal_character(line, column)),
            }
        };
        Ok(Token::Feats { value, line, column })
    }

    // --- field 7: head ----------------------------------------------------

    fn lex_head(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();

        if self.cursor.current_char() == '_' {
            self.cursor.advance();
            self.expect_field_separator()?;
            return Ok(Token::Head {
                value: None,
                line,
                column,
            });
        }

        if !self.cursor.current_char().is_ascii_digit() {
            return Err(ConlluError::illegal_character(line, column));
        }
        let value = self.consume_zero_or_positive();
        self.expect_field_separator()?;
        Ok(Token::Head {
            value: Some(value),
            line,
            column,
        })
    }

    // --- field 8: deprel --------------------------------------------------

    fn lex_deprel(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let text = self.consume_field_no_space()?;
        let value = if text == "_" { None } else { Some(text) };
        Ok(Token::Deprel { value, line, column })
    }

    // --- field 9: deps ---------------------------------------------------

    fn lex_deps(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let text = self.consume_raw_field()?;
        let value = if text == "_" {
            None
        } else {
            match parse_deps(&text) {
                Some(pairs) => Some(DepsValue::Structured(pairs)),
                None => return Err(ConlluError::illegal_character(line, column)),
            }
        };
        Ok(Token::Deps { value, line, column })
    }

    // --- field 10: misc -----------------------------------------------

    fn lex_misc(&mut self) -> ConlluResult<Token> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let text = self.consume_field_no_space()?;
        let value = if text == "_" { None } else { Some(text) };
        Ok(Token::Misc { value, line, column })
    }

    // --- shared grammar primitives -------------------------------------

    /// Matches `0 | [1-9][0-9]*`. The bare-zero alternative never
    /// backtracks into further digits — a leading `0` always matches just
    /// itself, leaving any trailing digits unconsumed. This quirk is what
    /// makes `HEAD = 01` fail one column past the field start rather than
    /// at it (see `SPEC_FULL.md` §4.1).
    fn consume_zero_or_positive(&mut self) -> u32 {
        if self.cursor.current_char() == '0' {
            self.cursor.advance();
            return 0;
        }
        let mut value: u32 = 0;
        while self.cursor.current_char().is_ascii_digit() {
            let digit = self.cursor.current_char() as u32 - '0' as u32;
            value = value.saturating_mul(10).saturating_add(digit);
            self.cursor.advance();
        }
        value
    }

    /// Matches `[1-9][0-9]*` only; returns `None` (without consuming
    /// anything) if the current character isn't `1`-`9`.
    ///
    /// The grammar places no upper bound on the digit run's length, so a
    /// lexically valid id or head can exceed `u32::MAX`; such values
    /// saturate rather than wrap or panic, since the lexer's job is token
    /// shape, not bounds-checking a magnitude the format itself never caps.
    fn consume_strict_positive(&mut self) -> Option<u32> {
        if !('1'..='9').contains(&self.cursor.current_char()) {
            return None;
        }
        let mut value: u32 = 0;
        while self.cursor.current_char().is_ascii_digit() {
            let digit = self.cursor.current_char() as u32 - '0' as u32;
            value = value.saturating_mul(10).saturating_add(digit);
            self.cursor.advance();
        }
        Some(value)
    }

    /// After a numeric field whose grammar can stop short of the next
    /// separator (id and head), require the very next character to be a
    /// TAB. Anything else is an illegal character at its own position.
    fn expect_field_separator(&mut self) -> ConlluResult<()> {
        if self.cursor.current_char() != '\t' {
            return Err(ConlluError::illegal_character(
                self.cursor.line(),
                self.cursor.column(),
            ));
        }
        Ok(())
    }

    /// Consumes every character up to the next TAB/NEWLINE/EOF, allowing
    /// spaces (FORM, LEMMA and the structured FEATS/DEPS text).
    fn consume_raw_field(&mut self) -> ConlluResult<String> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let start = self.cursor.position();
        while !matches!(self.cursor.current_char(), '\t' | '\n' | '\0') {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).to_string();
        if text.is_empty() {
            return Err(ConlluError::illegal_character(line, column));
        }
        Ok(text)
    }

    /// As [`Lexer::consume_raw_field`], but a literal space is itself an
    /// illegal character at its own column (XPOS, DEPREL, MISC).
    fn consume_field_no_space(&mut self) -> ConlluResult<String> {
        let line = self.cursor.line();
        let column = self.cursor.column();
        let start = self.cursor.position();
        loop {
            match self.cursor.current_char() {
                '\t' | '\n' | '\0' => break,
                ' ' => {
                    return Err(ConlluError::illegal_character(
                        self.cursor.line(),
                        self.cursor.column(),
                    ))
                }
                _ => self.cursor.advance(),
            }
        }
        let text = self.cursor.slice_from(start).to_string();
        if text.is_empty() {
            return Err(ConlluError::illegal_character(line, column));
        }
        Ok(text)
    }
}

/// `entry ("|" entry)*` where `entry = key "=" value ("," value)*`.
fn parse_feats(text: &str) -> Option<Vec<(String, Vec<String>)>> {
    let mut pairs = Vec::new();
    for entry in text.split('|') {
        let mut halves = entry.splitn(2, '=');
        let key = halves.next()?;
        let rest = halves.next()?;
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '[' || c == ']')
        {
            return None;
        }
        let mut values = Vec::new();
        for value in rest.split(',') {
            if value.is_empty() {
                return None;
            }
            values.push(value.to_string());
        }
        pairs.push((key.to_string(), values));
    }
    if pairs.is_empty() {
        None
    } else {
        Some(pairs)
    }
}

/// `pair ("|" pair)*` where `pair = head ":" relation`.
fn parse_deps(text: &str) -> Option<Vec<(u32, String)>> {
    let mut pairs = Vec::new();
    for pair in text.split('|') {
        let mut halves = pair.splitn(2, ':');
        let head_text = halves.next()?;
        let relation = halves.next()?;
        if relation.is_empty() || relation.contains([' ', '|', ':']) {
            return None;
        }
        let head = parse_strict_head(head_text)?;
        pairs.push((head, relation.to_string()));
    }
    if pairs.is_empty() {
        None
    } else {
        Some(pairs)
    }
}

/// `0 | [1-9][0-9]*`, applied to an already-isolated substring (DEPS heads
/// are validated as a whole token, unlike the lexer's own id/head fields
/// which can short-match; there is no trailing sibling text to worry
/// about here since `relation` is already split off).
fn parse_strict_head(text: &str) -> Option<u32> {
    if text == "0" {
        return Some(0);
    }
    let mut chars = text.chars();
    let first = chars.next()?;
    if !('1'..='9').contains(&first) {
        return None;
    }
    if !chars.clone().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
