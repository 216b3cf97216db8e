/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// https://drafts.csswg.org/css-syntax/#tokenization

use std::cell::Cell;
use std::fmt;

use crate::errors::{NoopReporter, ParseError, ParseErrorKind, ParseErrorReporter};
use crate::from_bytes::preprocess;

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// One of the pieces the CSS input is broken into.
///
/// All string payloads have their escape sequences already resolved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    ///
    /// A run of any length of whitespace is collapsed into one token,
    /// which serializes as a single space.
    Whitespace,

    /// A [`<ident-token>`](https://drafts.csswg.org/css-syntax/#ident-token-diagram)
    Ident(String),

    /// A [`<function-token>`](https://drafts.csswg.org/css-syntax/#function-token-diagram)
    ///
    /// The value (name) does not include the `(` marker.
    Function(String),

    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),

    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram)
    ///
    /// The value does not include the `#` marker.
    Hash(String, HashType),

    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),

    /// A `<bad-string-token>`
    ///
    /// This token always indicates a parse error.
    BadString,

    /// A [`<url-token>`](https://drafts.csswg.org/css-syntax/#url-token-diagram)
    ///
    /// Only produced for unquoted `url(…)`.
    /// `url("…")` is tokenized as a `Function` followed by a `QuotedString`.
    Url(String),

    /// A `<bad-url-token>`
    ///
    /// This token always indicates a parse error.
    BadUrl,

    /// A [`<number-token>`](https://drafts.csswg.org/css-syntax/#number-token-diagram)
    Number(NumericValue),

    /// A [`<percentage-token>`](https://drafts.csswg.org/css-syntax/#percentage-token-diagram)
    ///
    /// The value is *not* divided by 100: `50%` has a value of `50.0`.
    Percentage(NumericValue),

    /// A [`<dimension-token>`](https://drafts.csswg.org/css-syntax/#dimension-token-diagram)
    ///
    /// The second component is the unit.
    Dimension(NumericValue, String),

    /// A `<delim-token>`
    Delim(char),

    /// A `~=` [`<include-match-token>`](https://drafts.csswg.org/css-syntax/#include-match-token-diagram)
    IncludeMatch,

    /// A `|=` [`<dash-match-token>`](https://drafts.csswg.org/css-syntax/#dash-match-token-diagram)
    DashMatch,

    /// A `^=` [`<prefix-match-token>`](https://drafts.csswg.org/css-syntax/#prefix-match-token-diagram)
    PrefixMatch,

    /// A `$=` [`<suffix-match-token>`](https://drafts.csswg.org/css-syntax/#suffix-match-token-diagram)
    SuffixMatch,

    /// A `*=` [`<substring-match-token>`](https://drafts.csswg.org/css-syntax/#substring-match-token-diagram)
    SubstringMatch,

    /// A `||` [`<column-token>`](https://drafts.csswg.org/css-syntax/#column-token-diagram)
    Column,

    /// A `<!--` [`<CDO-token>`](https://drafts.csswg.org/css-syntax/#CDO-token-diagram)
    CDO,

    /// A `-->` [`<CDC-token>`](https://drafts.csswg.org/css-syntax/#CDC-token-diagram)
    CDC,

    /// One of `{ } [ ] ( ) : ; ,`
    Literal(char),
}

impl Token {
    /// Return whether this token represents a parse error.
    ///
    /// `BadUrl` and `BadString` are tokenizer-level parse errors.
    pub fn is_parse_error(&self) -> bool {
        matches!(*self, Token::BadUrl | Token::BadString)
    }

    #[inline]
    pub fn is_whitespace(&self) -> bool {
        *self == Token::Whitespace
    }

    #[inline]
    pub(crate) fn is_literal(&self, c: char) -> bool {
        *self == Token::Literal(c)
    }
}

/// Whether a hash token's name would be a valid ID selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashType {
    /// The name starts an identifier: `#foo`, `#-bar`.
    Id,
    /// Anything else: `#123`, `#-1`.
    Unrestricted,
}

/// The type flag of a numeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberType {
    /// Neither a fractional part nor an exponent was present.
    Integer,
    /// The source had a fractional part or an exponent.
    Number,
}

/// The numeric value of `Number`, `Percentage` and `Dimension` tokens.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericValue {
    /// The exact source text of the number, sign included, unit and `%` excluded.
    pub representation: String,

    /// The value as a float
    pub value: f64,

    /// If the origin source did not include a fractional part or an exponent,
    /// the value as an integer. Saturates at the bounds of `i64`.
    pub int_value: Option<i64>,
}

impl NumericValue {
    /// Build an integer-typed value, synthesizing its representation.
    pub fn integer(value: i64) -> NumericValue {
        let mut buffer = itoa::Buffer::new();
        NumericValue {
            representation: buffer.format(value).to_owned(),
            value: value as f64,
            int_value: Some(value),
        }
    }

    /// Build a number-typed value, synthesizing its representation.
    pub fn number(value: f64) -> NumericValue {
        let mut representation = String::new();
        match dtoa_short::write(&mut representation, value) {
            Ok(notation) => {
                if !notation.decimal_point && !notation.scientific {
                    representation.push_str(".0");
                }
            }
            Err(_) => representation = format!("{:?}", value),
        }
        NumericValue {
            representation,
            value,
            int_value: None,
        }
    }

    /// Parse the text matched by the numeric grammar
    /// `[+-]?\d*(\.\d+)?([eE][+-]?\d+)?`.
    fn from_representation(representation: String, is_integer: bool) -> NumericValue {
        // `str::parse` accepts exactly this grammar (including a leading `+`)
        // and rounds to the nearest double.
        let value = representation.parse::<f64>().unwrap_or(0.);
        let int_value = if is_integer {
            Some(representation.parse::<i64>().unwrap_or(value as i64))
        } else {
            None
        };
        NumericValue {
            representation,
            value,
            int_value,
        }
    }

    #[inline]
    pub fn number_type(&self) -> NumberType {
        match self.int_value {
            Some(_) => NumberType::Integer,
            None => NumberType::Number,
        }
    }
}

/// The line and column number for a given position within the input.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    /// The line number, starting at 1 for the first line.
    pub line: usize,

    /// The column number within a line, starting at 1 for the first code point of the line.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A preprocessed sequence of code points, consumed left to right.
///
/// Supports bounded lookahead and reconsuming the single most recently
/// consumed code point.
pub struct CodePointStream {
    code_points: Vec<char>,

    /// Counted in code points, not bytes. From 0.
    position: usize,

    /// Set by a successful `consume`, cleared by `reconsume`.
    can_reconsume: bool,

    /// Cache for `source_location()`: (line number, position after the last newline).
    last_known_line_break: Cell<(usize, usize)>,
}

impl CodePointStream {
    /// Preprocess `input` and wrap the result.
    pub fn new(input: &str) -> CodePointStream {
        CodePointStream {
            code_points: preprocess(input).chars().collect(),
            position: 0,
            can_reconsume: false,
            last_known_line_break: Cell::new((1, 0)),
        }
    }

    /// Consume and return the next code point, or `None` at EOF.
    #[inline]
    pub fn consume(&mut self) -> Option<char> {
        let next = self.code_points.get(self.position).copied();
        if next.is_some() {
            self.position += 1;
        }
        self.can_reconsume = next.is_some();
        next
    }

    /// Push the code point returned by the last `consume` back to the front of the stream.
    #[inline]
    pub fn reconsume(&mut self) {
        debug_assert!(self.can_reconsume, "nothing to reconsume");
        if self.can_reconsume {
            self.position -= 1;
            self.can_reconsume = false;
        }
    }

    /// Look at the code point `n` positions ahead without consuming anything.
    /// `peek(0)` is the next input code point.
    #[inline]
    pub fn peek(&self, n: usize) -> Option<char> {
        self.code_points.get(self.position + n).copied()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.position >= self.code_points.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn current_source_location(&self) -> SourceLocation {
        self.source_location(self.position)
    }

    pub fn source_location(&self, position: usize) -> SourceLocation {
        let (mut line_number, mut line_start) = self.last_known_line_break.get();
        if position < line_start {
            line_number = 1;
            line_start = 0;
        }
        let end = position.min(self.code_points.len());
        for index in line_start..end {
            if self.code_points[index] == '\n' {
                line_number += 1;
                line_start = index + 1;
            }
        }
        self.last_known_line_break.set((line_number, line_start));
        SourceLocation {
            line: line_number,
            // `position == line_start` at the beginning of a line,
            // so add 1 so that the column numbers start at 1.
            column: position - line_start + 1,
        }
    }
}

static MATCH_TOKENS: phf::Map<char, Token> = phf::phf_map! {
    '~' => Token::IncludeMatch,
    '|' => Token::DashMatch,
    '^' => Token::PrefixMatch,
    '$' => Token::SuffixMatch,
    '*' => Token::SubstringMatch,
};

/// Coarse category of the first code point of a token.
#[derive(Clone, Copy, PartialEq, Eq)]
enum CodePointClass {
    Whitespace,
    Digit,
    NameStart,
    Literal,
    Quote,
    Symbol,
}

impl CodePointClass {
    #[inline]
    fn of(c: char) -> CodePointClass {
        match c {
            ' ' | '\t' | '\n' => CodePointClass::Whitespace,
            '0'..='9' => CodePointClass::Digit,
            '{' | '}' | '[' | ']' | '(' | ')' | ':' | ';' | ',' => CodePointClass::Literal,
            '"' | '\'' => CodePointClass::Quote,
            c if is_name_start(c) => CodePointClass::NameStart,
            _ => CodePointClass::Symbol,
        }
    }
}

#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
fn is_name_start(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_') || c > '\x7F'
}

#[inline]
fn is_name(c: char) -> bool {
    is_name_start(c) || matches!(c, '0'..='9' | '-')
}

#[inline]
fn is_non_printable(c: char) -> bool {
    matches!(c, '\x00'..='\x08' | '\x0B' | '\x0E'..='\x1F' | '\x7F')
}

#[inline]
fn is_quote(c: Option<char>) -> bool {
    matches!(c, Some('"') | Some('\''))
}

// https://drafts.csswg.org/css-syntax/#starts-with-a-valid-escape
#[inline]
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}

// https://drafts.csswg.org/css-syntax/#would-start-an-identifier
fn would_start_identifier(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        Some('-') => match second {
            Some('-') => true,
            Some(c) if is_name_start(c) => true,
            _ => is_valid_escape(second, third),
        },
        Some('\\') => is_valid_escape(first, second),
        Some(c) => is_name_start(c),
        None => false,
    }
}

// https://drafts.csswg.org/css-syntax/#starts-with-a-number
fn starts_number(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        Some('+') | Some('-') => match second {
            Some(c) if is_digit(c) => true,
            Some('.') => third.map_or(false, is_digit),
            _ => false,
        },
        Some('.') => second.map_or(false, is_digit),
        Some(c) => is_digit(c),
        None => false,
    }
}

/// Turns CSS source text into tokens.
///
/// The input is preprocessed (newline normalization, NUL replacement) on construction.
/// Recoverable parse errors are sent to the reporter; the tokenizer never fails.
pub struct Tokenizer<R = NoopReporter> {
    stream: CodePointStream,
    reporter: R,
}

impl Tokenizer<NoopReporter> {
    #[inline]
    pub fn new(input: &str) -> Tokenizer<NoopReporter> {
        Tokenizer::with_reporter(input, NoopReporter)
    }
}

impl<R: ParseErrorReporter> Tokenizer<R> {
    pub fn with_reporter(input: &str, reporter: R) -> Tokenizer<R> {
        Tokenizer {
            stream: CodePointStream::new(input),
            reporter,
        }
    }

    #[inline]
    pub fn current_source_location(&self) -> SourceLocation {
        self.stream.current_source_location()
    }

    /// Return the next token, or `None` at the end of the input.
    #[inline]
    pub fn next_token(&mut self) -> Option<Token> {
        self.next_located_token().map(|(token, _)| token)
    }

    /// Like `next_token`, also returning where the token starts.
    pub fn next_located_token(&mut self) -> Option<(Token, SourceLocation)> {
        self.consume_comments();
        let location = self.current_source_location();
        self.consume_token().map(|token| (token, location))
    }

    /// Consume the whole input.
    pub fn tokenize_with_locations(mut self) -> Vec<(Token, SourceLocation)> {
        let mut tokens = Vec::new();
        while let Some(located) = self.next_located_token() {
            tokens.push(located)
        }
        tokens
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    fn report(&mut self, kind: ParseErrorKind) {
        let location = self.current_source_location();
        self.reporter.report_error(ParseError { kind, location })
    }

    // https://drafts.csswg.org/css-syntax/#consume-comments
    fn consume_comments(&mut self) {
        while self.stream.peek(0) == Some('/') && self.stream.peek(1) == Some('*') {
            self.stream.consume();
            self.stream.consume();
            loop {
                match self.stream.consume() {
                    // Unterminated comments are not reported.
                    None => return,
                    Some('*') if self.stream.peek(0) == Some('/') => {
                        self.stream.consume();
                        break;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-token
    fn consume_token(&mut self) -> Option<Token> {
        let c = self.stream.consume()?;
        let token = match CodePointClass::of(c) {
            CodePointClass::Whitespace => {
                self.consume_whitespace();
                Token::Whitespace
            }
            CodePointClass::Digit => {
                self.stream.reconsume();
                self.consume_numeric_token()
            }
            CodePointClass::NameStart => {
                self.stream.reconsume();
                self.consume_ident_like_token()
            }
            CodePointClass::Literal => Token::Literal(c),
            CodePointClass::Quote => self.consume_string_token(c),
            CodePointClass::Symbol => self.consume_symbol(c),
        };
        Some(token)
    }

    fn consume_symbol(&mut self, c: char) -> Token {
        let next = self.stream.peek(0);
        let after_next = self.stream.peek(1);
        match c {
            '+' | '.' => {
                if starts_number(Some(c), next, after_next) {
                    self.stream.reconsume();
                    self.consume_numeric_token()
                } else {
                    Token::Delim(c)
                }
            }
            '-' => {
                if starts_number(Some(c), next, after_next) {
                    self.stream.reconsume();
                    self.consume_numeric_token()
                } else if next == Some('-') && after_next == Some('>') {
                    self.stream.consume();
                    self.stream.consume();
                    Token::CDC
                } else if would_start_identifier(Some(c), next, after_next) {
                    self.stream.reconsume();
                    self.consume_ident_like_token()
                } else {
                    Token::Delim(c)
                }
            }
            '#' => {
                if next.map_or(false, is_name) || is_valid_escape(next, after_next) {
                    let hash_type = if would_start_identifier(next, after_next, self.stream.peek(2)) {
                        HashType::Id
                    } else {
                        HashType::Unrestricted
                    };
                    Token::Hash(self.consume_name(), hash_type)
                } else {
                    Token::Delim(c)
                }
            }
            '<' => {
                if next == Some('!') && after_next == Some('-') && self.stream.peek(2) == Some('-') {
                    self.stream.consume();
                    self.stream.consume();
                    self.stream.consume();
                    Token::CDO
                } else {
                    Token::Delim(c)
                }
            }
            '@' => {
                if would_start_identifier(next, after_next, self.stream.peek(2)) {
                    Token::AtKeyword(self.consume_name())
                } else {
                    Token::Delim(c)
                }
            }
            '\\' => {
                if is_valid_escape(Some(c), next) {
                    self.stream.reconsume();
                    self.consume_ident_like_token()
                } else {
                    self.report(ParseErrorKind::InvalidEscape);
                    Token::Delim(c)
                }
            }
            '|' if next == Some('|') => {
                self.stream.consume();
                Token::Column
            }
            _ => match MATCH_TOKENS.get(&c) {
                Some(token) if next == Some('=') => {
                    self.stream.consume();
                    token.clone()
                }
                _ => Token::Delim(c),
            },
        }
    }

    fn consume_whitespace(&mut self) {
        while self.stream.peek(0).map_or(false, is_whitespace) {
            self.stream.consume();
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-string-token
    fn consume_string_token(&mut self, ending: char) -> Token {
        let mut value = String::new();
        loop {
            match self.stream.consume() {
                Some(c) if c == ending => return Token::QuotedString(value),
                None => {
                    self.report(ParseErrorKind::EofInString);
                    return Token::QuotedString(value);
                }
                Some('\n') => {
                    self.stream.reconsume();
                    self.report(ParseErrorKind::NewlineInString);
                    return Token::BadString;
                }
                Some('\\') => match self.stream.peek(0) {
                    // Escaped EOF contributes nothing.
                    None => {}
                    // Escaped newline: line continuation.
                    Some('\n') => {
                        self.stream.consume();
                    }
                    Some(_) => value.push(self.consume_escape()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-numeric-token
    fn consume_numeric_token(&mut self) -> Token {
        let number = self.consume_number();
        if self.stream.peek(0) == Some('%') {
            self.stream.consume();
            Token::Percentage(number)
        } else if would_start_identifier(self.stream.peek(0), self.stream.peek(1), self.stream.peek(2)) {
            let unit = self.consume_name();
            Token::Dimension(number, unit)
        } else {
            Token::Number(number)
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-number
    fn consume_number(&mut self) -> NumericValue {
        // Parse [+-]?\d*(\.\d+)?([eE][+-]?\d+)?
        // This is always called so that there is at least one digit in \d*(\.\d+)?
        let mut representation = String::new();
        let mut is_integer = true;
        if let Some(sign @ '+') | Some(sign @ '-') = self.stream.peek(0) {
            self.stream.consume();
            representation.push(sign);
        }
        self.consume_digits(&mut representation);
        if self.stream.peek(0) == Some('.') && self.stream.peek(1).map_or(false, is_digit) {
            is_integer = false;
            self.stream.consume();
            representation.push('.');
            self.consume_digits(&mut representation);
        }
        let exponent_prefix_length = match (self.stream.peek(0), self.stream.peek(1)) {
            (Some('e'), Some('+')) | (Some('e'), Some('-')) | (Some('E'), Some('+')) | (Some('E'), Some('-')) => 2,
            (Some('e'), _) | (Some('E'), _) => 1,
            _ => 0,
        };
        if exponent_prefix_length > 0 && self.stream.peek(exponent_prefix_length).map_or(false, is_digit) {
            is_integer = false;
            for _ in 0..exponent_prefix_length {
                if let Some(c) = self.stream.consume() {
                    representation.push(c);
                }
            }
            self.consume_digits(&mut representation);
        }
        NumericValue::from_representation(representation, is_integer)
    }

    fn consume_digits(&mut self, representation: &mut String) {
        while let Some(c) = self.stream.peek(0) {
            if !is_digit(c) {
                break;
            }
            self.stream.consume();
            representation.push(c);
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-ident-like-token
    fn consume_ident_like_token(&mut self) -> Token {
        let name = self.consume_name();
        if self.stream.peek(0) != Some('(') {
            return Token::Ident(name);
        }
        self.stream.consume();
        let is_url = match_ignore_ascii_case! { name,
            "url" => true,
            _ => false,
        };
        if !is_url {
            return Token::Function(name);
        }
        while self.stream.peek(0).map_or(false, is_whitespace)
            && self.stream.peek(1).map_or(false, is_whitespace)
        {
            self.stream.consume();
        }
        let next = self.stream.peek(0);
        let quoted = is_quote(next) || (next.map_or(false, is_whitespace) && is_quote(self.stream.peek(1)));
        if quoted {
            Token::Function(name)
        } else {
            self.consume_url_token()
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-name
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.stream.peek(0) {
                Some(c) if is_name(c) => {
                    self.stream.consume();
                    name.push(c);
                }
                Some('\\') if is_valid_escape(Some('\\'), self.stream.peek(1)) => {
                    self.stream.consume();
                    name.push(self.consume_escape());
                }
                _ => return name,
            }
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-escaped-code-point
    //
    // Assumes that the U+005C REVERSE SOLIDUS (\) has already been consumed
    // and that the next input code point has already been verified
    // to not be a newline.
    fn consume_escape(&mut self) -> char {
        let c = match self.stream.consume() {
            Some(c) => c,
            None => {
                self.report(ParseErrorKind::EofInEscape);
                return REPLACEMENT_CHARACTER;
            }
        };
        let mut value = match c.to_digit(16) {
            Some(digit) => digit,
            None => return c,
        };
        let mut digits = 1;
        while digits < 6 {
            match self.stream.peek(0).and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    self.stream.consume();
                    value = value * 16 + digit;
                    digits += 1;
                }
                None => break,
            }
        }
        if self.stream.peek(0).map_or(false, is_whitespace) {
            self.stream.consume();
        }
        if value == 0 {
            REPLACEMENT_CHARACTER
        } else {
            // Surrogates and values above U+10FFFF are rejected by `from_u32`.
            char::from_u32(value).unwrap_or(REPLACEMENT_CHARACTER)
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-url-token
    //
    // Assumes `url(` and any leading whitespace but the last have been consumed,
    // and that what follows is not a quote.
    fn consume_url_token(&mut self) -> Token {
        let mut value = String::new();
        self.consume_whitespace();
        loop {
            match self.stream.consume() {
                Some(')') => return Token::Url(value),
                None => {
                    self.report(ParseErrorKind::EofInUrl);
                    return Token::Url(value);
                }
                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    return match self.stream.peek(0) {
                        Some(')') => {
                            self.stream.consume();
                            Token::Url(value)
                        }
                        None => {
                            self.report(ParseErrorKind::EofInUrl);
                            Token::Url(value)
                        }
                        Some(_) => self.consume_bad_url(),
                    };
                }
                Some('"') | Some('\'') | Some('(') => return self.consume_bad_url(),
                Some(c) if is_non_printable(c) => return self.consume_bad_url(),
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.stream.peek(0)) {
                        value.push(self.consume_escape());
                    } else {
                        return self.consume_bad_url();
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-remnants-of-bad-url
    fn consume_bad_url(&mut self) -> Token {
        self.report(ParseErrorKind::BadUrl);
        loop {
            match self.stream.consume() {
                None | Some(')') => break,
                // Skip an escaped ')' or '\'
                Some('\\') if is_valid_escape(Some('\\'), self.stream.peek(0)) => {
                    self.consume_escape();
                }
                Some(_) => {}
            }
        }
        Token::BadUrl
    }
}

impl<R: ParseErrorReporter> Iterator for Tokenizer<R> {
    type Item = Token;

    #[inline]
    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenize `input` in one pass, discarding parse errors.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}
