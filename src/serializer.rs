/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt::{self, Write};

use crate::ast::{
    AtRule, BlockType, ComponentValue, Declaration, DeclarationListItem, Function, QualifiedRule, Rule,
    SimpleBlock, Stylesheet,
};
use crate::tokenizer::{HashType, NumericValue, Token};

/// Trait for things that can serialize themselves in CSS syntax.
pub trait ToCss {
    /// Serialize `self` in CSS syntax, writing to `dest`.
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write;

    /// Serialize `self` in CSS syntax and return a string.
    ///
    /// (This is a convenience wrapper for `to_css` and probably should not be overridden.)
    #[inline]
    fn to_css_string(&self) -> String {
        let mut s = String::new();
        match self.to_css(&mut s) {
            Ok(()) => s,
            // Writing to a `String` only fails if a `to_css` impl returns an error itself.
            Err(fmt::Error) => String::new(),
        }
    }
}

#[inline]
fn write_numeric<W>(value: &NumericValue, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    dest.write_str(&value.representation)
}

impl ToCss for Token {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {
            Token::Whitespace => dest.write_char(' '),
            Token::Ident(ref value) => serialize_identifier(value, dest),
            Token::Function(ref name) => {
                serialize_identifier(name, dest)?;
                dest.write_char('(')
            }
            Token::AtKeyword(ref value) => {
                dest.write_char('@')?;
                serialize_identifier(value, dest)
            }
            Token::Hash(ref value, HashType::Id) => {
                dest.write_char('#')?;
                serialize_identifier(value, dest)
            }
            Token::Hash(ref value, HashType::Unrestricted) => {
                dest.write_char('#')?;
                serialize_name(value, dest)
            }
            Token::QuotedString(ref value) => serialize_string(value, dest),
            // An unterminated string cut by a newline.
            Token::BadString => dest.write_str("\"\n"),
            Token::Url(ref value) => {
                dest.write_str("url(")?;
                serialize_unquoted_url(value, dest)?;
                dest.write_char(')')
            }
            Token::BadUrl => dest.write_str("url(()"),
            Token::Number(ref value) => write_numeric(value, dest),
            Token::Percentage(ref value) => {
                write_numeric(value, dest)?;
                dest.write_char('%')
            }
            Token::Dimension(ref value, ref unit) => {
                write_numeric(value, dest)?;
                // Disambiguate with scientific notation.
                let bytes = unit.as_bytes();
                let looks_like_exponent = matches!(bytes.first(), Some(b'e') | Some(b'E'))
                    && matches!(bytes.get(1), Some(b'0'..=b'9') | Some(b'-'));
                if looks_like_exponent {
                    hex_escape(bytes[0], dest)?;
                    serialize_name(&unit[1..], dest)
                } else {
                    serialize_identifier(unit, dest)
                }
            }
            // A backslash followed by a newline is not an escape.
            Token::Delim('\\') => dest.write_str("\\\n"),
            Token::Delim(c) | Token::Literal(c) => dest.write_char(c),
            Token::IncludeMatch => dest.write_str("~="),
            Token::DashMatch => dest.write_str("|="),
            Token::PrefixMatch => dest.write_str("^="),
            Token::SuffixMatch => dest.write_str("$="),
            Token::SubstringMatch => dest.write_str("*="),
            Token::Column => dest.write_str("||"),
            Token::CDO => dest.write_str("<!--"),
            Token::CDC => dest.write_str("-->"),
        }
    }
}

fn hex_escape<W>(ascii_byte: u8, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    write!(dest, "\\{:x} ", ascii_byte)
}

fn char_escape<W>(c: char, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    dest.write_char('\\')?;
    dest.write_char(c)
}

/// Write a CSS identifier, escaping characters as necessary.
pub fn serialize_identifier<W>(mut value: &str, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    if value.is_empty() {
        return Ok(());
    }

    if let Some(rest) = value.strip_prefix("--") {
        dest.write_str("--")?;
        serialize_name(rest, dest)
    } else if value == "-" {
        dest.write_str("\\-")
    } else {
        if let Some(rest) = value.strip_prefix('-') {
            dest.write_char('-')?;
            value = rest;
        }
        if let Some(digit @ b'0'..=b'9') = value.bytes().next() {
            hex_escape(digit, dest)?;
            value = &value[1..];
        }
        serialize_name(value, dest)
    }
}

/// Write a CSS name, like a custom property name.
///
/// You should only use this when you know what you're doing, when in doubt,
/// consider using `serialize_identifier`.
pub fn serialize_name<W>(value: &str, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    for c in value.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => dest.write_char(c)?,
            '\0' => dest.write_char('\u{FFFD}')?,
            _ if c > '\x7F' => dest.write_char(c)?,
            '\x01'..='\x1F' | '\x7F' => hex_escape(c as u8, dest)?,
            _ => char_escape(c, dest)?,
        }
    }
    Ok(())
}

/// Write the contents of an unquoted `url(…)`, escaping characters as necessary.
pub fn serialize_unquoted_url<W>(value: &str, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    for c in value.chars() {
        match c {
            '\0' => dest.write_char('\u{FFFD}')?,
            '\x01'..='\x1F' | '\x7F' => hex_escape(c as u8, dest)?,
            ' ' | '"' | '\'' | '(' | ')' | '\\' => char_escape(c, dest)?,
            _ => dest.write_char(c)?,
        }
    }
    Ok(())
}

/// Write a double-quoted CSS string token, escaping content as necessary.
pub fn serialize_string<W>(value: &str, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    dest.write_char('"')?;
    CssStringWriter::new(dest).write_str(value)?;
    dest.write_char('"')
}

/// A `fmt::Write` adapter that escapes text for writing as a double-quoted CSS string.
/// Quotes are not included.
///
/// Typical usage:
///
/// ```rust
/// # use css_syntax::CssStringWriter;
/// # use std::fmt::{self, Write};
/// fn write_foo<W>(foo: &str, dest: &mut W) -> fmt::Result where W: fmt::Write {
///     dest.write_char('"')?;
///     {
///         let mut string_dest = CssStringWriter::new(dest);
///         string_dest.write_str(foo)?;
///     }
///     dest.write_char('"')
/// }
/// ```
pub struct CssStringWriter<'a, W> {
    inner: &'a mut W,
}

impl<'a, W> CssStringWriter<'a, W>
where
    W: fmt::Write,
{
    /// Wrap a text writer to create a `CssStringWriter`.
    pub fn new(inner: &'a mut W) -> CssStringWriter<'a, W> {
        CssStringWriter { inner }
    }
}

impl<'a, W> fmt::Write for CssStringWriter<'a, W>
where
    W: fmt::Write,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            match c {
                '"' | '\\' => char_escape(c, self.inner)?,
                '\0' => self.inner.write_char('\u{FFFD}')?,
                '\x01'..='\x1F' | '\x7F' => hex_escape(c as u8, self.inner)?,
                _ => self.inner.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// What a serialized component value looks like at its edges,
/// for deciding where an empty comment is needed to keep two values apart.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SerializationType {
    Nothing,
    WhiteSpace,
    AtKeywordOrHash,
    Number,
    Dimension,
    Percentage,
    UrlOrBadUrl,
    Function,
    Ident,
    /// The identifier `--`, which would form `-->` with a following `>`.
    DashDashIdent,
    CDC,
    DashMatch,
    SubstringMatch,
    OpenParen,
    DelimHash,
    DelimAt,
    DelimDotOrPlus,
    DelimMinus,
    DelimQuestion,
    DelimAssorted,
    DelimEquals,
    DelimBar,
    DelimSlash,
    DelimAsterisk,
    DelimPercent,
    DelimLess,
    DelimBang,
    DelimGreater,
    Other,
}

impl SerializationType {
    fn of_token(token: &Token) -> SerializationType {
        match *token {
            Token::Ident(_) => SerializationType::Ident,
            Token::AtKeyword(_) | Token::Hash(..) => SerializationType::AtKeywordOrHash,
            Token::Url(_) | Token::BadUrl => SerializationType::UrlOrBadUrl,
            Token::Delim('#') => SerializationType::DelimHash,
            Token::Delim('@') => SerializationType::DelimAt,
            Token::Delim('.') | Token::Delim('+') => SerializationType::DelimDotOrPlus,
            Token::Delim('-') => SerializationType::DelimMinus,
            Token::Delim('?') => SerializationType::DelimQuestion,
            Token::Delim('$') | Token::Delim('^') | Token::Delim('~') => SerializationType::DelimAssorted,
            Token::Delim('%') => SerializationType::DelimPercent,
            Token::Delim('=') => SerializationType::DelimEquals,
            Token::Delim('|') => SerializationType::DelimBar,
            Token::Delim('/') => SerializationType::DelimSlash,
            Token::Delim('*') => SerializationType::DelimAsterisk,
            Token::Delim('<') => SerializationType::DelimLess,
            Token::Delim('!') => SerializationType::DelimBang,
            Token::Delim('>') => SerializationType::DelimGreater,
            Token::Number(_) => SerializationType::Number,
            Token::Percentage(_) => SerializationType::Percentage,
            Token::Dimension(..) => SerializationType::Dimension,
            Token::Whitespace => SerializationType::WhiteSpace,
            Token::CDC => SerializationType::CDC,
            Token::DashMatch => SerializationType::DashMatch,
            Token::SubstringMatch => SerializationType::SubstringMatch,
            Token::Function(_) => SerializationType::Function,
            Token::Literal('(') => SerializationType::OpenParen,
            _ => SerializationType::Other,
        }
    }

    /// How `value` starts.
    fn leading(value: &ComponentValue) -> SerializationType {
        match *value {
            ComponentValue::Preserved(ref token) => SerializationType::of_token(token),
            ComponentValue::Function(_) => SerializationType::Function,
            ComponentValue::SimpleBlock(SimpleBlock {
                block_type: BlockType::Parenthesis,
                ..
            }) => SerializationType::OpenParen,
            ComponentValue::SimpleBlock(_) => SerializationType::Other,
        }
    }

    /// How `value` ends: functions and blocks end with a closing bracket.
    fn trailing(value: &ComponentValue) -> SerializationType {
        match *value {
            ComponentValue::Preserved(Token::Ident(ref name)) if name == "--" => SerializationType::DashDashIdent,
            ComponentValue::Preserved(ref token) => SerializationType::of_token(token),
            _ => SerializationType::Other,
        }
    }

    fn needs_separator_when_before(self, other: SerializationType) -> bool {
        use self::SerializationType::*;
        match self {
            Ident => matches!(
                other,
                Ident | Function | UrlOrBadUrl | DelimMinus | Number | Percentage | Dimension | CDC | OpenParen
            ),
            DashDashIdent => other == DelimGreater || Ident.needs_separator_when_before(other),
            AtKeywordOrHash | Dimension => matches!(
                other,
                Ident | Function | UrlOrBadUrl | DelimMinus | Number | Percentage | Dimension | CDC
            ),
            DelimHash | DelimMinus => matches!(
                other,
                Ident | Function | UrlOrBadUrl | DelimMinus | Number | Percentage | Dimension | CDC
            ),
            Number => matches!(
                other,
                Ident | Function | UrlOrBadUrl | DelimMinus | Number | Percentage | DelimPercent | Dimension | CDC
            ),
            DelimAt => matches!(other, Ident | Function | UrlOrBadUrl | DelimMinus | CDC),
            // `<!` followed by `--` would read back as `<!--`.
            DelimLess => other == DelimBang,
            DelimDotOrPlus => matches!(other, Number | Percentage | Dimension),
            DelimAssorted | DelimAsterisk => matches!(other, DelimEquals),
            DelimBar => matches!(other, DelimEquals | DelimBar | DashMatch),
            DelimSlash => matches!(other, DelimAsterisk | SubstringMatch),
            Nothing | WhiteSpace | Percentage | UrlOrBadUrl | Function | CDC | OpenParen | DashMatch
            | SubstringMatch | DelimQuestion | DelimEquals | DelimPercent | DelimBang | DelimGreater | Other => false,
        }
    }
}

/// Write `values`, inserting `/**/` where two neighbours would otherwise
/// re-tokenize differently. `previous` describes what was written just before.
fn component_values_to_css<W>(values: &[ComponentValue], mut previous: SerializationType, dest: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    for value in values {
        if previous.needs_separator_when_before(SerializationType::leading(value)) {
            dest.write_str("/**/")?;
        }
        value.to_css(dest)?;
        previous = SerializationType::trailing(value);
    }
    Ok(())
}

impl ToCss for [ComponentValue] {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        component_values_to_css(self, SerializationType::Nothing, dest)
    }
}

impl ToCss for ComponentValue {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {
            ComponentValue::Preserved(ref token) => token.to_css(dest),
            ComponentValue::SimpleBlock(ref block) => block.to_css(dest),
            ComponentValue::Function(ref function) => function.to_css(dest),
        }
    }
}

impl ToCss for SimpleBlock {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_char(self.block_type.opening_char())?;
        self.contents.to_css(dest)?;
        dest.write_char(self.block_type.closing())
    }
}

impl ToCss for Function {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        serialize_identifier(&self.name, dest)?;
        dest.write_char('(')?;
        self.contents.to_css(dest)?;
        dest.write_char(')')
    }
}

impl ToCss for Declaration {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        serialize_identifier(&self.name, dest)?;
        dest.write_char(':')?;
        self.value.to_css(dest)?;
        if self.important {
            dest.write_str("!important")?;
        }
        Ok(())
    }
}

impl ToCss for QualifiedRule {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        self.prelude.to_css(dest)?;
        self.block.to_css(dest)
    }
}

impl ToCss for AtRule {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_char('@')?;
        serialize_identifier(&self.name, dest)?;
        component_values_to_css(&self.prelude, SerializationType::AtKeywordOrHash, dest)?;
        match self.block {
            Some(ref block) => block.to_css(dest),
            None => dest.write_char(';'),
        }
    }
}

impl ToCss for Rule {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {
            Rule::QualifiedRule(ref rule) => rule.to_css(dest),
            Rule::AtRule(ref rule) => rule.to_css(dest),
        }
    }
}

impl ToCss for [Rule] {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        for rule in self {
            rule.to_css(dest)?;
        }
        Ok(())
    }
}

impl ToCss for DeclarationListItem {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match *self {
            DeclarationListItem::Declaration(ref declaration) => declaration.to_css(dest),
            DeclarationListItem::AtRule(ref at_rule) => at_rule.to_css(dest),
        }
    }
}

impl ToCss for [DeclarationListItem] {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        for item in self {
            item.to_css(dest)?;
            if let DeclarationListItem::Declaration(_) = *item {
                dest.write_char(';')?;
            }
        }
        Ok(())
    }
}

impl ToCss for Stylesheet {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        self.rules.to_css(dest)
    }
}
