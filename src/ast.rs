/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::tokenizer::Token;

/// A node of the component-value tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentValue {
    /// Any token other than `Function` or an opening `{`, `[`, `(`.
    ///
    /// Unmatched closing tokens and `BadString`/`BadUrl` end up here too.
    Preserved(Token),

    /// `{…}`, `[…]` or `(…)`
    SimpleBlock(SimpleBlock),

    /// `name(…)`
    Function(Function),
}

impl ComponentValue {
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        matches!(*self, ComponentValue::Preserved(Token::Whitespace))
    }

    /// Return the token if this is a preserved token.
    #[inline]
    pub fn as_token(&self) -> Option<&Token> {
        match *self {
            ComponentValue::Preserved(ref token) => Some(token),
            _ => None,
        }
    }
}

impl From<Token> for ComponentValue {
    #[inline]
    fn from(token: Token) -> ComponentValue {
        ComponentValue::Preserved(token)
    }
}

/// Which pair of brackets delimits a simple block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockType {
    CurlyBracket,
    SquareBracket,
    Parenthesis,
}

impl BlockType {
    /// The block type opened by `c`, if any.
    #[inline]
    pub fn opening(c: char) -> Option<BlockType> {
        match c {
            '{' => Some(BlockType::CurlyBracket),
            '[' => Some(BlockType::SquareBracket),
            '(' => Some(BlockType::Parenthesis),
            _ => None,
        }
    }

    /// The opening code point, `{`, `[` or `(`.
    #[inline]
    pub fn opening_char(self) -> char {
        match self {
            BlockType::CurlyBracket => '{',
            BlockType::SquareBracket => '[',
            BlockType::Parenthesis => '(',
        }
    }

    /// The mirror variant of the opening code point: `}`, `]` or `)`.
    #[inline]
    pub fn closing(self) -> char {
        match self {
            BlockType::CurlyBracket => '}',
            BlockType::SquareBracket => ']',
            BlockType::Parenthesis => ')',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleBlock {
    pub block_type: BlockType,
    pub contents: Vec<ComponentValue>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// The name, without the `(` marker.
    pub name: String,
    pub contents: Vec<ComponentValue>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub name: String,
    /// Everything after the colon, whitespace included,
    /// with the `!` and `important` tokens removed.
    pub value: Vec<ComponentValue>,
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualifiedRule {
    pub prelude: Vec<ComponentValue>,
    /// Always a `{}` block.
    pub block: SimpleBlock,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtRule {
    /// The name, without the `@` marker.
    pub name: String,
    pub prelude: Vec<ComponentValue>,
    /// `None` when the rule ended with `;` or at the end of the input.
    pub block: Option<SimpleBlock>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    QualifiedRule(QualifiedRule),
    AtRule(AtRule),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclarationListItem {
    Declaration(Declaration),
    /// `@page`-like at-rules nested among declarations.
    AtRule(AtRule),
}

/// The result of `parse_stylesheet`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}
