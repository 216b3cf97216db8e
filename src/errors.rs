/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Errors produced while tokenizing and building the component-value tree.
//!
//! Two families exist:
//!
//! * [`ParseError`]: a recoverable condition. The tokenizer and the tree builder
//!   apply the recovery rule from the CSS Syntax specification and hand the error
//!   to a [`ParseErrorReporter`]. These never abort processing.
//! * [`SyntaxError`]: returned as `Err(_)` by the single-construct entry points
//!   (`parse_rule`, `parse_declaration`, `parse_component_value`) when the input
//!   does not contain exactly one such construct.

use thiserror::Error;

use crate::tokenizer::SourceLocation;

/// The kind of a recoverable parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// A quoted string reached the end of the input.
    #[error("unterminated string at end of input")]
    EofInString,

    /// A quoted string contained an unescaped newline. A `BadString` token was produced.
    #[error("unescaped newline in string")]
    NewlineInString,

    /// A `\` was followed by a newline outside of a string.
    #[error("invalid escape")]
    InvalidEscape,

    /// A `\` was the last code point of the input.
    #[error("escape at end of input")]
    EofInEscape,

    /// An unquoted `url(` reached the end of the input.
    #[error("unterminated url at end of input")]
    EofInUrl,

    /// An unquoted `url(` contained a quote, `(`, a non-printable code point,
    /// an invalid escape, or whitespace not followed by `)`.
    /// A `BadUrl` token was produced.
    #[error("invalid code point in url")]
    BadUrl,

    /// An at-rule prelude reached the end of the input before `;` or `{`.
    #[error("unterminated at-rule at end of input")]
    EofInAtRule,

    /// A qualified rule prelude reached the end of the input before `{`.
    /// The rule was dropped.
    #[error("qualified rule without a {{}} block")]
    MissingQualifiedRuleBlock,

    /// A simple block reached the end of the input before its closing token.
    #[error("unclosed block at end of input")]
    EofInBlock,

    /// A function reached the end of the input before `)`.
    #[error("unclosed function at end of input")]
    EofInFunction,

    /// A declaration was not `<ident> :`. The declaration was dropped.
    #[error("invalid declaration")]
    InvalidDeclaration,
}

/// A recoverable parse error and where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{location}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The location of the offending code point or token.
    pub location: SourceLocation,
}

/// The kind of a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxErrorKind {
    /// Only whitespace was found where a construct was required.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Non-whitespace input remained after the construct.
    #[error("unexpected input after the parsed construct")]
    ExtraInput,

    /// A qualified rule prelude ended without a `{}` block.
    #[error("invalid qualified rule")]
    InvalidRule,

    /// The input did not start with `<ident> :`.
    #[error("invalid declaration")]
    InvalidDeclaration,
}

/// A CSS syntax error returned by the single-construct entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{location}: {kind}")]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// Where it went wrong.
    pub location: SourceLocation,
}

/// A sink for recoverable parse errors.
///
/// Both the tokenizer and the tree builder take a reporter at construction.
/// The default is [`NoopReporter`].
pub trait ParseErrorReporter {
    /// Called once for every recoverable parse error, in input order.
    fn report_error(&mut self, error: ParseError);
}

/// Discards every error.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ParseErrorReporter for NoopReporter {
    #[inline]
    fn report_error(&mut self, _error: ParseError) {}
}

/// Forwards every error to the `log` crate at warning level.
///
/// ```rust
/// use css_syntax::{LogReporter, Parser};
///
/// // Logs "CSS parse error at 1:10: unescaped newline in string" and recovers.
/// let stylesheet = Parser::with_reporter("a { b: 'c\n }", LogReporter).parse_stylesheet();
/// assert_eq!(stylesheet.rules.len(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ParseErrorReporter for LogReporter {
    fn report_error(&mut self, error: ParseError) {
        log::warn!("CSS parse error at {}: {}", error.location, error.kind);
    }
}

/// Collects errors, e.g. for tests or tooling.
impl ParseErrorReporter for Vec<ParseError> {
    fn report_error(&mut self, error: ParseError) {
        self.push(error)
    }
}

impl<'a, R> ParseErrorReporter for &'a mut R
where
    R: ParseErrorReporter + ?Sized,
{
    #[inline]
    fn report_error(&mut self, error: ParseError) {
        (**self).report_error(error)
    }
}
