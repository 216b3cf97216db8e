/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::vec;

use crate::errors::{NoopReporter, ParseError, ParseErrorKind, ParseErrorReporter, SyntaxError, SyntaxErrorKind};
use crate::tokenizer::{SourceLocation, Token, Tokenizer};

/// A finished token sequence, consumed left to right,
/// with room for exactly one reconsumed token.
pub struct TokenStream {
    tokens: vec::IntoIter<(Token, SourceLocation)>,
    pushed_back: Option<(Token, SourceLocation)>,
    /// Location of the last consumed token, or of the end of the input once it is reached.
    current_location: SourceLocation,
    eof_location: SourceLocation,
}

impl TokenStream {
    pub fn new(tokens: Vec<(Token, SourceLocation)>, eof_location: SourceLocation) -> TokenStream {
        TokenStream {
            tokens: tokens.into_iter(),
            pushed_back: None,
            current_location: SourceLocation { line: 1, column: 1 },
            eof_location,
        }
    }

    /// Consume the next token, or return `None` at the end of the input.
    #[inline]
    pub fn next(&mut self) -> Option<Token> {
        match self.pushed_back.take().or_else(|| self.tokens.next()) {
            Some((token, location)) => {
                self.current_location = location;
                Some(token)
            }
            None => {
                self.current_location = self.eof_location;
                None
            }
        }
    }

    /// Push the token returned by the last `next` back to the front of the stream.
    ///
    /// Only one token can be pending at a time.
    #[inline]
    pub fn reconsume(&mut self, token: Token) {
        debug_assert!(self.pushed_back.is_none(), "a token is already pending");
        self.pushed_back = Some((token, self.current_location));
    }

    /// Look at the next token without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        match self.pushed_back {
            Some((ref token, _)) => Some(token),
            None => self.tokens.as_slice().first().map(|(token, _)| token),
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(&Token::Whitespace) = self.peek() {
            self.next();
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.peek().is_none()
    }

    #[inline]
    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }
}

/// The component-value tree builder.
///
/// The input is fully tokenized on construction; the entry points in
/// `rules_and_declarations` then consume the resulting token stream.
pub struct Parser<R = NoopReporter> {
    pub(crate) tokens: TokenStream,
    reporter: R,
}

impl Parser<NoopReporter> {
    #[inline]
    pub fn new(input: &str) -> Parser<NoopReporter> {
        Parser::with_reporter(input, NoopReporter)
    }

    /// Build over an existing token sequence.
    ///
    /// Locations are synthesized: every token sits on line 1,
    /// and its column is its 1-based index in `tokens`.
    pub fn from_tokens(tokens: Vec<Token>) -> Parser<NoopReporter> {
        Parser::from_tokens_with_reporter(tokens, NoopReporter)
    }
}

impl<R: ParseErrorReporter> Parser<R> {
    /// Tokenize `input`, sending tokenizer and tree builder errors to `reporter`.
    pub fn with_reporter(input: &str, mut reporter: R) -> Parser<R> {
        let (tokens, eof_location) = {
            let mut tokenizer = Tokenizer::with_reporter(input, &mut reporter);
            let mut tokens = Vec::new();
            while let Some(located) = tokenizer.next_located_token() {
                tokens.push(located);
            }
            (tokens, tokenizer.current_source_location())
        };
        Parser {
            tokens: TokenStream::new(tokens, eof_location),
            reporter,
        }
    }

    pub fn from_tokens_with_reporter(tokens: Vec<Token>, reporter: R) -> Parser<R> {
        let eof_location = SourceLocation {
            line: 1,
            column: tokens.len() + 1,
        };
        let tokens = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| (token, SourceLocation { line: 1, column: index + 1 }))
            .collect();
        Parser {
            tokens: TokenStream::new(tokens, eof_location),
            reporter,
        }
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    pub(crate) fn report(&mut self, kind: ParseErrorKind) {
        let location = self.tokens.current_location();
        self.report_at(kind, location)
    }

    /// Report an error at the location of a token consumed earlier.
    pub(crate) fn report_at(&mut self, kind: ParseErrorKind, location: SourceLocation) {
        log::trace!("parse error at {}: {}", location, kind);
        self.reporter.report_error(ParseError { kind, location })
    }

    pub(crate) fn syntax_error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError {
            kind,
            location: self.tokens.current_location(),
        }
    }

    /// Succeed if only whitespace remains.
    pub(crate) fn expect_exhausted(&mut self) -> Result<(), SyntaxError> {
        self.tokens.skip_whitespace();
        match self.tokens.next() {
            None => Ok(()),
            Some(_) => Err(self.syntax_error(SyntaxErrorKind::ExtraInput)),
        }
    }
}
