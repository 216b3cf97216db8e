/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// https://drafts.csswg.org/css-syntax/#parsing

use smallvec::SmallVec;

use crate::ast::{
    AtRule, BlockType, ComponentValue, Declaration, DeclarationListItem, Function, QualifiedRule, Rule,
    SimpleBlock, Stylesheet,
};
use crate::errors::{ParseErrorKind, ParseErrorReporter, SyntaxError, SyntaxErrorKind};
use crate::parser::Parser;
use crate::tokenizer::Token;

impl<R: ParseErrorReporter> Parser<R> {
    /// Parse a whole stylesheet.
    ///
    /// `<!--` and `-->` between top-level rules are discarded.
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        log::trace!("parse_stylesheet");
        Stylesheet {
            rules: self.consume_rules_list(true),
        }
    }

    /// Parse a list of rules, such as the contents of an `@media` block.
    ///
    /// Unlike `parse_stylesheet`, `<!--` and `-->` start a qualified rule.
    pub fn parse_rules_list(&mut self) -> Vec<Rule> {
        log::trace!("parse_rules_list");
        self.consume_rules_list(false)
    }

    /// Parse exactly one rule, with optional surrounding whitespace.
    pub fn parse_rule(&mut self) -> Result<Rule, SyntaxError> {
        log::trace!("parse_rule");
        self.tokens.skip_whitespace();
        let rule = match self.tokens.next() {
            None => return Err(self.syntax_error(SyntaxErrorKind::UnexpectedEof)),
            Some(Token::AtKeyword(name)) => Rule::AtRule(self.consume_at_rule(name)),
            Some(token) => {
                let error = self.syntax_error(SyntaxErrorKind::InvalidRule);
                self.tokens.reconsume(token);
                match self.consume_qualified_rule() {
                    Some(rule) => Rule::QualifiedRule(rule),
                    None => return Err(error),
                }
            }
        };
        self.expect_exhausted()?;
        Ok(rule)
    }

    /// Parse a mix of declarations and at-rules separated by `;`,
    /// such as the contents of a `style` attribute.
    ///
    /// Invalid declarations are reported and dropped.
    pub fn parse_declarations_list(&mut self) -> Vec<DeclarationListItem> {
        log::trace!("parse_declarations_list");
        let mut items = Vec::new();
        while let Some(token) = self.tokens.next() {
            let start = self.tokens.current_location();
            match token {
                Token::Whitespace | Token::Literal(';') => {}
                Token::AtKeyword(name) => items.push(DeclarationListItem::AtRule(self.consume_at_rule(name))),
                Token::Ident(name) => {
                    let values = self.consume_component_values_until_semicolon();
                    match declaration_from_values(name, values) {
                        Some(declaration) => items.push(DeclarationListItem::Declaration(declaration)),
                        None => self.report_at(ParseErrorKind::InvalidDeclaration, start),
                    }
                }
                token => {
                    self.report_at(ParseErrorKind::InvalidDeclaration, start);
                    self.tokens.reconsume(token);
                    self.consume_component_values_until_semicolon();
                }
            }
        }
        items
    }

    /// Parse exactly one declaration, with optional surrounding whitespace.
    pub fn parse_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        log::trace!("parse_declaration");
        self.tokens.skip_whitespace();
        let name = match self.tokens.next() {
            Some(Token::Ident(name)) => name,
            Some(_) => return Err(self.syntax_error(SyntaxErrorKind::InvalidDeclaration)),
            None => return Err(self.syntax_error(SyntaxErrorKind::UnexpectedEof)),
        };
        let error = self.syntax_error(SyntaxErrorKind::InvalidDeclaration);
        let values = self.consume_component_values_until_semicolon();
        let declaration = declaration_from_values(name, values).ok_or(error)?;
        self.expect_exhausted()?;
        Ok(declaration)
    }

    /// Parse exactly one component value, with optional surrounding whitespace.
    pub fn parse_component_value(&mut self) -> Result<ComponentValue, SyntaxError> {
        log::trace!("parse_component_value");
        self.tokens.skip_whitespace();
        let token = match self.tokens.next() {
            Some(token) => token,
            None => return Err(self.syntax_error(SyntaxErrorKind::UnexpectedEof)),
        };
        let value = self.consume_component_value(token);
        self.expect_exhausted()?;
        Ok(value)
    }

    /// Parse every remaining component value, whitespace included.
    pub fn parse_component_values_list(&mut self) -> Vec<ComponentValue> {
        log::trace!("parse_component_values_list");
        let mut values = Vec::new();
        while let Some(token) = self.tokens.next() {
            values.push(self.consume_component_value(token));
        }
        values
    }

    /// Parse every remaining component value, split on top-level commas.
    ///
    /// Always returns at least one (possibly empty) list.
    pub fn parse_comma_separated_component_values(&mut self) -> Vec<Vec<ComponentValue>> {
        log::trace!("parse_comma_separated_component_values");
        let mut lists = Vec::new();
        let mut current = Vec::new();
        while let Some(token) = self.tokens.next() {
            if token.is_literal(',') {
                lists.push(std::mem::take(&mut current));
            } else {
                current.push(self.consume_component_value(token));
            }
        }
        lists.push(current);
        lists
    }

    // https://drafts.csswg.org/css-syntax/#consume-list-of-rules
    fn consume_rules_list(&mut self, top_level: bool) -> Vec<Rule> {
        let mut rules = Vec::new();
        while let Some(token) = self.tokens.next() {
            match token {
                Token::Whitespace => {}
                Token::CDO | Token::CDC if top_level => {}
                Token::AtKeyword(name) => rules.push(Rule::AtRule(self.consume_at_rule(name))),
                token => {
                    self.tokens.reconsume(token);
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(Rule::QualifiedRule(rule))
                    }
                }
            }
        }
        rules
    }

    // https://drafts.csswg.org/css-syntax/#consume-at-rule
    //
    // The at-keyword token has already been consumed.
    fn consume_at_rule(&mut self, name: String) -> AtRule {
        log::trace!("consume_at_rule: @{}", name);
        let mut prelude = Vec::new();
        loop {
            match self.tokens.next() {
                None => {
                    self.report(ParseErrorKind::EofInAtRule);
                    return AtRule { name, prelude, block: None };
                }
                Some(Token::Literal(';')) => return AtRule { name, prelude, block: None },
                Some(Token::Literal('{')) => {
                    let block = self.consume_simple_block(BlockType::CurlyBracket);
                    return AtRule {
                        name,
                        prelude,
                        block: Some(block),
                    };
                }
                Some(token) => prelude.push(self.consume_component_value(token)),
            }
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-qualified-rule
    //
    // Returns `None` if the input ends before the block.
    fn consume_qualified_rule(&mut self) -> Option<QualifiedRule> {
        log::trace!("consume_qualified_rule");
        let mut prelude = Vec::new();
        loop {
            match self.tokens.next() {
                None => {
                    self.report(ParseErrorKind::MissingQualifiedRuleBlock);
                    return None;
                }
                Some(Token::Literal('{')) => {
                    let block = self.consume_simple_block(BlockType::CurlyBracket);
                    return Some(QualifiedRule { prelude, block });
                }
                Some(token) => prelude.push(self.consume_component_value(token)),
            }
        }
    }

    fn consume_component_values_until_semicolon(&mut self) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        while let Some(token) = self.tokens.next() {
            if token.is_literal(';') {
                break;
            }
            values.push(self.consume_component_value(token));
        }
        values
    }

    // https://drafts.csswg.org/css-syntax/#consume-component-value
    //
    // `token` is the current input token, already consumed.
    fn consume_component_value(&mut self, token: Token) -> ComponentValue {
        if let Token::Literal(c) = token {
            if let Some(block_type) = BlockType::opening(c) {
                return ComponentValue::SimpleBlock(self.consume_simple_block(block_type));
            }
        }
        match token {
            Token::Function(name) => ComponentValue::Function(self.consume_function(name)),
            token => ComponentValue::Preserved(token),
        }
    }

    // https://drafts.csswg.org/css-syntax/#consume-simple-block
    fn consume_simple_block(&mut self, block_type: BlockType) -> SimpleBlock {
        let closing = block_type.closing();
        let mut contents = Vec::new();
        loop {
            match self.tokens.next() {
                None => {
                    self.report(ParseErrorKind::EofInBlock);
                    break;
                }
                Some(Token::Literal(c)) if c == closing => break,
                Some(token) => contents.push(self.consume_component_value(token)),
            }
        }
        SimpleBlock { block_type, contents }
    }

    // https://drafts.csswg.org/css-syntax/#consume-function
    fn consume_function(&mut self, name: String) -> Function {
        let mut contents = Vec::new();
        loop {
            match self.tokens.next() {
                None => {
                    self.report(ParseErrorKind::EofInFunction);
                    break;
                }
                Some(Token::Literal(')')) => break,
                Some(token) => contents.push(self.consume_component_value(token)),
            }
        }
        Function { name, contents }
    }
}

// https://drafts.csswg.org/css-syntax/#consume-declaration
//
// `values` are the component values that followed the name, up to `;` or the end.
// Returns `None` if they do not start with an optional run of whitespace then `:`.
fn declaration_from_values(name: String, mut values: Vec<ComponentValue>) -> Option<Declaration> {
    let colon = values.iter().position(|value| !value.is_whitespace())?;
    if values[colon].as_token() != Some(&Token::Literal(':')) {
        return None;
    }
    let mut value = values.split_off(colon + 1);
    let important = strip_important(&mut value);
    Some(Declaration {
        name,
        value,
        important,
    })
}

/// If the last two non-whitespace values are `!` and `important`, remove both and return true.
fn strip_important(value: &mut Vec<ComponentValue>) -> bool {
    let last_two: SmallVec<[usize; 2]> = value
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, value)| !value.is_whitespace())
        .map(|(index, _)| index)
        .take(2)
        .collect();
    let (ident_index, bang_index) = match last_two[..] {
        [ident_index, bang_index] => (ident_index, bang_index),
        _ => return false,
    };
    let is_important = match (value[bang_index].as_token(), value[ident_index].as_token()) {
        (Some(&Token::Delim('!')), Some(&Token::Ident(ref name))) => match_ignore_ascii_case! { name,
            "important" => true,
            _ => false,
        },
        _ => false,
    };
    if is_important {
        value.remove(ident_index);
        value.remove(bang_index);
    }
    is_important
}

/// Parse a whole stylesheet, discarding parse errors.
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    Parser::new(input).parse_stylesheet()
}

/// Parse a list of rules, discarding parse errors.
pub fn parse_rules_list(input: &str) -> Vec<Rule> {
    Parser::new(input).parse_rules_list()
}

/// Parse exactly one rule, with optional surrounding whitespace.
pub fn parse_rule(input: &str) -> Result<Rule, SyntaxError> {
    Parser::new(input).parse_rule()
}

/// Parse a list of declarations and at-rules, discarding parse errors.
pub fn parse_declarations_list(input: &str) -> Vec<DeclarationListItem> {
    Parser::new(input).parse_declarations_list()
}

/// Parse exactly one declaration, with optional surrounding whitespace.
pub fn parse_declaration(input: &str) -> Result<Declaration, SyntaxError> {
    Parser::new(input).parse_declaration()
}

/// Parse exactly one component value, with optional surrounding whitespace.
pub fn parse_component_value(input: &str) -> Result<ComponentValue, SyntaxError> {
    Parser::new(input).parse_component_value()
}

/// Parse every component value, whitespace included, discarding parse errors.
pub fn parse_component_values_list(input: &str) -> Vec<ComponentValue> {
    Parser::new(input).parse_component_values_list()
}

/// Parse every component value, split on top-level commas, discarding parse errors.
pub fn parse_comma_separated_component_values(input: &str) -> Vec<Vec<ComponentValue>> {
    Parser::new(input).parse_comma_separated_component_values()
}
