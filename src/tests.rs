/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde_json::{json, Value};

use super::{
    decode_stylesheet_bytes, normalize, parse_comma_separated_component_values, parse_component_values_list,
    parse_declaration, parse_rule, parse_rules_list, parse_stylesheet, preprocess, tokenize, AtRule, BlockType, CodePointStream,
    ComponentValue, Declaration, DeclarationListItem, HashType, NumberType, NumericValue, ParseError,
    ParseErrorKind, Parser, QualifiedRule, Rule, SourceLocation, SyntaxError, SyntaxErrorKind, ToCss, Token,
    Tokenizer,
};

fn almost_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (&Value::Number(ref a), &Value::Number(ref b)) => {
            let a = a.as_f64().unwrap();
            let b = b.as_f64().unwrap();
            (a - b).abs() <= a.abs() * 1e-6
        }

        (&Value::Bool(a), &Value::Bool(b)) => a == b,
        (&Value::String(ref a), &Value::String(ref b)) => a == b,
        (&Value::Array(ref a), &Value::Array(ref b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(ref a, ref b)| almost_equals(*a, *b))
        }
        (&Value::Object(_), &Value::Object(_)) => panic!("Not implemented"),
        (&Value::Null, &Value::Null) => true,
        _ => false,
    }
}

fn assert_json_eq(results: Value, expected: Value, message: &str) {
    if !almost_equals(&results, &expected) {
        println!(
            "{}",
            difference::Changeset::new(
                &serde_json::to_string_pretty(&results).unwrap(),
                &serde_json::to_string_pretty(&expected).unwrap(),
                "\n",
            )
        );
        panic!("{}", message)
    }
}

fn run_raw_json_tests<F: Fn(Value, Value) -> ()>(json_data: &str, run: F) {
    let items = match serde_json::from_str(json_data) {
        Ok(Value::Array(items)) => items,
        other => panic!("Invalid JSON: {:?}", other),
    };
    assert!(items.len() % 2 == 0);
    let mut input = None;
    for item in items.into_iter() {
        match (&input, item) {
            (&None, json_obj) => input = Some(json_obj),
            (&Some(_), expected) => {
                let input = input.take().unwrap();
                run(input, expected)
            }
        };
    }
}

fn run_json_tests<F: Fn(&mut Parser) -> Value>(json_data: &str, parse: F) {
    run_raw_json_tests(json_data, |input, expected| match input {
        Value::String(input) => {
            let result = parse(&mut Parser::new(&input));
            assert_json_eq(result, expected, &input);
        }
        _ => panic!("Unexpected JSON"),
    });
}

#[test]
fn component_value_list() {
    run_json_tests(include_str!("css-parsing-tests/component_value_list.json"), |input| {
        Value::Array(component_values_to_json(&input.parse_component_values_list()))
    });
}

#[test]
fn one_component_value() {
    run_json_tests(include_str!("css-parsing-tests/one_component_value.json"), |input| {
        match input.parse_component_value() {
            Ok(value) => component_value_to_json(&value),
            Err(error) => syntax_error_to_json(error),
        }
    });
}

#[test]
fn declaration_list() {
    run_json_tests(include_str!("css-parsing-tests/declaration_list.json"), |input| {
        Value::Array(
            input
                .parse_declarations_list()
                .iter()
                .map(|item| match *item {
                    DeclarationListItem::Declaration(ref declaration) => declaration_to_json(declaration),
                    DeclarationListItem::AtRule(ref rule) => at_rule_to_json(rule),
                })
                .collect(),
        )
    });
}

#[test]
fn one_declaration() {
    run_json_tests(include_str!("css-parsing-tests/one_declaration.json"), |input| {
        match input.parse_declaration() {
            Ok(declaration) => declaration_to_json(&declaration),
            Err(error) => syntax_error_to_json(error),
        }
    });
}

#[test]
fn rule_list() {
    run_json_tests(include_str!("css-parsing-tests/rule_list.json"), |input| {
        Value::Array(input.parse_rules_list().iter().map(rule_to_json).collect())
    });
}

#[test]
fn stylesheet() {
    run_json_tests(include_str!("css-parsing-tests/stylesheet.json"), |input| {
        Value::Array(input.parse_stylesheet().rules.iter().map(rule_to_json).collect())
    });
}

#[test]
fn one_rule() {
    run_json_tests(include_str!("css-parsing-tests/one_rule.json"), |input| {
        match input.parse_rule() {
            Ok(rule) => rule_to_json(&rule),
            Err(error) => syntax_error_to_json(error),
        }
    });
}

#[test]
fn serializer_round_trips() {
    run_raw_json_tests(include_str!("css-parsing-tests/component_value_list.json"), |input, _| {
        let input = match input {
            Value::String(input) => input,
            _ => panic!("Unexpected JSON"),
        };
        let values = parse_component_values_list(&input);
        let serialized = values.to_css_string();
        let reparsed = parse_component_values_list(&serialized);
        // Adjacent whitespace tokens (split by a comment) merge when reparsed.
        assert_json_eq(
            collapse_whitespace(Value::Array(component_values_to_json(&reparsed))),
            collapse_whitespace(Value::Array(component_values_to_json(&values))),
            &format!("{:?} serialized as {:?}", input, serialized),
        );
    });

    fn collapse_whitespace(json: Value) -> Value {
        match json {
            Value::Array(list) => {
                let mut collapsed: Vec<Value> = Vec::with_capacity(list.len());
                for item in list {
                    if item == " " && collapsed.last().map_or(false, |last| *last == " ") {
                        continue;
                    }
                    collapsed.push(collapse_whitespace(item));
                }
                Value::Array(collapsed)
            }
            other => other,
        }
    }
}

#[test]
fn whitespace_runs_collapse() {
    for whitespace in &[" ", "\t", "\n", "\r", "\x0C", "\r\n"] {
        for length in 1..5 {
            let input = whitespace.repeat(length);
            let tokens = tokenize(&input);
            assert_eq!(tokens, vec![Token::Whitespace], "{:?}", input);
            assert_eq!(tokens[0].to_css_string(), " ");
        }
    }
    assert_eq!(tokenize(" \t\r\n\x0C "), vec![Token::Whitespace]);
}

#[test]
fn scientific_notation_is_a_number() {
    let tokens = tokenize("12345e9");
    assert_eq!(
        tokens,
        vec![Token::Number(NumericValue {
            representation: "12345e9".to_owned(),
            value: 1.2345e13,
            int_value: None,
        })]
    );
    match tokens[0] {
        Token::Number(ref value) => assert_eq!(value.number_type(), NumberType::Number),
        _ => unreachable!(),
    }
}

#[test]
fn percentage_and_dimension() {
    assert_eq!(
        tokenize("12345%"),
        vec![Token::Percentage(NumericValue {
            representation: "12345".to_owned(),
            value: 12345.,
            int_value: Some(12345),
        })]
    );
    assert_eq!(
        tokenize("12345meters"),
        vec![Token::Dimension(NumericValue::integer(12345), "meters".to_owned())]
    );
}

#[test]
fn integer_value_saturates() {
    match tokenize("99999999999999999999")[0] {
        Token::Number(ref value) => {
            assert_eq!(value.int_value, Some(i64::max_value()));
            assert_eq!(value.number_type(), NumberType::Integer);
        }
        ref other => panic!("{:?}", other),
    }
    match tokenize("-99999999999999999999")[0] {
        Token::Number(ref value) => assert_eq!(value.int_value, Some(i64::min_value())),
        ref other => panic!("{:?}", other),
    }
}

#[test]
fn comments_produce_no_tokens() {
    assert_eq!(tokenize("/* anything */"), Vec::<Token>::new());
    assert_eq!(tokenize("/* a * b / c */"), Vec::<Token>::new());
    assert_eq!(tokenize("/**/a/* x */"), vec![Token::Ident("a".to_owned())]);
    assert_eq!(tokenize("a/* unterminated"), vec![Token::Ident("a".to_owned())]);
}

#[test]
fn escapes_decode_to_one_code_point() {
    assert_eq!(tokenize("\\x\\y\\!"), vec![Token::Ident("xy!".to_owned())]);
    // Hex digits start a hex escape, which ends at the first non-hex code point.
    assert_eq!(tokenize("\\a\\3\\9\\!"), vec![Token::Ident("\n\u{3}\t!".to_owned())]);
    assert_eq!(tokenize("\\26 B"), vec![Token::Ident("&B".to_owned())]);
    assert_eq!(tokenize("\\0"), vec![Token::Ident("\u{FFFD}".to_owned())]);
    assert_eq!(tokenize("\\DFFF"), vec![Token::Ident("\u{FFFD}".to_owned())]);
    assert_eq!(tokenize("\\110000"), vec![Token::Ident("\u{FFFD}".to_owned())]);
    assert_eq!(tokenize("'\\"), vec![Token::QuotedString("".to_owned())]);
    assert_eq!(tokenize("a\\"), vec![Token::Ident("a\u{FFFD}".to_owned())]);
}

#[test]
fn name_stops_before_escaped_newline() {
    let mut errors: Vec<ParseError> = Vec::new();
    let tokens: Vec<Token> = Tokenizer::with_reporter("ab\\\ncd", &mut errors).collect();
    assert_eq!(
        tokens,
        vec![
            Token::Ident("ab".to_owned()),
            Token::Delim('\\'),
            Token::Whitespace,
            Token::Ident("cd".to_owned()),
        ]
    );
    assert_eq!(
        errors,
        vec![ParseError {
            kind: ParseErrorKind::InvalidEscape,
            location: SourceLocation { line: 1, column: 4 },
        }]
    );
}

#[test]
fn bad_string_leaves_the_newline() {
    assert_eq!(
        tokenize("'a\nb'"),
        vec![
            Token::BadString,
            Token::Whitespace,
            Token::Ident("b".to_owned()),
            Token::QuotedString("".to_owned()),
        ]
    );
}

#[test]
fn selector_and_declarations_token_sequence() {
    let ident = |s: &str| Token::Ident(s.to_owned());
    let px = |value| Token::Dimension(NumericValue::integer(value), "px".to_owned());
    let tokens = tokenize("#gbar,#guser { font-size : 13px; padding-top : 1px !important; }");
    assert_eq!(
        tokens,
        vec![
            Token::Hash("gbar".to_owned(), HashType::Id),
            Token::Literal(','),
            Token::Hash("guser".to_owned(), HashType::Id),
            Token::Whitespace,
            Token::Literal('{'),
            Token::Whitespace,
            ident("font-size"),
            Token::Whitespace,
            Token::Literal(':'),
            Token::Whitespace,
            px(13),
            Token::Literal(';'),
            Token::Whitespace,
            ident("padding-top"),
            Token::Whitespace,
            Token::Literal(':'),
            Token::Whitespace,
            px(1),
            Token::Whitespace,
            Token::Delim('!'),
            ident("important"),
            Token::Literal(';'),
            Token::Whitespace,
            Token::Literal('}'),
        ]
    );
}

#[test]
fn important_flag_is_extracted() {
    let declaration = parse_declaration("padding-top : 1px !important").unwrap();
    assert_eq!(
        declaration,
        Declaration {
            name: "padding-top".to_owned(),
            value: vec![
                ComponentValue::Preserved(Token::Whitespace),
                ComponentValue::Preserved(Token::Dimension(NumericValue::integer(1), "px".to_owned())),
                ComponentValue::Preserved(Token::Whitespace),
            ],
            important: true,
        }
    );
    assert_eq!(declaration.to_css_string(), "padding-top: 1px !important");
}

#[test]
fn stylesheet_structure() {
    let stylesheet = parse_stylesheet("@media print { a { color: red } } b { }");
    assert_eq!(stylesheet.rules.len(), 2);
    match stylesheet.rules[0] {
        Rule::AtRule(AtRule {
            ref name,
            block: Some(ref block),
            ..
        }) => {
            assert_eq!(name, "media");
            assert_eq!(block.block_type, BlockType::CurlyBracket);
            // The block of an at-rule holds raw component values; they can be reparsed as rules.
            let nested = parse_rules_list(&block.contents.to_css_string());
            assert_eq!(nested.len(), 1);
            assert_eq!(nested.to_css_string(), "a { color: red }");
        }
        ref other => panic!("{:?}", other),
    }
    match stylesheet.rules[1] {
        Rule::QualifiedRule(QualifiedRule { ref prelude, ref block }) => {
            assert_eq!(prelude.to_css_string(), "b ");
            assert_eq!(block.contents, vec![ComponentValue::Preserved(Token::Whitespace)]);
        }
        ref other => panic!("{:?}", other),
    }
}

#[test]
fn parse_rules_list_from_tokens() {
    let rules = Parser::from_tokens(vec![
        Token::Ident("a".to_owned()),
        Token::Literal('{'),
        Token::Literal('}'),
        Token::AtKeyword("b".to_owned()),
    ])
    .parse_rules_list();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.to_css_string(), "a{}@b;");
}

#[test]
fn comma_separated_component_values() {
    let lists = parse_comma_separated_component_values("a, f(b, c), d");
    assert_eq!(lists.len(), 3);
    assert_eq!(lists[1].to_css_string(), " f(b, c)");
    assert_eq!(
        parse_comma_separated_component_values(""),
        vec![Vec::<ComponentValue>::new()]
    );
}

#[test]
fn parse_errors_are_reported_with_locations() {
    let mut parser = Parser::with_reporter("a { 'b\n }", Vec::<ParseError>::new());
    let stylesheet = parser.parse_stylesheet();
    assert_eq!(stylesheet.rules.len(), 1);
    assert_eq!(
        parser.into_reporter(),
        vec![ParseError {
            kind: ParseErrorKind::NewlineInString,
            location: SourceLocation { line: 1, column: 7 },
        }]
    );

    let mut parser = Parser::with_reporter("a { b", Vec::<ParseError>::new());
    parser.parse_stylesheet();
    assert_eq!(
        parser.into_reporter(),
        vec![ParseError {
            kind: ParseErrorKind::EofInBlock,
            location: SourceLocation { line: 1, column: 6 },
        }]
    );

    // Invalid declarations are reported where they start, not where they end.
    let mut parser = Parser::with_reporter("x: y; 1; z", Vec::<ParseError>::new());
    assert_eq!(parser.parse_declarations_list().len(), 1);
    assert_eq!(
        parser.into_reporter(),
        vec![
            ParseError {
                kind: ParseErrorKind::InvalidDeclaration,
                location: SourceLocation { line: 1, column: 7 },
            },
            ParseError {
                kind: ParseErrorKind::InvalidDeclaration,
                location: SourceLocation { line: 1, column: 10 },
            },
        ]
    );

    let mut parser = Parser::with_reporter("a: b;\nfoo bar baz;", Vec::<ParseError>::new());
    assert_eq!(parser.parse_declarations_list().len(), 1);
    assert_eq!(
        parser.into_reporter(),
        vec![ParseError {
            kind: ParseErrorKind::InvalidDeclaration,
            location: SourceLocation { line: 2, column: 1 },
        }]
    );
}

#[test]
fn bad_url_recovery() {
    fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<ParseError>) {
        let mut errors = Vec::new();
        let tokens = Tokenizer::with_reporter(input, &mut errors).collect();
        (tokens, errors)
    }
    let error = |kind, column| ParseError {
        kind,
        location: SourceLocation { line: 1, column },
    };
    let bad_url_then_c = vec![Token::BadUrl, Token::Whitespace, Token::Ident("c".to_owned())];

    // The remnants scan skips the escaped `)` and stops at the next one.
    assert_eq!(
        tokenize_with_errors("url(a\"\\)b) c"),
        (bad_url_then_c.clone(), vec![error(ParseErrorKind::BadUrl, 7)])
    );
    assert_eq!(
        tokenize_with_errors("url(a\u{1}b) c"),
        (bad_url_then_c.clone(), vec![error(ParseErrorKind::BadUrl, 7)])
    );
    assert_eq!(
        tokenize_with_errors("url(a(b) c"),
        (bad_url_then_c.clone(), vec![error(ParseErrorKind::BadUrl, 7)])
    );
    assert_eq!(
        tokenize_with_errors("url( a b) c"),
        (bad_url_then_c, vec![error(ParseErrorKind::BadUrl, 8)])
    );

    assert_eq!(
        tokenize_with_errors("url(a"),
        (vec![Token::Url("a".to_owned())], vec![error(ParseErrorKind::EofInUrl, 6)])
    );
    assert_eq!(
        tokenize_with_errors("url(a\\"),
        (
            vec![Token::Url("a\u{FFFD}".to_owned())],
            vec![error(ParseErrorKind::EofInEscape, 7), error(ParseErrorKind::EofInUrl, 7)]
        )
    );
}

#[test]
fn serialization_keeps_cdo_and_cdc_apart() {
    let round_trips = |values: Vec<ComponentValue>, expected: &str| {
        let serialized = values.to_css_string();
        assert_eq!(serialized, expected);
        assert_eq!(parse_component_values_list(&serialized), values, "{:?}", serialized);
    };

    round_trips(parse_component_values_list("<!\\-\\-"), "</**/!--");
    round_trips(parse_component_values_list("\\-\\->"), "--/**/>");

    for (token, expected) in vec![
        (Token::Delim('-'), "-/**/-->"),
        (Token::Delim('#'), "#/**/-->"),
        (Token::Delim('@'), "@/**/-->"),
        (Token::Number(NumericValue::integer(1)), "1/**/-->"),
    ] {
        let values = Parser::from_tokens(vec![token, Token::CDC]).parse_component_values_list();
        round_trips(values, expected);
    }
}

#[test]
fn syntax_errors() {
    assert_eq!(
        parse_declaration("  "),
        Err(SyntaxError {
            kind: SyntaxErrorKind::UnexpectedEof,
            location: SourceLocation { line: 1, column: 3 },
        })
    );
    let error = parse_rule("a {}\nb {}").unwrap_err();
    assert_eq!(error.kind, SyntaxErrorKind::ExtraInput);
    assert_eq!(error.location, SourceLocation { line: 2, column: 1 });
    assert_eq!(error.to_string(), "2:1: unexpected input after the parsed construct");
}

#[test]
fn token_locations() {
    let tokens = Tokenizer::new("a\r\n  /* x */b").tokenize_with_locations();
    assert_eq!(
        tokens,
        vec![
            (Token::Ident("a".to_owned()), SourceLocation { line: 1, column: 1 }),
            (Token::Whitespace, SourceLocation { line: 1, column: 2 }),
            (Token::Ident("b".to_owned()), SourceLocation { line: 2, column: 10 }),
        ]
    );
}

#[test]
fn code_point_stream() {
    let mut stream = CodePointStream::new("a\r\nb");
    assert_eq!(stream.peek(0), Some('a'));
    assert_eq!(stream.peek(1), Some('\n'));
    assert_eq!(stream.consume(), Some('a'));
    stream.reconsume();
    assert_eq!(stream.consume(), Some('a'));
    assert_eq!(stream.consume(), Some('\n'));
    assert_eq!(stream.current_source_location(), SourceLocation { line: 2, column: 1 });
    assert_eq!(stream.consume(), Some('b'));
    assert!(stream.is_eof());
    assert_eq!(stream.consume(), None);
    assert_eq!(stream.position(), 3);
}

#[test]
fn preprocessing() {
    assert_eq!(preprocess("a\r\nb\rc\x0Cd\0"), "a\nb\nc\nd\u{FFFD}");
    assert_eq!(preprocess("\r\r\n"), "\n\n");
    assert!(matches!(preprocess("plain"), Cow::Borrowed("plain")));
    assert_eq!(normalize(b"a\r\n\xFFb", None), "a\nb");
}

#[test]
fn stylesheet_bytes_decoding() {
    assert_eq!(decode_stylesheet_bytes(b"\xEF\xBB\xBFa", Some("latin1"), None), ("a".to_owned(), UTF_8));
    assert_eq!(
        decode_stylesheet_bytes(b"\xE9", Some("iso-8859-1"), None),
        ("\u{E9}".to_owned(), WINDOWS_1252)
    );
    assert_eq!(
        decode_stylesheet_bytes(b"@charset \"latin1\";\xE9", None, None),
        ("@charset \"latin1\";\u{E9}".to_owned(), WINDOWS_1252)
    );
    assert_eq!(
        decode_stylesheet_bytes(b"@charset \"utf-16le\";a", None, None),
        ("@charset \"utf-16le\";a".to_owned(), UTF_8)
    );
    assert_eq!(decode_stylesheet_bytes(b"\xE9", None, Some(WINDOWS_1252)).1, WINDOWS_1252);
    assert_eq!(decode_stylesheet_bytes(b"a\xFFb", None, None), ("ab".to_owned(), UTF_8));
}

#[test]
fn stylesheet_from_bytes() {
    let (stylesheet, encoding) = super::parse_stylesheet_from_bytes(b"a{b:\xE9}", Some("latin1"), None);
    assert_eq!(encoding, WINDOWS_1252);
    assert_eq!(stylesheet.to_css_string(), "a{b:\u{E9}}");
}

#[test]
fn synthesized_numeric_values() {
    let integer = NumericValue::integer(-42);
    assert_eq!(integer.representation, "-42");
    assert_eq!(integer.number_type(), NumberType::Integer);

    let number = NumericValue::number(1.5);
    assert_eq!(number.representation, "1.5");
    assert_eq!(number.number_type(), NumberType::Number);

    // A whole float still re-tokenizes as a number, not an integer.
    match tokenize(&NumericValue::number(2.).representation)[..] {
        [Token::Number(ref value)] => {
            assert_eq!(value.value, 2.);
            assert_eq!(value.number_type(), NumberType::Number);
        }
        ref other => panic!("{:?}", other),
    }
}

#[test]
fn serialization_separators() {
    let values = Parser::from_tokens(vec![
        Token::Ident("a".to_owned()),
        Token::Ident("b".to_owned()),
        Token::Delim('/'),
        Token::Delim('*'),
        Token::Number(NumericValue::integer(1)),
        Token::Dimension(NumericValue::integer(2), "e3".to_owned()),
    ])
    .parse_component_values_list();
    let serialized = values.to_css_string();
    assert_eq!(serialized, "a/**/b//**/*1/**/2\\65 3");
    assert_eq!(parse_component_values_list(&serialized), values);
}

#[test]
fn token_helpers() {
    assert!(Token::BadUrl.is_parse_error());
    assert!(Token::BadString.is_parse_error());
    assert!(!Token::Delim('!').is_parse_error());
    assert!(Token::Whitespace.is_whitespace());
    assert_eq!(BlockType::opening('['), Some(BlockType::SquareBracket));
    assert_eq!(BlockType::opening(')'), None);
    assert_eq!(BlockType::Parenthesis.closing(), ')');
}

#[test]
fn match_ignore_ascii_case() {
    let check = |name: &str| {
        match_ignore_ascii_case! { name,
            "important" => 1,
            "url" => 2,
            _ => 0,
        }
    };
    assert_eq!(check("IMPORTANT"), 1);
    assert_eq!(check("Url"), 2);
    assert_eq!(check("urls"), 0);
}

fn syntax_error_to_json(error: SyntaxError) -> Value {
    let kind = match error.kind {
        SyntaxErrorKind::UnexpectedEof => "empty",
        SyntaxErrorKind::ExtraInput => "extra-input",
        SyntaxErrorKind::InvalidRule | SyntaxErrorKind::InvalidDeclaration => "invalid",
    };
    json!(["error", kind])
}

fn rule_to_json(rule: &Rule) -> Value {
    match *rule {
        Rule::QualifiedRule(ref rule) => json!([
            "qualified rule",
            component_values_to_json(&rule.prelude),
            component_values_to_json(&rule.block.contents),
        ]),
        Rule::AtRule(ref rule) => at_rule_to_json(rule),
    }
}

fn at_rule_to_json(rule: &AtRule) -> Value {
    json!([
        "at-rule",
        rule.name,
        component_values_to_json(&rule.prelude),
        rule.block.as_ref().map(|block| component_values_to_json(&block.contents)),
    ])
}

fn declaration_to_json(declaration: &Declaration) -> Value {
    json!([
        "declaration",
        declaration.name,
        component_values_to_json(&declaration.value),
        declaration.important,
    ])
}

fn component_values_to_json(values: &[ComponentValue]) -> Vec<Value> {
    values.iter().map(component_value_to_json).collect()
}

fn component_value_to_json(value: &ComponentValue) -> Value {
    fn nested(name: &str, contents: &[ComponentValue]) -> Value {
        let mut list = vec![Value::String(name.to_owned())];
        list.extend(component_values_to_json(contents));
        Value::Array(list)
    }

    match *value {
        ComponentValue::Preserved(ref token) => token_to_json(token),
        ComponentValue::Function(ref function) => {
            let mut list = vec![json!("function"), json!(function.name)];
            list.extend(component_values_to_json(&function.contents));
            Value::Array(list)
        }
        ComponentValue::SimpleBlock(ref block) => {
            let name = match block.block_type {
                BlockType::CurlyBracket => "{}",
                BlockType::SquareBracket => "[]",
                BlockType::Parenthesis => "()",
            };
            nested(name, &block.contents)
        }
    }
}

fn token_to_json(token: &Token) -> Value {
    fn numeric(value: &NumericValue) -> Vec<Value> {
        vec![
            value.representation.clone().into(),
            Value::Number(serde_json::Number::from_f64(value.value).unwrap()),
            match value.number_type() {
                NumberType::Integer => "integer",
                NumberType::Number => "number",
            }
            .into(),
        ]
    }

    match *token {
        Token::Whitespace => json!(" "),
        Token::Ident(ref value) => json!(["ident", value]),
        Token::Function(ref name) => json!(["function", name]),
        Token::AtKeyword(ref value) => json!(["at-keyword", value]),
        Token::Hash(ref value, HashType::Id) => json!(["hash", value, "id"]),
        Token::Hash(ref value, HashType::Unrestricted) => json!(["hash", value, "unrestricted"]),
        Token::QuotedString(ref value) => json!(["string", value]),
        Token::BadString => json!(["error", "bad-string"]),
        Token::Url(ref value) => json!(["url", value]),
        Token::BadUrl => json!(["error", "bad-url"]),
        Token::Number(ref value) => {
            let mut list = vec![json!("number")];
            list.extend(numeric(value));
            Value::Array(list)
        }
        Token::Percentage(ref value) => {
            let mut list = vec![json!("percentage")];
            list.extend(numeric(value));
            Value::Array(list)
        }
        Token::Dimension(ref value, ref unit) => {
            let mut list = vec![json!("dimension")];
            list.extend(numeric(value));
            list.push(json!(unit));
            Value::Array(list)
        }
        Token::Delim(c) | Token::Literal(c) => Value::String(c.to_string()),
        Token::IncludeMatch => json!("~="),
        Token::DashMatch => json!("|="),
        Token::PrefixMatch => json!("^="),
        Token::SuffixMatch => json!("$="),
        Token::SubstringMatch => json!("*="),
        Token::Column => json!("||"),
        Token::CDO => json!("<!--"),
        Token::CDC => json!("-->"),
    }
}

