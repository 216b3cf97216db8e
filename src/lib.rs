/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#![crate_name = "css_syntax"]
#![crate_type = "rlib"]

/*!

Implementation of the tokenizer and the component-value tree builder of
[CSS Syntax Module Level 3](https://drafts.csswg.org/css-syntax/) for Rust.

# Input

Everything is based on `&str` input, which is preprocessed (newline
normalization, NUL replacement) and then fully tokenized up front.
If you have bytes (from a file, the network, or something),
see the `decode_stylesheet_bytes` function.

# Output

* `tokenize` and `Tokenizer` produce a flat sequence of `Token`s.
* `Parser` assembles tokens into component values: preserved tokens,
  `{}`/`[]`/`()` simple blocks and functions, and from those into
  declarations, qualified rules, at-rules and stylesheets.

# Errors

Parse errors are recoverable and never abort. They are sent to a
`ParseErrorReporter` given at construction (`NoopReporter` by default,
`LogReporter` forwards to the `log` crate, a `Vec<ParseError>` collects them).

The single-construct entry points (`parse_rule`, `parse_declaration`,
`parse_component_value`) return `Err(SyntaxError)` when the input
is not exactly one such construct.

```rust
use css_syntax::{parse_declaration, ToCss};

let declaration = parse_declaration("color: red !important").unwrap();
assert_eq!(declaration.name, "color");
assert!(declaration.important);
assert_eq!(declaration.value.to_css_string(), " red ");
```

*/

#[macro_use]
mod macros;

pub use crate::ast::{
    AtRule, BlockType, ComponentValue, Declaration, DeclarationListItem, Function, QualifiedRule, Rule,
    SimpleBlock, Stylesheet,
};
pub use crate::errors::{
    LogReporter, NoopReporter, ParseError, ParseErrorKind, ParseErrorReporter, SyntaxError, SyntaxErrorKind,
};
pub use crate::from_bytes::{decode_stylesheet_bytes, normalize, parse_stylesheet_from_bytes, preprocess};
pub use crate::parser::{Parser, TokenStream};
pub use crate::rules_and_declarations::{
    parse_comma_separated_component_values, parse_component_value, parse_component_values_list,
    parse_declaration, parse_declarations_list, parse_rule, parse_rules_list, parse_stylesheet,
};
pub use crate::serializer::{
    serialize_identifier, serialize_name, serialize_string, serialize_unquoted_url, CssStringWriter, ToCss,
};
pub use crate::tokenizer::{
    tokenize, CodePointStream, HashType, NumberType, NumericValue, SourceLocation, Token, Tokenizer,
};

mod ast;
mod errors;
mod from_bytes;
mod parser;
mod rules_and_declarations;
mod serializer;
mod tokenizer;

#[cfg(test)]
mod tests;
