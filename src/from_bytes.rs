/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;
use std::cmp;

use encoding_rs::{DecoderResult, Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::ast::Stylesheet;
use crate::rules_and_declarations::parse_stylesheet;

/// Determine the character encoding of a CSS stylesheet and decode it.
///
/// This is based on the presence of a BOM (Byte Order Mark), an `@charset` rule, and
/// encoding meta-information.
///
/// * `css_bytes`: A byte string.
/// * `protocol_encoding_label`: The encoding label, if any, defined by HTTP or equivalent protocol.
///     (e.g. via the `charset` parameter of the `Content-Type` header.)
/// * `environment_encoding`: An optional `Encoding` object for the [environment encoding]
///     (https://drafts.csswg.org/css-syntax/#environment-encoding), if any.
///
/// Returns a 2-tuple of a decoded Unicode string and the `Encoding` object that was used.
///
/// Malformed byte sequences are dropped, and a single warning is logged.
pub fn decode_stylesheet_bytes(
    css: &[u8],
    protocol_encoding_label: Option<&str>,
    environment_encoding: Option<&'static Encoding>,
) -> (String, &'static Encoding) {
    // https://drafts.csswg.org/css-syntax/#input-byte-stream
    if let Some((encoding, bom_length)) = Encoding::for_bom(css) {
        return (decode_dropping_malformed(&css[bom_length..], encoding), encoding);
    }
    if let Some(encoding) = protocol_encoding_label.and_then(|label| Encoding::for_label(label.as_bytes())) {
        return (decode_dropping_malformed(css, encoding), encoding);
    }
    if let Some(encoding) = charset_rule_encoding(css) {
        let encoding = if encoding == UTF_16BE || encoding == UTF_16LE {
            UTF_8
        } else {
            encoding
        };
        return (decode_dropping_malformed(css, encoding), encoding);
    }
    let encoding = environment_encoding.unwrap_or(UTF_8);
    (decode_dropping_malformed(css, encoding), encoding)
}

/// The encoding named by a leading `@charset "…";`, if any.
fn charset_rule_encoding(css: &[u8]) -> Option<&'static Encoding> {
    const PREFIX: &[u8] = b"@charset \"";
    if !css.starts_with(PREFIX) {
        return None;
    }
    // 1024 is arbitrary: no encoding label is that long.
    let rest = &css[PREFIX.len()..cmp::min(css.len(), 1024)];
    let label_length = rest.iter().position(|&b| b == b'"')?;
    if !rest[label_length..].starts_with(b"\";") {
        return None;
    }
    Encoding::for_label(&rest[..label_length])
}

fn decode_dropping_malformed(input: &[u8], encoding: &'static Encoding) -> String {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(input.len())
        .unwrap_or(input.len());
    let mut output = String::with_capacity(capacity);
    let mut remaining = input;
    let mut dropped_bytes = false;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(remaining, &mut output, true);
        remaining = &remaining[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => {
                let additional = decoder
                    .max_utf8_buffer_length_without_replacement(remaining.len())
                    .unwrap_or(remaining.len());
                output.reserve(cmp::max(additional, 16));
            }
            DecoderResult::Malformed(..) => dropped_bytes = true,
        }
    }
    if dropped_bytes {
        log::warn!(
            "dropped malformed byte sequences while decoding stylesheet as {}",
            encoding.name()
        );
    }
    output
}

/// Normalize newlines and NUL code points.
///
/// CR LF, lone CR and FF become LF; NUL becomes U+FFFD REPLACEMENT CHARACTER.
/// Borrows the input when nothing needs replacing.
pub fn preprocess(input: &str) -> Cow<'_, str> {
    if !input.contains(|c: char| matches!(c, '\r' | '\x0C' | '\0')) {
        return Cow::Borrowed(input);
    }
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                output.push('\n')
            }
            '\x0C' => output.push('\n'),
            '\0' => output.push('\u{FFFD}'),
            c => output.push(c),
        }
    }
    Cow::Owned(output)
}

/// Decode `css` (see `decode_stylesheet_bytes`) and preprocess the result.
pub fn normalize(css: &[u8], protocol_encoding_label: Option<&str>) -> String {
    let (decoded, _) = decode_stylesheet_bytes(css, protocol_encoding_label, None);
    preprocess(&decoded).into_owned()
}

/// Parse stylesheet from bytes.
///
/// Arguments are as for `decode_stylesheet_bytes`.
/// Returns the stylesheet and the `Encoding` object that was used.
pub fn parse_stylesheet_from_bytes(
    css: &[u8],
    protocol_encoding_label: Option<&str>,
    environment_encoding: Option<&'static Encoding>,
) -> (Stylesheet, &'static Encoding) {
    let (css_unicode, encoding) = decode_stylesheet_bytes(css, protocol_encoding_label, environment_encoding);
    (parse_stylesheet(&css_unicode), encoding)
}
