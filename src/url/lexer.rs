//! Logos-based lexer for the parameter section of a rewritten URL.
//!
//! Splits `name=value` pairs on either separator form (`&` or `&amp;`).
//! Only the first `=` of a pair separates name from value; later ones
//! belong to the (opaque) value.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ParamToken {
    #[token("&amp;")]
    #[token("&")]
    Separator,

    #[token("=")]
    Equals,

    #[regex(r"[^&=]+")]
    Text,
}

/// A `name=value` pair borrowed from the URL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawParam<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Split `input` into parameters, or return the offending segment.
pub(crate) fn split_parameters(input: &str) -> Result<Vec<RawParam<'_>>, &str> {
    let mut params = Vec::new();
    let mut lexer = ParamToken::lexer(input);
    let mut start = 0;
    let mut equals = None;

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(ParamToken::Separator) => {
                params.push(segment(input, start, span.start, equals)?);
                start = span.end;
                equals = None;
            }
            Ok(ParamToken::Equals) => {
                equals.get_or_insert(span.start);
            }
            Ok(ParamToken::Text) => {}
            Err(()) => return Err(&input[span]),
        }
    }
    params.push(segment(input, start, input.len(), equals)?);

    Ok(params)
}

/// Strip one leading separator, in either form.
pub(crate) fn strip_leading_separator(input: &str) -> Option<&str> {
    input
        .strip_prefix(crate::base::constants::ENCODED_AMPERSAND)
        .or_else(|| input.strip_prefix(crate::base::constants::AMPERSAND))
}

fn segment(input: &str, start: usize, end: usize, equals: Option<usize>) -> Result<RawParam<'_>, &str> {
    match equals {
        Some(eq) if eq > start => Ok(RawParam {
            name: &input[start..eq],
            value: &input[eq + 1..end],
        }),
        _ => Err(&input[start..end]),
    }
}
