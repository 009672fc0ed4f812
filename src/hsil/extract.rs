//! Field extraction from a parenthesized HSIL block
//!
//! `(type P2_Defend)` inside a block yields `"P2_Defend"` for field `type`.
//! Values end at the first `)`, so a value can never itself contain a
//! parenthesis. Field values in the grammar are atoms or quoted scalars,
//! which keeps this sound; nested blocks are walked by [`super::reader`].
//!
//! The first `(field ` head in the text decides the result. If its value
//! is blank, the field counts as missing even when a later block names it.

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, multispace1},
    sequence::terminated,
    IResult, Parser,
};

/// Value of the first `(field value)` block in `text`
///
/// The returned value is trimmed. `None` if no block opens with `field`,
/// or if the first one has a blank value or no closing parenthesis.
pub fn extract<'a>(field: &str, text: &'a str) -> Option<&'a str> {
    let rest = text
        .match_indices('(')
        .find_map(|(at, _)| field_head(field, &text[at..]))?;

    let parsed: IResult<&'a str, &'a str> =
        terminated(take_till(|c: char| c == ')'), char(')')).parse(rest);
    let (_, value) = parsed.ok()?;
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Input after `(field` and its separating whitespace
fn field_head<'a>(field: &str, input: &'a str) -> Option<&'a str> {
    let parsed: IResult<&'a str, _> = (char('('), tag(field), multispace1).parse(input);
    parsed.ok().map(|(rest, _)| rest)
}
