//! Template string parser using winnow.
//!
//! Parses the text of a template into literal and interpolation segments:
//! - `{{` and `}}` outside braces render single braces
//! - `{$$}`, `{@@}` and `{::}` render `$`, `@` and `:`
//! - `{@t1 @t2:ctx reference:sel1:$sel2}` interpolations
//! - `{Name}` is shorthand for `{@cap name}`
//!
//! The same grammar serves standalone templates (`parse_template`) and the
//! quoted templates of definition files, where `"` ends the template and
//! `\"` / `\\` write a literal quote or backslash.

use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_while};

use super::ast::{Argument, Reference, Segment, Selector, Template, Transform, TransformContext};
use super::error::ParseError;

/// Parse a standalone template string into an AST.
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    match template_text(&mut remaining, false) {
        Ok(template) if remaining.is_empty() => Ok(template),
        Ok(_) => Err(ParseError::at(
            input,
            remaining,
            None,
            format!(
                "unexpected character '{}'",
                remaining.chars().next().unwrap_or('?')
            ),
        )),
        Err(e) => Err(ParseError::at(input, remaining, None, format!("{e}"))),
    }
}

/// Parse template text up to (not including) the closing quote when `quoted`,
/// or to the first character that cannot start a segment otherwise.
pub(crate) fn template_text(input: &mut &str, quoted: bool) -> ModalResult<Template> {
    let segments: Vec<Segment> =
        repeat(0.., |i: &mut &str| segment(i, quoted)).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent literal segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other @ Segment::Interpolation { .. } => result.push(other),
        }
    }

    result
}

fn segment(input: &mut &str, quoted: bool) -> ModalResult<Segment> {
    alt((
        brace_escape,
        interpolation,
        |i: &mut &str| literal_char(i, quoted),
    ))
    .parse_next(input)
}

/// `{{` and `}}` outside an interpolation.
fn brace_escape(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "{{".value(Segment::Literal("{".to_string())),
        "}}".value(Segment::Literal("}".to_string())),
    ))
    .parse_next(input)
}

fn literal_char(input: &mut &str, quoted: bool) -> ModalResult<Segment> {
    let c = if quoted {
        alt((preceded('\\', one_of(['"', '\\'])), none_of(['{', '}', '"']))).parse_next(input)?
    } else {
        none_of(['{', '}']).parse_next(input)?
    };
    Ok(Segment::Literal(c.to_string()))
}

fn interpolation(input: &mut &str) -> ModalResult<Segment> {
    delimited('{', alt((escaped_symbol, expression)), '}').parse_next(input)
}

/// `{$$}`, `{@@}`, `{::}`: a literal character that is otherwise meaningful
/// inside braces.
fn escaped_symbol(input: &mut &str) -> ModalResult<Segment> {
    delimited(
        ws,
        alt(("$$".value("$"), "@@".value("@"), "::".value(":"))),
        ws,
    )
    .map(|s: &str| Segment::Literal(s.to_string()))
    .parse_next(input)
}

fn expression(input: &mut &str) -> ModalResult<Segment> {
    ws(input)?;
    let mut transforms: Vec<Transform> =
        repeat(0.., terminated(transform, ws)).parse_next(input)?;
    let (reference, auto_cap) = reference(input)?;
    let selectors: Vec<Selector> = repeat(0.., selector).parse_next(input)?;
    ws(input)?;

    if auto_cap {
        transforms.insert(
            0,
            Transform {
                name: "cap".to_string(),
                context: None,
            },
        );
    }

    Ok(Segment::Interpolation {
        transforms,
        reference,
        selectors,
    })
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// `@name`, `@name:ctx`, `@name:ctx.more`, `@name:$param`
fn transform(input: &mut &str) -> ModalResult<Transform> {
    preceded('@', (identifier, opt(preceded(':', transform_context))))
        .map(|(name, context)| Transform {
            name: name.to_string(),
            context,
        })
        .parse_next(input)
}

fn transform_context(input: &mut &str) -> ModalResult<TransformContext> {
    alt((
        preceded('$', identifier).map(|s: &str| TransformContext::Parameter(s.to_string())),
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            .map(|s: &str| TransformContext::Static(s.to_string())),
    ))
    .parse_next(input)
}

/// A parameter, term, or phrase call. The flag reports an uppercase first
/// letter on a bare name, which requests capitalization.
fn reference(input: &mut &str) -> ModalResult<(Reference, bool)> {
    if opt('$').parse_next(input)?.is_some() {
        let name = identifier(input)?;
        return Ok((Reference::Parameter(name.to_string()), false));
    }

    let first = one_of(is_ident_start).parse_next(input)?;
    let rest: &str = take_while(0.., is_ident_cont).parse_next(input)?;
    let auto_cap = first.is_ascii_uppercase();
    let mut name = String::with_capacity(1 + rest.len());
    name.push(first);
    name.push_str(rest);
    if auto_cap {
        name = decapitalize_segments(&name);
    }

    let reference = match opt(call_arguments).parse_next(input)? {
        Some(args) => Reference::PhraseCall { name, args },
        None => Reference::Identifier(name),
    };
    Ok((reference, auto_cap))
}

/// `Fire_Elemental` -> `fire_elemental`
fn decapitalize_segments(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_start = true;
    for c in name.chars() {
        if c == '_' {
            at_start = true;
            result.push(c);
        } else if at_start {
            result.push(c.to_ascii_lowercase());
            at_start = false;
        } else {
            result.push(c);
        }
    }
    result
}

fn call_arguments(input: &mut &str) -> ModalResult<Vec<Argument>> {
    delimited(
        ('(', ws),
        separated(0.., argument, (ws, ',', ws)),
        (ws, ')'),
    )
    .parse_next(input)
}

fn argument(input: &mut &str) -> ModalResult<Argument> {
    alt((
        preceded('$', identifier).map(|s: &str| Argument::Parameter(s.to_string())),
        (opt('-'), take_while(1.., |c: char| c.is_ascii_digit()))
            .take()
            .try_map(str::parse::<i64>)
            .map(Argument::Number),
        identifier.map(|s: &str| Argument::Identifier(s.to_string())),
    ))
    .parse_next(input)
}

/// `:name` or `:$param`
fn selector(input: &mut &str) -> ModalResult<Selector> {
    preceded(
        ':',
        alt((
            preceded('$', identifier).map(|s: &str| Selector::Parameter(s.to_string())),
            identifier.map(|s: &str| Selector::Literal(s.to_string())),
        )),
    )
    .parse_next(input)
}

pub(crate) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_ident_cont).parse_next(input)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
