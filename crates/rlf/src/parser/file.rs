//! Definition file parser.
//!
//! A file is a sequence of `name = body;` and `name($a, ...) = body;`
//! statements separated by whitespace and `//` line comments. Each
//! definition is parsed on its own so that an error can name the definition
//! it occurred in.

use winnow::combinator::{alt, cut_err, delimited, fail, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{
    Definition, DefinitionBody, DefinitionKind, MatchBlock, MatchBranch, MatchComponent, MatchKey,
    Template, VariantEntry,
};
use super::error::ParseError;
use super::template::{identifier, template_text};
use crate::types::{Tag, VariantKey};

/// Parse the definitions of one locale.
pub fn parse_file(input: &str) -> Result<Vec<Definition>, ParseError> {
    let mut remaining = input;
    let mut definitions = Vec::new();

    loop {
        skip_trivia(&mut remaining);
        if remaining.is_empty() {
            return Ok(definitions);
        }

        let offset = input.len() - remaining.len();
        let name = leading_name(remaining);
        match definition(&mut remaining) {
            Ok(mut parsed) => {
                parsed.offset = offset;
                definitions.push(parsed);
            }
            Err(e) => return Err(ParseError::at(input, remaining, name, describe(e))),
        }
    }
}

fn describe(error: ErrMode<ContextError>) -> String {
    let message = match error.into_inner() {
        Ok(inner) => inner.to_string(),
        Err(_) => String::new(),
    };
    if message.trim().is_empty() {
        "invalid syntax".to_string()
    } else {
        message.replace('\n', "; ")
    }
}

/// The identifier a statement starts with, used to label errors.
fn leading_name(input: &str) -> Option<String> {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(input.len());
    (end > 0).then(|| input[..end].to_string())
}

/// Skip whitespace and `//` comments.
fn skip_trivia(input: &mut &str) {
    loop {
        let trimmed = input.trim_start();
        match trimmed.strip_prefix("//") {
            Some(comment) => *input = comment.find('\n').map_or("", |end| &comment[end..]),
            None => {
                *input = trimmed;
                return;
            }
        }
    }
}

fn trivia(input: &mut &str) -> ModalResult<()> {
    skip_trivia(input);
    Ok(())
}

fn expected(what: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(what))
}

/// Fail without backtracking, reporting `what` as the expectation.
fn reject<T>(input: &mut &str, what: &'static str) -> ModalResult<T> {
    cut_err(fail).context(expected(what)).parse_next(input)
}

enum Modifier {
    Tag(Tag),
    From(String),
    Match(Vec<String>),
}

fn definition(input: &mut &str) -> ModalResult<Definition> {
    let name = cut_err(snake_case_identifier)
        .context(expected("a snake_case definition name"))
        .parse_next(input)?;
    trivia(input)?;

    let kind = if input.starts_with('(') {
        let parameters = cut_err(parameter_list)
            .context(expected("a parameter list of one or more `$name`s"))
            .parse_next(input)?;
        DefinitionKind::Phrase(parameters)
    } else {
        DefinitionKind::Term
    };
    trivia(input)?;

    cut_err('=').context(expected("`=`")).parse_next(input)?;
    trivia(input)?;

    let mut tags = Vec::new();
    let mut from_param = None;
    let mut match_parameters = None;
    while input.starts_with(':') {
        match cut_err(modifier)
            .context(expected("a tag, `:from($p)`, or `:match($p, ...)`"))
            .parse_next(input)?
        {
            Modifier::Tag(tag) => tags.push(tag),
            Modifier::From(parameter) => {
                if from_param.replace(parameter).is_some() {
                    return reject(input, "a single `:from` modifier");
                }
            }
            Modifier::Match(parameters) => {
                if match_parameters.replace(parameters).is_some() {
                    return reject(input, "a single `:match` modifier");
                }
            }
        }
        trivia(input)?;
    }

    let body = if let Some(parameters) = match_parameters {
        let branches = cut_err(match_block)
            .context(expected("a `{ key: \"template\", ... }` match block"))
            .parse_next(input)?;
        DefinitionBody::Match(MatchBlock {
            parameters,
            branches,
        })
    } else if input.starts_with('{') {
        DefinitionBody::Variants(cut_err(variant_block).parse_next(input)?)
    } else if input.starts_with('"') {
        DefinitionBody::Simple(template_string(input)?)
    } else {
        return reject(input, "a quoted template or a `{` variant table");
    };
    trivia(input)?;

    cut_err(';').context(expected("`;`")).parse_next(input)?;

    Ok(Definition {
        name,
        kind,
        tags,
        from_param,
        body,
        offset: 0,
    })
}

/// Lowercase start, ASCII alphanumerics and underscores.
fn snake_case_identifier(input: &mut &str) -> ModalResult<String> {
    identifier
        .verify(|s: &&str| s.starts_with(|c: char| c.is_ascii_lowercase()))
        .map(str::to_string)
        .parse_next(input)
}

/// `($a, $b)`, at least one parameter.
fn parameter_list(input: &mut &str) -> ModalResult<Vec<String>> {
    delimited(
        ('(', trivia),
        separated(1.., parameter_name, (trivia, ',', trivia)),
        (trivia, ')'),
    )
    .parse_next(input)
}

/// `$name`, returned without the `$`.
fn parameter_name(input: &mut &str) -> ModalResult<String> {
    preceded('$', identifier)
        .map(str::to_string)
        .parse_next(input)
}

fn modifier(input: &mut &str) -> ModalResult<Modifier> {
    preceded(
        ':',
        alt((
            preceded(
                ("from", trivia),
                delimited(('(', trivia), parameter_name, (trivia, ')')),
            )
            .map(Modifier::From),
            preceded(
                ("match", trivia),
                delimited(
                    ('(', trivia),
                    separated(1.., parameter_name, (trivia, ',', trivia)),
                    (trivia, ')'),
                ),
            )
            .map(Modifier::Match),
            identifier.map(|s: &str| Modifier::Tag(Tag::new(s))),
        )),
    )
    .parse_next(input)
}

/// `{ one: "card", *other: "cards", nom, acc: "..." }`
fn variant_block(input: &mut &str) -> ModalResult<Vec<VariantEntry>> {
    delimited(
        ('{', trivia),
        separated(1.., variant_entry, (trivia, ',', trivia)),
        (trivia, opt((',', trivia)), '}'),
    )
    .parse_next(input)
}

fn variant_entry(input: &mut &str) -> ModalResult<VariantEntry> {
    let keys: Vec<(bool, VariantKey)> =
        separated(1.., variant_key, (trivia, ',', trivia)).parse_next(input)?;
    trivia(input)?;
    ':'.parse_next(input)?;
    trivia(input)?;
    let template = template_string(input)?;

    let is_default = keys.iter().any(|(starred, _)| *starred);
    Ok(VariantEntry {
        keys: keys.into_iter().map(|(_, key)| key).collect(),
        is_default,
        template,
    })
}

/// `nom.few`, `_.few`, `*other`
fn variant_key(input: &mut &str) -> ModalResult<(bool, VariantKey)> {
    (
        opt('*').map(|star| star.is_some()),
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            .map(VariantKey::new),
    )
        .parse_next(input)
}

/// `{ 1: "...", *other: "...", 1.masc, 1.neut: "..." }`
fn match_block(input: &mut &str) -> ModalResult<Vec<MatchBranch>> {
    delimited(
        ('{', trivia),
        separated(1.., match_branch, (trivia, ',', trivia)),
        (trivia, opt((',', trivia)), '}'),
    )
    .parse_next(input)
}

fn match_branch(input: &mut &str) -> ModalResult<MatchBranch> {
    let keys: Vec<MatchKey> =
        separated(1.., match_key, (trivia, ',', trivia)).parse_next(input)?;
    trivia(input)?;
    ':'.parse_next(input)?;
    trivia(input)?;
    let template = template_string(input)?;
    Ok(MatchBranch { keys, template })
}

fn match_key(input: &mut &str) -> ModalResult<MatchKey> {
    separated(1.., match_component, '.')
        .map(|components| MatchKey { components })
        .parse_next(input)
}

fn match_component(input: &mut &str) -> ModalResult<MatchComponent> {
    (
        opt('*'),
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
    )
        .map(|(star, value): (Option<char>, &str)| MatchComponent {
            value: value.to_string(),
            is_default: star.is_some(),
        })
        .parse_next(input)
}

/// `"..."` with `\"` and `\\` escapes.
fn template_string(input: &mut &str) -> ModalResult<Template> {
    preceded(
        '"',
        cut_err((
            |i: &mut &str| template_text(i, true),
            '"'.context(expected("a closing `\"` (write `{{` or `}}` for a literal brace)")),
        )),
    )
    .map(|(template, _)| template)
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia_skips_comments_and_whitespace() {
        let mut input = "  // one\n// two\n  card";
        skip_trivia(&mut input);
        assert_eq!(input, "card");
    }

    #[test]
    fn leading_name_stops_at_punctuation() {
        assert_eq!(leading_name("cards($n) = "), Some("cards".to_string()));
        assert_eq!(leading_name("= x"), None);
    }

    #[test]
    fn offsets_point_at_each_definition() {
        let source = "a = \"x\";\n  b = \"y\";";
        let definitions = parse_file(source).unwrap();
        assert_eq!(definitions[0].offset, 0);
        assert_eq!(definitions[1].offset, 11);
    }
}
