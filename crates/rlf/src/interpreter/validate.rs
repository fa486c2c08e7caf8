//! Static checks run once when a registry is built.
//!
//! Everything a definition can get wrong without seeing call-time arguments
//! is rejected here: references and arities, parameter scoping, variant
//! table and `:match` structure, and cycles in the call graph.

use std::collections::{HashMap, HashSet};

use crate::interpreter::error::{DefinitionError, compute_suggestions};
use crate::parser::ast::{
    Argument, Definition, DefinitionBody, MatchBlock, MatchKey, Reference, Selector, Template,
    TransformContext, VariantEntry,
};
use crate::types::VariantKey;

/// Validate a locale's definitions against each other.
///
/// `index` maps every name to its position in `definitions`.
pub(crate) fn validate(
    definitions: &[Definition],
    index: &HashMap<String, usize>,
) -> Result<(), DefinitionError> {
    let scope = Scope { definitions, index };
    for def in definitions {
        check_modifiers(def)?;
        match &def.body {
            DefinitionBody::Simple(_) => {}
            DefinitionBody::Variants(entries) => check_variants(def, entries)?,
            DefinitionBody::Match(block) => check_match(def, block)?,
        }
        for template in def.templates() {
            scope.check_template(def, template)?;
        }
    }
    check_cycles(definitions, index)
}

struct Scope<'a> {
    definitions: &'a [Definition],
    index: &'a HashMap<String, usize>,
}

impl Scope<'_> {
    fn lookup(&self, def: &Definition, reference: &str) -> Result<&Definition, DefinitionError> {
        match self.index.get(reference) {
            Some(&i) => Ok(&self.definitions[i]),
            None => {
                let names: Vec<&str> = self.definitions.iter().map(|d| d.name.as_str()).collect();
                Err(DefinitionError::UndefinedReference {
                    name: def.name.clone(),
                    reference: reference.to_string(),
                    suggestions: compute_suggestions(reference, &names),
                })
            }
        }
    }

    /// A bare name must be a term.
    fn check_term(&self, def: &Definition, reference: &str) -> Result<(), DefinitionError> {
        let target = self.lookup(def, reference)?;
        if target.is_term() {
            Ok(())
        } else {
            Err(DefinitionError::PhraseWithoutArguments {
                name: def.name.clone(),
                reference: reference.to_string(),
                expected: target.arity(),
            })
        }
    }

    fn check_template(&self, def: &Definition, template: &Template) -> Result<(), DefinitionError> {
        for (transforms, reference, selectors) in template.interpolations() {
            for transform in transforms {
                if let Some(TransformContext::Parameter(parameter)) = &transform.context {
                    check_parameter(def, parameter)?;
                }
            }

            match reference {
                Reference::Parameter(parameter) => check_parameter(def, parameter)?,
                Reference::Identifier(name) => self.check_term(def, name)?,
                Reference::PhraseCall { name, args } => {
                    let target = self.lookup(def, name)?;
                    if target.is_term() {
                        return Err(DefinitionError::TermCalledWithArguments {
                            name: def.name.clone(),
                            reference: name.clone(),
                        });
                    }
                    if target.arity() != args.len() {
                        return Err(DefinitionError::ArityMismatch {
                            name: def.name.clone(),
                            reference: name.clone(),
                            expected: target.arity(),
                            got: args.len(),
                        });
                    }
                    for arg in args {
                        match arg {
                            Argument::Parameter(parameter) => check_parameter(def, parameter)?,
                            Argument::Identifier(term) => self.check_term(def, term)?,
                            Argument::Number(_) => {}
                        }
                    }
                }
            }

            for selector in selectors {
                if let Selector::Parameter(parameter) = selector {
                    check_parameter(def, parameter)?;
                }
            }
        }
        Ok(())
    }
}

fn check_parameter(def: &Definition, parameter: &str) -> Result<(), DefinitionError> {
    if def.parameters().iter().any(|p| p == parameter) {
        Ok(())
    } else {
        Err(DefinitionError::UndefinedParameter {
            name: def.name.clone(),
            parameter: parameter.to_string(),
        })
    }
}

fn check_modifiers(def: &Definition) -> Result<(), DefinitionError> {
    let declared = |parameter: &str| def.parameters().iter().any(|p| p == parameter);

    if let Some(parameter) = &def.from_param
        && !declared(parameter)
    {
        return Err(DefinitionError::UnknownModifierParameter {
            name: def.name.clone(),
            modifier: "from",
            parameter: parameter.clone(),
        });
    }
    if let DefinitionBody::Match(block) = &def.body
        && let Some(parameter) = block.parameters.iter().find(|p| !declared(p.as_str()))
    {
        return Err(DefinitionError::UnknownModifierParameter {
            name: def.name.clone(),
            modifier: "match",
            parameter: parameter.clone(),
        });
    }
    Ok(())
}

fn check_variants(def: &Definition, entries: &[VariantEntry]) -> Result<(), DefinitionError> {
    if def.from_param.is_some() {
        return Err(DefinitionError::FromWithVariantTable {
            name: def.name.clone(),
        });
    }
    if entries.iter().filter(|entry| entry.is_default).count() > 1 {
        return Err(DefinitionError::DuplicateVariantDefault {
            name: def.name.clone(),
        });
    }

    let mut keys: Vec<(&VariantKey, &Template)> = Vec::new();
    for entry in entries {
        for key in &entry.keys {
            if keys.iter().any(|(existing, _)| *existing == key) {
                return Err(DefinitionError::DuplicateVariantKey {
                    name: def.name.clone(),
                    key: key.to_string(),
                });
            }
            keys.push((key, &entry.template));
        }
    }

    for (i, (first, first_template)) in keys.iter().enumerate() {
        for (second, second_template) in &keys[i + 1..] {
            let conflicting = first_template != second_template
                && first.specificity() == second.specificity()
                && first.overlaps(second);
            if conflicting {
                let join = first.join(second);
                if !keys.iter().any(|(key, _)| **key == join) {
                    return Err(DefinitionError::AmbiguousVariants {
                        name: def.name.clone(),
                        first: first.to_string(),
                        second: second.to_string(),
                        missing: join.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn render_match_key(key: &MatchKey) -> String {
    key.components
        .iter()
        .map(|component| component.value.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

fn check_match(def: &Definition, block: &MatchBlock) -> Result<(), DefinitionError> {
    let dimensions = block.parameters.len();
    let mut defaults: Vec<Option<&str>> = vec![None; dimensions];
    let mut declared: HashSet<Vec<&str>> = HashSet::new();

    for key in block.branches.iter().flat_map(|branch| &branch.keys) {
        if key.components.len() != dimensions {
            return Err(DefinitionError::MatchKeyArity {
                name: def.name.clone(),
                key: render_match_key(key),
                expected: dimensions,
            });
        }
        for (i, component) in key.components.iter().enumerate() {
            if !component.is_default {
                continue;
            }
            match defaults[i] {
                None => defaults[i] = Some(component.value.as_str()),
                Some(existing) if existing != component.value => {
                    return Err(DefinitionError::DuplicateMatchDefault {
                        name: def.name.clone(),
                        parameter: block.parameters[i].clone(),
                    });
                }
                Some(_) => {}
            }
        }
        let values: Vec<&str> = key
            .components
            .iter()
            .map(|component| component.value.as_str())
            .collect();
        if !declared.insert(values) {
            return Err(DefinitionError::DuplicateMatchKey {
                name: def.name.clone(),
                key: render_match_key(key),
            });
        }
    }

    let default_key = defaults
        .iter()
        .zip(&block.parameters)
        .map(|(default, parameter)| {
            default.ok_or_else(|| DefinitionError::MissingMatchDefault {
                name: def.name.clone(),
                parameter: parameter.clone(),
            })
        })
        .collect::<Result<Vec<&str>, _>>()?;
    if !declared.contains(&default_key) {
        return Err(DefinitionError::MissingDefaultBranch {
            name: def.name.clone(),
            key: default_key.join("."),
        });
    }
    Ok(())
}

/// Names a definition refers to, in source order.
fn references(def: &Definition) -> Vec<&str> {
    let mut names = Vec::new();
    for template in def.templates() {
        for (_, reference, _) in template.interpolations() {
            match reference {
                Reference::Parameter(_) => {}
                Reference::Identifier(name) => names.push(name.as_str()),
                Reference::PhraseCall { name, args } => {
                    names.push(name.as_str());
                    names.extend(args.iter().filter_map(|arg| match arg {
                        Argument::Identifier(term) => Some(term.as_str()),
                        Argument::Parameter(_) | Argument::Number(_) => None,
                    }));
                }
            }
        }
    }
    names
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Depth-first search over definition indices.
fn check_cycles(
    definitions: &[Definition],
    index: &HashMap<String, usize>,
) -> Result<(), DefinitionError> {
    let edges: Vec<Vec<usize>> = definitions
        .iter()
        .map(|def| {
            references(def)
                .into_iter()
                .filter_map(|name| index.get(name).copied())
                .collect()
        })
        .collect();

    let mut marks = vec![Mark::Unvisited; definitions.len()];
    let mut path = Vec::new();
    for start in 0..definitions.len() {
        if marks[start] == Mark::Unvisited
            && let Err(cycle) = visit(start, &edges, &mut marks, &mut path)
        {
            return Err(DefinitionError::Cycle {
                chain: cycle
                    .into_iter()
                    .map(|i| definitions[i].name.clone())
                    .collect(),
            });
        }
    }
    Ok(())
}

/// On a back edge, returns the cycle as indices, first node repeated at the end.
fn visit(
    node: usize,
    edges: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Result<(), Vec<usize>> {
    marks[node] = Mark::Active;
    path.push(node);
    for &next in &edges[node] {
        match marks[next] {
            Mark::Active => {
                let start = path.iter().position(|&n| n == next).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(next);
                return Err(cycle);
            }
            Mark::Unvisited => visit(next, edges, marks, path)?,
            Mark::Done => {}
        }
    }
    path.pop();
    marks[node] = Mark::Done;
    Ok(())
}
