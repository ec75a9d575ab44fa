//! Order-independent resolution of placeholder definitions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{BootError, BootResult, FileMapping};

use super::PlaceholderTable;
use super::token::{sole_token, substitute, tokens};

/// A definition's raw value and the key it was declared under.
struct Definition<'a> {
    key: &'a str,
    value: &'a str,
}

/// Resolve every definition in `raw`, dependencies first.
///
/// The returned table is ordered by resolution, so each binding only refers
/// to bindings before it.
pub(super) fn resolve_definitions(raw: &[FileMapping]) -> BootResult<PlaceholderTable> {
    let mut order = Vec::new();
    let mut definitions = HashMap::new();
    for mapping in raw {
        if let Some(name) = sole_token(&mapping.source) {
            order.push(name);
            definitions.insert(
                name,
                Definition {
                    key: &mapping.source,
                    value: &mapping.destination,
                },
            );
        }
    }

    let mut table = PlaceholderTable::new();
    let mut stack = Vec::new();
    for name in order {
        resolve(name, &definitions, &mut table, &mut stack)?;
    }
    Ok(table)
}

fn resolve<'a>(
    name: &'a str,
    definitions: &HashMap<&'a str, Definition<'a>>,
    table: &mut PlaceholderTable,
    stack: &mut Vec<&'a str>,
) -> BootResult<()> {
    if table.contains(name) {
        return Ok(());
    }
    if let Some(start) = stack.iter().position(|seen| *seen == name) {
        let mut cycle: Vec<&str> = stack.iter().skip(start).copied().collect();
        cycle.push(name);
        return Err(Arc::new(BootError::PlaceholderCycle {
            cycle: cycle.join(" -> "),
        }));
    }
    let Some(definition) = definitions.get(name) else {
        return Ok(());
    };

    stack.push(name);
    for dependency in tokens(definition.value) {
        if !definitions.contains_key(dependency) {
            return Err(Arc::new(BootError::unresolved(dependency, definition.key)));
        }
        resolve(dependency, definitions, table, stack)?;
    }
    stack.pop();

    let value = substitute(definition.value, table, definition.key)?;
    table.define(name, value);
    Ok(())
}
