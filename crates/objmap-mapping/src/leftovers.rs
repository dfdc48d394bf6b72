//! Leftover capture: unconsumed source fields as generic values

use objmap_reflect::{
    Record, Reflect, ReflectRef, Value, ValueMap, find_field, unwrap, visible_field_names,
};
use objmap_registry::MappingTable;
use tracing::{debug, warn};

use crate::Error;
use crate::guard::TraversalGuard;

/// Stored for a field whose read failed
pub const ERROR_READING_FIELD: &str = "ERROR_READING_FIELD";

/// Stored for a record already on the traversal path
pub const CYCLIC_REFERENCE: &str = "CYCLIC_REFERENCE";

/// Stored for a record or collection nested deeper than the depth limit
pub const MAX_DEPTH_EXCEEDED: &str = "MAX_DEPTH_EXCEEDED";

/// Collect every source field not claimed by a consumed target field
///
/// `consumed` holds target field names; `table` translates them to source
/// names. Without a table only identically named fields are claimed.
pub fn capture_leftovers(
    source: &dyn Record,
    consumed: &[&str],
    table: Option<&MappingTable>,
    max_depth: usize,
) -> ValueMap {
    let mut guard = TraversalGuard::new(max_depth);
    if let Err(err) = guard.enter(source) {
        warn!(shape = source.type_info().name, error = %err, "Leftover capture skipped");
        return ValueMap::new();
    }

    let leftovers = collect(source, consumed, table, &mut guard);
    guard.leave();
    leftovers
}

/// Whether `source_name` is claimed by one of the consumed target fields
pub fn is_claimed(source_name: &str, consumed: &[&str], table: Option<&MappingTable>) -> bool {
    consumed.iter().any(|&target| {
        let mapped = match table {
            Some(table) => table.lookup(target),
            None => target,
        };
        mapped == source_name
    })
}

/// Convert a reflected value into its generic form
///
/// Records become maps of all their visible fields; they are never mapped to
/// a target shape here.
pub fn to_generic(value: &dyn Reflect, max_depth: usize) -> Value {
    let mut guard = TraversalGuard::new(max_depth);
    generic(value, &mut guard)
}

/// Leftover collection over an already entered record
pub(crate) fn collect(
    source: &dyn Record,
    consumed: &[&str],
    table: Option<&MappingTable>,
    guard: &mut TraversalGuard,
) -> ValueMap {
    let mut leftovers = ValueMap::new();
    for name in visible_field_names(source) {
        if is_claimed(name, consumed, table) {
            continue;
        }
        let value = match find_field(source, name) {
            Ok(Some(value)) => generic(value, guard),
            Ok(None) => Value::Null,
            Err(err) => {
                debug!(field = name, error = %err, "Field read failed during leftover capture");
                Value::from(ERROR_READING_FIELD)
            }
        };
        leftovers.insert(name.to_string(), value);
    }
    leftovers
}

fn generic(value: &dyn Reflect, guard: &mut TraversalGuard) -> Value {
    let Some(value) = unwrap(value) else {
        return Value::Null;
    };

    let shape = value.type_info().name;
    match value.reflect_ref() {
        ReflectRef::Simple(scalar) => scalar,
        ReflectRef::Optional(inner) => inner.map_or(Value::Null, |inner| generic(inner, guard)),
        ReflectRef::Sequence(items) => {
            if let Err(err) = guard.descend(shape) {
                return sentinel(&err);
            }
            let list = items.into_iter().map(|item| generic(item, guard)).collect();
            guard.ascend();
            Value::List(list)
        }
        ReflectRef::Mapping(entries) => {
            if let Err(err) = guard.descend(shape) {
                return sentinel(&err);
            }
            let map = entries
                .into_iter()
                .map(|(key, item)| (key.to_string(), generic(item, guard)))
                .collect();
            guard.ascend();
            Value::Map(map)
        }
        ReflectRef::Record(record) => {
            if let Err(err) = guard.enter(record) {
                return sentinel(&err);
            }
            let fields = collect(record, &[], None, guard);
            guard.leave();
            Value::Map(fields)
        }
    }
}

fn sentinel(err: &Error) -> Value {
    let marker = match err {
        Error::CycleDetected { .. } => CYCLIC_REFERENCE,
        Error::DepthExceeded { .. } => MAX_DEPTH_EXCEEDED,
        _ => ERROR_READING_FIELD,
    };
    Value::from(marker)
}
