//! Mapping engine
//!
//! Populates target records from source records field by field.

use std::sync::Arc;

use objmap_reflect::{Record, Reflect, ReflectRef, Target, Typed, find_field, unwrap};
use objmap_registry::MappingRegistry;
use tracing::{debug, error, trace, warn};

use crate::config::{MapperOptions, ReadErrorPolicy};
use crate::guard::TraversalGuard;
use crate::leftovers::collect;
use crate::{Error, Result};

/// Maps source records onto registered target shapes
///
/// Cheap to clone; the registry is shared and never mutated.
#[derive(Debug, Clone)]
pub struct Mapper {
    registry: Arc<MappingRegistry>,
    options: MapperOptions,
}

impl Mapper {
    /// Create a mapper with default options
    pub fn new(registry: Arc<MappingRegistry>) -> Self {
        Self {
            registry,
            options: MapperOptions::default(),
        }
    }

    /// Replace the engine options
    ///
    /// Fails with [`Error::Config`] when the options are out of range.
    pub fn with_options(mut self, options: MapperOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// Registry used for field-name translation
    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Engine options
    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Map `source` onto a new `T`
    ///
    /// Returns `None` when the source is absent or the mapping failed; the
    /// failure is logged.
    pub fn map<T: Target + Typed + Default>(&self, source: &dyn Reflect) -> Option<T> {
        match self.try_map::<T>(source) {
            Ok(target) => target,
            Err(err) => {
                error!(
                    source_shape = source.type_info().name,
                    target_shape = T::descriptor().name,
                    error = %err,
                    "Mapping failed"
                );
                None
            }
        }
    }

    /// Map `source` onto a new `T`, reporting failures
    ///
    /// An absent source yields `Ok(None)`.
    pub fn try_map<T: Target + Typed + Default>(&self, source: &dyn Reflect) -> Result<Option<T>> {
        let target_shape = T::descriptor().name;
        let Some(source) = unwrap(source) else {
            warn!(target_shape, "Source is absent, nothing to map");
            return Ok(None);
        };

        debug!(source_shape = source.type_info().name, target_shape, "Mapping");
        let mut target = T::default();
        let mut guard = TraversalGuard::new(self.options.max_depth);
        self.populate_guarded(source, &mut target, &mut guard)?;
        Ok(Some(target))
    }

    /// Populate an existing target from `source`
    ///
    /// Fields without a match keep their current value. An absent source
    /// leaves the target untouched.
    pub fn populate(&self, source: &dyn Reflect, target: &mut dyn Target) -> Result<()> {
        let Some(source) = unwrap(source) else {
            return Ok(());
        };
        let mut guard = TraversalGuard::new(self.options.max_depth);
        self.populate_guarded(source, target, &mut guard)
    }

    fn populate_guarded(
        &self,
        source: &dyn Reflect,
        target: &mut dyn Target,
        guard: &mut TraversalGuard,
    ) -> Result<()> {
        let ReflectRef::Record(record) = source.reflect_ref() else {
            return Err(Error::UnsupportedSource(source.type_info().name));
        };

        guard.enter(record)?;
        let result = self.populate_fields(record, target, guard);
        guard.leave();
        result
    }

    fn populate_fields(
        &self,
        source: &dyn Record,
        target: &mut dyn Target,
        guard: &mut TraversalGuard,
    ) -> Result<()> {
        let shape = target.type_info();
        let table = self.registry.table(shape.id);
        let mut consumed: Vec<&'static str> = Vec::new();

        for &field in target.field_names() {
            let source_field = self.registry.lookup(shape.id, field);
            let found = match find_field(source, source_field) {
                Ok(found) => found,
                Err(err) => {
                    self.recover(shape.name, field, err.into())?;
                    continue;
                }
            };

            let Some(raw) = found else {
                trace!(
                    target_shape = shape.name,
                    field,
                    source_field,
                    "No matching source field"
                );
                continue;
            };
            consumed.push(field);

            let Some(value) = unwrap(raw) else {
                continue;
            };
            if let Some(slot) = target.field_mut(field) {
                self.assign_field(shape.name, field, value, slot, guard)?;
            }
        }

        if target.accepts_extra_fields() {
            let leftovers = collect(source, &consumed, table, guard);
            if !leftovers.is_empty() {
                debug!(
                    target_shape = shape.name,
                    count = leftovers.len(),
                    "Captured leftover fields"
                );
                target.set_extra_fields(leftovers);
            }
        }

        Ok(())
    }

    fn assign_field(
        &self,
        target_shape: &str,
        field: &str,
        value: &dyn Reflect,
        slot: &mut dyn Reflect,
        guard: &mut TraversalGuard,
    ) -> Result<()> {
        let declared = slot.type_info();

        if declared.is_complex() && matches!(value.reflect_ref(), ReflectRef::Record(_)) {
            if let Some(entry) = self.registry.entry(declared.id) {
                let mut nested = (entry.construct)();
                if let Err(err) = self.populate_guarded(value, &mut *nested, guard) {
                    return self.recover(target_shape, field, err);
                }
                if slot.assign(nested.into_any()).is_err() {
                    trace!(target_shape, field, "Nested target does not fit its slot");
                }
                return Ok(());
            }
        }

        if slot.assign(value.clone_boxed()).is_err() {
            trace!(
                target_shape,
                field,
                declared = declared.name,
                actual = value.type_info().name,
                "Type mismatch, leaving default"
            );
        }
        Ok(())
    }

    fn recover(&self, target_shape: &str, field: &str, err: Error) -> Result<()> {
        match self.options.on_read_error {
            ReadErrorPolicy::Skip => {
                warn!(target_shape, field, error = %err, "Leaving field at default");
                Ok(())
            }
            ReadErrorPolicy::Abort => Err(err),
        }
    }
}
