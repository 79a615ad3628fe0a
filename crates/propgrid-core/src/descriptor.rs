//! Normalized property descriptors produced by the reflector.

use std::any::Any;
use std::fmt;

use crate::error::{ReadError, WriteError};
use crate::surface::{ReadFn, WriteFn};
use crate::value::{Value, ValueType};

/// Which part of the surface a property was discovered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Reader/writer method pair.
    Methods,
    /// Public field.
    Field,
}

/// One bindable property of the bound object.
#[derive(Clone)]
pub struct PropertyDescriptor {
    /// Canonical name: the accessor or field name with its prefix removed.
    pub name: String,
    pub value_type: ValueType,
    pub display_name: String,
    pub description: String,
    pub category: String,
    /// Discovered through an `is`/`setIs` accessor or an `is` field.
    pub is_boolean_like: bool,
    pub access: AccessMode,
    pub(crate) reader: Option<ReadFn>,
    pub(crate) writer: Option<WriteFn>,
}

impl PropertyDescriptor {
    pub fn has_reader(&self) -> bool {
        self.reader.is_some()
    }

    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    /// Whether the property can get a row in the grid.
    pub fn is_displayable(&self) -> bool {
        self.has_reader() && self.value_type.is_supported()
    }

    /// Read the current value from `object`.
    pub fn read(&self, object: &dyn Any) -> Result<Value, ReadError> {
        let reader = self.reader.as_ref().ok_or(ReadError::NoReader)?;
        reader(object)?.ok_or(ReadError::Null)
    }

    /// Write `value` to `object`.
    pub fn write(&self, object: &mut dyn Any, value: Value) -> Result<(), WriteError> {
        let writer = self.writer.as_ref().ok_or(WriteError::NoWriter)?;
        writer(object, value)
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("display_name", &self.display_name)
            .field("has_reader", &self.has_reader())
            .field("has_writer", &self.has_writer())
            .field("is_boolean_like", &self.is_boolean_like)
            .field("access", &self.access)
            .finish()
    }
}
