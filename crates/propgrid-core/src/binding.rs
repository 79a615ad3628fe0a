//! Moving values between the bound object and its editors.
//!
//! Reads flow object → editor through [`BindingSession::push_value`];
//! user input flows editor → object through [`BindingSession::apply_edit`],
//! which always re-reads afterwards so the editor shows what the object
//! actually holds.

use std::cell::RefCell;

use crate::descriptor::PropertyDescriptor;
use crate::error::{BindingError, BindingResult, ReadError, WriteError};
use crate::session::BindingSession;
use crate::surface::Inspect;
use crate::value::{NumberFormat, Value, parse_input};

fn read_value(
    descriptor: &PropertyDescriptor,
    object: &RefCell<dyn Inspect>,
) -> Result<Value, ReadError> {
    let guard = object.try_borrow().map_err(|_| ReadError::ObjectBusy)?;
    let target: &dyn Inspect = &*guard;
    descriptor.read(target.as_any())
}

fn write_value(
    descriptor: &PropertyDescriptor,
    object: &RefCell<dyn Inspect>,
    value: Value,
) -> Result<(), WriteError> {
    let mut guard = object.try_borrow_mut().map_err(|_| WriteError::ObjectBusy)?;
    let target: &mut dyn Inspect = &mut *guard;
    descriptor.write(target.as_any_mut(), value)
}

impl BindingSession {
    /// Read `name` from `object` and show it in its editor.
    ///
    /// On failure the editor keeps whatever it displayed before.
    pub fn push_value(
        &mut self,
        object: &RefCell<dyn Inspect>,
        name: &str,
        format: &NumberFormat,
    ) -> BindingResult<()> {
        let row = self
            .row_mut(name)
            .ok_or_else(|| BindingError::UnknownProperty(name.to_string()))?;
        let value = read_value(&row.descriptor, object)?;
        let shown = format.format(&value);
        if !row.editor.show(&shown) {
            log::debug!("`{name}` holds `{shown}`, which is not one of its choices");
        }
        Ok(())
    }

    /// Push every row, collecting the failures.
    pub fn push_all(
        &mut self,
        object: &RefCell<dyn Inspect>,
        format: &NumberFormat,
    ) -> Vec<BindingError> {
        let names: Vec<String> = self
            .rows()
            .iter()
            .map(|row| row.descriptor.name.clone())
            .collect();
        names
            .iter()
            .filter_map(|name| self.push_value(object, name, format).err())
            .collect()
    }

    /// Handle a committed user edit of `name`.
    ///
    /// Input that does not parse marks the editor invalid and leaves the
    /// object untouched. Parsed input is written, then the property is read
    /// back. The first failure is returned after the read-back.
    pub fn apply_edit(
        &mut self,
        object: &RefCell<dyn Inspect>,
        name: &str,
        raw: &str,
        format: &NumberFormat,
    ) -> BindingResult<()> {
        let row = self
            .row_mut(name)
            .ok_or_else(|| BindingError::UnknownProperty(name.to_string()))?;
        if !row.editor.is_interactive() {
            return Err(BindingError::ReadOnly(name.to_string()));
        }

        row.editor.show(raw);
        let value = match parse_input(&row.descriptor.value_type, raw, format) {
            Ok(value) => value,
            Err(err) => {
                row.editor.set_invalid(true);
                return Err(err.into());
            }
        };
        row.editor.set_invalid(false);

        let written = write_value(&row.descriptor, object, value);
        if let Err(err) = &written {
            log::debug!("write to `{name}` failed: {err}");
        }
        let pushed = self.push_value(object, name, format);
        written?;
        pushed
    }

    /// The choice at `index` of a choice editor.
    pub fn choice_at(&self, name: &str, index: usize) -> Option<&str> {
        self.editor(name)?.choices().get(index).map(String::as_str)
    }
}
