//! The binding session: everything produced for one bound object.

use std::collections::HashMap;

use crate::config::ColumnTitles;
use crate::descriptor::PropertyDescriptor;
use crate::editor::{self, EditorWidget};

/// A rendered property: its descriptor and the editor showing it.
#[derive(Debug, Clone)]
pub struct Row {
    pub descriptor: PropertyDescriptor,
    pub editor: EditorWidget,
}

/// Descriptors and editors for one bound object.
///
/// Sessions are never patched in place by a rebind: the grid builds a new
/// one and swaps it in, so readers always see a complete generation.
#[derive(Debug, Clone, Default)]
pub struct BindingSession {
    generation: u64,
    rows: Vec<Row>,
    index: HashMap<String, usize>,
    write_only: Vec<PropertyDescriptor>,
    header: Option<ColumnTitles>,
}

impl BindingSession {
    /// A session with no properties.
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    /// Create editors for `descriptors`, keeping discovery order.
    ///
    /// Writer-only properties are kept aside; properties without an editor
    /// are dropped.
    pub fn build(generation: u64, descriptors: Vec<PropertyDescriptor>) -> Self {
        let mut session = Self::empty(generation);
        for descriptor in descriptors {
            if !descriptor.has_reader() && descriptor.has_writer() {
                session.write_only.push(descriptor);
                continue;
            }
            let Some(editor) = editor::create_editor(&descriptor) else {
                continue;
            };
            session
                .index
                .insert(descriptor.name.clone(), session.rows.len());
            session.rows.push(Row { descriptor, editor });
        }
        session
    }

    /// Attach the header titles captured for this generation.
    pub fn with_header(mut self, header: Option<ColumnTitles>) -> Self {
        self.header = header;
        self
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Property rows in discovery order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Option<&Row> {
        self.index.get(name).map(|&index| &self.rows[index])
    }

    pub(crate) fn row_mut(&mut self, name: &str) -> Option<&mut Row> {
        self.index.get(name).map(|&index| &mut self.rows[index])
    }

    pub fn editor(&self, name: &str) -> Option<&EditorWidget> {
        self.row(name).map(|row| &row.editor)
    }

    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.row(name).map(|row| &row.descriptor)
    }

    /// Properties that can be written but not read; they get no row.
    pub fn write_only(&self) -> &[PropertyDescriptor] {
        &self.write_only
    }

    pub fn header(&self) -> Option<&ColumnTitles> {
        self.header.as_ref()
    }

    /// Number of property rows, excluding the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rendered rows, counting the header row when present.
    pub fn property_count(&self) -> usize {
        self.rows.len() + usize::from(self.header.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorKind;
    use crate::metadata::NoMetadata;
    use crate::reflector::{ReflectOptions, Reflector};
    use crate::surface::Surface;

    struct Account {
        owner: String,
        balance: f64,
        locked: bool,
    }

    fn account_session() -> BindingSession {
        let surface = Surface::builder::<Account>()
            .getter("getOwner", |a| a.owner.clone())
            .setter("setOwner", |a, v| a.owner = v)
            .getter("getBalance", |a| a.balance)
            .setter("setPin", |_, _: i32| {})
            .getter("isLocked", |a| a.locked)
            .opaque_getter("getHistory", "List")
            .build();
        let descriptors = Reflector::new(ReflectOptions::default(), &NoMetadata)
            .enumerate_surface(&surface)
            .unwrap();
        BindingSession::build(7, descriptors)
    }

    #[test]
    fn test_build_rows_in_order() {
        let session = account_session();
        assert_eq!(session.generation(), 7);
        let names: Vec<_> = session.rows().iter().map(|r| r.descriptor.name.as_str()).collect();
        assert_eq!(names, ["Owner", "Balance", "Locked"]);
        assert_eq!(session.len(), 3);
        assert_eq!(session.editor("Locked").unwrap().kind(), EditorKind::BooleanChoice);
        assert!(!session.editor("Balance").unwrap().is_interactive());
    }

    #[test]
    fn test_write_only_tracked_separately() {
        let session = account_session();
        assert!(session.row("Pin").is_none());
        assert_eq!(session.write_only().len(), 1);
        assert_eq!(session.write_only()[0].name, "Pin");
    }

    #[test]
    fn test_unsupported_dropped() {
        let session = account_session();
        assert!(session.row("History").is_none());
        assert!(session.write_only().iter().all(|d| d.name != "History"));
    }

    #[test]
    fn test_property_count_includes_header() {
        let session = account_session();
        assert_eq!(session.property_count(), 3);

        let session = session.with_header(Some(ColumnTitles {
            first: "Property".into(),
            second: String::new(),
        }));
        assert_eq!(session.property_count(), 4);
        assert_eq!(session.header().unwrap().first, "Property");
    }

    #[test]
    fn test_empty_session() {
        let session = BindingSession::empty(2);
        assert!(session.is_empty());
        assert_eq!(session.property_count(), 0);
        assert!(session.editor("Owner").is_none());
    }
}
