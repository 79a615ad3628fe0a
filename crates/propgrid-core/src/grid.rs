//! The property grid: binds one object and keeps its editors in sync.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{ColumnTitles, GridOptions};
use crate::descriptor::PropertyDescriptor;
use crate::editor::EditorWidget;
use crate::error::{BindingError, EnumerationError};
use crate::metadata::{MetadataProvider, NoMetadata};
use crate::reflector::Reflector;
use crate::session::{BindingSession, Row};
use crate::surface::Inspect;
use crate::value::NumberFormat;

/// A shared handle to the object being edited.
pub type BoundObject = Rc<RefCell<dyn Inspect>>;

/// Callback receiving every error the grid swallows.
pub type DiagnosticsFn = Box<dyn Fn(&BindingError)>;

/// Edits the properties of one bound object.
///
/// No operation on the grid returns an error. Failures are logged at debug
/// level and passed to the diagnostics callback, if one is set.
pub struct PropertyGrid {
    options: GridOptions,
    metadata: Box<dyn MetadataProvider>,
    object: Option<BoundObject>,
    session: BindingSession,
    diagnostics: Option<DiagnosticsFn>,
}

impl Default for PropertyGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyGrid {
    /// Create an unbound grid with default options.
    pub fn new() -> Self {
        Self::with_options(GridOptions::default())
    }

    pub fn with_options(options: GridOptions) -> Self {
        Self {
            options,
            metadata: Box::new(NoMetadata),
            object: None,
            session: BindingSession::empty(0),
            diagnostics: None,
        }
    }

    /// Use `metadata` for display names of members without inline info.
    pub fn with_metadata(mut self, metadata: impl MetadataProvider + 'static) -> Self {
        self.metadata = Box::new(metadata);
        self
    }

    /// Bind `object`, replacing any previous binding.
    pub fn bind(&mut self, object: BoundObject) {
        self.object = Some(object);
        self.refresh();
    }

    /// Clear the binding. The header row stays if titles are set.
    pub fn unbind(&mut self) {
        self.object = None;
        self.refresh();
    }

    pub fn current_object(&self) -> Option<&BoundObject> {
        self.object.as_ref()
    }

    /// Rediscover the bound object's properties and rebuild every row.
    pub fn refresh(&mut self) {
        let generation = self.session.generation() + 1;
        let header = self.options.column_titles();
        let session = match self.build_session(generation) {
            Ok(session) => session,
            Err(err) => {
                self.report(&err.into());
                BindingSession::empty(generation)
            }
        };
        self.session = session.with_header(header);
    }

    fn build_session(&self, generation: u64) -> Result<BindingSession, EnumerationError> {
        let Some(object) = &self.object else {
            return Ok(BindingSession::empty(generation));
        };

        let descriptors = {
            let guard = object
                .try_borrow()
                .map_err(|_| EnumerationError::ObjectBusy)?;
            Reflector::new(self.options.reflect_options(), self.metadata.as_ref())
                .enumerate(&*guard)?
        };

        let mut session = BindingSession::build(generation, descriptors);
        for err in session.push_all(object, &self.options.number_format) {
            self.report(&err);
        }
        log::trace!(
            "bound {} properties ({} write-only), generation {generation}",
            session.len(),
            session.write_only().len()
        );
        Ok(session)
    }

    /// Route a committed edit of property `name` to the bound object.
    pub fn on_user_edit(&mut self, name: &str, raw: &str) {
        let Some(object) = self.object.clone() else {
            log::debug!("edit of `{name}` with nothing bound");
            return;
        };
        if let Err(err) = self
            .session
            .apply_edit(&object, name, raw, &self.options.number_format)
        {
            self.report(&err);
        }
    }

    /// Commit the choice at `index` of a choice editor.
    pub fn select_choice(&mut self, name: &str, index: usize) {
        if self.session.editor(name).is_none() {
            self.report(&BindingError::UnknownProperty(name.to_string()));
            return;
        }
        match self.session.choice_at(name, index).map(str::to_owned) {
            Some(choice) => self.on_user_edit(name, &choice),
            None => self.report(&BindingError::NoSuchChoice {
                name: name.to_string(),
                index,
            }),
        }
    }

    /// Re-read one property into its editor.
    pub fn push_value(&mut self, name: &str) {
        let Some(object) = self.object.clone() else {
            return;
        };
        if let Err(err) = self
            .session
            .push_value(&object, name, &self.options.number_format)
        {
            self.report(&err);
        }
    }

    fn report(&self, err: &BindingError) {
        log::debug!("property grid: {err}");
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics(err);
        }
    }

    pub fn set_diagnostics(&mut self, diagnostics: impl Fn(&BindingError) + 'static) {
        self.diagnostics = Some(Box::new(diagnostics));
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn require_metadata(&self) -> bool {
        self.options.require_metadata
    }

    pub fn set_require_metadata(&mut self, require: bool) {
        self.options.require_metadata = require;
    }

    pub fn load_accessors(&self) -> bool {
        self.options.load_accessors
    }

    pub fn set_load_accessors(&mut self, load: bool) {
        self.options.load_accessors = load;
    }

    pub fn load_fields(&self) -> bool {
        self.options.load_fields
    }

    pub fn set_load_fields(&mut self, load: bool) {
        self.options.load_fields = load;
    }

    /// Set both header titles. Takes effect on the next bind or refresh.
    pub fn set_column_titles(&mut self, first: Option<&str>, second: Option<&str>) {
        self.set_first_column_title(first);
        self.set_second_column_title(second);
    }

    pub fn first_column_title(&self) -> Option<&str> {
        self.options.first_column_title.as_deref()
    }

    pub fn second_column_title(&self) -> Option<&str> {
        self.options.second_column_title.as_deref()
    }

    pub fn set_first_column_title(&mut self, title: Option<&str>) {
        self.options.first_column_title = title.map(str::to_owned);
    }

    pub fn set_second_column_title(&mut self, title: Option<&str>) {
        self.options.second_column_title = title.map(str::to_owned);
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.options.number_format
    }

    /// Takes effect for the next push or edit.
    pub fn set_number_format(&mut self, format: NumberFormat) {
        self.options.number_format = format;
    }

    /// Number of rendered rows, counting the header row.
    pub fn property_count(&self) -> usize {
        self.session.property_count()
    }

    pub fn header(&self) -> Option<&ColumnTitles> {
        self.session.header()
    }

    pub fn rows(&self) -> &[Row] {
        self.session.rows()
    }

    pub fn editor(&self, name: &str) -> Option<&EditorWidget> {
        self.session.editor(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.session.descriptor(name)
    }

    pub fn write_only(&self) -> &[PropertyDescriptor] {
        self.session.write_only()
    }

    pub fn session(&self) -> &BindingSession {
        &self.session
    }
}
