//! Editor widget model and the factory choosing one per property type.
//!
//! Editors here are toolkit-agnostic state: what is displayed, whether the
//! user may interact, and whether the last input was rejected. A view
//! layer (see `propgrid-widgets`) renders them.

use crate::descriptor::PropertyDescriptor;
use crate::value::ValueType;

/// Choices offered for boolean properties, in this order.
pub const BOOLEAN_CHOICES: [&str; 2] = ["true", "false"];

/// The kind of editor created for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Free-form text field.
    Text,
    /// Two-choice `true` / `false` selector.
    BooleanChoice,
    /// Selector over an enum's variants.
    EnumChoice,
}

/// What an editor currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorContent {
    Text(String),
    Choice {
        choices: Vec<String>,
        selected: Option<usize>,
    },
}

/// Editor state for one property row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorWidget {
    /// Canonical name of the property this editor routes edits to.
    property: String,
    kind: EditorKind,
    content: EditorContent,
    interactive: bool,
    invalid: bool,
}

impl EditorWidget {
    /// Create an empty text editor.
    pub fn text(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            kind: EditorKind::Text,
            content: EditorContent::Text(String::new()),
            interactive: true,
            invalid: false,
        }
    }

    /// Create a choice editor with nothing selected.
    pub fn choice<I, S>(property: impl Into<String>, kind: EditorKind, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property: property.into(),
            kind,
            content: EditorContent::Choice {
                choices: choices.into_iter().map(Into::into).collect(),
                selected: None,
            },
            interactive: true,
            invalid: false,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn content(&self) -> &EditorContent {
        &self.content
    }

    /// Current text of a text editor.
    pub fn text_value(&self) -> Option<&str> {
        match &self.content {
            EditorContent::Text(text) => Some(text),
            EditorContent::Choice { .. } => None,
        }
    }

    /// Choices of a choice editor, in display order.
    pub fn choices(&self) -> &[String] {
        match &self.content {
            EditorContent::Choice { choices, .. } => choices,
            EditorContent::Text(_) => &[],
        }
    }

    /// Index of the selected choice.
    pub fn selected(&self) -> Option<usize> {
        match &self.content {
            EditorContent::Choice { selected, .. } => *selected,
            EditorContent::Text(_) => None,
        }
    }

    /// The string currently shown: the text, or the selected choice.
    pub fn display(&self) -> Option<&str> {
        match &self.content {
            EditorContent::Text(text) => Some(text),
            EditorContent::Choice { choices, selected } => {
                selected.and_then(|index| choices.get(index)).map(String::as_str)
            }
        }
    }

    /// Whether the user can edit this property.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether the last user input failed to parse.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub(crate) fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub(crate) fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Show `value`. A choice editor only changes selection when `value`
    /// is one of its choices; returns whether the display now matches.
    pub(crate) fn show(&mut self, value: &str) -> bool {
        match &mut self.content {
            EditorContent::Text(text) => {
                value.clone_into(text);
                true
            }
            EditorContent::Choice { choices, selected } => {
                match choices.iter().position(|choice| choice == value) {
                    Some(index) => {
                        *selected = Some(index);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}

/// Create the editor for a property, or `None` if it gets no row.
///
/// Properties without a reader, and properties of unsupported types, are
/// silently excluded. Properties without a writer get a read-only editor.
pub fn create_editor(descriptor: &PropertyDescriptor) -> Option<EditorWidget> {
    if !descriptor.has_reader() {
        return None;
    }

    let mut editor = match &descriptor.value_type {
        ValueType::Boolean => {
            EditorWidget::choice(&descriptor.name, EditorKind::BooleanChoice, BOOLEAN_CHOICES)
        }
        ValueType::Enum(variants) => EditorWidget::choice(
            &descriptor.name,
            EditorKind::EnumChoice,
            variants.variants().iter().cloned(),
        ),
        ValueType::String | ValueType::Integer | ValueType::Float | ValueType::Double => {
            EditorWidget::text(&descriptor.name)
        }
        ValueType::Unsupported(type_name) => {
            log::trace!("no editor for `{}` of type {type_name}", descriptor.name);
            return None;
        }
    };

    if !descriptor.has_writer() {
        editor.set_interactive(false);
    }
    Some(editor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::NoMetadata;
    use crate::reflector::{ReflectOptions, Reflector};
    use crate::surface::Surface;
    use crate::value::{EnumProperty, EnumVariants};

    #[derive(Clone, Copy)]
    enum Align {
        Left,
        Right,
    }

    impl EnumProperty for Align {
        const TYPE_NAME: &'static str = "Align";

        fn variants() -> &'static [Self] {
            &[Align::Left, Align::Right]
        }

        fn variant_name(&self) -> &'static str {
            match self {
                Align::Left => "LEFT",
                Align::Right => "RIGHT",
            }
        }
    }

    struct Form {
        name: String,
        size: f32,
        checked: bool,
        align: Align,
    }

    fn descriptors() -> Vec<PropertyDescriptor> {
        let surface = Surface::builder::<Form>()
            .getter("getName", |f| f.name.clone())
            .setter("setName", |f, v| f.name = v)
            .getter("getSize", |f| f.size)
            .getter("isChecked", |f| f.checked)
            .setter("setIsChecked", |f, v| f.checked = v)
            .getter("getAlign", |f| f.align)
            .setter("setAlign", |f, v| f.align = v)
            .opaque_getter("getParent", "Form")
            .setter("setScale", |f, v: f32| f.size = v)
            .build();
        Reflector::new(ReflectOptions::default(), &NoMetadata)
            .enumerate_surface(&surface)
            .unwrap()
    }

    fn editor_for(name: &str) -> Option<EditorWidget> {
        let descriptors = descriptors();
        let descriptor = descriptors.iter().find(|d| d.name == name).unwrap();
        create_editor(descriptor)
    }

    #[test]
    fn test_text_editors_for_strings_and_numbers() {
        let name = editor_for("Name").unwrap();
        assert_eq!(name.kind(), EditorKind::Text);
        assert_eq!(name.property(), "Name");
        assert!(name.is_interactive());

        let size = editor_for("Size").unwrap();
        assert_eq!(size.kind(), EditorKind::Text);
        assert!(!size.is_interactive(), "no writer means read-only");
    }

    #[test]
    fn test_boolean_editor_offers_true_then_false() {
        let checked = editor_for("Checked").unwrap();
        assert_eq!(checked.kind(), EditorKind::BooleanChoice);
        assert_eq!(checked.choices(), ["true", "false"]);
        assert_eq!(checked.selected(), None);
    }

    #[test]
    fn test_enum_editor_lists_declared_variants() {
        let align = editor_for("Align").unwrap();
        assert_eq!(align.kind(), EditorKind::EnumChoice);
        assert_eq!(align.choices(), ["LEFT", "RIGHT"]);
    }

    #[test]
    fn test_unsupported_and_writer_only_are_excluded() {
        assert!(editor_for("Parent").is_none());
        assert!(editor_for("Scale").is_none());
    }

    #[test]
    fn test_show_on_choice_editor() {
        let mut editor = EditorWidget::choice(
            "Align",
            EditorKind::EnumChoice,
            EnumVariants::of::<Align>().variants().iter().cloned(),
        );
        assert!(editor.show("RIGHT"));
        assert_eq!(editor.selected(), Some(1));
        assert_eq!(editor.display(), Some("RIGHT"));

        assert!(!editor.show("CENTER"));
        assert_eq!(editor.display(), Some("RIGHT"));
    }

    #[test]
    fn test_show_on_text_editor() {
        let mut editor = EditorWidget::text("Name");
        assert!(editor.show("hello"));
        assert_eq!(editor.text_value(), Some("hello"));
        assert!(editor.choices().is_empty());
        assert_eq!(editor.selected(), None);
    }
}
