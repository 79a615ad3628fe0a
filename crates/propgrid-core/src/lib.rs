//! PropGrid Core Library
//!
//! Toolkit-agnostic property grid: discovers the properties of an object,
//! picks an editor per property type and keeps edits and object in sync.

pub mod binding;
pub mod config;
pub mod descriptor;
pub mod editor;
pub mod error;
pub mod grid;
pub mod metadata;
pub mod picture;
pub mod reflector;
pub mod session;
pub mod surface;
pub mod value;

pub use config::{ColumnTitles, GridOptions};
pub use descriptor::{AccessMode, PropertyDescriptor};
pub use editor::{BOOLEAN_CHOICES, EditorContent, EditorKind, EditorWidget, create_editor};
pub use error::{
    AccessError, BindingError, BindingResult, EnumerationError, LoadError, ParseError, ReadError,
    WriteError,
};
pub use grid::{BoundObject, DiagnosticsFn, PropertyGrid};
pub use metadata::{DEFAULT_CATEGORY, DisplayInfo, MetadataProvider, MetadataTable, NoMetadata};
pub use picture::{PictureBox, PictureLayout, SizeMode};
pub use reflector::{ReflectOptions, Reflector};
pub use session::{BindingSession, Row};
pub use surface::{AsAny, Field, Inspect, Method, Signature, Surface, SurfaceBuilder};
pub use value::{EnumProperty, EnumVariants, NumberFormat, PropertyValue, Value, ValueType};
