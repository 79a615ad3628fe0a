//! Property discovery: turns an object's surface into descriptors.
//!
//! Accessor discovery is split in three steps so each can be tested on its
//! own: readers are collected, then writers, then the two lists are joined
//! by canonical name. Fields are an independent, additive pass that never
//! overrides an accessor-derived property.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::descriptor::{AccessMode, PropertyDescriptor};
use crate::error::EnumerationError;
use crate::metadata::{self, DEFAULT_CATEGORY, DisplayInfo, MetadataProvider};
use crate::surface::{Field, Inspect, Method, ReadFn, Signature, Surface, WriteFn};
use crate::value::ValueType;

/// Which parts of the surface are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectOptions {
    /// Only members carrying display metadata are enumerated.
    pub require_metadata: bool,
    /// Discover reader/writer method pairs.
    pub load_accessors: bool,
    /// Discover public fields.
    pub load_fields: bool,
}

impl Default for ReflectOptions {
    fn default() -> Self {
        Self {
            require_metadata: false,
            load_accessors: true,
            load_fields: false,
        }
    }
}

/// Role an accessor name plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorRole {
    Reader,
    Writer,
}

/// Result of classifying a method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorName<'a> {
    pub role: AccessorRole,
    pub canonical: &'a str,
    /// Came from an `is` reader or `setIs` writer.
    pub is_style: bool,
}

fn strip<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

/// `is`-style prefixes only count at a word boundary, so `isolate` and
/// `setIssue` are not mistaken for boolean accessors.
fn strip_at_boundary<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    strip(name, prefix).filter(|rest| rest.chars().next().is_some_and(|c| !c.is_lowercase()))
}

/// Classify a method name as a reader or writer and extract its canonical
/// property name.
pub fn classify(name: &str) -> Option<AccessorName<'_>> {
    let (role, canonical, is_style) = if let Some(rest) = strip(name, "get") {
        (AccessorRole::Reader, rest, false)
    } else if let Some(rest) = strip_at_boundary(name, "is") {
        (AccessorRole::Reader, rest, true)
    } else if let Some(rest) = strip_at_boundary(name, "setIs") {
        (AccessorRole::Writer, rest, true)
    } else if let Some(rest) = strip(name, "set") {
        (AccessorRole::Writer, rest, false)
    } else {
        return None;
    };
    Some(AccessorName {
        role,
        canonical,
        is_style,
    })
}

/// Canonical name of a field: its name without an `is` prefix.
pub fn field_canonical(name: &str) -> (&str, bool) {
    match strip_at_boundary(name, "is") {
        Some(rest) => (rest, true),
        None => (name, false),
    }
}

/// Label shown for a property.
///
/// Metadata wins when it has a non-empty display name. Otherwise the
/// canonical name is used, with `is` restored for is-style properties.
pub fn display_name(canonical: &str, info: Option<&DisplayInfo>, is_style: bool) -> String {
    let name = match info {
        Some(info) if !info.display_name.is_empty() => info.display_name.clone(),
        _ => canonical.to_string(),
    };
    if is_style && name == canonical {
        format!("is{name}")
    } else {
        name
    }
}

/// A reader or writer found on the surface, before joining.
#[derive(Clone)]
pub struct Candidate<H> {
    pub canonical: String,
    pub member: String,
    /// Position on the surface, used to keep discovery order.
    pub order: usize,
    pub value_type: ValueType,
    pub handle: H,
    pub is_style: bool,
    pub info: Option<DisplayInfo>,
}

/// One discovery pass over an object's surface.
pub struct Reflector<'a> {
    options: ReflectOptions,
    metadata: &'a dyn MetadataProvider,
}

impl<'a> Reflector<'a> {
    pub fn new(options: ReflectOptions, metadata: &'a dyn MetadataProvider) -> Self {
        Self { options, metadata }
    }

    /// Enumerate the properties of `object` in discovery order.
    pub fn enumerate(
        &self,
        object: &dyn Inspect,
    ) -> Result<Vec<PropertyDescriptor>, EnumerationError> {
        let surface = object.surface()?;
        self.enumerate_surface(&surface)
    }

    /// Enumerate the properties described by `surface`.
    pub fn enumerate_surface(
        &self,
        surface: &Surface,
    ) -> Result<Vec<PropertyDescriptor>, EnumerationError> {
        let mut descriptors = Vec::new();

        if self.options.load_accessors {
            let readers = self.collect_readers(&surface.methods);
            let writers = self.collect_writers(&surface.methods);
            descriptors = join(readers, writers);
        }

        if self.options.load_fields {
            // Only names produced by this pass's accessor step can collide.
            let fields = {
                let taken: HashSet<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
                self.collect_fields(&surface.fields, &taken)
            };
            descriptors.extend(fields);
        }

        log::trace!(
            "enumerated {} properties on {}",
            descriptors.len(),
            surface.type_name
        );
        Ok(descriptors)
    }

    fn resolve_info(
        &self,
        inline: Option<&DisplayInfo>,
        member: &str,
        canonical: &str,
    ) -> Option<Option<DisplayInfo>> {
        let info = metadata::resolve(inline, self.metadata, member, canonical);
        if self.options.require_metadata && info.is_none() {
            log::trace!("skipping `{member}`: no display metadata");
            return None;
        }
        Some(info)
    }

    /// First pass: every method classified as a reader. The first reader
    /// of a canonical name wins.
    pub fn collect_readers(&self, methods: &[Method]) -> Vec<Candidate<ReadFn>> {
        let mut readers: Vec<Candidate<ReadFn>> = Vec::new();
        for (order, method) in methods.iter().enumerate() {
            let Some(accessor) = classify(&method.name) else {
                continue;
            };
            if accessor.role != AccessorRole::Reader {
                continue;
            }
            let Signature::Reader { returns, read } = &method.signature else {
                log::trace!("`{}` is named like a reader but is not one", method.name);
                continue;
            };
            let Some(info) = self.resolve_info(method.info.as_ref(), &method.name, accessor.canonical)
            else {
                continue;
            };
            if readers.iter().any(|r| r.canonical == accessor.canonical) {
                log::debug!(
                    "reader `{}` ignored: `{}` already has one",
                    method.name,
                    accessor.canonical
                );
                continue;
            }
            readers.push(Candidate {
                canonical: accessor.canonical.to_string(),
                member: method.name.clone(),
                order,
                value_type: returns.clone(),
                handle: read.clone(),
                is_style: accessor.is_style,
                info,
            });
        }
        readers
    }

    /// Second pass: every method classified as a writer.
    pub fn collect_writers(&self, methods: &[Method]) -> Vec<Candidate<WriteFn>> {
        let mut writers: Vec<Candidate<WriteFn>> = Vec::new();
        for (order, method) in methods.iter().enumerate() {
            let Some(accessor) = classify(&method.name) else {
                continue;
            };
            if accessor.role != AccessorRole::Writer {
                continue;
            }
            let Signature::Writer { param, write } = &method.signature else {
                log::trace!("`{}` is named like a writer but is not one", method.name);
                continue;
            };
            let Some(info) = self.resolve_info(method.info.as_ref(), &method.name, accessor.canonical)
            else {
                continue;
            };
            if writers.iter().any(|w| w.canonical == accessor.canonical) {
                log::debug!(
                    "writer `{}` ignored: `{}` already has one",
                    method.name,
                    accessor.canonical
                );
                continue;
            }
            writers.push(Candidate {
                canonical: accessor.canonical.to_string(),
                member: method.name.clone(),
                order,
                value_type: param.clone(),
                handle: write.clone(),
                is_style: accessor.is_style,
                info,
            });
        }
        writers
    }

    /// Field pass. Fields whose canonical name is in `taken` are skipped.
    pub fn collect_fields(
        &self,
        fields: &[Field],
        taken: &HashSet<&str>,
    ) -> Vec<PropertyDescriptor> {
        let mut descriptors: Vec<PropertyDescriptor> = Vec::new();
        for field in fields {
            let (canonical, is_style) = field_canonical(&field.name);
            let Some(info) = self.resolve_info(field.info.as_ref(), &field.name, canonical) else {
                continue;
            };
            if taken.contains(canonical) {
                log::trace!("field `{}` shadowed by accessors", field.name);
                continue;
            }
            if descriptors.iter().any(|d| d.name == canonical) {
                log::debug!("field `{}` ignored: `{canonical}` already has one", field.name);
                continue;
            }
            descriptors.push(describe(
                canonical,
                field.value_type.clone(),
                info,
                is_style,
                AccessMode::Field,
                Some(field.read.clone()),
                field.write.clone(),
            ));
        }
        descriptors
    }
}

fn describe(
    canonical: &str,
    value_type: ValueType,
    info: Option<DisplayInfo>,
    is_style: bool,
    access: AccessMode,
    reader: Option<ReadFn>,
    writer: Option<WriteFn>,
) -> PropertyDescriptor {
    let display_name = display_name(canonical, info.as_ref(), is_style);
    let (description, category) = match info {
        Some(info) => (info.description, info.category),
        None => (String::new(), DEFAULT_CATEGORY.to_string()),
    };
    PropertyDescriptor {
        name: canonical.to_string(),
        value_type,
        display_name,
        description,
        category,
        is_boolean_like: is_style,
        access,
        reader,
        writer,
    }
}

/// Join readers and writers by canonical name, ordered by first appearance.
///
/// The value type comes from the reader; a writer-only property keeps the
/// writer's parameter type but is not displayable.
pub fn join(
    readers: Vec<Candidate<ReadFn>>,
    writers: Vec<Candidate<WriteFn>>,
) -> Vec<PropertyDescriptor> {
    let mut pairs: HashMap<String, (Option<Candidate<ReadFn>>, Option<Candidate<WriteFn>>)> =
        HashMap::new();
    let mut order: Vec<(usize, String)> = Vec::new();

    for reader in readers {
        let key = reader.canonical.clone();
        order.push((reader.order, key.clone()));
        pairs.entry(key).or_default().0 = Some(reader);
    }
    for writer in writers {
        let entry = pairs.entry(writer.canonical.clone()).or_default();
        if entry.0.is_none() {
            order.push((writer.order, writer.canonical.clone()));
        } else if let Some(slot) = order.iter_mut().find(|(_, name)| *name == writer.canonical) {
            slot.0 = slot.0.min(writer.order);
        }
        entry.1 = Some(writer);
    }
    order.sort_by_key(|(position, _)| *position);

    order
        .into_iter()
        .filter_map(|(_, name)| {
            let (reader, writer) = pairs.remove(&name)?;
            let is_style = reader.as_ref().is_some_and(|r| r.is_style)
                || writer.as_ref().is_some_and(|w| w.is_style);
            let info = reader
                .as_ref()
                .and_then(|r| r.info.clone())
                .or_else(|| writer.as_ref().and_then(|w| w.info.clone()));
            let (canonical, value_type) = match (&reader, &writer) {
                (Some(r), _) => (r.canonical.clone(), r.value_type.clone()),
                (None, Some(w)) => (w.canonical.clone(), w.value_type.clone()),
                (None, None) => return None,
            };
            Some(describe(
                &canonical,
                value_type,
                info,
                is_style,
                AccessMode::Methods,
                reader.map(|r| r.handle),
                writer.map(|w| w.handle),
            ))
        })
        .collect()
}
