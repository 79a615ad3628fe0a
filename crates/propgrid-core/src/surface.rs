//! The introspectable surface of a bindable object.
//!
//! An object opts into property editing by implementing [`Inspect`] and
//! describing its public methods and fields with a [`SurfaceBuilder`].
//! The builder turns typed closures into erased read/write handles so the
//! reflector and binding engine never see the concrete type.

use std::any::{Any, type_name};
use std::rc::Rc;

use crate::error::{AccessError, EnumerationError, ReadError, WriteError};
use crate::metadata::DisplayInfo;
use crate::value::{PropertyValue, Value, ValueType};

/// Erased reader: produces the current value, or `None` for "no value".
pub type ReadFn = Rc<dyn Fn(&dyn Any) -> Result<Option<Value>, ReadError>>;

/// Erased writer.
pub type WriteFn = Rc<dyn Fn(&mut dyn Any, Value) -> Result<(), WriteError>>;

/// Upcast helper implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An object whose properties can be listed and edited.
pub trait Inspect: AsAny {
    /// Describe the public methods and fields of this object, in
    /// declaration order.
    fn surface(&self) -> Result<Surface, EnumerationError>;
}

/// Shape of a public method.
#[derive(Clone)]
pub enum Signature {
    /// Takes no arguments and returns a value.
    Reader { returns: ValueType, read: ReadFn },
    /// Takes one value and returns nothing.
    Writer { param: ValueType, write: WriteFn },
    /// Anything else; never treated as an accessor.
    Other,
}

/// A public method on the surface.
#[derive(Clone)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
    pub info: Option<DisplayInfo>,
}

/// A public field on the surface.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub value_type: ValueType,
    pub read: ReadFn,
    /// `None` for fields that cannot be assigned.
    pub write: Option<WriteFn>,
    pub info: Option<DisplayInfo>,
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.signature {
            Signature::Reader { returns, .. } => format!("reader -> {}", returns.name()),
            Signature::Writer { param, .. } => format!("writer({})", param.name()),
            Signature::Other => "other".to_string(),
        };
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("signature", &kind)
            .field("info", &self.info)
            .finish()
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("writable", &self.write.is_some())
            .field("info", &self.info)
            .finish()
    }
}

/// Ordered public methods and fields of one object.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    pub type_name: String,
    pub methods: Vec<Method>,
    pub fields: Vec<Field>,
}

impl Surface {
    /// Start describing the surface of `T`.
    pub fn builder<T: Any>() -> SurfaceBuilder<T> {
        SurfaceBuilder::new()
    }
}

fn short_type_name<T>() -> String {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}

fn downcast_ref<T: Any>(object: &dyn Any) -> Result<&T, ReadError> {
    object.downcast_ref::<T>().ok_or(ReadError::TypeMismatch {
        expected: type_name::<T>(),
    })
}

fn downcast_mut<T: Any>(object: &mut dyn Any) -> Result<&mut T, WriteError> {
    object.downcast_mut::<T>().ok_or(WriteError::TypeMismatch {
        expected: type_name::<T>(),
        found: "object",
    })
}

fn convert<V: PropertyValue>(value: Value) -> Result<V, WriteError> {
    let found = value.kind();
    V::from_value(value).ok_or(WriteError::TypeMismatch {
        expected: V::type_name(),
        found,
    })
}

enum Member {
    Method(usize),
    Field(usize),
}

/// Typed builder for a [`Surface`].
///
/// ```
/// use propgrid_core::{EnumerationError, Inspect, Surface};
///
/// struct Point { x: i32 }
///
/// impl Inspect for Point {
///     fn surface(&self) -> Result<Surface, EnumerationError> {
///         Ok(Surface::builder::<Point>()
///             .getter("getX", |p| p.x)
///             .setter("setX", |p, v| p.x = v)
///             .build())
///     }
/// }
///
/// let surface = Point { x: 1 }.surface().unwrap();
/// assert_eq!(surface.methods.len(), 2);
/// ```
pub struct SurfaceBuilder<T> {
    surface: Surface,
    last: Option<Member>,
    _object: std::marker::PhantomData<fn(T)>,
}

impl<T: Any> SurfaceBuilder<T> {
    fn new() -> Self {
        Self {
            surface: Surface {
                type_name: short_type_name::<T>(),
                methods: Vec::new(),
                fields: Vec::new(),
            },
            last: None,
            _object: std::marker::PhantomData,
        }
    }

    fn push_method(mut self, name: &str, signature: Signature) -> Self {
        self.surface.methods.push(Method {
            name: name.to_string(),
            signature,
            info: None,
        });
        self.last = Some(Member::Method(self.surface.methods.len() - 1));
        self
    }

    /// Register a reader method.
    pub fn getter<V, F>(self, name: &str, get: F) -> Self
    where
        V: PropertyValue,
        F: Fn(&T) -> V + 'static,
    {
        self.try_getter(name, move |object| Ok(Some(get(object))))
    }

    /// Register a reader method that may fail or have no value.
    pub fn try_getter<V, F>(self, name: &str, get: F) -> Self
    where
        V: PropertyValue,
        F: Fn(&T) -> Result<Option<V>, AccessError> + 'static,
    {
        let read: ReadFn = Rc::new(
            move |object: &dyn Any| -> Result<Option<Value>, ReadError> {
                let object = downcast_ref::<T>(object)?;
                Ok(get(object)?.map(PropertyValue::into_value))
            },
        );
        self.push_method(
            name,
            Signature::Reader {
                returns: V::value_type(),
                read,
            },
        )
    }

    /// Register a reader whose return type has no editor.
    pub fn opaque_getter(self, name: &str, type_name: &str) -> Self {
        let unsupported = type_name.to_string();
        let read: ReadFn = Rc::new(move |_: &dyn Any| -> Result<Option<Value>, ReadError> {
            Err(ReadError::Unsupported(unsupported.clone()))
        });
        self.push_method(
            name,
            Signature::Reader {
                returns: ValueType::Unsupported(type_name.to_string()),
                read,
            },
        )
    }

    /// Register a writer method.
    pub fn setter<V, F>(self, name: &str, set: F) -> Self
    where
        V: PropertyValue,
        F: Fn(&mut T, V) + 'static,
    {
        self.try_setter(name, move |object, value| {
            set(object, value);
            Ok(())
        })
    }

    /// Register a writer method that may reject the value.
    pub fn try_setter<V, F>(self, name: &str, set: F) -> Self
    where
        V: PropertyValue,
        F: Fn(&mut T, V) -> Result<(), AccessError> + 'static,
    {
        let write: WriteFn = Rc::new(
            move |object: &mut dyn Any, value: Value| -> Result<(), WriteError> {
                let value = convert::<V>(value)?;
                let object = downcast_mut::<T>(object)?;
                set(object, value)?;
                Ok(())
            },
        );
        self.push_method(
            name,
            Signature::Writer {
                param: V::value_type(),
                write,
            },
        )
    }

    /// Register a public method that is not an accessor.
    pub fn method(self, name: &str) -> Self {
        self.push_method(name, Signature::Other)
    }

    /// Register an assignable public field.
    pub fn field<V, G, S>(mut self, name: &str, get: G, set: S) -> Self
    where
        V: PropertyValue,
        G: Fn(&T) -> V + 'static,
        S: Fn(&mut T, V) + 'static,
    {
        let write: WriteFn = Rc::new(
            move |object: &mut dyn Any, value: Value| -> Result<(), WriteError> {
                let value = convert::<V>(value)?;
                set(downcast_mut::<T>(object)?, value);
                Ok(())
            },
        );
        self.surface.fields.push(Self::make_field(name, get, Some(write)));
        self.last = Some(Member::Field(self.surface.fields.len() - 1));
        self
    }

    /// Register a public field that cannot be assigned.
    pub fn readonly_field<V, G>(mut self, name: &str, get: G) -> Self
    where
        V: PropertyValue,
        G: Fn(&T) -> V + 'static,
    {
        self.surface.fields.push(Self::make_field(name, get, None));
        self.last = Some(Member::Field(self.surface.fields.len() - 1));
        self
    }

    fn make_field<V, G>(name: &str, get: G, write: Option<WriteFn>) -> Field
    where
        V: PropertyValue,
        G: Fn(&T) -> V + 'static,
    {
        let read: ReadFn = Rc::new(
            move |object: &dyn Any| -> Result<Option<Value>, ReadError> {
                let object = downcast_ref::<T>(object)?;
                Ok(Some(get(object).into_value()))
            },
        );
        Field {
            name: name.to_string(),
            value_type: V::value_type(),
            read,
            write,
            info: None,
        }
    }

    /// Attach display metadata to the most recently registered member.
    pub fn info(mut self, info: DisplayInfo) -> Self {
        match self.last {
            Some(Member::Method(index)) => self.surface.methods[index].info = Some(info),
            Some(Member::Field(index)) => self.surface.fields[index].info = Some(info),
            None => log::warn!("display info `{}` has no member to attach to", info.display_name),
        }
        self
    }

    pub fn build(self) -> Surface {
        self.surface
    }
}
