//! Property values, their semantic types and number formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Closed, ordered set of variant names for an enum-typed property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariants {
    type_name: String,
    variants: Vec<String>,
}

impl EnumVariants {
    /// Create a variant set in declaration order.
    pub fn new<I, S>(type_name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the variant set of a Rust enum.
    pub fn of<E: EnumProperty>() -> Self {
        Self::new(
            E::TYPE_NAME,
            E::variants().iter().map(|variant| variant.variant_name()),
        )
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Check whether `name` is exactly one of the variants.
    pub fn contains(&self, name: &str) -> bool {
        self.variants.iter().any(|variant| variant == name)
    }
}

/// Semantic type tag of a property, taken from its reader or field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    Double,
    Boolean,
    String,
    Enum(EnumVariants),
    /// Any other type; never gets an editor.
    Unsupported(String),
}

impl ValueType {
    /// Human readable type name.
    pub fn name(&self) -> &str {
        match self {
            ValueType::Integer => "Integer",
            ValueType::Float => "Float",
            ValueType::Double => "Double",
            ValueType::Boolean => "Boolean",
            ValueType::String => "String",
            ValueType::Enum(variants) => variants.type_name(),
            ValueType::Unsupported(name) => name,
        }
    }

    /// Check if the type is a numeric scalar.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float | ValueType::Double)
    }

    /// Check if values of this type can be displayed and edited.
    pub fn is_supported(&self) -> bool {
        !matches!(self, ValueType::Unsupported(_))
    }
}

/// A typed property value crossing the binding boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i32),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    /// Variant name of an enum value.
    Enum(String),
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Boolean(_) => "Boolean",
            Value::String(_) => "String",
            Value::Enum(_) => "Enum",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&NumberFormat::default().format(self))
    }
}

/// Conversion between a Rust type and [`Value`].
pub trait PropertyValue: Sized + 'static {
    /// The semantic type reported for readers, writers and fields of this type.
    fn value_type() -> ValueType;

    /// Type name used in mismatch errors.
    fn type_name() -> &'static str;

    fn into_value(self) -> Value;

    /// Convert back, or `None` if the value has a different kind.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! scalar_property {
    ($ty:ty, $variant:ident, $label:literal) => {
        impl PropertyValue for $ty {
            fn value_type() -> ValueType {
                ValueType::$variant
            }

            fn type_name() -> &'static str {
                $label
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

scalar_property!(i32, Integer, "Integer");
scalar_property!(f32, Float, "Float");
scalar_property!(f64, Double, "Double");
scalar_property!(bool, Boolean, "Boolean");
scalar_property!(String, String, "String");

/// A fieldless Rust enum usable as a property type.
///
/// ```
/// use propgrid_core::EnumProperty;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Color { Red, Green }
///
/// impl EnumProperty for Color {
///     const TYPE_NAME: &'static str = "Color";
///     fn variants() -> &'static [Self] { &[Color::Red, Color::Green] }
///     fn variant_name(&self) -> &'static str {
///         match self { Color::Red => "RED", Color::Green => "GREEN" }
///     }
/// }
///
/// assert_eq!(Color::from_variant_name("GREEN"), Some(Color::Green));
/// ```
pub trait EnumProperty: Copy + 'static {
    const TYPE_NAME: &'static str;

    /// All variants in declaration order.
    fn variants() -> &'static [Self];

    fn variant_name(&self) -> &'static str;

    /// Look a variant up by exact name.
    fn from_variant_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.variant_name() == name)
    }
}

impl<E: EnumProperty> PropertyValue for E {
    fn value_type() -> ValueType {
        ValueType::Enum(EnumVariants::of::<E>())
    }

    fn type_name() -> &'static str {
        <E as EnumProperty>::TYPE_NAME
    }

    fn into_value(self) -> Value {
        Value::Enum(self.variant_name().to_string())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Enum(name) => E::from_variant_name(&name),
            _ => None,
        }
    }
}

/// Locale settings for numeric parsing and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Character separating the integer and fractional parts.
    pub decimal_separator: char,
    /// Optional thousands separator, ignored on input.
    pub grouping_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: None,
        }
    }
}

impl NumberFormat {
    /// Rewrite localized input into the form Rust's parsers accept.
    fn normalize(&self, raw: &str) -> Option<String> {
        let mut normalized = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if Some(ch) == self.grouping_separator {
                continue;
            }
            if ch == self.decimal_separator {
                normalized.push('.');
            } else if ch == '.' {
                // A literal '.' is only valid when it is the decimal separator.
                return None;
            } else {
                normalized.push(ch);
            }
        }
        Some(normalized)
    }

    /// Parse an integer. Surrounding whitespace is rejected.
    pub fn parse_integer(&self, raw: &str) -> Result<i32, ParseError> {
        self.normalize(raw)
            .and_then(|normalized| normalized.parse::<i32>().ok())
            .ok_or_else(|| ParseError::Integer(raw.to_string()))
    }

    /// Parse a single-precision float. Surrounding whitespace is ignored.
    pub fn parse_float(&self, raw: &str) -> Result<f32, ParseError> {
        self.normalize(raw.trim())
            .and_then(|normalized| normalized.parse::<f32>().ok())
            .ok_or_else(|| ParseError::Float(raw.to_string()))
    }

    /// Parse a double-precision float. Surrounding whitespace is ignored.
    pub fn parse_double(&self, raw: &str) -> Result<f64, ParseError> {
        self.normalize(raw.trim())
            .and_then(|normalized| normalized.parse::<f64>().ok())
            .ok_or_else(|| ParseError::Float(raw.to_string()))
    }

    /// Render a value in its canonical display form.
    ///
    /// Floats use the shortest representation that round-trips, keeping a
    /// trailing `.0` on whole numbers.
    pub fn format(&self, value: &Value) -> String {
        match value {
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => self.localize(format!("{v:?}")),
            Value::Double(v) => self.localize(format!("{v:?}")),
            Value::Boolean(v) => v.to_string(),
            Value::String(v) | Value::Enum(v) => v.clone(),
        }
    }

    fn localize(&self, repr: String) -> String {
        if self.decimal_separator == '.' {
            repr
        } else {
            repr.replace('.', &self.decimal_separator.to_string())
        }
    }
}

/// Parse raw editor input according to the property type.
pub fn parse_input(
    value_type: &ValueType,
    raw: &str,
    format: &NumberFormat,
) -> Result<Value, ParseError> {
    match value_type {
        ValueType::Integer => format.parse_integer(raw).map(Value::Integer),
        ValueType::Float => format.parse_float(raw).map(Value::Float),
        ValueType::Double => format.parse_double(raw).map(Value::Double),
        ValueType::Boolean => match raw {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(ParseError::Boolean(raw.to_string())),
        },
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Enum(variants) => {
            if variants.contains(raw) {
                Ok(Value::Enum(raw.to_string()))
            } else {
                Err(ParseError::Variant {
                    input: raw.to_string(),
                    type_name: variants.type_name().to_string(),
                })
            }
        }
        ValueType::Unsupported(name) => Err(ParseError::Unsupported(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl EnumProperty for Color {
        const TYPE_NAME: &'static str = "Color";

        fn variants() -> &'static [Self] {
            &[Color::Red, Color::Green, Color::Blue]
        }

        fn variant_name(&self) -> &'static str {
            match self {
                Color::Red => "RED",
                Color::Green => "GREEN",
                Color::Blue => "BLUE",
            }
        }
    }

    #[test]
    fn test_enum_variants_keep_declaration_order() {
        let ValueType::Enum(variants) = Color::value_type() else {
            panic!("expected enum type");
        };
        assert_eq!(variants.type_name(), "Color");
        assert_eq!(variants.variants(), ["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn test_enum_from_value() {
        assert_eq!(
            Color::from_value(Value::Enum("BLUE".into())),
            Some(Color::Blue)
        );
        assert_eq!(Color::from_value(Value::Enum("blue".into())), None);
        assert_eq!(Color::from_value(Value::Integer(2)), None);
    }

    #[test]
    fn test_parse_integer() {
        let format = NumberFormat::default();
        assert_eq!(parse_input(&ValueType::Integer, "10", &format), Ok(Value::Integer(10)));
        assert_eq!(parse_input(&ValueType::Integer, "-7", &format), Ok(Value::Integer(-7)));
        assert!(matches!(
            parse_input(&ValueType::Integer, "abc", &format),
            Err(ParseError::Integer(_))
        ));
        assert!(parse_input(&ValueType::Integer, " 10", &format).is_err());
        assert!(parse_input(&ValueType::Integer, "1.5", &format).is_err());
        assert!(parse_input(&ValueType::Integer, "", &format).is_err());
    }

    #[test]
    fn test_parse_float_trims_whitespace() {
        let format = NumberFormat::default();
        assert_eq!(parse_input(&ValueType::Float, " 1.5 ", &format), Ok(Value::Float(1.5)));
        assert_eq!(parse_input(&ValueType::Double, "2", &format), Ok(Value::Double(2.0)));
        assert!(parse_input(&ValueType::Double, "1.2.3", &format).is_err());
    }

    #[test]
    fn test_parse_localized_numbers() {
        let format = NumberFormat {
            decimal_separator: ',',
            grouping_separator: Some('.'),
        };
        assert_eq!(format.parse_double("1.234,5"), Ok(1234.5));
        assert_eq!(format.parse_integer("1.000"), Ok(1000));

        let no_grouping = NumberFormat {
            decimal_separator: ',',
            grouping_separator: None,
        };
        assert!(no_grouping.parse_double("1.5").is_err());
        assert_eq!(no_grouping.parse_double("1,5"), Ok(1.5));
    }

    #[test]
    fn test_parse_boolean_is_case_sensitive() {
        let format = NumberFormat::default();
        assert_eq!(parse_input(&ValueType::Boolean, "true", &format), Ok(Value::Boolean(true)));
        assert_eq!(parse_input(&ValueType::Boolean, "false", &format), Ok(Value::Boolean(false)));
        assert!(parse_input(&ValueType::Boolean, "TRUE", &format).is_err());
        assert!(parse_input(&ValueType::Boolean, "yes", &format).is_err());
    }

    #[test]
    fn test_parse_enum_exact_match() {
        let format = NumberFormat::default();
        let ty = Color::value_type();
        assert_eq!(parse_input(&ty, "GREEN", &format), Ok(Value::Enum("GREEN".into())));
        assert!(matches!(
            parse_input(&ty, "Green", &format),
            Err(ParseError::Variant { .. })
        ));
    }

    #[test]
    fn test_parse_unsupported() {
        let ty = ValueType::Unsupported("Image".into());
        assert_eq!(
            parse_input(&ty, "x", &NumberFormat::default()),
            Err(ParseError::Unsupported("Image".into()))
        );
    }

    #[test]
    fn test_format_values() {
        let format = NumberFormat::default();
        assert_eq!(format.format(&Value::Integer(3)), "3");
        assert_eq!(format.format(&Value::Float(10.0)), "10.0");
        assert_eq!(format.format(&Value::Double(0.25)), "0.25");
        assert_eq!(format.format(&Value::Boolean(false)), "false");
        assert_eq!(format.format(&Value::Enum("RED".into())), "RED");

        let comma = NumberFormat {
            decimal_separator: ',',
            grouping_separator: None,
        };
        assert_eq!(comma.format(&Value::Double(2.5)), "2,5");
    }

    #[test]
    fn test_formatted_floats_parse_back() {
        let format = NumberFormat {
            decimal_separator: ',',
            grouping_separator: None,
        };
        for v in [0.1f64, 1e-7, 123456.75, -3.0] {
            let shown = format.format(&Value::Double(v));
            assert_eq!(format.parse_double(&shown), Ok(v));
        }
    }
}
