//! Grid configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::reflector::ReflectOptions;
use crate::value::NumberFormat;

/// Titles shown in the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTitles {
    pub first: String,
    pub second: String,
}

/// Options controlling discovery, the header row and number formatting.
///
/// Discovery options take effect on the next bind or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Only show properties with display metadata.
    pub require_metadata: bool,
    /// Discover reader/writer method pairs.
    pub load_accessors: bool,
    /// Discover public fields.
    pub load_fields: bool,
    pub first_column_title: Option<String>,
    pub second_column_title: Option<String>,
    pub number_format: NumberFormat,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            require_metadata: false,
            load_accessors: true,
            load_fields: false,
            first_column_title: None,
            second_column_title: None,
            number_format: NumberFormat::default(),
        }
    }
}

impl GridOptions {
    pub fn reflect_options(&self) -> ReflectOptions {
        ReflectOptions {
            require_metadata: self.require_metadata,
            load_accessors: self.load_accessors,
            load_fields: self.load_fields,
        }
    }

    /// Header titles, or `None` when neither title is set.
    ///
    /// A missing title renders as an empty label.
    pub fn column_titles(&self) -> Option<ColumnTitles> {
        if self.first_column_title.is_none() && self.second_column_title.is_none() {
            return None;
        }
        Some(ColumnTitles {
            first: self.first_column_title.clone().unwrap_or_default(),
            second: self.second_column_title.clone().unwrap_or_default(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json(&json)?;
        log::info!("Loaded grid options from {}", path.display());
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = GridOptions::default();
        assert!(!options.require_metadata);
        assert!(options.load_accessors);
        assert!(!options.load_fields);
        assert_eq!(options.column_titles(), None);
        assert_eq!(options.reflect_options(), ReflectOptions::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = GridOptions::from_json(
            r#"{ "load_fields": true, "number_format": { "decimal_separator": "," } }"#,
        )
        .unwrap();
        assert!(options.load_fields);
        assert!(options.load_accessors);
        assert_eq!(options.number_format.decimal_separator, ',');
        assert_eq!(options.number_format.grouping_separator, None);
    }

    #[test]
    fn test_single_title_gets_empty_partner() {
        let options = GridOptions {
            second_column_title: Some("Value".into()),
            ..Default::default()
        };
        assert_eq!(
            options.column_titles(),
            Some(ColumnTitles {
                first: String::new(),
                second: "Value".into(),
            })
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "require_metadata": true, "first_column_title": "Name" }}"#).unwrap();

        let options = GridOptions::load(file.path()).unwrap();
        assert!(options.require_metadata);
        assert_eq!(options.column_titles().unwrap().first, "Name");
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GridOptions::from_json("{ load_fields: "),
            Err(LoadError::Json(_))
        ));
    }
}
