//! Form-to-wire serialization.
//!
//! The product editor submits a nested value graph - scalars, booleans,
//! staged files, lists, and nested objects - as a flat `multipart/form-data`
//! body. Structure is encoded in the keys using conventional bracket
//! notation, which the backend's form parser reassembles:
//!
//! - nested objects namespace their keys: `dimensions[weight]`
//! - lists of objects are indexed: `variants[0][name]`
//! - lists of bare files or scalars repeat the key: `images[]`, `tags[]`
//!
//! The flattener is pure and total over [`FormValue`]: the enum makes
//! malformed input unrepresentable, so it never errors. Building the actual
//! `reqwest` body from the flattened parts happens at the API boundary.

use rust_decimal::Decimal;

/// A staged binary upload: an in-memory file attached to a form but not yet
/// sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name, forwarded in the part's `filename`.
    pub file_name: String,
    /// MIME type (e.g. `image/jpeg`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create a staged upload from raw bytes.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// One node in the form value graph.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Omitted from the wire entirely - never sent as an empty string.
    Null,
    /// Rendered per the call site's [`BoolStyle`].
    Bool(bool),
    Int(i64),
    /// Money and dimensions; rendered with the default display form,
    /// never locale-formatted.
    Decimal(Decimal),
    Text(String),
    File(FileUpload),
    List(Vec<FormValue>),
    Map(FormMap),
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for FormValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<FileUpload> for FormValue {
    fn from(value: FileUpload) -> Self {
        Self::File(value)
    }
}

impl From<FormMap> for FormValue {
    fn from(value: FormMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An ordered key-value mapping; field order is preserved on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormMap {
    entries: Vec<(String, FormValue)>,
}

impl FormMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a field. Keys are not deduplicated; callers control order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of fields (before flattening).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FormMap {
    type Item = (String, FormValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Wire rendering of booleans.
///
/// Most fields use the literal `true`/`false`; legacy status flags are sent
/// as `1`/`0` instead. The convention is chosen per call site, not
/// hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolStyle {
    /// `true` / `false`
    #[default]
    TrueFalse,
    /// `1` / `0`
    OneZero,
}

impl BoolStyle {
    fn render(self, value: bool) -> String {
        match self {
            Self::TrueFalse => value.to_string(),
            Self::OneZero => u8::from(value).to_string(),
        }
    }
}

/// A flattened leaf: either a text field or a binary field.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Text(String),
    File(FileUpload),
}

/// One `(key, value)` pair of the flat multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct WirePart {
    pub key: String,
    pub value: WireValue,
}

/// Flatten a form value graph into multipart parts.
///
/// `Null` leaves are omitted. List notation depends on element shape: lists
/// containing objects flatten with explicit indices so sibling fields stay
/// grouped (`key[0][field]`); lists of bare files or scalars use the
/// repeated bracket-empty form (`key[]`).
#[must_use]
pub fn flatten(map: FormMap, bools: BoolStyle) -> Vec<WirePart> {
    let mut parts = Vec::new();
    for (key, value) in map {
        flatten_value(&mut parts, key, value, bools);
    }
    parts
}

fn flatten_value(parts: &mut Vec<WirePart>, key: String, value: FormValue, bools: BoolStyle) {
    match value {
        FormValue::Null => {}
        FormValue::Bool(b) => parts.push(WirePart {
            key,
            value: WireValue::Text(bools.render(b)),
        }),
        FormValue::Int(n) => parts.push(WirePart {
            key,
            value: WireValue::Text(n.to_string()),
        }),
        FormValue::Decimal(d) => parts.push(WirePart {
            key,
            value: WireValue::Text(d.to_string()),
        }),
        FormValue::Text(s) => parts.push(WirePart {
            key,
            value: WireValue::Text(s),
        }),
        FormValue::File(file) => parts.push(WirePart {
            key,
            value: WireValue::File(file),
        }),
        FormValue::Map(map) => {
            for (child_key, child) in map {
                flatten_value(parts, format!("{key}[{child_key}]"), child, bools);
            }
        }
        FormValue::List(items) => {
            let indexed = items.iter().any(|item| matches!(item, FormValue::Map(_)));
            for (index, item) in items.into_iter().enumerate() {
                let child_key = if indexed {
                    format!("{key}[{index}]")
                } else {
                    format!("{key}[]")
                };
                flatten_value(parts, child_key, item, bools);
            }
        }
    }
}
