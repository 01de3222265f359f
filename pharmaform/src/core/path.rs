//! Field path addressing for validation errors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A named object field.
    Field(String),
    /// A position inside an array field.
    Index(usize),
}

/// Location of a value inside a form input, e.g. `items[2].batchNo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path (the input object itself).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A single top-level field.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns this path extended with a named field.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns this path extended with an array index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// The segments making up this path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name of the top-level field this path starts at.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        match self.segments.first() {
            Some(PathSegment::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// Parses the rendered form (`items[2].batchNo`) back into a path.
    ///
    /// Returns `None` for malformed input such as unbalanced brackets,
    /// empty field names or non-numeric indices.
    #[must_use]
    pub fn parse(rendered: &str) -> Option<Self> {
        let mut segments = Vec::new();
        if rendered.is_empty() {
            return Some(Self::root());
        }

        for part in rendered.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if name.is_empty() {
                return None;
            }
            segments.push(PathSegment::Field(name.to_string()));

            while !rest.is_empty() {
                let close = rest.find(']')?;
                if !rest.starts_with('[') {
                    return None;
                }
                let index = rest[1..close].parse::<usize>().ok()?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Some(Self { segments })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid field path '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_path() {
        let path = FieldPath::field("items").index(2).child("batchNo");
        assert_eq!(path.to_string(), "items[2].batchNo");
        assert_eq!(path, "items[2].batchNo");
    }

    #[test]
    fn test_root_is_empty() {
        let root = FieldPath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.head(), None);
    }

    #[test]
    fn test_parse_matches_display() {
        let path = FieldPath::parse("items[10].batchNo").unwrap();
        assert_eq!(path, FieldPath::field("items").index(10).child("batchNo"));
        assert_eq!(path.head(), Some("items"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(FieldPath::parse("items[x]").is_none());
        assert!(FieldPath::parse("items[2").is_none());
        assert!(FieldPath::parse(".name").is_none());
        assert!(FieldPath::parse("a..b").is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let path = FieldPath::field("items").index(0).child("quantity");
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!("items[0].quantity"));

        let back: FieldPath = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }
}
