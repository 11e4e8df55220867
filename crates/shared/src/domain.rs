use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! key_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

key_newtype!(ContainerId);
key_newtype!(RecordId);
key_newtype!(ConnectionName);

/// Kind of a listed entry. Parsed case-insensitively; unknown kinds land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Folder,
    Image,
    Document,
    Other,
}

impl FileType {
    pub const ALL: [FileType; 4] = [
        FileType::Folder,
        FileType::Image,
        FileType::Document,
        FileType::Other,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "folder" => Self::Folder,
            "image" => Self::Image,
            "document" => Self::Document,
            _ => Self::Other,
        }
    }

    /// Lowercase key used for category ids and filter comparison.
    pub fn key(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Image => "image",
            Self::Document => "document",
            Self::Other => "other",
        }
    }

    fn wire_name(self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::Image => "Image",
            Self::Document => "Document",
            Self::Other => "Other",
        }
    }

    pub fn is_folder(self) -> bool {
        self == Self::Folder
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for FileType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One entry of a container listing as returned by the listing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// URL-encoded name as stored.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileType,
    /// Retrieval location.
    pub url: String,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, kind: FileType, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            url: url.into(),
        }
    }

    pub fn display_name(&self) -> String {
        percent_decode_str(&self.name)
            .decode_utf8_lossy()
            .replace('+', " ")
    }

    /// Display name up to the first `.`.
    pub fn name_stem(&self) -> String {
        let display = self.display_name();
        display.split('.').next().unwrap_or_default().to_string()
    }
}

/// The business record a file container is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordContext {
    /// Field on the record that carries the container key.
    pub identifier_field: String,
    pub object_type: String,
    pub record_id: RecordId,
}

impl RecordContext {
    pub fn new(
        identifier_field: impl Into<String>,
        object_type: impl Into<String>,
        record_id: impl Into<String>,
    ) -> Self {
        Self {
            identifier_field: identifier_field.into(),
            object_type: object_type.into(),
            record_id: RecordId::new(record_id),
        }
    }
}
