use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Name used for imports when the picker does not supply one.
pub const DEFAULT_SOURCE_NAME: &str = "documento";

/// The kind of a stored document. Resolved once when the file is picked and
/// never re-derived afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "Image", alias = "Imagen")]
    Image,
}

impl DocumentType {
    /// Media type first, file extension as a fallback when no media type was reported.
    pub fn resolve(mime_type: Option<&str>, file_name: &str) -> Self {
        match mime_type {
            Some(mime) if !mime.trim().is_empty() => Self::from_mime(mime),
            _ => {
                let is_pdf = Path::new(file_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
                if is_pdf {
                    DocumentType::Pdf
                } else {
                    DocumentType::Image
                }
            }
        }
    }

    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.to_ascii_lowercase().contains("pdf") {
            DocumentType::Pdf
        } else {
            DocumentType::Image
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Pdf => write!(f, "PDF"),
            DocumentType::Image => write!(f, "Image"),
        }
    }
}

/// A record in the document index.
///
/// `uri` always points inside the private storage folder; it is produced by
/// the import step and never taken from the picker directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub date: String,
    pub category: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        doc_type: DocumentType,
        category: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            doc_type,
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            category: category.into(),
            uri: uri.into(),
            size: None,
            mime_type: None,
        }
    }

    pub fn with_size(mut self, size: Option<u64>) -> Self {
        self.size = size;
        self
    }

    pub fn with_mime_type(mut self, mime_type: Option<String>) -> Self {
        self.mime_type = mime_type;
        self
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.uri)
    }

    /// Merge a partial update. Only the editable fields are touched.
    pub fn apply(&mut self, update: &DocumentUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
    }
}

/// Partial update for an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl DocumentUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            category: None,
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            name: None,
            category: Some(category.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none()
    }
}

/// What a file or image picker hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub uri: String,
    pub name: Option<String>,
    pub size: Option<u64>,
    pub mime_type: Option<String>,
}

impl PickedFile {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: None,
            size: None,
            mime_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn suggested_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_SOURCE_NAME)
    }

    pub fn document_type(&self) -> DocumentType {
        DocumentType::resolve(self.mime_type.as_deref(), self.suggested_name())
    }

    pub fn source(&self) -> SourceLocation {
        SourceLocation::parse(&self.uri)
    }
}

/// Where picked bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A direct filesystem path.
    Path(PathBuf),
    /// An opaque platform handle (`content://…`), readable only as a whole.
    Handle(String),
}

impl SourceLocation {
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("content://") {
            SourceLocation::Handle(uri.to_string())
        } else {
            let path = uri.strip_prefix("file://").unwrap_or(uri);
            SourceLocation::Path(PathBuf::from(path))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Path(path) => write!(f, "{}", path.display()),
            SourceLocation::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_decides_type() {
        assert_eq!(DocumentType::from_mime("application/pdf"), DocumentType::Pdf);
        assert_eq!(DocumentType::from_mime("APPLICATION/PDF"), DocumentType::Pdf);
        assert_eq!(DocumentType::from_mime("image/png"), DocumentType::Image);
    }

    #[test]
    fn extension_decides_type_without_mime() {
        assert_eq!(
            DocumentType::resolve(None, "report.PDF"),
            DocumentType::Pdf
        );
        assert_eq!(
            DocumentType::resolve(Some(""), "scan.jpg"),
            DocumentType::Image
        );
    }

    #[test]
    fn legacy_image_label_is_accepted() {
        let json = r#"{"id":"1","name":"Foto","type":"Imagen","date":"2024-01-01","category":"Personal","uri":"/x"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.doc_type, DocumentType::Image);
        assert_eq!(doc.size, None);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let doc = Document::new("Q1", DocumentType::Pdf, "Trabajo", "/store/a.pdf")
            .with_mime_type(Some("application/pdf".into()));
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"type\":\"PDF\""));
        assert!(json.contains("\"mimeType\":\"application/pdf\""));
        assert!(!json.contains("\"size\""));
    }

    #[test]
    fn apply_touches_only_editable_fields() {
        let mut doc = Document::new("Old", DocumentType::Image, "Salud", "/store/b.png");
        let before = doc.clone();
        doc.apply(&DocumentUpdate::name("New"));

        assert_eq!(doc.name, "New");
        assert_eq!(doc.category, before.category);
        assert_eq!(doc.uri, before.uri);
        assert_eq!(doc.date, before.date);
        assert_eq!(doc.doc_type, before.doc_type);
    }

    #[test]
    fn source_location_parsing() {
        assert_eq!(
            SourceLocation::parse("content://media/42"),
            SourceLocation::Handle("content://media/42".into())
        );
        assert_eq!(
            SourceLocation::parse("file:///tmp/a.pdf"),
            SourceLocation::Path(PathBuf::from("/tmp/a.pdf"))
        );
        assert_eq!(
            SourceLocation::parse("/tmp/b.pdf"),
            SourceLocation::Path(PathBuf::from("/tmp/b.pdf"))
        );
    }

    #[test]
    fn picker_without_name_falls_back() {
        let picked = PickedFile::new("/tmp/x");
        assert_eq!(picked.suggested_name(), DEFAULT_SOURCE_NAME);
        assert_eq!(picked.document_type(), DocumentType::Image);
    }
}
