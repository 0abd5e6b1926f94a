use docfolio::model::{PickedFile, SourceLocation};
use std::path::Path;

/// Extension → media type, for the formats a document picker would offer.
const MIME_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

pub(super) fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Turn a command-line argument into what a picker would have returned.
///
/// Size is filled in when the path can be stat'ed; a missing file is left for
/// the import step to report.
pub(super) fn pick(input: &str, mime_override: Option<&str>) -> PickedFile {
    let name = match SourceLocation::parse(input) {
        SourceLocation::Path(path) => path.file_name().map(|n| n.to_string_lossy().into_owned()),
        SourceLocation::Handle(handle) => handle
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    };

    let mut picked = PickedFile::new(input);
    if let Some(name) = &name {
        picked = picked.with_name(name.as_str());
    }

    if let SourceLocation::Path(path) = picked.source() {
        if let Ok(meta) = std::fs::metadata(&path) {
            picked = picked.with_size(meta.len());
        }
    }

    let mime = mime_override.or_else(|| name.as_deref().and_then(guess_mime));
    if let Some(mime) = mime {
        picked = picked.with_mime_type(mime);
    }
    picked
}

/// Default document name: the picked file name without its extension.
pub(super) fn default_name(picked: &PickedFile) -> String {
    let suggested = picked.suggested_name();
    Path::new(suggested)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suggested.to_string())
}
