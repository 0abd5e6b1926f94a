//! # Viewers
//!
//! The document type is resolved once when a file is picked. From then on the
//! record's [`DocumentType`] selects a [`Viewer`], and each viewer knows how to
//! summarize its own bytes. Nothing downstream compares type strings.

use crate::index::DisplayDocument;
use crate::model::DocumentType;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Pdf,
    Image,
}

/// What a viewer could tell from the stored bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Pdf {
        pages: usize,
        version: Option<String>,
    },
    Image {
        format: ImageFormat,
        dimensions: Option<(u32, u32)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Heic,
    Unknown,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Webp => "WebP",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Heic => "HEIC",
            ImageFormat::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

impl From<DocumentType> for Viewer {
    fn from(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Pdf => Viewer::Pdf,
            DocumentType::Image => Viewer::Image,
        }
    }
}

impl Viewer {
    pub fn preview(&self, bytes: &[u8]) -> Preview {
        match self {
            Viewer::Pdf => Preview::Pdf {
                pages: count_pdf_pages(bytes),
                version: pdf_version(bytes),
            },
            Viewer::Image => {
                let format = sniff_image(bytes);
                Preview::Image {
                    format,
                    dimensions: image_dimensions(format, bytes),
                }
            }
        }
    }
}

/// A loaded document ready for display.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub display: DisplayDocument,
    pub viewer: Viewer,
    pub preview: Preview,
    pub bytes: Vec<u8>,
}

fn pdf_version(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(b"%PDF-")?;
    let version: String = rest
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .map(|b| *b as char)
        .collect();
    (!version.is_empty()).then_some(version)
}

/// Counts `/Type /Page` objects (not `/Pages` tree nodes).
fn count_pdf_pages(bytes: &[u8]) -> usize {
    const TYPE: &[u8] = b"/Type";
    const PAGE: &[u8] = b"/Page";

    let mut count = 0;
    let mut i = 0;
    while i + TYPE.len() <= bytes.len() {
        if &bytes[i..i + TYPE.len()] != TYPE {
            i += 1;
            continue;
        }
        let mut j = i + TYPE.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes[j..].starts_with(PAGE) {
            let after = bytes.get(j + PAGE.len()).copied();
            if !matches!(after, Some(c) if c.is_ascii_alphanumeric()) {
                count += 1;
            }
        }
        i = j;
    }
    count
}

fn sniff_image(bytes: &[u8]) -> ImageFormat {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        ImageFormat::Png
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        ImageFormat::Jpeg
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        ImageFormat::Gif
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        ImageFormat::Webp
    } else if bytes.starts_with(b"BM") {
        ImageFormat::Bmp
    } else if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" && matches!(&bytes[8..12], b"heic" | b"heix" | b"mif1") {
        ImageFormat::Heic
    } else {
        ImageFormat::Unknown
    }
}

fn image_dimensions(format: ImageFormat, bytes: &[u8]) -> Option<(u32, u32)> {
    match format {
        ImageFormat::Png => {
            // IHDR is always the first chunk
            let w = bytes.get(16..20)?;
            let h = bytes.get(20..24)?;
            Some((
                u32::from_be_bytes(w.try_into().ok()?),
                u32::from_be_bytes(h.try_into().ok()?),
            ))
        }
        ImageFormat::Gif => {
            let w = bytes.get(6..8)?;
            let h = bytes.get(8..10)?;
            Some((
                u16::from_le_bytes(w.try_into().ok()?) as u32,
                u16::from_le_bytes(h.try_into().ok()?) as u32,
            ))
        }
        _ => None,
    }
}
