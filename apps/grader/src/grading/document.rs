//! Uploaded resume inspection: validity check and author metadata.

use bytes::Bytes;
use lopdf::{Document, Object};

use crate::errors::AppError;

/// A resume that parsed as PDF, with its raw bytes kept for the model.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub author: Option<String>,
}

/// Parses `bytes` as PDF and reads the `Author` entry of its info dictionary.
pub fn inspect_document(bytes: Bytes) -> Result<ResumeDocument, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("No resume file uploaded".to_string()));
    }

    let pdf = Document::load_mem(&bytes)
        .map_err(|e| AppError::Validation(format!("Invalid PDF document: {e}")))?;

    let author = read_author(&pdf);
    Ok(ResumeDocument { bytes, author })
}

fn read_author(pdf: &Document) -> Option<String> {
    let info = pdf.trailer.get(b"Info").ok()?;
    let (_, info) = pdf.dereference(info).ok()?;
    let author = info.as_dict().ok()?.get(b"Author").ok()?;
    let (_, author) = pdf.dereference(author).ok()?;

    let raw = match author {
        Object::String(raw, _) => raw,
        _ => return None,
    };

    let text = decode_text_string(raw);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Decodes a PDF text string: UTF-16BE when it carries a byte-order mark,
/// otherwise single-byte (PDFDocEncoding agrees with Latin-1 for printable text).
fn decode_text_string(raw: &[u8]) -> String {
    match raw {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => raw.iter().map(|&b| b as char).collect(),
    }
}
