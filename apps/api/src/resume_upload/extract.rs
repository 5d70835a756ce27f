//! Plain-text extraction from uploaded resume documents.
//!
//! PDF goes through `pdf-extract`. DOCX is a ZIP container; the body text lives
//! in `word/document.xml` and is read directly from the runs (`<w:t>`), tabs,
//! breaks and paragraph ends. Nothing touches the filesystem.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use bytes::Bytes;
use regex::{Captures, Regex};
use thiserror::Error;

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const DOCX_BODY_PATH: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extractor aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Accepted when either the MIME type or the extension is recognised.
    pub fn detect(content_type: Option<&str>, file_name: &str) -> Option<Self> {
        let extension = file_extension(file_name);
        if content_type == Some(PDF_MIME) || extension == ".pdf" {
            Some(DocumentKind::Pdf)
        } else if content_type == Some(DOCX_MIME) || extension == ".docx" {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

/// Lowercased extension including the dot, or an empty string.
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rfind('.')
        .map(|i| file_name[i..].to_lowercase())
        .unwrap_or_default()
}

/// Extracts text on the blocking pool. Panics inside the parsers surface as
/// `ExtractError::Aborted` instead of taking the worker down.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => extract_pdf_text(&data),
        DocumentKind::Docx => extract_docx_text(&data),
    })
    .await
    .map_err(|e| ExtractError::Aborted(e.to_string()))?
}

pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(format!("{e:?}")))
}

pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PATH)?.read_to_string(&mut xml)?;
    Ok(document_xml_to_text(&xml))
}

fn paragraph_properties_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:pPr>.*?</w:pPr>").expect("valid regex"))
}

fn body_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"<w:t(?:\s[^>]*)?>(?P<text>[^<]*)</w:t>|(?P<tab><w:tab\b[^>]*/>)|(?P<br><w:(?:br|cr)\b[^>]*/>)|(?P<para></w:p>)",
        )
        .expect("valid regex")
    })
}

fn char_reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&#(x?)([0-9A-Fa-f]+);").expect("valid regex"))
}

/// Flattens WordprocessingML body XML into text, one blank line between paragraphs.
fn document_xml_to_text(xml: &str) -> String {
    // Tab stop definitions live in paragraph properties and are not content.
    let xml = paragraph_properties_re().replace_all(xml, "");

    let mut text = String::new();
    for token in body_token_re().captures_iter(&xml) {
        if let Some(run) = token.name("text") {
            text.push_str(&decode_entities(run.as_str()));
        } else if token.name("tab").is_some() {
            text.push('\t');
        } else if token.name("br").is_some() {
            text.push('\n');
        } else if token.name("para").is_some() {
            text.push_str("\n\n");
        }
    }

    text.trim_end().to_string()
}

fn decode_entities(raw: &str) -> String {
    let named = raw
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    let numeric = char_reference_re().replace_all(&named, |caps: &Captures| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // Last, so "&amp;lt;" stays "&lt;".
    numeric.replace("&amp;", "&")
}
