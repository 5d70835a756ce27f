// Resume upload: accepts a PDF or DOCX in memory and returns its plain text.

pub mod extract;
pub mod handlers;
