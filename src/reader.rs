//! Text extraction for stored book documents, backed by `pdf-extract`.
//!
//! `pdf-extract` returns the whole document as a single string with form feed
//! characters between pages, so pagination here means splitting on `\x0C` and
//! keeping the chunks aligned with physical page numbers.

use thiserror::Error;

/// Errors raised while turning stored document bytes into readable pages.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The bytes could not be parsed as a PDF document.
    #[error("could not read document: {message}")]
    Unreadable { message: String },

    /// The document parsed, but no page contained any extractable text.
    /// Scanned image-only PDFs end up here.
    #[error("document contains no extractable text")]
    NoText,
}

/// Extract the text of every page from raw document bytes. Page text is
/// trimmed of surrounding whitespace; a page that is entirely blank stays in
/// the list so later pages keep their physical page numbers.
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>, ReaderError> {
    let text = pdf_extract::extract_text_from_mem(data).map_err(|err| ReaderError::Unreadable {
        message: err.to_string(),
    })?;

    paginate(&text)
}

/// Split extracted text into pages on form feeds. `pdf-extract` appends a form
/// feed after the final page as well, so a single trailing empty chunk is an
/// artifact and gets dropped rather than shown as a phantom page.
fn paginate(text: &str) -> Result<Vec<String>, ReaderError> {
    if text.trim().is_empty() {
        return Err(ReaderError::NoText);
    }

    let mut pages: Vec<String> = text
        .split('\x0C')
        .map(|page| page.trim().to_string())
        .collect();

    if pages.len() > 1 && pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bytes_that_are_not_a_pdf() {
        // pdf-extract needs actual PDF bytes, so the decode error path is the
        // one we can exercise with plain data.
        let result = extract_pages(b"This is not a PDF");
        assert!(matches!(result, Err(ReaderError::Unreadable { .. })));
    }

    #[test]
    fn paginate_splits_on_form_feeds() {
        let pages = paginate("first page\x0Csecond page\x0Cthird page").unwrap();
        assert_eq!(pages, vec!["first page", "second page", "third page"]);
    }

    #[test]
    fn paginate_drops_the_trailing_artifact_page() {
        let pages = paginate("first page\x0Csecond page\x0C").unwrap();
        assert_eq!(pages, vec!["first page", "second page"]);
    }

    #[test]
    fn paginate_keeps_interior_blank_pages() {
        let pages = paginate("first\x0C   \x0Cthird\x0C").unwrap();
        assert_eq!(pages, vec!["first", "", "third"]);
    }

    #[test]
    fn paginate_treats_text_without_form_feeds_as_one_page() {
        let pages = paginate("just one page of text").unwrap();
        assert_eq!(pages, vec!["just one page of text"]);
    }

    #[test]
    fn paginate_rejects_whitespace_only_text() {
        assert!(matches!(paginate(" \n \x0C \n "), Err(ReaderError::NoText)));
    }
}
