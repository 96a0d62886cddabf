use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Internal representation of the "add book" form fields. The document field
/// holds a filesystem path typed by the user; the file itself is read at save
/// time.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) genre: String,
    pub(crate) document: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the book form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Genre,
    Document,
}

impl Default for BookField {
    fn default() -> Self {
        BookField::Title
    }
}

impl BookForm {
    /// Cycle focus across the four fields in visual order.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Genre,
            BookField::Genre => BookField::Document,
            BookField::Document => BookField::Title,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
            BookField::Genre => self.genre.push(ch),
            BookField::Document => self.document.push(ch),
        }
        true
    }

    /// Remove a character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Document => {
                self.document.pop();
            }
        }
    }

    /// Validate and normalize form inputs before they are written to the
    /// database. The document path comes back as `None` when the field was
    /// left blank.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String, Option<String>)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Book title is required."));
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(anyhow!("Book author is required."));
        }
        let genre = self.genre.trim();
        if genre.is_empty() {
            return Err(anyhow!("Book genre is required."));
        }

        let document = self.document.trim();
        let document = if document.is_empty() {
            None
        } else {
            Some(document.to_string())
        };

        Ok((
            title.to_string(),
            author.to_string(),
            genre.to_string(),
            document,
        ))
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let (value, is_active) = match field {
            BookField::Title => (&self.title, self.active == BookField::Title),
            BookField::Author => (&self.author, self.active == BookField::Author),
            BookField::Genre => (&self.genre, self.active == BookField::Genre),
            BookField::Document => (&self.document, self.active == BookField::Document),
        };

        let placeholder = match field {
            BookField::Document => "<optional>",
            _ => "<required>",
        };

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character length of the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Genre => self.genre.chars().count(),
            BookField::Document => self.document.chars().count(),
        }
    }
}

/// State for confirming permanent book deletion.
#[derive(Clone)]
pub(crate) struct ConfirmBookDelete {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
}

impl ConfirmBookDelete {
    /// Build the confirmation state from the book being considered.
    pub(crate) fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BookForm {
        BookForm {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            document: String::new(),
            active: BookField::Title,
            error: None,
        }
    }

    #[test]
    fn parse_inputs_requires_every_text_field() {
        let mut form = filled_form();
        form.title = "   ".to_string();
        assert!(form.parse_inputs().is_err());

        let mut form = filled_form();
        form.author.clear();
        assert!(form.parse_inputs().is_err());

        let mut form = filled_form();
        form.genre.clear();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn parse_inputs_trims_values() {
        let mut form = filled_form();
        form.title = "  Dune  ".to_string();
        let (title, author, genre, document) = form.parse_inputs().unwrap();
        assert_eq!(title, "Dune");
        assert_eq!(author, "Frank Herbert");
        assert_eq!(genre, "Science Fiction");
        assert!(document.is_none());
    }

    #[test]
    fn parse_inputs_keeps_a_document_path_when_present() {
        let mut form = filled_form();
        form.document = " ~/books/dune.pdf ".to_string();
        let (_, _, _, document) = form.parse_inputs().unwrap();
        assert_eq!(document.as_deref(), Some("~/books/dune.pdf"));
    }

    #[test]
    fn push_char_rejects_control_characters() {
        let mut form = BookForm::default();
        assert!(!form.push_char('\n'));
        assert!(form.title.is_empty());
        assert!(form.push_char('D'));
        assert_eq!(form.title, "D");
    }

    #[test]
    fn toggle_field_cycles_through_all_fields() {
        let mut form = BookForm::default();
        assert!(form.active == BookField::Title);
        form.toggle_field();
        assert!(form.active == BookField::Author);
        form.toggle_field();
        assert!(form.active == BookField::Genre);
        form.toggle_field();
        assert!(form.active == BookField::Document);
        form.toggle_field();
        assert!(form.active == BookField::Title);
    }
}
