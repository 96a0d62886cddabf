use std::fs;
use std::mem;

use anyhow::{anyhow, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::db::CatalogStore;
use crate::models::Book;
use crate::reader::extract_pages;

use super::forms::{BookField, BookForm, ConfirmBookDelete};
use super::helpers::{centered_rect, expand_home, surface_error};
use super::screens::{ReaderRowKind, ReaderScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do.
enum Screen {
    Catalog,
    Reader(ReaderScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingBook(BookForm),
    ConfirmBookDelete(ConfirmBookDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: CatalogStore,
    books: Vec<Book>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: CatalogStore, books: Vec<Book>) -> Self {
        Self {
            store,
            books,
            selected: 0,
            screen: Screen::Catalog,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::ConfirmBookDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Catalog => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.move_selection(-1),
                    KeyCode::Down => self.move_selection(1),
                    KeyCode::PageUp => self.move_selection(-5),
                    KeyCode::PageDown => self.move_selection(5),
                    KeyCode::Home => self.select_first(),
                    KeyCode::End => self.select_last(),
                    KeyCode::Enter => {
                        if let Some(book) = self.current_book().cloned() {
                            self.open_reader(book);
                        } else {
                            self.set_status("No book selected.", StatusKind::Error);
                        }
                    }
                    KeyCode::Char('+') => {
                        self.clear_status();
                        return Ok(Mode::AddingBook(BookForm::default()));
                    }
                    KeyCode::Char('-') => {
                        if let Some(book) = self.current_book().cloned() {
                            self.clear_status();
                            return Ok(Mode::ConfirmBookDelete(ConfirmBookDelete::from(book)));
                        } else {
                            self.set_status("No book selected to delete.", StatusKind::Error);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Reader(ref mut reader) => {
                let mut back_to_catalog = false;
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        back_to_catalog = true;
                    }
                    KeyCode::Up => reader.scroll_by(-1),
                    KeyCode::Down => reader.scroll_by(1),
                    KeyCode::PageUp => reader.scroll_by(-10),
                    KeyCode::PageDown => reader.scroll_by(10),
                    KeyCode::Home => reader.scroll_to_top(),
                    KeyCode::End => reader.scroll_to_bottom(),
                    KeyCode::Char('n') | KeyCode::Right => reader.jump_page(1),
                    KeyCode::Char('p') | KeyCode::Left => reader.jump_page(-1),
                    _ => {}
                }

                if back_to_catalog {
                    self.clear_status();
                    self.screen = Screen::Catalog;
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(_) => Ok(Mode::Normal),
                    Err(err) => {
                        let message = surface_error(&err);
                        self.set_status(message, StatusKind::Error);
                        Ok(Mode::ConfirmBookDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmBookDelete(confirm)),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Catalog => self.draw_catalog(frame, content_area),
            Screen::Reader(reader) => self.draw_reader(frame, content_area, reader),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::ConfirmBookDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect) {
        if self.books.is_empty() {
            let message = Paragraph::new("No books yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Library"));
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["ID", "Title", "Author", "Genre", "Uploaded"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows: Vec<Row> = self
            .books
            .iter()
            .map(|book| {
                Row::new(vec![
                    Cell::from(book.id.to_string()),
                    Cell::from(book.title.clone()),
                    Cell::from(book.author.clone()),
                    Cell::from(book.genre.clone()),
                    Cell::from(book.uploaded_at.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Length(19),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Library"))
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_reader(&self, frame: &mut Frame, area: Rect, reader: &ReaderScreen) {
        let title = format!(
            "{} • Page {}/{}",
            reader.book.display_title(),
            reader.current_page(),
            reader.page_count
        );

        let lines: Vec<Line> = reader
            .rows
            .iter()
            .map(|row| match row.kind {
                ReaderRowKind::Heading => Line::from(Span::styled(
                    row.text.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                ReaderRowKind::Body => Line::from(row.text.clone()),
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false })
            .scroll((reader.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.screen {
            Screen::Reader(_) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[PgUp/PgDn]", key_style),
                Span::raw(" Fast Scroll   "),
                Span::styled("[n/p]", key_style),
                Span::raw(" Next/Prev Page   "),
                Span::styled("[Home/End]", key_style),
                Span::raw(" Jump   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Screen::Catalog => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Read   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Title", BookField::Title),
            form.build_line("Author", BookField::Author),
            form.build_line("Genre", BookField::Genre),
            form.build_line("Document", BookField::Document),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            BookField::Title => ("Title: ", 0),
            BookField::Author => ("Author: ", 1),
            BookField::Genre => ("Genre: ", 2),
            BookField::Document => ("Document: ", 3),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        let cursor_y = inner.y + row;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete \"{}\" by {}?",
                confirm.title, confirm.author
            )),
            Line::from("The stored document is removed with it."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let (title, author, genre, document_path) = form.parse_inputs()?;

        let document = match &document_path {
            Some(path) => {
                let resolved = expand_home(path);
                let bytes = fs::read(&resolved)
                    .map_err(|err| anyhow!("Could not read {}: {err}", resolved.display()))?;
                Some(bytes)
            }
            None => None,
        };

        let book = self
            .store
            .add_book(&title, &author, &genre, document.as_deref())?;
        let message = if document.is_some() {
            format!("Added \"{book}\" with its document.")
        } else {
            format!("Added \"{book}\".")
        };
        self.reload_books(Some(book.id))?;
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmBookDelete) -> Result<()> {
        self.store.delete_book(confirm.id)?;
        self.reload_books(None)?;
        self.screen = Screen::Catalog;
        self.set_status(format!("Deleted \"{}\".", confirm.title), StatusKind::Info);
        Ok(())
    }

    /// Open the reader for the given book, or surface why it cannot be read.
    /// Missing documents, storage failures, and unreadable documents all land
    /// in the footer; none of them leaves the catalog screen.
    fn open_reader(&mut self, book: Book) {
        let bytes = match self.store.fetch_document(book.id) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.set_status("This book has no document attached.", StatusKind::Error);
                return;
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
                return;
            }
        };

        match extract_pages(&bytes) {
            Ok(pages) => {
                self.clear_status();
                self.screen = Screen::Reader(ReaderScreen::new(book, pages));
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
            }
        }
    }

    fn reload_books(&mut self, focus_id: Option<i64>) -> Result<()> {
        self.books = self.store.list_books()?;
        if self.books.is_empty() {
            self.selected = 0;
            return Ok(());
        }

        if let Some(id) = focus_id {
            if let Some((idx, _)) = self.books.iter().enumerate().find(|(_, b)| b.id == id) {
                self.selected = idx;
                return Ok(());
            }
        }

        if self.selected >= self.books.len() {
            self.selected = self.books.len().saturating_sub(1);
        }

        Ok(())
    }

    fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let len = self.books.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    fn select_first(&mut self) {
        if !self.books.is_empty() {
            self.selected = 0;
        }
    }

    fn select_last(&mut self) {
        if !self.books.is_empty() {
            self.selected = self.books.len() - 1;
        }
    }
}
