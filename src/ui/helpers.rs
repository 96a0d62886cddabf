use std::path::PathBuf;

use anyhow::Error;
use directories::BaseDirs;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Expand a leading `~` in a user-typed path to the home directory. Paths
/// without the prefix pass through untouched, as does everything when the home
/// directory cannot be resolved.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(base_dirs) = BaseDirs::new() {
        if path == "~" {
            return base_dirs.home_dir().to_path_buf();
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return base_dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        assert_eq!(expand_home("/tmp/dune.pdf"), PathBuf::from("/tmp/dune.pdf"));
        assert_eq!(expand_home("books/dune.pdf"), PathBuf::from("books/dune.pdf"));
    }

    #[test]
    fn expand_home_resolves_the_tilde_prefix() {
        if let Some(base_dirs) = BaseDirs::new() {
            let expanded = expand_home("~/books/dune.pdf");
            assert_eq!(expanded, base_dirs.home_dir().join("books/dune.pdf"));
        }
    }
}
