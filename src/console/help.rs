//! Help rendering
//!
//! Produces column-aligned syntax lines from the command table. The same
//! renderer serves the `Help` listing and the syntax hint printed when a
//! command is given the wrong arguments.

use core::fmt::Write;

use crate::config::{HELP_COLUMN, NAME_WIDTH};
use super::ansi::{BOLD_OFF, BOLD_ON, CRLF};
use super::commands::{Category, CommandTable};
use super::pattern;

/// Printed for names that do not resolve
pub const UNKNOWN_NOTICE: &str =
    "Unknown command, type 'Help' for a list of available commands.\r\n";

/// Session state the renderer depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpView {
    pub active: Option<usize>,
    pub bold: bool,
}

/// Counts columns written so descriptions line up.
struct Columns<'a> {
    out: &'a mut dyn Write,
    col: usize,
}

impl Columns<'_> {
    fn text(&mut self, s: &str) {
        let _ = self.out.write_str(s);
        self.col += s.len();
    }

    /// Escape sequences take no screen space
    fn control(&mut self, s: &str) {
        let _ = self.out.write_str(s);
    }

    fn pad_to(&mut self, col: usize) {
        while self.col < col {
            self.text(" ");
        }
    }
}

/// Render the help line of the command at `index`.
///
/// With an empty `prefix` the name is right-aligned (listing style); with a
/// prefix such as `"Syntax: "` it follows inline and a `Params:` line is
/// added when the command documents its parameters. Hidden commands render
/// nothing.
pub fn render_command(
    out: &mut dyn Write,
    table: &CommandTable,
    view: HelpView,
    prefix: &str,
    index: usize,
    suffix: &str,
) {
    let Some(cmd) = table.get(index) else {
        return;
    };
    if cmd.category == Category::Hidden {
        return;
    }

    let member = matches!(cmd.category, Category::Member(_));
    let listing = prefix.is_empty();
    let mut cols = Columns { out, col: 0 };

    if listing && member && view.bold {
        cols.control(BOLD_ON);
    }

    cols.text(prefix);

    if listing {
        for _ in cmd.name.len()..NAME_WIDTH {
            cols.text(" ");
        }
        cols.text(cmd.name);
    } else {
        if view.bold {
            cols.control(BOLD_ON);
        }
        cols.text(cmd.name);
        if view.bold {
            cols.control(BOLD_OFF);
        }
    }

    for token in pattern::tokens(cmd.pattern).flatten() {
        cols.text(" ");
        cols.text(token.type_name());
        cols.text(token.radix_suffix());
    }

    cols.pad_to(HELP_COLUMN);

    let out = cols.out;
    match cmd.category {
        Category::Subsystem => {
            let state = if view.active == Some(index) { "active" } else { "dormant" };
            let _ = write!(out, "- {} ({} subsystem){}", cmd.description, state, suffix);
        }
        Category::Global => {
            let _ = write!(out, "- {} (global command){}", cmd.description, suffix);
        }
        Category::Member(_) => {
            let _ = write!(out, "- {}", cmd.description);
            if listing && view.bold {
                let _ = out.write_str(BOLD_OFF);
            }
            let _ = out.write_str(suffix);
        }
        Category::Hidden => {}
    }

    if !listing && !cmd.param_description.is_empty() {
        let _ = write!(out, "Params: {}{}", cmd.param_description, CRLF);
    }
}

/// Write `indices` as a listing: `,` after each line, `.` after the last.
fn render_list(
    out: &mut dyn Write,
    table: &CommandTable,
    view: HelpView,
    indices: impl Iterator<Item = usize> + Clone,
) {
    let last = indices.clone().last();
    for i in indices {
        let suffix = if Some(i) == last { ".\r\n" } else { ",\r\n" };
        render_command(out, table, view, "", i, suffix);
    }
}

/// `Help` without arguments: everything visible in the current scope
pub fn render_listing(out: &mut dyn Write, table: &CommandTable, view: HelpView) {
    let visible = table
        .iter()
        .enumerate()
        .filter(move |(_, c)| c.category != Category::Hidden && c.in_scope(view.active))
        .map(|(i, _)| i);

    let _ = out.write_str(CRLF);
    render_list(out, table, view, visible);
    let _ = out.write_str(CRLF);
}

/// `Help <name>`: a subsystem's commands or one command's syntax
pub fn render_topic(out: &mut dyn Write, table: &CommandTable, view: HelpView, name: &str) {
    let _ = out.write_str(CRLF);

    match table.find_by_name(name, view.active) {
        None => {
            let _ = out.write_str(UNKNOWN_NOTICE);
        }
        Some(index) => {
            // find_by_name only returns valid indices
            let Some(cmd) = table.get(index) else { return };
            match cmd.category {
                Category::Subsystem => {
                    let _ = write!(out, "{} subsystem commands:\r\n\r\n", cmd.name);
                    let members = table
                        .iter()
                        .enumerate()
                        .filter(move |(_, c)| c.category == Category::Member(index))
                        .map(|(i, _)| i);
                    render_list(out, table, view, members);
                }
                Category::Member(owner) => {
                    if let Some(root) = table.get(owner) {
                        let _ = write!(out, "{} subsystem command:\r\n\r\n", root.name);
                    }
                    render_command(out, table, view, "Syntax: ", index, ".\r\n");
                }
                Category::Global | Category::Hidden => {
                    render_command(out, table, view, "Syntax: ", index, ".\r\n");
                }
            }
        }
    }

    let _ = out.write_str(CRLF);
}
