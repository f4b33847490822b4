//! Markdown output for the terminal.
//!
//! Rich mode styles headers, bold and inline code with termimad and colors
//! topology diff lines; plain mode prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const ADDED: &str = "\x1b[32m";
const REMOVED: &str = "\x1b[31m";
const CHANGED: &str = "\x1b[33m";
const HEADER: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// Escape sequence for a topology diff line (`+ Net `id``, `` - `id` ``,
/// `` ~ `id` ``). Bullet list items are not diff lines.
fn diff_color(line: &str) -> Option<&'static str> {
    if line.starts_with("+ ") {
        Some(ADDED)
    } else if line.starts_with("- `") {
        Some(REMOVED)
    } else if line.starts_with("~ ") {
        Some(CHANGED)
    } else {
        None
    }
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Cyan);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::Green);
        skin.inline_code.set_bg(Color::AnsiValue(236));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("{HEADER}{line}{RESET}");
            } else if let Some(color) = diff_color(line) {
                println!("{color}{line}{RESET}");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
