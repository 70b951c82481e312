use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

/// Visual weight of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Header,
    Highlight,
    Warning,
    Error,
}

impl Style {
    fn color(self) -> Option<Color> {
        match self {
            Style::Plain => None,
            Style::Header => Some(Color::Cyan),
            Style::Highlight => Some(Color::Green),
            Style::Warning => Some(Color::Yellow),
            Style::Error => Some(Color::Red),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub style: Style,
    pub text: String,
}

impl Line {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Style::Plain, text)
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self::new(Style::Header, text)
    }

    pub fn highlight(text: impl Into<String>) -> Self {
        Self::new(Style::Highlight, text)
    }
}

/// Where console summaries go. Passed explicitly to everything that prints.
pub trait Console {
    fn print(&mut self, line: &Line);

    fn say(&mut self, style: Style, text: &str) {
        self.print(&Line::new(style, text));
    }
}

/// Stdout console. Colour support is decided once, at construction.
pub struct TerminalConsole {
    colored: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            colored: std::io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn print(&mut self, line: &Line) {
        match line.style.color().filter(|_| self.colored) {
            Some(color) if line.style == Style::Header => {
                println!("{}", line.text.as_str().with(color).bold())
            }
            Some(color) => println!("{}", line.text.as_str().with(color)),
            None => println!("{}", line.text),
        }
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct BufferConsole {
    lines: Vec<Line>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }
}

impl Console for BufferConsole {
    fn print(&mut self, line: &Line) {
        self.lines.push(line.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_console_records() {
        let mut console = BufferConsole::new();
        console.say(Style::Plain, "hello");
        console.print(&Line::header("world"));

        assert_eq!(console.lines().len(), 2);
        assert_eq!(console.lines()[1].style, Style::Header);
        assert_eq!(console.text(), "hello\nworld");
        assert!(console.contains("wor"));
    }

    #[test]
    fn test_plain_has_no_color() {
        assert!(Style::Plain.color().is_none());
        assert_eq!(Style::Error.color(), Some(Color::Red));
    }
}
