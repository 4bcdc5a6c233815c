use std::io::Write;

use color_eyre::eyre::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use ratatui::{
    style::{Color, Modifier},
    text::Text,
};

/// Where finished frames go. Each call replaces whatever was displayed before.
pub trait PresentationSink {
    fn present(&mut self, frame: &Text<'_>) -> Result<()>;
}

/// Clears the screen and reprints the whole frame as ANSI text.
pub struct AnsiSink<W: Write> {
    out: W,
}

impl<W: Write> AnsiSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for AnsiSink<W> {
    fn present(&mut self, frame: &Text<'_>) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Print(to_ansi(frame)), Print("\n"))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encodes a frame as ANSI text. Every colored span is closed with a reset.
pub fn to_ansi(text: &Text<'_>) -> String {
    let mut out = String::new();
    for (index, line) in text.lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for span in &line.spans {
            let style = text.style.patch(line.style).patch(span.style);
            let bold = style.add_modifier.contains(Modifier::BOLD);
            if style.fg.is_none() && !bold {
                out.push_str(&span.content);
                continue;
            }
            if bold {
                out.push_str(&SetAttribute(Attribute::Bold).to_string());
            }
            if let Some(color) = style.fg {
                out.push_str(&SetForegroundColor(term_color(color)).to_string());
            }
            out.push_str(&span.content);
            out.push_str(&ResetColor.to_string());
        }
    }
    out
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(index) => TermColor::AnsiValue(index),
    }
}
