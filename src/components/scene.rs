use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span, Text},
};

use crate::{
    constants::scene,
    tree::{
        render::{is_lit, render},
        TreeLayout,
    },
};

/// Title, tree and footer as they appear on `frame`.
pub fn compose(layout: &TreeLayout, frame: u64) -> Text<'static> {
    let width = layout.max_width();
    let (footer, footer_color) = if is_lit(0, frame) { scene::FOOTERS[0] } else { scene::FOOTERS[1] };

    let mut lines = vec![centered(scene::TITLE_TEXT, Style::default().fg(scene::TITLE_COLOR).bold(), width)];
    lines.push(Line::default());
    lines.extend(render(layout, frame).lines);
    lines.push(Line::default());
    lines.push(centered(footer, Style::default().fg(footer_color).bold(), width));
    Text::from(lines)
}

/// A lone message, shown after the tree is gone.
pub fn farewell(message: &'static str, width: u16) -> Text<'static> {
    Text::from(vec![Line::default(), farewell_line(message, width), Line::default()])
}

pub fn farewell_line(message: &'static str, width: u16) -> Line<'static> {
    centered(message, Style::default().fg(scene::FAREWELL_COLOR).bold(), width)
}

fn centered(content: &'static str, style: Style, width: u16) -> Line<'static> {
    let span = Span::styled(content, style);
    let padding = usize::from(width).saturating_sub(span.width()) / 2;
    Line::from(vec![Span::raw(" ".repeat(padding)), span])
}
