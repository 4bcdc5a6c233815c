use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Text,
    widgets::{Clear, Paragraph, Widget},
};

/// Draws a composed frame in the middle of the available area.
#[derive(Debug)]
pub struct TreeView<'a> {
    frame: &'a Text<'a>,
}

impl<'a> TreeView<'a> {
    pub fn new(frame: &'a Text<'a>) -> Self {
        Self { frame }
    }
}

impl Widget for TreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Clear.render(area, buf);

        let height = self.frame.height() as u16;
        let width = self.frame.width() as u16;
        let [_, area, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)]).areas(area);
        let [_, area, _] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)]).areas(area);

        Paragraph::new(self.frame.clone()).render(area, buf);
    }
}
