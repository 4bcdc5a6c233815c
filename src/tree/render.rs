use ratatui::{
    style::Style,
    text::{Line, Span, Text},
};

use super::{Category, Cell, Row, TreeLayout};
use crate::constants::tree;

/// Whether a light with `blink_phase` is lit on `frame`.
pub fn is_lit(blink_phase: u8, frame: u64) -> bool {
    frame.wrapping_add(u64::from(blink_phase)) % tree::BLINK_PERIOD < tree::BLINK_LIT
}

/// Draws the tree as it looks on `frame`. Never touches the layout.
pub fn render(layout: &TreeLayout, frame: u64) -> Text<'static> {
    Text::from(layout.rows().iter().map(|row| render_row(layout, row, frame)).collect::<Vec<_>>())
}

fn render_row(layout: &TreeLayout, row: &Row, frame: u64) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(usize::from(row.padding)))];
    let cells = layout.row_cells(row);
    let width = usize::from(row.width);

    match (row.category, cells.first()) {
        (Category::Tree, _) => spans.extend(cells.iter().map(|cell| needle(cell, frame))),
        (Category::Trunk, Some(cell)) if cell.visible() => {
            spans.push(Span::styled(tree::TRUNK_GLYPH.to_string().repeat(width), Style::default().fg(cell.base_color)))
        },
        (Category::Star, Some(cell)) if cell.visible() => {
            spans.push(Span::styled(tree::STAR_GLYPH, Style::default().fg(cell.base_color)))
        },
        _ => spans.push(Span::raw(" ".repeat(width))),
    }

    Line::from(spans)
}

fn needle(cell: &Cell, frame: u64) -> Span<'static> {
    if !cell.visible() {
        return Span::raw(" ");
    }
    match cell.light_color {
        Some(color) if is_lit(cell.blink_phase, frame) => {
            Span::styled(tree::LIGHT_GLYPH.to_string(), Style::default().fg(color))
        },
        Some(_) => Span::styled(tree::FILL_GLYPH.to_string(), Style::default().fg(tree::UNLIT_COLOR)),
        None => Span::styled(tree::FILL_GLYPH.to_string(), Style::default().fg(cell.base_color)),
    }
}

/// Glyphs of each line with styling dropped.
pub fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines.iter().map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect()).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::tree::{CellId, TreeMode, TreeShape};

    fn layout(mode: TreeMode, density: f64, max_width: u16) -> TreeLayout {
        let shape = TreeShape { mode, density, max_width, gap: 1 };
        TreeLayout::build(&shape, &mut StdRng::seed_from_u64(2024)).unwrap()
    }

    #[test]
    fn test_blink_schedule() {
        let lit: Vec<bool> = (0..8).map(|frame| is_lit(0, frame)).collect();
        assert_eq!(lit, vec![true, true, false, false, true, true, false, false]);
        let lit: Vec<bool> = (0..4).map(|frame| is_lit(3, frame)).collect();
        assert_eq!(lit, vec![false, true, true, false]);
        assert!(is_lit(1, u64::MAX));
    }

    #[test]
    fn test_double_tree_without_lights() {
        let layout = layout(TreeMode::Double, 0.0, 21);
        let rendered =
            plain_lines(&render(&layout, 5)).into_iter().map(|line| format!("|{line}")).collect::<Vec<_>>().join("\n");

        assert!(!rendered.contains(tree::LIGHT_GLYPH));
        insta::assert_snapshot!(rendered, @r"
        |          *
        |          *
        |         ***
        |         ***
        |        *****
        |        *****
        |       *******
        |       *******
        |      *********
        |     ***********
        |          *
        |         ***
        |        *****
        |        *****
        |       *******
        |      *********
        |     ***********
        |    *************
        |   ***************
        |  *****************
        | *******************
        |         ***
        |         ***
        |         ***
        |         ***
        |          ✨
        ");
    }

    #[test]
    fn test_render_is_pure() {
        let layout = layout(TreeMode::Single, 0.4, 50);
        let before = layout.clone();
        let first = render(&layout, 17);
        let second = render(&layout, 17);
        assert_eq!(first, second);
        assert_eq!(layout, before);
    }

    #[test]
    fn test_lights_follow_their_phase() {
        let layout = layout(TreeMode::Single, 1.0, 50);
        let first_row = &layout.rows()[0];
        let cell = &layout.row_cells(first_row)[0];
        let color = cell.light_color.unwrap();

        for frame in 0..8 {
            let text = render(&layout, frame);
            let span = &text.lines[0].spans[1];
            if is_lit(cell.blink_phase, frame) {
                assert_eq!(span.content, tree::LIGHT_GLYPH.to_string());
                assert_eq!(span.style.fg, Some(color));
            } else {
                assert_eq!(span.content, tree::FILL_GLYPH.to_string());
                assert_eq!(span.style.fg, Some(tree::UNLIT_COLOR));
            }
        }
    }

    #[test]
    fn test_hidden_cells_keep_their_columns() {
        let mut layout = layout(TreeMode::Double, 0.3, 21);
        let visible = plain_lines(&render(&layout, 0));

        layout.set_all_visible(false);
        let hidden = plain_lines(&render(&layout, 0));
        for (shown, blank) in visible.iter().zip(hidden.iter()) {
            assert!(blank.chars().all(|c| c == ' '));
            assert_eq!(shown.chars().count(), blank.chars().count());
        }

        layout.set_visible(CellId(0), true);
        let lines = plain_lines(&render(&layout, 0));
        assert_eq!(lines[0].trim().chars().count(), 1);
        assert!(lines[1..].iter().all(|line| line.trim().is_empty()));
    }
}
