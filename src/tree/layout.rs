use std::ops::Range;

use rand::Rng;
use ratatui::style::Color;
use tracing::debug;

use super::TreeMode;
use crate::{
    constants::{tree, MIN_WIDTH},
    errors::ConfigurationError,
};

/// Index of a cell in the layout's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tree,
    Trunk,
    Star,
}

/// One visibility unit: a needle or light of a tier, a whole trunk row, or the star.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub category: Category,
    pub light_color: Option<Color>,
    pub blink_phase: u8,
    pub base_color: Color,
    visible: bool,
}

impl Cell {
    pub fn is_light(&self) -> bool {
        self.light_color.is_some()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub category: Category,
    pub padding: u16,
    /// Columns the row occupies once drawn.
    pub width: u16,
    pub cells: Range<usize>,
}

/// Parameters the geometry is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeShape {
    pub mode: TreeMode,
    pub density: f64,
    pub max_width: u16,
    /// Accepted for compatibility. Tiers are stacked without separator rows.
    pub gap: u16,
}

impl TreeShape {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigurationError::Density(self.density));
        }
        if self.max_width < MIN_WIDTH {
            return Err(ConfigurationError::Width { width: self.max_width, min: MIN_WIDTH });
        }
        Ok(())
    }
}

/// The tree's rows and cells. Only the cells' visibility changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    max_width: u16,
    rows: Vec<Row>,
    cells: Vec<Cell>,
}

impl TreeLayout {
    pub fn build<R: Rng + ?Sized>(shape: &TreeShape, rng: &mut R) -> Result<Self, ConfigurationError> {
        shape.validate()?;

        let mut layout = TreeLayout { max_width: shape.max_width, rows: Vec::new(), cells: Vec::new() };
        let width = i32::from(shape.max_width);

        let trunk_width = match shape.mode {
            TreeMode::Single => {
                let base = tree::SINGLE_BASE.min(width - tree::SINGLE_MARGIN);
                layout.push_tier(base, tree::SINGLE_HEIGHT, tree::TREE_COLORS[0], shape.density, rng);
                base.div_euclid(tree::TRUNK_RATIO).max(1)
            },
            TreeMode::Double => {
                let top = tree::TOP_BASE.min(width - tree::TOP_MARGIN);
                let bottom = tree::BOTTOM_BASE.min(width - tree::BOTTOM_MARGIN);
                layout.push_tier(top, tree::TOP_HEIGHT, tree::TREE_COLORS[0], shape.density, rng);
                layout.push_tier(bottom, tree::BOTTOM_HEIGHT, tree::TREE_COLORS[1], shape.density, rng);
                tree::DOUBLE_TRUNK_WIDTH
            },
        };

        for _ in 0..tree::TRUNK_ROWS {
            layout.push_single(Category::Trunk, trunk_width, tree::TRUNK_COLOR);
        }
        layout.push_single(Category::Star, 1, tree::STAR_COLOR);

        debug!(mode = %shape.mode, rows = layout.rows.len(), cells = layout.cells.len(), "built tree layout");
        Ok(layout)
    }

    fn padding_for(&self, width: i32) -> u16 {
        let padding = (i32::from(self.max_width) - width).max(0) / 2;
        padding as u16
    }

    fn push_tier<R: Rng + ?Sized>(&mut self, base: i32, height: i32, color: Color, density: f64, rng: &mut R) {
        for step in 1..=height {
            let mut width = (base * step).div_euclid(height).max(1);
            if width % 2 == 0 {
                width -= 1;
            }

            let row = self.rows.len();
            let start = self.cells.len();
            for column in 0..width as usize {
                let light_color = rng
                    .gen_bool(density)
                    .then(|| tree::LIGHT_PALETTE[rng.gen_range(0..tree::LIGHT_PALETTE.len())]);
                self.cells.push(Cell {
                    row,
                    column,
                    category: Category::Tree,
                    light_color,
                    blink_phase: rng.gen_range(0..tree::BLINK_PHASES),
                    base_color: color,
                    visible: true,
                });
            }
            self.rows.push(Row {
                category: Category::Tree,
                padding: self.padding_for(width),
                width: width as u16,
                cells: start..self.cells.len(),
            });
        }
    }

    fn push_single(&mut self, category: Category, width: i32, color: Color) {
        let row = self.rows.len();
        let start = self.cells.len();
        self.cells.push(Cell {
            row,
            column: 0,
            category,
            light_color: None,
            blink_phase: 0,
            base_color: color,
            visible: true,
        });
        let padding = self.padding_for(width);
        self.rows.push(Row { category, padding, width: width as u16, cells: start..start + 1 });
    }

    pub fn max_width(&self) -> u16 {
        self.max_width
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row_cells(&self, row: &Row) -> &[Cell] {
        &self.cells[row.cells.clone()]
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    /// Every cell in construction order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len()).map(CellId)
    }

    pub fn ids_of(&self, category: Category) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().enumerate().filter(move |(_, cell)| cell.category == category).map(|(index, _)| CellId(index))
    }

    pub fn set_visible(&mut self, id: CellId, visible: bool) {
        if let Some(cell) = self.cells.get_mut(id.0) {
            cell.visible = visible;
        }
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        self.cells.iter_mut().for_each(|cell| cell.visible = visible);
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn shape(mode: TreeMode, density: f64, max_width: u16) -> TreeShape {
        TreeShape { mode, density, max_width, gap: 1 }
    }

    fn build(mode: TreeMode, density: f64, max_width: u16) -> TreeLayout {
        TreeLayout::build(&shape(mode, density, max_width), &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_rows_are_odd_and_centered() {
        for mode in [TreeMode::Single, TreeMode::Double] {
            for max_width in [3, 11, 21, 50, 51, 80] {
                let layout = build(mode, 0.25, max_width);
                for row in layout.rows() {
                    assert_eq!(row.width % 2, 1, "{mode} {max_width}: even row {row:?}");
                    let span = row.padding * 2 + row.width;
                    assert!(
                        span == max_width || span + 1 == max_width,
                        "{mode} {max_width}: row {row:?} is not centered"
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_mode_geometry() {
        let layout = build(TreeMode::Single, 0.0, 50);
        let rows = layout.rows();
        assert_eq!(rows.len(), 20 + 4 + 1);

        let widths: Vec<u16> = rows.iter().take(20).map(|row| row.width).collect();
        assert_eq!(widths[0], 1);
        assert_eq!(widths[19], 41);
        assert!(widths.windows(2).all(|pair| pair[0] <= pair[1]));

        // 41 / 13 == 3
        assert!(rows[20..24].iter().all(|row| row.category == Category::Trunk && row.width == 3));
        assert_eq!(rows[24].category, Category::Star);
        assert_eq!(rows[24].padding, 24);
    }

    #[test]
    fn test_double_mode_geometry() {
        let layout = build(TreeMode::Double, 0.0, 21);
        let widths: Vec<u16> = layout.rows().iter().map(|row| row.width).collect();
        assert_eq!(
            widths,
            vec![1, 1, 3, 3, 5, 5, 7, 7, 9, 11, 1, 3, 5, 5, 7, 9, 11, 13, 15, 17, 19, 3, 3, 3, 3, 1]
        );

        let top = layout.row_cells(&layout.rows()[0])[0].base_color;
        let bottom = layout.row_cells(&layout.rows()[10])[0].base_color;
        assert_eq!(top, tree::TREE_COLORS[0]);
        assert_eq!(bottom, tree::TREE_COLORS[1]);
        assert_ne!(top, bottom);
    }

    #[test]
    fn test_gap_does_not_change_geometry() {
        let base = shape(TreeMode::Double, 0.3, 40);
        let narrow = TreeLayout::build(&TreeShape { gap: 0, ..base }, &mut StdRng::seed_from_u64(3));
        let wide = TreeLayout::build(&TreeShape { gap: 5, ..base }, &mut StdRng::seed_from_u64(3));
        assert_eq!(narrow.unwrap(), wide.unwrap());
    }

    #[test]
    fn test_light_attributes() {
        let layout = build(TreeMode::Double, 0.5, 50);
        assert!(layout.cells().iter().any(Cell::is_light));
        for cell in layout.cells() {
            assert!(cell.blink_phase < 4);
            match cell.light_color {
                Some(color) => {
                    assert_eq!(cell.category, Category::Tree);
                    assert!(tree::LIGHT_PALETTE.contains(&color));
                },
                None => assert!(!cell.is_light()),
            }
        }
    }

    #[test]
    fn test_density_bounds() {
        assert!(build(TreeMode::Single, 0.0, 50).cells().iter().all(|cell| !cell.is_light()));
        let full = build(TreeMode::Single, 1.0, 50);
        assert!(full.cells().iter().filter(|cell| cell.category == Category::Tree).all(Cell::is_light));

        for density in [-0.1, 1.5, f64::NAN] {
            let err = TreeLayout::build(&shape(TreeMode::Single, density, 50), &mut StdRng::seed_from_u64(1));
            assert!(matches!(err, Err(ConfigurationError::Density(_))));
        }
    }

    #[test]
    fn test_too_narrow() {
        let err = TreeLayout::build(&shape(TreeMode::Double, 0.2, 2), &mut StdRng::seed_from_u64(1));
        assert!(matches!(err, Err(ConfigurationError::Width { width: 2, min: 3 })));
    }

    #[test]
    fn test_same_seed_same_geometry() {
        let a = TreeLayout::build(&shape(TreeMode::Double, 0.4, 50), &mut StdRng::seed_from_u64(99)).unwrap();
        let b = TreeLayout::build(&shape(TreeMode::Double, 0.4, 50), &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_visibility_toggles() {
        let mut layout = build(TreeMode::Single, 0.2, 30);
        let total = layout.cells().len();
        assert_eq!(layout.visible_count(), total);

        layout.set_all_visible(false);
        assert_eq!(layout.visible_count(), 0);

        layout.set_visible(CellId(0), true);
        assert!(layout.cell(CellId(0)).visible());
        assert_eq!(layout.visible_count(), 1);

        assert_eq!(layout.ids_of(Category::Trunk).count(), 4);
        assert_eq!(layout.ids_of(Category::Star).collect::<Vec<_>>(), vec![CellId(total - 1)]);
    }
}
