use rand::{seq::SliceRandom, Rng};

use super::{BuildMode, Category, CellId, TeardownMode, TreeLayout};

/// Cells in the order the build phase reveals them: needles first, then the trunk rows, then the star.
pub fn build_order<R: Rng + ?Sized>(layout: &TreeLayout, mode: BuildMode, rng: &mut R) -> Vec<CellId> {
    let mut order: Vec<CellId> = layout.ids_of(Category::Tree).collect();
    if mode == BuildMode::Random {
        order.shuffle(rng);
    }
    order.extend(layout.ids_of(Category::Trunk));
    order.extend(layout.ids_of(Category::Star));
    order
}

/// Cells in the order the teardown phase hides them.
///
/// `Random` shuffles every cell alike, trunk and star included. `Reverse` walks construction order backwards,
/// so the star goes first and the top needle last.
pub fn teardown_order<R: Rng + ?Sized>(layout: &TreeLayout, mode: TeardownMode, rng: &mut R) -> Vec<CellId> {
    let mut order: Vec<CellId> = layout.ids().collect();
    match mode {
        TeardownMode::Random => order.shuffle(rng),
        TeardownMode::Reverse => order.reverse(),
    }
    order
}
