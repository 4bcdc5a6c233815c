pub mod scene;
pub mod tree;

/// Narrowest canvas a tree can be laid out on.
pub const MIN_WIDTH: u16 = 3;
