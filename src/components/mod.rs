pub mod scene;
pub mod tree_view;
