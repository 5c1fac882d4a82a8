//! Presenters pairing graph nodes with their figures.

mod group;
mod leaf;

pub use group::GroupPresenter;
pub use leaf::LeafPresenter;
