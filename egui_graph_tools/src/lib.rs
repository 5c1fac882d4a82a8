//! Interaction widgets for an egui node graph.
//!
//! Nodes are drawn as figures on a layered [`FigureCanvas`]. On top of it
//! this crate provides:
//!
//! - [`LinkToolController`]: drag from a pin and drop on a pin of the
//!   opposite role to get a [`LinkCreated`] notification.
//! - [`GroupPresenter`]: keeps a group's bounding figure around its members
//!   and moves the members when the bounding figure is dragged.
//! - [`GraphDisplayer`]: an egui widget routing pointer input to the tools
//!   and painting the canvas.
//!
//! [`Scene`] is the in-memory canvas used by the widget and the tests.

pub mod config;
pub mod drawing;
pub mod error;
pub mod figure;
pub mod interactions;
pub mod link_tool;
pub mod node_move;
pub mod presenter;
pub mod scene;
pub mod state;
pub mod theme;
pub mod traits;
pub mod types;
pub mod widget;

pub use config::GraphConfig;
pub use error::GraphError;
pub use figure::{Figure, FigureFilter, FigureId, FigureKind, Layer, ListenerId};
pub use interactions::{PointerAction, PointerEvent};
pub use link_tool::{LinkCreated, LinkToolController};
pub use node_move::NodeMoveController;
pub use presenter::{GroupPresenter, LeafPresenter};
pub use scene::Scene;
pub use state::{LinkToolState, MoveDrag, PendingLink};
pub use theme::GraphTheme;
pub use traits::{CanvasRef, FigureCanvas, FigureListener, NodePresenter};
pub use types::*;
pub use widget::{GraphDisplayer, PendingActions};
