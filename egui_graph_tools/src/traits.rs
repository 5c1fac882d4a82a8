//! Trait definitions decoupling the widgets from the figure toolkit.

use std::rc::Rc;

use egui::{Pos2, Rect, Vec2};

use crate::figure::{Figure, FigureFilter, FigureId, FigureKind, Layer, ListenerId};
use crate::types::NodeId;

/// Callback invoked with the id of a figure whose bounds changed.
pub type FigureListener = Rc<dyn Fn(FigureId)>;

/// Shared handle on a canvas, cloned into listeners and controllers.
pub type CanvasRef = Rc<dyn FigureCanvas>;

/// Layered scene graph with hit-testing and movement notification.
///
/// All methods take `&self`: listeners run while the canvas is in use and
/// may call back into it, so implementations must not hold internal borrows
/// while notifying.
pub trait FigureCanvas {
    fn create_figure(&self, figure: Figure) -> FigureId;

    /// Forget a figure: it leaves every layer and loses its listeners.
    fn dispose_figure(&self, id: FigureId);

    fn figure(&self, id: FigureId) -> Option<Figure>;

    fn figure_kind(&self, id: FigureId) -> Option<FigureKind>;

    fn bounds(&self, id: FigureId) -> Option<Rect>;

    /// Replace the bounds of a figure. Listeners registered on it are
    /// notified synchronously when the rectangle actually changes.
    fn set_bounds(&self, id: FigureId, bounds: Rect);

    fn add_to_layer(&self, layer: Layer, id: FigureId);

    /// Returns `false` if the figure was not in the layer.
    fn remove_from_layer(&self, layer: Layer, id: FigureId) -> bool;

    /// Move a figure below every other figure of the layer.
    fn send_to_back(&self, layer: Layer, id: FigureId);

    /// Figures of a layer, bottom-most first.
    fn layer_figures(&self, layer: Layer) -> Vec<FigureId>;

    /// Topmost figure of `layer` containing `pos` and accepted by `filter`.
    fn find_figure_at(&self, layer: Layer, pos: Pos2, filter: FigureFilter) -> Option<FigureId>;

    fn add_figure_listener(&self, id: FigureId, listener: FigureListener) -> ListenerId;

    /// Returns `false` if the listener was not registered on that figure.
    fn remove_figure_listener(&self, id: FigureId, listener: ListenerId) -> bool;

    fn layer_contains(&self, layer: Layer, id: FigureId) -> bool {
        self.layer_figures(layer).contains(&id)
    }

    fn translate(&self, id: FigureId, delta: Vec2) {
        if let Some(bounds) = self.bounds(id) {
            self.set_bounds(id, bounds.translate(delta));
        }
    }

    /// Move the top-left corner of a figure, keeping its size.
    fn set_location(&self, id: FigureId, location: Pos2) {
        if let Some(bounds) = self.bounds(id) {
            self.set_bounds(id, Rect::from_min_size(location, bounds.size()));
        }
    }

    /// Point where links attach to a figure.
    fn anchor(&self, id: FigureId) -> Option<Pos2> {
        self.bounds(id).map(|b| b.center())
    }
}

/// A node paired with its visuals.
pub trait NodePresenter {
    fn node_id(&self) -> NodeId;

    /// Figure watched for movement by enclosing groups.
    fn node_body(&self) -> FigureId;

    /// Figure whose bounds represent the node; translated when an enclosing
    /// group is dragged.
    fn bounds_figure(&self) -> FigureId;

    /// Figures to insert into the content layer, back-most first.
    fn displayable_figures(&self) -> Vec<FigureId>;
}
