//! Moving node and group bodies with the pointer.

use crate::figure::{FigureFilter, Layer};
use crate::interactions::PointerEvent;
use crate::state::MoveDrag;
use crate::traits::CanvasRef;

/// Drags body figures whose press was left unconsumed by other tools.
pub struct NodeMoveController {
    canvas: CanvasRef,
    dragging: Option<MoveDrag>,
}

impl NodeMoveController {
    pub fn new(canvas: CanvasRef) -> Self {
        Self {
            canvas,
            dragging: None,
        }
    }

    pub fn dragging(&self) -> Option<&MoveDrag> {
        self.dragging.as_ref()
    }

    pub fn on_press(&mut self, event: &mut PointerEvent) {
        self.dragging = None;
        if event.is_consumed() {
            return;
        }
        let Some(figure) =
            self.canvas
                .find_figure_at(Layer::Content, event.position, FigureFilter::Bodies)
        else {
            return;
        };
        let Some(bounds) = self.canvas.bounds(figure) else {
            return;
        };
        event.consume();
        self.dragging = Some(MoveDrag {
            figure,
            offset: event.position - bounds.min,
        });
    }

    pub fn on_drag(&mut self, event: &PointerEvent) {
        if let Some(drag) = self.dragging {
            self.canvas
                .set_location(drag.figure, event.position - drag.offset);
        }
    }

    pub fn on_release(&mut self, _event: &PointerEvent) {
        self.dragging = None;
    }
}

impl std::fmt::Debug for NodeMoveController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeMoveController")
            .field("dragging", &self.dragging)
            .finish()
    }
}
