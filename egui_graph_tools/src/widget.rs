//! Canvas widget hosting presenters and the interaction controllers.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::config::GraphConfig;
use crate::drawing::{draw_grid, paint_canvas};
use crate::figure::{Figure, FigureId, FigureKind, Layer};
use crate::interactions::{PointerAction, PointerEvent, PointerSample};
use crate::link_tool::{LinkCreated, LinkToolController};
use crate::node_move::NodeMoveController;
use crate::theme::GraphTheme;
use crate::traits::{CanvasRef, NodePresenter};

/// Events collected while handling one frame, for the caller to apply.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PendingActions {
    pub links_created: Vec<LinkCreated>,
}

impl PendingActions {
    pub fn is_empty(&self) -> bool {
        self.links_created.is_empty()
    }
}

/// Displays figures of a canvas and feeds pointer input to the link tool
/// and the node mover.
///
/// A press goes to the link tool first; the node mover only sees it when no
/// pin was hit. Created links are not drawn automatically: the caller
/// decides whether to [`GraphDisplayer::connect`] them.
pub struct GraphDisplayer {
    canvas: CanvasRef,
    link_tool: LinkToolController,
    node_move: NodeMoveController,
    theme: GraphTheme,
    pan: Vec2,
    created: Rc<RefCell<Vec<LinkCreated>>>,
}

impl GraphDisplayer {
    pub fn new(canvas: CanvasRef, config: &GraphConfig) -> Self {
        let created = Rc::new(RefCell::new(Vec::new()));
        let mut link_tool = LinkToolController::new(canvas.clone(), config.ghost_alpha);
        let sink = created.clone();
        link_tool.add_link_listener(move |link: &LinkCreated| sink.borrow_mut().push(*link));

        Self {
            node_move: NodeMoveController::new(canvas.clone()),
            canvas,
            link_tool,
            theme: GraphTheme {
                header_height: config.header_height,
                ..GraphTheme::default()
            },
            pan: Vec2::ZERO,
            created,
        }
    }

    pub fn with_theme(mut self, theme: GraphTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn canvas(&self) -> &CanvasRef {
        &self.canvas
    }

    pub fn theme(&self) -> &GraphTheme {
        &self.theme
    }

    pub fn link_tool(&self) -> &LinkToolController {
        &self.link_tool
    }

    /// Register further link listeners here.
    pub fn link_tool_mut(&mut self) -> &mut LinkToolController {
        &mut self.link_tool
    }

    pub fn node_move(&self) -> &NodeMoveController {
        &self.node_move
    }

    /// Insert the figures of a presenter into the content layer. Group
    /// bodies go to the back so members stay hittable.
    pub fn display(&self, presenter: &dyn NodePresenter) {
        for figure in presenter.displayable_figures() {
            if self.canvas.layer_contains(Layer::Content, figure) {
                continue;
            }
            self.canvas.add_to_layer(Layer::Content, figure);
            if self.canvas.figure_kind(figure) == Some(FigureKind::GroupBody) {
                self.canvas.send_to_back(Layer::Content, figure);
            }
        }
    }

    pub fn hide(&self, presenter: &dyn NodePresenter) {
        for figure in presenter.displayable_figures() {
            self.canvas.remove_from_layer(Layer::Content, figure);
        }
    }

    /// Draw a permanent link between two pins.
    pub fn connect(&self, link: LinkCreated) -> FigureId {
        let anchor = self.canvas.anchor(link.output).unwrap_or(Pos2::ZERO);
        let figure = self.canvas.create_figure(Figure::new(
            FigureKind::Link {
                source: link.output,
                target: link.input,
            },
            Rect::from_center_size(anchor, Vec2::ZERO),
        ));
        self.canvas.add_to_layer(Layer::Connection, figure);
        debug!("link figure {:?} connects {:?} -> {:?}", figure, link.output, link.input);
        figure
    }

    /// Remove a link figure created by [`GraphDisplayer::connect`].
    pub fn disconnect(&self, link_figure: FigureId) -> bool {
        let removed = self.canvas.remove_from_layer(Layer::Connection, link_figure);
        if removed {
            self.canvas.dispose_figure(link_figure);
        }
        removed
    }

    /// Route one pointer event in canvas coordinates. Returns whether a
    /// controller took ownership of a press.
    pub fn handle_pointer(&mut self, action: PointerAction, position: Pos2) -> bool {
        let mut event = PointerEvent::new(position);
        match action {
            PointerAction::Press => {
                self.link_tool.on_press(&mut event);
                self.node_move.on_press(&mut event);
            }
            PointerAction::Drag => {
                self.link_tool.on_drag(&event);
                self.node_move.on_drag(&event);
            }
            PointerAction::Release => {
                self.link_tool.on_release(&event);
                self.node_move.on_release(&event);
            }
        }
        event.is_consumed()
    }

    /// Links created since the last call.
    pub fn take_actions(&self) -> PendingActions {
        PendingActions {
            links_created: std::mem::take(&mut *self.created.borrow_mut()),
        }
    }

    /// Show the canvas, handle this frame's pointer input and paint every
    /// layer.
    pub fn show(&mut self, ui: &mut egui::Ui) -> PendingActions {
        let available = ui.available_rect_before_wrap();
        let (canvas_response, painter) =
            ui.allocate_painter(available.size(), egui::Sense::click_and_drag());
        let canvas_rect = canvas_response.rect;

        if canvas_response.dragged_by(egui::PointerButton::Middle) {
            self.pan += canvas_response.drag_delta();
        }
        let offset = canvas_rect.min.to_vec2() + self.pan;

        let sample = PointerSample::read(ui, &canvas_response);
        for (action, screen_pos) in sample.actions() {
            self.handle_pointer(action, screen_pos - offset);
        }

        painter.rect_filled(canvas_rect, 0.0, self.theme.background_color);
        draw_grid(
            &painter,
            canvas_rect,
            self.pan,
            self.theme.grid_color,
            self.theme.grid_spacing,
        );
        paint_canvas(&painter, self.canvas.as_ref(), &self.theme, offset);

        self.take_actions()
    }
}

impl std::fmt::Debug for GraphDisplayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphDisplayer")
            .field("link_tool", &self.link_tool)
            .field("node_move", &self.node_move)
            .field("pan", &self.pan)
            .finish()
    }
}
