use std::cell::Cell;
use std::rc::Rc;

use egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::config::GraphConfig;
use crate::figure::{Figure, FigureId, FigureKind, ListenerId};
use crate::traits::{CanvasRef, NodePresenter};
use crate::types::{Leaf, NodeId, PinInfo, PinRole};

/// Presents a leaf node as a body figure with one pin figure per pin.
///
/// Inputs are stacked on the left edge and outputs on the right, one row per
/// pin below the header. Pins follow the body when it moves.
pub struct LeafPresenter {
    canvas: CanvasRef,
    leaf: Leaf,
    body: FigureId,
    pins: Vec<(FigureId, PinInfo)>,
    follow_listener: ListenerId,
}

impl LeafPresenter {
    pub fn new(canvas: CanvasRef, leaf: Leaf, origin: Pos2, config: &GraphConfig) -> Self {
        let rows = leaf.inputs().count().max(leaf.outputs().count());
        let height = config.header_height + rows as f32 * config.pin_row_height + 8.0;
        let body = canvas.create_figure(
            Figure::new(
                FigureKind::NodeBody,
                Rect::from_min_size(origin, vec2(config.node_width, height)),
            )
            .with_label(leaf.name.clone()),
        );

        let pin_start_y = origin.y + config.header_height + 4.0;
        let (mut input_row, mut output_row) = (0usize, 0usize);
        let mut pins = Vec::with_capacity(leaf.pins.len());
        for pin in &leaf.pins {
            let (row, cx) = match pin.role {
                PinRole::Input => {
                    input_row += 1;
                    (input_row - 1, origin.x + config.pin_margin)
                }
                PinRole::Output => {
                    output_row += 1;
                    (output_row - 1, origin.x + config.node_width - config.pin_margin)
                }
            };
            let cy = pin_start_y + row as f32 * config.pin_row_height + config.pin_row_height / 2.0;
            let id = canvas.create_figure(
                Figure::new(
                    FigureKind::Pin(pin.role),
                    Rect::from_center_size(pos2(cx, cy), Vec2::splat(config.pin_size)),
                )
                .with_label(pin.display_name.clone()),
            );
            pins.push((id, pin.clone()));
        }

        let pin_ids: Vec<FigureId> = pins.iter().map(|(id, _)| *id).collect();
        let last_location = Cell::new(origin);
        let weak_canvas = Rc::downgrade(&canvas);
        let follow_listener = canvas.add_figure_listener(
            body,
            Rc::new(move |moved| {
                let Some(canvas) = weak_canvas.upgrade() else {
                    return;
                };
                let Some(bounds) = canvas.bounds(moved) else {
                    return;
                };
                let delta = bounds.min - last_location.get();
                last_location.set(bounds.min);
                if delta != Vec2::ZERO {
                    for pin in &pin_ids {
                        canvas.translate(*pin, delta);
                    }
                }
            }),
        );

        Self {
            canvas,
            leaf,
            body,
            pins,
            follow_listener,
        }
    }

    pub fn leaf(&self) -> &Leaf {
        &self.leaf
    }

    pub fn pin_figures(&self) -> impl Iterator<Item = FigureId> + '_ {
        self.pins.iter().map(|(id, _)| *id)
    }

    /// The pin represented by a pin figure of this node.
    pub fn pin_info(&self, figure: FigureId) -> Option<&PinInfo> {
        self.pins
            .iter()
            .find(|(id, _)| *id == figure)
            .map(|(_, pin)| pin)
    }

    pub fn pin_figure(&self, name: &str, role: PinRole) -> Option<FigureId> {
        self.pins
            .iter()
            .find(|(_, pin)| pin.name == name && pin.role == role)
            .map(|(id, _)| *id)
    }
}

impl NodePresenter for LeafPresenter {
    fn node_id(&self) -> NodeId {
        self.leaf.id
    }

    fn node_body(&self) -> FigureId {
        self.body
    }

    fn bounds_figure(&self) -> FigureId {
        self.body
    }

    fn displayable_figures(&self) -> Vec<FigureId> {
        std::iter::once(self.body).chain(self.pin_figures()).collect()
    }
}

impl Drop for LeafPresenter {
    fn drop(&mut self) {
        self.canvas
            .remove_figure_listener(self.body, self.follow_listener);
        for (pin, _) in &self.pins {
            self.canvas.dispose_figure(*pin);
        }
        self.canvas.dispose_figure(self.body);
    }
}

impl std::fmt::Debug for LeafPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeafPresenter")
            .field("leaf", &self.leaf.name)
            .field("body", &self.body)
            .field("pins", &self.pins.len())
            .finish()
    }
}
