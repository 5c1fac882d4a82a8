//! Link creation by dragging a pin and dropping it on another pin.
//!
//! Pressing a pin shows nothing yet. The first drag movement inserts a ghost
//! link into the connection layer and a ghost endpoint of the opposite role
//! into the feedback layer; the ghost then follows the pointer. Releasing
//! over a pin of the opposite role notifies every [`LinkCreated`] listener
//! with the output pin first, whichever end the drag started from.

use egui::{Rect, Vec2};
use log::debug;

use crate::figure::{Figure, FigureFilter, FigureId, FigureKind, Layer, ListenerId};
use crate::interactions::PointerEvent;
use crate::state::{LinkToolState, PendingLink};
use crate::traits::CanvasRef;
use crate::types::PinRole;

/// A link dropped between two pins, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkCreated {
    pub output: FigureId,
    pub input: FigureId,
}

type LinkListener = Box<dyn FnMut(&LinkCreated)>;

pub struct LinkToolController {
    canvas: CanvasRef,
    ghost_alpha: u8,
    state: LinkToolState,
    listeners: Vec<(ListenerId, LinkListener)>,
    next_listener: u64,
}

impl LinkToolController {
    pub fn new(canvas: CanvasRef, ghost_alpha: u8) -> Self {
        Self {
            canvas,
            ghost_alpha,
            state: LinkToolState::Idle,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn state(&self) -> &LinkToolState {
        &self.state
    }

    pub fn add_link_listener(&mut self, listener: impl FnMut(&LinkCreated) + 'static) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if no such listener was registered.
    pub fn remove_link_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    pub fn on_press(&mut self, event: &mut PointerEvent) {
        if !self.state.is_idle() {
            self.discard_pending();
        }

        let Some(source) =
            self.canvas
                .find_figure_at(Layer::Content, event.position, FigureFilter::Pins)
        else {
            return;
        };
        let (Some(source_role), Some(source_bounds)) = (
            self.canvas.figure_kind(source).and_then(|k| k.pin_role()),
            self.canvas.bounds(source),
        ) else {
            return;
        };

        event.consume();

        // An input pin drags out an output endpoint and vice versa.
        let ghost = self.canvas.create_figure(
            Figure::new(FigureKind::GhostPin(source_role.opposite()), source_bounds)
                .with_alpha(self.ghost_alpha),
        );
        let ghost_link = self.canvas.create_figure(
            Figure::new(
                FigureKind::GhostLink {
                    source,
                    target: ghost,
                },
                Rect::from_center_size(source_bounds.center(), Vec2::ZERO),
            )
            .with_alpha(self.ghost_alpha),
        );

        self.state = LinkToolState::Pressed(PendingLink {
            source,
            source_role,
            ghost,
            ghost_link,
            offset: event.position - source_bounds.min,
        });
    }

    pub fn on_drag(&mut self, event: &PointerEvent) {
        let pending = match std::mem::take(&mut self.state) {
            LinkToolState::Idle => return,
            LinkToolState::Pressed(pending) => {
                self.canvas.add_to_layer(Layer::Connection, pending.ghost_link);
                self.canvas.add_to_layer(Layer::Feedback, pending.ghost);
                pending
            }
            LinkToolState::Dragging(pending) => pending,
        };

        self.canvas
            .set_location(pending.ghost, event.position - pending.offset);
        self.state = LinkToolState::Dragging(pending);
    }

    pub fn on_release(&mut self, event: &PointerEvent) {
        let pending = match std::mem::take(&mut self.state) {
            LinkToolState::Idle => return,
            LinkToolState::Pressed(pending) => {
                self.dispose_ghosts(&pending);
                return;
            }
            LinkToolState::Dragging(pending) => pending,
        };

        let destination =
            self.canvas
                .find_figure_at(Layer::Content, event.position, FigureFilter::Pins);

        // Ghosts go away before listeners run, in case they rebuild the scene.
        self.dispose_ghosts(&pending);

        let Some(destination) = destination.filter(|d| *d != pending.source) else {
            debug!("link drag from {:?} dropped on no other pin", pending.source);
            return;
        };
        let destination_role = self
            .canvas
            .figure_kind(destination)
            .and_then(|k| k.pin_role());

        let link = match (pending.source_role, destination_role) {
            (PinRole::Output, Some(PinRole::Input)) => LinkCreated {
                output: pending.source,
                input: destination,
            },
            (PinRole::Input, Some(PinRole::Output)) => LinkCreated {
                output: destination,
                input: pending.source,
            },
            _ => {
                debug!(
                    "link from {:?} to {:?} ignored: pins share a role",
                    pending.source, destination
                );
                return;
            }
        };

        debug!("link created {:?} -> {:?}", link.output, link.input);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&link);
        }
    }

    fn discard_pending(&mut self) {
        let state = std::mem::take(&mut self.state);
        if let Some(pending) = state.pending() {
            self.dispose_ghosts(pending);
        }
    }

    fn dispose_ghosts(&self, pending: &PendingLink) {
        self.canvas.remove_from_layer(Layer::Feedback, pending.ghost);
        self.canvas
            .remove_from_layer(Layer::Connection, pending.ghost_link);
        self.canvas.dispose_figure(pending.ghost_link);
        self.canvas.dispose_figure(pending.ghost);
    }
}

impl std::fmt::Debug for LinkToolController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkToolController")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
