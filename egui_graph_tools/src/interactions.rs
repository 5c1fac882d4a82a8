//! Pointer events fed to the controllers, and their extraction from egui input.

use egui::{Pos2, Vec2};

/// Kind of pointer event delivered to the controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Press,
    Drag,
    Release,
}

/// A pointer event in canvas coordinates.
///
/// A handler that takes ownership of a press calls [`PointerEvent::consume`]
/// so later handlers leave it alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Pos2,
    consumed: bool,
}

impl PointerEvent {
    pub fn new(position: Pos2) -> Self {
        Self {
            position,
            consumed: false,
        }
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Primary-button state sampled from one egui frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PointerSample {
    pub pressed: bool,
    pub released: bool,
    pub down: bool,
    pub delta: Vec2,
    pub pos: Option<Pos2>,
    pub hovered: bool,
}

impl PointerSample {
    pub(crate) fn read(ui: &egui::Ui, canvas_response: &egui::Response) -> Self {
        ui.input(|i| Self {
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            down: i.pointer.primary_down(),
            delta: i.pointer.delta(),
            pos: i.pointer.interact_pos(),
            hovered: canvas_response.hovered(),
        })
    }

    /// Translate the sample into controller actions, in delivery order.
    pub(crate) fn actions(&self) -> Vec<(PointerAction, Pos2)> {
        let Some(pos) = self.pos else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if self.pressed && self.hovered {
            actions.push((PointerAction::Press, pos));
        }
        if self.down && !self.pressed && self.delta != Vec2::ZERO {
            actions.push((PointerAction::Drag, pos));
        }
        if self.released {
            actions.push((PointerAction::Release, pos));
        }
        actions
    }
}
