//! Transient interaction state of the controllers.

use egui::Vec2;

use crate::figure::FigureId;
use crate::types::PinRole;

/// A link being dragged out of a pin.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingLink {
    /// The pressed pin figure the link starts from.
    pub source: FigureId,
    pub source_role: PinRole,
    /// Ghost endpoint moved by the pointer.
    pub ghost: FigureId,
    /// Ghost link from `source` to `ghost`.
    pub ghost_link: FigureId,
    /// Press position relative to the source pin's top-left corner.
    pub offset: Vec2,
}

/// State of the link tool between pointer events.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LinkToolState {
    #[default]
    Idle,
    /// A pin was pressed but the pointer has not moved yet.
    Pressed(PendingLink),
    /// Ghosts are shown and follow the pointer.
    Dragging(PendingLink),
}

impl LinkToolState {
    pub fn pending(&self) -> Option<&PendingLink> {
        match self {
            LinkToolState::Idle => None,
            LinkToolState::Pressed(link) | LinkToolState::Dragging(link) => Some(link),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LinkToolState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, LinkToolState::Dragging(_))
    }
}

/// A body figure being moved by the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveDrag {
    pub figure: FigureId,
    pub offset: Vec2,
}
