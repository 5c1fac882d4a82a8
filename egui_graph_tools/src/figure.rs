//! Figure model shared by the canvas, the controllers and the painter.

use egui::Rect;
use uuid::Uuid;

use crate::types::PinRole;

/// Identity of a figure on a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FigureId(pub Uuid);

impl FigureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FigureId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned when registering a listener, used to unregister it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// What a figure represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureKind {
    /// Body of a leaf node.
    NodeBody,
    /// Bounding figure of a group.
    GroupBody,
    /// A real connection point.
    Pin(PinRole),
    /// Drag preview of a link endpoint.
    GhostPin(PinRole),
    /// A link between two anchor figures.
    Link { source: FigureId, target: FigureId },
    /// Drag preview of a link.
    GhostLink { source: FigureId, target: FigureId },
}

impl FigureKind {
    pub fn pin_role(&self) -> Option<PinRole> {
        match self {
            FigureKind::Pin(role) => Some(*role),
            _ => None,
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, FigureKind::NodeBody | FigureKind::GroupBody)
    }

    /// Anchor figures of a link-like figure.
    pub fn link_anchors(&self) -> Option<(FigureId, FigureId)> {
        match self {
            FigureKind::Link { source, target } | FigureKind::GhostLink { source, target } => {
                Some((*source, *target))
            }
            _ => None,
        }
    }
}

/// Restricts hit-testing to a family of figure kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureFilter {
    Any,
    /// Real pins only; ghosts are never hit.
    Pins,
    /// Node and group bodies.
    Bodies,
}

impl FigureFilter {
    pub fn accepts(self, kind: &FigureKind) -> bool {
        match self {
            FigureFilter::Any => true,
            FigureFilter::Pins => matches!(kind, FigureKind::Pin(_)),
            FigureFilter::Bodies => kind.is_body(),
        }
    }
}

/// Scene layers, painted in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Content,
    Connection,
    Feedback,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Content, Layer::Connection, Layer::Feedback];

    pub(crate) fn index(self) -> usize {
        match self {
            Layer::Content => 0,
            Layer::Connection => 1,
            Layer::Feedback => 2,
        }
    }
}

/// A retained visual.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: FigureKind,
    pub bounds: Rect,
    /// 255 is opaque.
    pub alpha: u8,
    pub label: Option<String>,
}

impl Figure {
    pub fn new(kind: FigureKind, bounds: Rect) -> Self {
        Self {
            kind,
            bounds,
            alpha: 255,
            label: None,
        }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
