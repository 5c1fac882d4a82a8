use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use egui::{Pos2, Rect, Vec2};
use log::{debug, trace};

use crate::config::GraphConfig;
use crate::figure::{Figure, FigureId, FigureKind, ListenerId};
use crate::traits::{CanvasRef, NodePresenter};
use crate::types::{Group, NodeId};

/// Wraps the members of a group in a bounding figure.
///
/// The bounding figure always covers the union of the children's bounds
/// figures, padded by half the margin on each side. Moving a child resizes
/// it; moving the bounding figure itself moves every child by the same
/// delta.
///
/// Both reactions change figures that other listeners of this presenter
/// watch. A guard flag is held while they run so the presenter ignores the
/// movement events it causes itself.
pub struct GroupPresenter {
    state: Rc<GroupState>,
    bounds_listener: ListenerId,
}

struct Child {
    presenter: Rc<dyn NodePresenter>,
    listener: ListenerId,
}

struct GroupState {
    canvas: CanvasRef,
    group: RefCell<Group>,
    bounds_figure: FigureId,
    margin: f32,
    children: RefCell<Vec<Child>>,
    block_events: Cell<bool>,
    /// Top-left of the bounding figure after the last recompute; reference
    /// point for manual drags.
    bounds_location: Cell<Pos2>,
}

impl GroupPresenter {
    pub fn new(
        canvas: CanvasRef,
        group: Group,
        children: impl IntoIterator<Item = Rc<dyn NodePresenter>>,
        config: &GraphConfig,
    ) -> Self {
        let bounds_figure = canvas.create_figure(
            Figure::new(FigureKind::GroupBody, Rect::from_min_size(Pos2::ZERO, Vec2::ZERO))
                .with_label(group.name.clone()),
        );
        let state = Rc::new(GroupState {
            canvas: canvas.clone(),
            group: RefCell::new(group),
            bounds_figure,
            margin: config.group_margin,
            children: RefCell::new(Vec::new()),
            block_events: Cell::new(false),
            bounds_location: Cell::new(Pos2::ZERO),
        });

        let weak = Rc::downgrade(&state);
        let bounds_listener = canvas.add_figure_listener(
            bounds_figure,
            Rc::new(move |_| {
                if let Some(state) = weak.upgrade() {
                    state.on_bounds_figure_moved();
                }
            }),
        );

        let presenter = Self {
            state,
            bounds_listener,
        };
        for child in children {
            presenter.add(child);
        }
        presenter.state.update_bounds();
        presenter
    }

    /// Track a new member.
    ///
    /// # Panics
    ///
    /// In debug builds, if the presenter's node is neither a leaf nor a
    /// sub-group of the represented group.
    pub fn add(&self, presenter: Rc<dyn NodePresenter>) {
        let node = presenter.node_id();
        debug_assert!(
            self.state.group.borrow().is_direct_member(node),
            "The added presenter is not related to a node of the represented group"
        );
        if self.contains(node) {
            return;
        }

        let weak = Rc::downgrade(&self.state);
        let listener = self.state.canvas.add_figure_listener(
            presenter.node_body(),
            Rc::new(move |_| {
                if let Some(state) = weak.upgrade() {
                    state.on_child_moved();
                }
            }),
        );
        self.state
            .children
            .borrow_mut()
            .push(Child { presenter, listener });
        self.state.update_bounds();
    }

    /// Stop tracking a member. Returns `false` if it was not tracked.
    pub fn remove(&self, presenter: &dyn NodePresenter) -> bool {
        let node = presenter.node_id();
        let removed = {
            let mut children = self.state.children.borrow_mut();
            let index = children.iter().position(|c| c.presenter.node_id() == node);
            index.map(|index| children.remove(index))
        };
        let Some(child) = removed else {
            return false;
        };
        self.state
            .canvas
            .remove_figure_listener(child.presenter.node_body(), child.listener);
        self.state.update_bounds();
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.state
            .children
            .borrow()
            .iter()
            .any(|c| c.presenter.node_id() == node)
    }

    pub fn children(&self) -> Vec<Rc<dyn NodePresenter>> {
        self.state.child_presenters()
    }

    pub fn group(&self) -> Ref<'_, Group> {
        self.state.group.borrow()
    }

    /// Mutable access to the represented group, e.g. to register a member
    /// before [`GroupPresenter::add`]ing its presenter.
    pub fn group_mut(&self) -> RefMut<'_, Group> {
        self.state.group.borrow_mut()
    }

    pub fn margin(&self) -> f32 {
        self.state.margin
    }

    /// Recompute the bounding figure from the current children.
    pub fn update_bounds(&self) {
        self.state.update_bounds();
    }
}

impl GroupState {
    fn child_presenters(&self) -> Vec<Rc<dyn NodePresenter>> {
        self.children
            .borrow()
            .iter()
            .map(|c| c.presenter.clone())
            .collect()
    }

    fn on_child_moved(&self) {
        if !self.block_events.get() {
            self.update_bounds();
        }
    }

    fn on_bounds_figure_moved(&self) {
        if self.block_events.get() {
            return;
        }
        let Some(bounds) = self.canvas.bounds(self.bounds_figure) else {
            return;
        };

        self.block_events.set(true);
        let delta = bounds.min - self.bounds_location.get();
        trace!("group {:?} dragged by {:?}", self.bounds_figure, delta);
        for child in self.child_presenters() {
            self.canvas.translate(child.bounds_figure(), delta);
        }
        self.bounds_location.set(self.bounds_location.get() + delta);
        self.block_events.set(false);

        self.update_bounds();
    }

    fn update_bounds(&self) {
        let was_blocked = self.block_events.replace(true);

        let union = self
            .child_presenters()
            .iter()
            .filter_map(|child| self.canvas.bounds(child.bounds_figure()))
            .reduce(|acc, rect| acc.union(rect));
        let rect = match union {
            Some(union) => union.expand(self.margin / 2.0),
            None => Rect::from_min_size(self.bounds_location.get(), Vec2::ZERO),
        };
        self.canvas.set_bounds(self.bounds_figure, rect);
        if let Some(bounds) = self.canvas.bounds(self.bounds_figure) {
            self.bounds_location.set(bounds.min);
        }
        debug!("group {:?} bounds updated to {:?}", self.bounds_figure, rect);

        self.block_events.set(was_blocked);
    }
}

impl NodePresenter for GroupPresenter {
    fn node_id(&self) -> NodeId {
        self.state.group.borrow().id
    }

    fn node_body(&self) -> FigureId {
        self.state.bounds_figure
    }

    fn bounds_figure(&self) -> FigureId {
        self.state.bounds_figure
    }

    fn displayable_figures(&self) -> Vec<FigureId> {
        vec![self.state.bounds_figure]
    }
}

impl Drop for GroupPresenter {
    fn drop(&mut self) {
        let canvas = &self.state.canvas;
        canvas.remove_figure_listener(self.state.bounds_figure, self.bounds_listener);
        for child in self.state.children.borrow().iter() {
            canvas.remove_figure_listener(child.presenter.node_body(), child.listener);
        }
        canvas.dispose_figure(self.state.bounds_figure);
    }
}

impl std::fmt::Debug for GroupPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupPresenter")
            .field("group", &self.state.group.borrow().name)
            .field("bounds_figure", &self.state.bounds_figure)
            .field("children", &self.state.children.borrow().len())
            .finish()
    }
}
