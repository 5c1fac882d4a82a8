//! In-memory canvas: figures, layers and movement listeners.

use std::cell::RefCell;
use std::collections::HashMap;

use egui::{Pos2, Rect};
use log::{trace, warn};

use crate::figure::{Figure, FigureFilter, FigureId, FigureKind, Layer, ListenerId};
use crate::traits::{FigureCanvas, FigureListener};

#[derive(Default)]
struct Figures {
    by_id: HashMap<FigureId, Figure>,
    layers: [Vec<FigureId>; 3],
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_figure: HashMap<FigureId, Vec<(ListenerId, FigureListener)>>,
}

/// Default [`FigureCanvas`] implementation.
///
/// Figures and listeners live behind separate `RefCell`s. Neither is
/// borrowed while listeners run, so a listener may freely move figures or
/// (un)register listeners.
#[derive(Default)]
pub struct Scene {
    figures: RefCell<Figures>,
    listeners: RefCell<Listeners>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure_count(&self) -> usize {
        self.figures.borrow().by_id.len()
    }

    pub fn listener_count(&self, id: FigureId) -> usize {
        self.listeners
            .borrow()
            .by_figure
            .get(&id)
            .map_or(0, Vec::len)
    }

    fn notify_moved(&self, id: FigureId) {
        let snapshot: Vec<FigureListener> = self
            .listeners
            .borrow()
            .by_figure
            .get(&id)
            .map(|entries| entries.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default();
        for listener in snapshot {
            listener(id);
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let figures = self.figures.borrow();
        f.debug_struct("Scene")
            .field("figures", &figures.by_id.len())
            .field("layers", &figures.layers)
            .finish()
    }
}

impl FigureCanvas for Scene {
    fn create_figure(&self, figure: Figure) -> FigureId {
        let id = FigureId::new();
        self.figures.borrow_mut().by_id.insert(id, figure);
        id
    }

    fn dispose_figure(&self, id: FigureId) {
        {
            let mut figures = self.figures.borrow_mut();
            if figures.by_id.remove(&id).is_none() {
                warn!("dispose of unknown figure {:?}", id);
            }
            for layer in figures.layers.iter_mut() {
                layer.retain(|f| *f != id);
            }
        }
        self.listeners.borrow_mut().by_figure.remove(&id);
    }

    fn figure(&self, id: FigureId) -> Option<Figure> {
        self.figures.borrow().by_id.get(&id).cloned()
    }

    fn figure_kind(&self, id: FigureId) -> Option<FigureKind> {
        self.figures.borrow().by_id.get(&id).map(|f| f.kind)
    }

    fn bounds(&self, id: FigureId) -> Option<Rect> {
        self.figures.borrow().by_id.get(&id).map(|f| f.bounds)
    }

    fn set_bounds(&self, id: FigureId, bounds: Rect) {
        let changed = {
            let mut figures = self.figures.borrow_mut();
            match figures.by_id.get_mut(&id) {
                Some(figure) if figure.bounds != bounds => {
                    figure.bounds = bounds;
                    true
                }
                Some(_) => false,
                None => {
                    warn!("set_bounds on unknown figure {:?}", id);
                    false
                }
            }
        };
        if changed {
            self.notify_moved(id);
        }
    }

    fn add_to_layer(&self, layer: Layer, id: FigureId) {
        let mut figures = self.figures.borrow_mut();
        if !figures.by_id.contains_key(&id) {
            warn!("add of unknown figure {:?} to {:?} layer", id, layer);
            return;
        }
        let entries = &mut figures.layers[layer.index()];
        if !entries.contains(&id) {
            entries.push(id);
        }
    }

    fn remove_from_layer(&self, layer: Layer, id: FigureId) -> bool {
        let mut figures = self.figures.borrow_mut();
        let entries = &mut figures.layers[layer.index()];
        let before = entries.len();
        entries.retain(|f| *f != id);
        entries.len() != before
    }

    fn send_to_back(&self, layer: Layer, id: FigureId) {
        let mut figures = self.figures.borrow_mut();
        let entries = &mut figures.layers[layer.index()];
        if let Some(index) = entries.iter().position(|f| *f == id) {
            let figure = entries.remove(index);
            entries.insert(0, figure);
        }
    }

    fn layer_figures(&self, layer: Layer) -> Vec<FigureId> {
        self.figures.borrow().layers[layer.index()].clone()
    }

    fn find_figure_at(&self, layer: Layer, pos: Pos2, filter: FigureFilter) -> Option<FigureId> {
        let figures = self.figures.borrow();
        let hit = figures.layers[layer.index()]
            .iter()
            .rev()
            .find(|id| {
                figures
                    .by_id
                    .get(id)
                    .is_some_and(|f| filter.accepts(&f.kind) && f.bounds.contains(pos))
            })
            .copied();
        trace!("hit-test {:?} at {:?} ({:?}) -> {:?}", layer, pos, filter, hit);
        hit
    }

    fn add_figure_listener(&self, id: FigureId, listener: FigureListener) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id += 1;
        let listener_id = ListenerId(listeners.next_id);
        listeners
            .by_figure
            .entry(id)
            .or_default()
            .push((listener_id, listener));
        listener_id
    }

    fn remove_figure_listener(&self, id: FigureId, listener: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(entries) = listeners.by_figure.get_mut(&id) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(l, _)| *l != listener);
        let removed = entries.len() != before;
        if entries.is_empty() {
            listeners.by_figure.remove(&id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PinRole;
    use egui::{pos2, vec2};
    use std::cell::Cell;
    use std::rc::Rc;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(w, h))
    }

    #[test]
    fn hit_test_returns_topmost_matching_figure() {
        let scene = Scene::new();
        let body = scene.create_figure(Figure::new(FigureKind::NodeBody, rect(0.0, 0.0, 100.0, 100.0)));
        let pin = scene.create_figure(Figure::new(
            FigureKind::Pin(PinRole::Input),
            rect(10.0, 10.0, 10.0, 10.0),
        ));
        scene.add_to_layer(Layer::Content, body);
        scene.add_to_layer(Layer::Content, pin);

        assert_eq!(
            scene.find_figure_at(Layer::Content, pos2(15.0, 15.0), FigureFilter::Any),
            Some(pin)
        );
        assert_eq!(
            scene.find_figure_at(Layer::Content, pos2(15.0, 15.0), FigureFilter::Bodies),
            Some(body)
        );
        assert_eq!(
            scene.find_figure_at(Layer::Content, pos2(50.0, 50.0), FigureFilter::Pins),
            None
        );
    }

    #[test]
    fn hit_test_ignores_figures_outside_the_layer() {
        let scene = Scene::new();
        let pin = scene.create_figure(Figure::new(
            FigureKind::Pin(PinRole::Output),
            rect(0.0, 0.0, 10.0, 10.0),
        ));
        scene.add_to_layer(Layer::Feedback, pin);

        assert_eq!(
            scene.find_figure_at(Layer::Content, pos2(5.0, 5.0), FigureFilter::Pins),
            None
        );
    }

    #[test]
    fn set_bounds_notifies_only_on_change() {
        let scene = Scene::new();
        let id = scene.create_figure(Figure::new(FigureKind::NodeBody, rect(0.0, 0.0, 10.0, 10.0)));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        scene.add_figure_listener(id, Rc::new(move |_| counter.set(counter.get() + 1)));

        scene.set_bounds(id, rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(calls.get(), 0);

        scene.translate(id, vec2(5.0, 0.0));
        assert_eq!(calls.get(), 1);
        assert_eq!(scene.bounds(id), Some(rect(5.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn listener_may_move_other_figures() {
        let scene = Rc::new(Scene::new());
        let leader = scene.create_figure(Figure::new(FigureKind::NodeBody, rect(0.0, 0.0, 10.0, 10.0)));
        let follower = scene.create_figure(Figure::new(FigureKind::NodeBody, rect(0.0, 20.0, 10.0, 10.0)));
        let weak = Rc::downgrade(&scene);
        scene.add_figure_listener(
            leader,
            Rc::new(move |id| {
                if let Some(scene) = weak.upgrade() {
                    let x = scene.bounds(id).map_or(0.0, |b| b.min.x);
                    scene.set_location(follower, pos2(x, 20.0));
                }
            }),
        );

        scene.set_location(leader, pos2(7.0, 0.0));

        assert_eq!(scene.bounds(follower), Some(rect(7.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn removing_unknown_listener_is_a_no_op() {
        let scene = Scene::new();
        let id = scene.create_figure(Figure::new(FigureKind::NodeBody, Rect::ZERO));
        let listener = scene.add_figure_listener(id, Rc::new(|_| {}));

        assert!(!scene.remove_figure_listener(id, ListenerId(999)));
        assert!(scene.remove_figure_listener(id, listener));
        assert!(!scene.remove_figure_listener(id, listener));
        assert_eq!(scene.listener_count(id), 0);
    }

    #[test]
    fn removing_last_listener_forgets_the_figure_entry() {
        let scene = Scene::new();
        let id = scene.create_figure(Figure::new(FigureKind::NodeBody, Rect::ZERO));
        let first = scene.add_figure_listener(id, Rc::new(|_| {}));
        let second = scene.add_figure_listener(id, Rc::new(|_| {}));

        assert!(scene.remove_figure_listener(id, first));
        assert_eq!(scene.listeners.borrow().by_figure.len(), 1);

        assert!(scene.remove_figure_listener(id, second));
        assert!(scene.listeners.borrow().by_figure.is_empty());
    }

    #[test]
    fn dispose_removes_from_layers() {
        let scene = Scene::new();
        let id = scene.create_figure(Figure::new(FigureKind::NodeBody, Rect::ZERO));
        scene.add_to_layer(Layer::Content, id);
        scene.add_to_layer(Layer::Feedback, id);

        scene.dispose_figure(id);

        assert!(!scene.layer_contains(Layer::Content, id));
        assert!(!scene.layer_contains(Layer::Feedback, id));
        assert_eq!(scene.figure_count(), 0);
    }

    #[test]
    fn send_to_back_reorders_layer() {
        let scene = Scene::new();
        let a = scene.create_figure(Figure::new(FigureKind::NodeBody, Rect::ZERO));
        let b = scene.create_figure(Figure::new(FigureKind::GroupBody, Rect::ZERO));
        scene.add_to_layer(Layer::Content, a);
        scene.add_to_layer(Layer::Content, b);

        scene.send_to_back(Layer::Content, b);

        assert_eq!(scene.layer_figures(Layer::Content), vec![b, a]);
    }
}
