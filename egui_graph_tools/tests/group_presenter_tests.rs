use std::cell::Cell;
use std::rc::Rc;

use egui::{Pos2, Rect, pos2, vec2};
use egui_graph_tools::{
    CanvasRef, Figure, FigureCanvas, FigureId, FigureKind, GraphConfig, Group, GroupPresenter,
    Leaf, LeafPresenter, NodeId, NodePresenter, PinInfo, Scene,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A node drawn as a single body figure.
struct BoxNode {
    id: NodeId,
    body: FigureId,
}

impl BoxNode {
    fn new(canvas: &CanvasRef, min: Pos2, size: f32) -> Rc<Self> {
        Rc::new(Self {
            id: NodeId::new(),
            body: canvas.create_figure(Figure::new(
                FigureKind::NodeBody,
                Rect::from_min_size(min, vec2(size, size)),
            )),
        })
    }
}

impl NodePresenter for BoxNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn node_body(&self) -> FigureId {
        self.body
    }

    fn bounds_figure(&self) -> FigureId {
        self.body
    }

    fn displayable_figures(&self) -> Vec<FigureId> {
        vec![self.body]
    }
}

fn as_node<T: NodePresenter + 'static>(presenter: &Rc<T>) -> Rc<dyn NodePresenter> {
    presenter.clone()
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::from_min_size(pos2(x, y), vec2(w, h))
}

fn count_moves(canvas: &CanvasRef, figure: FigureId) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    canvas.add_figure_listener(figure, Rc::new(move |_| counter.set(counter.get() + 1)));
    count
}

struct Fixture {
    canvas: CanvasRef,
    a: Rc<BoxNode>,
    b: Rc<BoxNode>,
    group: GroupPresenter,
}

fn two_box_group() -> Fixture {
    init_logger();
    let canvas: CanvasRef = Rc::new(Scene::new());
    let a = BoxNode::new(&canvas, pos2(0.0, 0.0), 10.0);
    let b = BoxNode::new(&canvas, pos2(20.0, 20.0), 10.0);
    let group = GroupPresenter::new(
        canvas.clone(),
        Group::new("pair").with_leaves([a.id, b.id]),
        [as_node(&a), as_node(&b)],
        &GraphConfig::default(),
    );
    Fixture {
        canvas,
        a,
        b,
        group,
    }
}

#[test]
fn bounds_cover_children_plus_half_margin() {
    let fx = two_box_group();

    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(-30.0, -30.0, 90.0, 90.0))
    );
    assert_eq!(
        fx.canvas.figure_kind(fx.group.node_body()),
        Some(FigureKind::GroupBody)
    );
}

#[test]
fn moving_a_child_resizes_the_group() {
    let fx = two_box_group();

    fx.canvas.set_location(fx.b.body, pos2(50.0, 20.0));

    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(-30.0, -30.0, 120.0, 90.0))
    );
}

#[test]
fn add_and_remove_keep_bounds_in_sync() {
    let fx = two_box_group();
    let c = BoxNode::new(&fx.canvas, pos2(100.0, 0.0), 10.0);
    fx.group.group_mut().leaves.push(c.id);

    fx.group.add(as_node(&c));
    assert!(fx.group.contains(c.id));
    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(-30.0, -30.0, 170.0, 90.0))
    );

    // Adding twice keeps a single entry.
    fx.group.add(as_node(&c));
    assert_eq!(fx.group.children().len(), 3);

    assert!(fx.group.remove(c.as_ref()));
    assert!(!fx.group.remove(c.as_ref()));
    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(-30.0, -30.0, 90.0, 90.0))
    );

    // A removed child no longer affects the group.
    fx.canvas.set_location(c.body, pos2(500.0, 500.0));
    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(-30.0, -30.0, 90.0, 90.0))
    );
}

#[test]
fn empty_group_collapses_at_its_last_location() {
    let fx = two_box_group();

    assert!(fx.group.remove(fx.a.as_ref()));
    assert!(fx.group.remove(fx.b.as_ref()));

    let bounds = fx.canvas.bounds(fx.group.bounds_figure()).unwrap();
    assert_eq!(bounds.size(), vec2(0.0, 0.0));
    // After removing `a`, the group wrapped `b` only: (20,20) - 30.
    assert_eq!(bounds.min, pos2(-10.0, -10.0));
}

#[test]
fn dragging_the_group_moves_children_by_the_same_delta() {
    let fx = two_box_group();
    let body_moves = count_moves(&fx.canvas, fx.group.bounds_figure());
    let a_moves = count_moves(&fx.canvas, fx.a.body);
    let b_moves = count_moves(&fx.canvas, fx.b.body);

    fx.canvas.set_location(fx.group.bounds_figure(), pos2(70.0, -10.0));

    let delta = vec2(100.0, 20.0);
    assert_eq!(fx.canvas.bounds(fx.a.body), Some(rect(0.0, 0.0, 10.0, 10.0).translate(delta)));
    assert_eq!(fx.canvas.bounds(fx.b.body), Some(rect(20.0, 20.0, 10.0, 10.0).translate(delta)));
    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(70.0, -10.0, 90.0, 90.0))
    );

    assert_eq!(body_moves.get(), 1);
    assert_eq!(a_moves.get(), 1);
    assert_eq!(b_moves.get(), 1);
}

#[test]
fn repeated_drags_accumulate() {
    let fx = two_box_group();

    fx.canvas.translate(fx.group.bounds_figure(), vec2(5.0, 0.0));
    fx.canvas.translate(fx.group.bounds_figure(), vec2(5.0, 5.0));

    assert_eq!(fx.canvas.bounds(fx.a.body).map(|b| b.min), Some(pos2(10.0, 5.0)));
    assert_eq!(
        fx.canvas.bounds(fx.group.bounds_figure()),
        Some(rect(-20.0, -25.0, 90.0, 90.0))
    );
}

#[test]
fn nested_groups_follow_each_other() {
    init_logger();
    let canvas: CanvasRef = Rc::new(Scene::new());
    let config = GraphConfig::default();
    let leaf = BoxNode::new(&canvas, pos2(0.0, 0.0), 10.0);
    let inner = Rc::new(GroupPresenter::new(
        canvas.clone(),
        Group::new("inner").with_leaves([leaf.id]),
        [as_node(&leaf)],
        &config,
    ));
    let inner_id = inner.node_id();
    let outer = GroupPresenter::new(
        canvas.clone(),
        Group::new("outer").with_groups([inner_id]),
        [as_node(&inner)],
        &config,
    );

    // inner: (-30,-30, 70x70); outer wraps it with another 30 each side.
    assert_eq!(
        canvas.bounds(outer.bounds_figure()),
        Some(rect(-60.0, -60.0, 130.0, 130.0))
    );

    canvas.translate(leaf.body, vec2(10.0, 0.0));
    assert_eq!(
        canvas.bounds(inner.bounds_figure()),
        Some(rect(-20.0, -30.0, 70.0, 70.0))
    );
    assert_eq!(
        canvas.bounds(outer.bounds_figure()),
        Some(rect(-50.0, -60.0, 130.0, 130.0))
    );

    canvas.translate(outer.bounds_figure(), vec2(0.0, 100.0));
    assert_eq!(canvas.bounds(leaf.body).map(|b| b.min), Some(pos2(10.0, 100.0)));
    assert_eq!(
        canvas.bounds(inner.bounds_figure()),
        Some(rect(-20.0, 70.0, 70.0, 70.0))
    );
    assert_eq!(
        canvas.bounds(outer.bounds_figure()),
        Some(rect(-50.0, 40.0, 130.0, 130.0))
    );
}

#[test]
fn leaf_presenters_drag_their_pins_along() {
    init_logger();
    let canvas: CanvasRef = Rc::new(Scene::new());
    let config = GraphConfig::default();
    let leaf = Rc::new(LeafPresenter::new(
        canvas.clone(),
        Leaf::new("blur", vec![PinInfo::input("image", "Image")]),
        pos2(0.0, 0.0),
        &config,
    ));
    let group = GroupPresenter::new(
        canvas.clone(),
        Group::new("g").with_leaves([leaf.node_id()]),
        [as_node(&leaf)],
        &config,
    );
    let pin = leaf.pin_figures().next().unwrap();
    let pin_before = canvas.bounds(pin).unwrap();

    canvas.translate(group.bounds_figure(), vec2(40.0, 40.0));

    assert_eq!(canvas.bounds(pin), Some(pin_before.translate(vec2(40.0, 40.0))));
}

#[test]
fn dropping_the_presenter_unregisters_listeners() {
    let fx = two_box_group();
    let moves_after_nudge = |canvas: &CanvasRef, figure| {
        let moves = count_moves(canvas, figure);
        canvas.translate(figure, vec2(1.0, 0.0));
        moves.get()
    };
    let bounds_figure = fx.group.bounds_figure();
    let a_body = fx.a.body;
    let canvas = fx.canvas.clone();

    drop(fx.group);

    // Only the counter itself reacts; nothing resizes or redistributes.
    assert_eq!(moves_after_nudge(&canvas, a_body), 1);
    assert_eq!(canvas.bounds(bounds_figure), None);
    assert_eq!(canvas.bounds(fx.b.body).map(|b| b.min), Some(pos2(20.0, 20.0)));
}

#[test]
fn dropped_presenters_release_their_figures() {
    init_logger();
    let scene = Rc::new(Scene::new());
    let canvas: CanvasRef = scene.clone();
    let config = GraphConfig::default();

    for i in 0..10 {
        let leaf = Rc::new(LeafPresenter::new(
            canvas.clone(),
            Leaf::new(
                "blur",
                vec![PinInfo::input("image", "Image"), PinInfo::output("out", "Out")],
            ),
            pos2(i as f32 * 50.0, 0.0),
            &config,
        ));
        let group = GroupPresenter::new(
            canvas.clone(),
            Group::new("g").with_leaves([leaf.node_id()]),
            [as_node(&leaf)],
            &config,
        );
        // body, two pins and the group's bounding figure
        assert_eq!(scene.figure_count(), 4);

        drop(group);
        assert_eq!(scene.figure_count(), 3);
        drop(leaf);
        assert_eq!(scene.figure_count(), 0);
    }
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "not related to a node of the represented group")]
fn adding_a_stranger_panics_in_debug_builds() {
    let fx = two_box_group();
    let stranger = BoxNode::new(&fx.canvas, pos2(0.0, 0.0), 10.0);

    fx.group.add(as_node(&stranger));
}
