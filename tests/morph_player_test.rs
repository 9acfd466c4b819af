use graph_matrix_canvas::Error;
use graph_matrix_canvas::components::canvas::{
	DrawOp, MorphConfig, RecordingSurface, TextAlign, TimingConfig,
};
use graph_matrix_canvas::components::force_graph::GraphData;
use graph_matrix_canvas::components::morph::{Phase, PhaseKind, PhasePlayer, Scene};
use graph_matrix_canvas::components::pointer::{GesturePhase, PointerEvent};
use graph_matrix_canvas::geometry::{Point, control_point};
use graph_matrix_canvas::graph::Graph;

fn sample() -> Graph {
	GraphData::from_pairs(&["1", "2", "3", "4"], &[("1", "2"), ("2", "3"), ("3", "4")])
		.to_graph()
		.unwrap()
}

fn config(timing: TimingConfig) -> MorphConfig {
	MorphConfig {
		timing,
		supplement: GraphData::from_pairs(&["5"], &[("5", "1"), ("5", "4")]),
		..MorphConfig::default()
	}
}

fn instant() -> TimingConfig {
	TimingConfig {
		force_ticks: 0,
		add_nodes_ticks: 0,
		node_to_matrix_ticks: 0,
		label_ticks: 0,
		cell_merge_ticks: 0,
		..TimingConfig::default()
	}
}

fn count(surface: &RecordingSurface, pred: impl Fn(&DrawOp) -> bool) -> usize {
	surface.frame().iter().filter(|op| pred(op)).count()
}

fn rects(surface: &RecordingSurface) -> usize {
	count(surface, |op| matches!(op, DrawOp::RoundedRect { .. }))
}

fn curves(surface: &RecordingSurface) -> Vec<(Point, Point, Point)> {
	surface
		.frame()
		.iter()
		.filter_map(|op| match op {
			DrawOp::Curve { from, control, to, .. } => Some((*from, *control, *to)),
			_ => None,
		})
		.collect()
}

fn anchored_texts(surface: &RecordingSurface) -> Vec<(String, Point, TextAlign)> {
	surface
		.frame()
		.iter()
		.filter_map(|op| match op {
			DrawOp::Text { text, at, align, .. } => Some((text.clone(), *at, *align)),
			_ => None,
		})
		.collect()
}

/// Player with the supplement added, entered at phase `index`.
fn entered_at(index: usize, timing: TimingConfig) -> PhasePlayer {
	let mut player = PhasePlayer::new(Scene::new(sample(), config(timing)));
	player.play().unwrap();
	player.play_next().unwrap();
	player.set_phase(index).unwrap();
	player
}

fn close(a: Point, b: Point) -> bool {
	a.distance(b) < 1e-6
}

#[test]
fn playing_an_unprepared_phase_is_an_error() {
	let scene = Scene::new(sample(), MorphConfig::default());
	let phases = Phase::sequence();
	let mut surface = RecordingSurface::default();
	assert!(matches!(
		phases[0].play(&scene, &mut surface),
		Err(Error::PhaseNotPrepared(PhaseKind::ForceDirected))
	));
	assert!(surface.ops.is_empty());
}

#[test]
fn zero_length_phases_show_their_final_state_at_once() {
	let mut player = PhasePlayer::new(Scene::new(sample(), config(instant())));
	player.play().unwrap();
	let mut surface = RecordingSurface::default();
	let mut kinds = Vec::new();
	loop {
		assert!(player.current_phase().lifecycle().is_complete());
		player.frame(&mut surface).unwrap();
		kinds.push(player.current_kind());
		if !player.play_next().unwrap() {
			break;
		}
	}
	assert_eq!(
		kinds,
		[
			PhaseKind::ForceDirected,
			PhaseKind::AddMoreNodes,
			PhaseKind::NodeToMatrix,
			PhaseKind::LabelGeneration,
			PhaseKind::CellMerge,
		]
	);

	// Final matrix: 5 x 5 cells, a row and a column label per vertex, no arcs.
	assert_eq!(count(&surface, |op| matches!(op, DrawOp::RoundedRect { .. })), 25);
	assert_eq!(count(&surface, |op| matches!(op, DrawOp::Curve { .. })), 0);
	assert_eq!(surface.texts().len(), 10);
}

#[test]
fn node_to_matrix_ends_on_the_diagonal() {
	let timing = TimingConfig {
		force_ticks: 30,
		add_nodes_ticks: 30,
		node_to_matrix_ticks: 8,
		..TimingConfig::default()
	};
	let cfg = config(timing);
	let style = cfg.style.clone();
	let mut player = PhasePlayer::new(Scene::new(sample(), cfg));
	player.play().unwrap();
	player.play_next().unwrap();
	player.set_phase(2).unwrap();

	let mut surface = RecordingSurface::default();
	for _ in 0..=8 {
		player.frame(&mut surface).unwrap();
	}
	let labels = player.scene().labels();
	let n = labels.len();
	assert_eq!(n, 5);
	let circles: Vec<Point> = surface
		.frame()
		.iter()
		.filter_map(|op| match op {
			DrawOp::RoundedRect { rect, .. } => Some(rect.center()),
			_ => None,
		})
		.collect();
	assert_eq!(circles.len(), n);
	for (i, center) in circles.iter().enumerate() {
		let target = style.cell_center(i, i, n);
		assert!(center.distance(target) < 1e-6, "{center:?} vs {target:?}");
	}
}

#[test]
fn dragging_a_node_pins_it_until_release() {
	let mut player = PhasePlayer::new(Scene::new(sample(), config(TimingConfig::default())));
	player.play().unwrap();
	let at = player.scene().simulation().position("2").unwrap();
	let id = player.hit_test(at).unwrap();
	assert_eq!(id, "2");

	let target = Point::new(50.0, 60.0);
	player.pointer(&PointerEvent::new(id.clone(), at, GesturePhase::Start));
	player.pointer(&PointerEvent::new(id.clone(), target, GesturePhase::Drag));
	let mut surface = RecordingSurface::default();
	for _ in 0..5 {
		player.frame(&mut surface).unwrap();
	}
	let pinned = player.scene().simulation().position("2").unwrap();
	assert!(pinned.distance(target) < 1e-3);
	assert!(player.scene().simulation().vertices().iter().any(|v| v.id == "2" && v.fixed));

	player.pointer(&PointerEvent::new(id, target, GesturePhase::End));
	assert!(player.scene().simulation().vertices().iter().all(|v| !v.fixed));
}

#[test]
fn restart_returns_to_the_starting_graph() {
	let mut player = PhasePlayer::new(Scene::new(sample(), config(instant())));
	player.play().unwrap();
	while player.play_next().unwrap() {}
	assert_eq!(player.scene().graph.vertex_count(), 5);
	assert_eq!(player.scene().graph.edge_count(), 5);

	player.restart().unwrap();
	assert_eq!(player.current_kind(), PhaseKind::ForceDirected);
	assert_eq!(player.scene().graph.vertex_count(), 4);
	assert_eq!(player.scene().graph.edge_count(), 3);
	assert_eq!(player.scene().labels(), ["1", "2", "3", "4"]);
	assert!(player.can_continue());
}

#[test]
fn config_loads_from_json() {
	let cfg = MorphConfig::from_json(r#"{ "timing": { "cell_merge_ticks": 0 }, "seed": 3 }"#).unwrap();
	assert_eq!(cfg.timing.cell_merge_ticks, 0);
	assert_eq!(cfg.seed, 3);
	assert!(matches!(MorphConfig::from_json("{"), Err(Error::Config(_))));
}

#[test]
fn node_to_matrix_bends_links_into_diagonal_arcs() {
	let timing = TimingConfig {
		force_ticks: 30,
		add_nodes_ticks: 30,
		node_to_matrix_ticks: 8,
		..TimingConfig::default()
	};
	let mut player = entered_at(2, timing);
	let curvature = player.scene().config.style.curvature;
	let resting = player.scene().snapshot.clone().unwrap();
	let at_rest = |p: Point| resting.values().any(|&q| close(p, q));

	let mut surface = RecordingSurface::default();
	player.frame(&mut surface).unwrap();
	let first = curves(&surface);
	assert_eq!(first.len(), 5);
	for &(from, control, to) in &first {
		assert!(at_rest(from) && at_rest(to), "{from:?} -> {to:?} is not a resting position");
		assert!(close(control, control_point(from, to, curvature)));
	}

	for _ in 0..8 {
		player.frame(&mut surface).unwrap();
	}
	let style = &player.scene().config.style;
	let diagonal: Vec<Point> = (0..5).map(|i| style.cell_center(i, i, 5)).collect();
	let last = curves(&surface);
	assert_eq!(last.len(), 5);
	for &(from, control, to) in &last {
		assert!(diagonal.iter().any(|&d| close(from, d)));
		assert!(diagonal.iter().any(|&d| close(to, d)));
		assert!(close(control, control_point(from, to, curvature)));
	}
	// The controls travelled: the force layout arcs are not the matrix arcs.
	assert!(first.iter().zip(&last).any(|(a, b)| a.1.distance(b.1) > 1.0));
}

#[test]
fn labels_slide_from_the_diagonal_to_the_margins() {
	let timing = TimingConfig {
		force_ticks: 10,
		add_nodes_ticks: 10,
		label_ticks: 4,
		..TimingConfig::default()
	};
	let mut player = entered_at(3, timing);
	let style = player.scene().config.style.clone();
	let labels = player.scene().labels();
	let n = labels.len();
	assert_eq!(n, 5);
	let origin = style.matrix_origin();
	let diagonal = |i: usize| style.cell_center(i, i, n);
	let row_target = |i: usize| Point::new(origin.x - style.label_gap, diagonal(i).y);
	let column_target = |i: usize| Point::new(diagonal(i).x, origin.y - style.label_gap);
	let along = |from: Point, to: Point, f: f64| {
		Point::new(from.x + (to.x - from.x) * f, from.y + (to.y - from.y) * f)
	};

	// Tick 0: the copies sit on the diagonal, fully transparent.
	let mut surface = RecordingSurface::default();
	player.frame(&mut surface).unwrap();
	assert!(surface.texts().is_empty());
	assert_eq!(rects(&surface), n);

	// Tick 1: a quarter of the way out.
	player.frame(&mut surface).unwrap();
	let texts = anchored_texts(&surface);
	assert_eq!(texts.len(), 2 * n);
	for (i, label) in labels.iter().enumerate() {
		let (row, column) = (&texts[2 * i], &texts[2 * i + 1]);
		assert_eq!((&row.0, &column.0), (label, label));
		assert!(close(row.1, along(diagonal(i), row_target(i), 0.25)), "{:?}", row.1);
		assert!(close(column.1, along(diagonal(i), column_target(i), 0.25)), "{:?}", column.1);
	}

	// Tick 4 and beyond: rows left of the matrix, columns above it.
	for _ in 0..4 {
		player.frame(&mut surface).unwrap();
	}
	let texts = anchored_texts(&surface);
	assert_eq!(texts.len(), 2 * n);
	for i in 0..n {
		let (row, column) = (&texts[2 * i], &texts[2 * i + 1]);
		assert_eq!(row.2, TextAlign::End);
		assert_eq!(column.2, TextAlign::Center);
		assert!(close(row.1, row_target(i)), "{:?} vs {:?}", row.1, row_target(i));
		assert!(close(column.1, column_target(i)), "{:?} vs {:?}", column.1, column_target(i));
	}
}

#[test]
fn cell_merge_runs_its_windows_in_order() {
	let timing = TimingConfig {
		force_ticks: 10,
		add_nodes_ticks: 10,
		cell_merge_ticks: 10,
		merge_breakpoints: vec![0.3, 0.7],
		..TimingConfig::default()
	};
	let mut player = entered_at(4, timing);
	assert_eq!(player.scene().graph.vertex_count(), 5);
	assert_eq!(player.scene().graph.edge_count(), 5);

	// (tick, rects, curves): 5 diagonal nodes, then nothing between the
	// first two windows, then a filled cell on each side of the diagonal per
	// edge, then every cell.
	let expected = [(0, 5, 5), (3, 0, 0), (5, 10, 0), (7, 10, 0), (10, 25, 0)];
	let mut surface = RecordingSurface::default();
	let mut tick = 0;
	for (at, cells, arcs) in expected {
		while tick <= at {
			player.frame(&mut surface).unwrap();
			tick += 1;
		}
		assert_eq!(rects(&surface), cells, "rects at tick {at}");
		assert_eq!(curves(&surface).len(), arcs, "curves at tick {at}");
		assert_eq!(surface.texts().len(), 10, "labels at tick {at}");
	}
}
