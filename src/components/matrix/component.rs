use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::seriation::BarycenterSeriation;
use super::view::{Axis, MatrixView};
use crate::components::canvas::{
	CanvasSurface, StyleConfig, TimingConfig, cancel_frame, context_2d, event_position,
	request_frame,
};
use crate::components::force_graph::GraphData;
use crate::components::pointer::{GesturePhase, PointerEvent};
use crate::geometry::Point;
use crate::graph::{Graph, Vertex};

struct MatrixState {
	graph: Graph,
	view: MatrixView,
	drag: Option<(Vertex, Axis)>,
}

impl MatrixState {
	fn gesture(&mut self, at: Point, phase: GesturePhase) {
		let Some((label, axis)) = self.drag.clone() else {
			return;
		};
		match self.view.pointer(&PointerEvent::new(label, at, phase), axis) {
			Ok(Some(swap)) => info!("matrix: {} moved to slot {}", swap.label, swap.index),
			Ok(None) => {}
			Err(e) => warn!("matrix: drag failed: {e}"),
		}
	}
}

/// Adjacency matrix of `data` whose rows and columns can be dragged into a
/// new order, or reordered automatically.
#[component]
pub fn MatrixCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] style: StyleConfig,
	#[prop(optional)] timing: TimingConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<MatrixState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	let (state_init, animate_init, pending_init) = (state.clone(), animate.clone(), pending.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = (style.width, style.height);
		let Some(ctx) = context_2d(&canvas, w, h) else {
			return;
		};
		let mut graph = match data.get().to_graph() {
			Ok(graph) => graph,
			Err(e) => {
				warn!("matrix: invalid graph data: {e}");
				return;
			}
		};
		let view = MatrixView::new(&mut graph, style.clone(), timing.swap_slide_ticks);
		*state_init.borrow_mut() = Some(MatrixState {
			graph,
			view,
			drag: None,
		});

		if animate_init.borrow().is_some() {
			return;
		}
		let font = style.font_family.clone();
		let (state_anim, animate_inner, pending_inner) =
			(state_init.clone(), animate_init.clone(), pending_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.view.advance();
				let mut surface = CanvasSurface::new(&ctx, w, h, &font);
				if let Err(e) = s.view.render(&s.graph, &mut surface) {
					warn!("matrix: render failed: {e}");
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				pending_inner.set(request_frame(cb));
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			pending_init.set(request_frame(cb));
		}
	});

	let teardown = StoredValue::new_local((state.clone(), animate.clone(), pending.clone()));
	on_cleanup(move || {
		teardown.try_with_value(|(state, animate, pending)| {
			state.borrow_mut().take();
			if let Some(handle) = pending.take() {
				cancel_frame(handle);
			}
			animate.borrow_mut().take();
		});
	});

	let position = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		Some(event_position(&canvas, ev))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(at) = position(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.drag = s.view.label_at(at);
			s.gesture(at, GesturePhase::Start);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(at) = position(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.gesture(at, GesturePhase::Drag);
		}
	};

	let state_mu = state.clone();
	let release = move |ev: MouseEvent| {
		let at = position(&ev).unwrap_or_default();
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.gesture(at, GesturePhase::End);
			s.drag = None;
		}
	};
	let on_mouseup = release.clone();
	let on_mouseleave = release;

	let state_reorder = state.clone();
	let on_reorder = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_reorder.borrow_mut() {
			let seriation = BarycenterSeriation::default();
			if let Err(e) = s.view.auto_reorder(&s.graph, &seriation) {
				warn!("matrix: reorder failed: {e}");
			}
		}
	};

	view! {
		<div class="matrix-canvas">
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: ns-resize;"
			/>
			<div class="matrix-controls">
				<button on:click=on_reorder>"Reorder"</button>
			</div>
		</div>
	}
}
