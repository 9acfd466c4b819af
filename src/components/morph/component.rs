use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::player::PhasePlayer;
use super::scene::Scene;
use crate::components::canvas::{
	CanvasSurface, MorphConfig, cancel_frame, context_2d, event_position, request_frame,
};
use crate::components::force_graph::GraphData;
use crate::components::pointer::{GesturePhase, PointerEvent};
use crate::graph::Vertex;

type SharedPlayer = Rc<RefCell<Option<PhasePlayer>>>;

/// Canvas that morphs `data` from a force layout into a matrix, one phase
/// per click on "Continue".
#[component]
pub fn MorphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: MorphConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let player: SharedPlayer = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let dragged: Rc<RefCell<Option<Vertex>>> = Rc::new(RefCell::new(None));
	let (can_continue, set_can_continue) = signal(false);
	let (phase_name, set_phase_name) = signal(String::new());

	let sync = move |p: &PhasePlayer| {
		set_can_continue.set(p.can_continue());
		set_phase_name.set(p.current_kind().to_string());
	};

	let (player_init, animate_init, pending_init) = (player.clone(), animate.clone(), pending.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let style = &config.style;
		let (w, h) = (style.width, style.height);
		let Some(ctx) = context_2d(&canvas, w, h) else {
			return;
		};

		let graph = match data.get().to_graph() {
			Ok(graph) => graph,
			Err(e) => {
				warn!("morph: invalid graph data: {e}");
				return;
			}
		};
		let mut next = PhasePlayer::new(Scene::new(graph, config.clone()));
		if let Err(e) = next.play() {
			warn!("morph: could not start: {e}");
			return;
		}
		sync(&next);
		*player_init.borrow_mut() = Some(next);

		// One frame loop per canvas; later runs only swap the player.
		if animate_init.borrow().is_some() {
			return;
		}
		let font = style.font_family.clone();
		let (player_anim, animate_inner, pending_inner) =
			(player_init.clone(), animate_init.clone(), pending_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut p) = *player_anim.borrow_mut() {
				let mut surface = CanvasSurface::new(&ctx, w, h, &font);
				if let Err(e) = p.frame(&mut surface) {
					warn!("morph: frame failed: {e}");
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

	// Unmounting stops the phase and breaks the frame loop's self-reference.
	let teardown = StoredValue::new_local((player.clone(), animate.clone(), pending.clone()));
	on_cleanup(move || {
		teardown.try_with_value(|(player, animate, pending)| {
			if let Some(ref mut p) = *player.borrow_mut() {
				p.stop();
			}
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

	let (player_md, dragged_md) = (player.clone(), dragged.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(at) = position(&ev) else {
			return;
		};
		if let Some(ref mut p) = *player_md.borrow_mut() {
			if let Some(id) = p.hit_test(at) {
				p.pointer(&PointerEvent::new(id.clone(), at, GesturePhase::Start));
				*dragged_md.borrow_mut() = Some(id);
			}
		}
	};

	let (player_mm, dragged_mm) = (player.clone(), dragged.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let (Some(at), Some(id)) = (position(&ev), dragged_mm.borrow().clone()) else {
			return;
		};
		if let Some(ref mut p) = *player_mm.borrow_mut() {
			p.pointer(&PointerEvent::new(id, at, GesturePhase::Drag));
		}
	};

	let (player_mu, dragged_mu) = (player.clone(), dragged.clone());
	let release = move |ev: MouseEvent| {
		let Some(id) = dragged_mu.borrow_mut().take() else {
			return;
		};
		let at = position(&ev).unwrap_or_default();
		if let Some(ref mut p) = *player_mu.borrow_mut() {
			p.pointer(&PointerEvent::new(id, at, GesturePhase::End));
		}
	};
	let on_mouseup = release.clone();
	let on_mouseleave = release;

	let player_next = player.clone();
	let on_continue = move |_: MouseEvent| {
		if let Some(ref mut p) = *player_next.borrow_mut() {
			if let Err(e) = p.play_next() {
				warn!("morph: continue failed: {e}");
			}
			sync(p);
		}
	};

	let player_restart = player.clone();
	let on_restart = move |_: MouseEvent| {
		if let Some(ref mut p) = *player_restart.borrow_mut() {
			if let Err(e) = p.restart() {
				warn!("morph: restart failed: {e}");
			}
			sync(p);
		}
	};

	view! {
		<div class="morph-canvas">
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: grab;"
			/>
			<div class="morph-controls">
				<span class="phase-name">{phase_name}</span>
				<button on:click=on_continue disabled=move || !can_continue.get()>
					"Continue"
				</button>
				<button on:click=on_restart>"Restart"</button>
			</div>
		</div>
	}
}
