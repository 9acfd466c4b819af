use leptos::prelude::*;

use crate::components::canvas::{MorphConfig, StyleConfig};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::components::matrix::MatrixCanvas;
use crate::components::morph::MorphCanvas;

/// Sample graph: a random tree over `n` vertices plus a few cross links.
fn generate_sample_data(n: usize) -> GraphData {
	let nodes: Vec<GraphNode> = (0..n).map(|i| GraphNode { id: label(i) }).collect();

	let mut links: Vec<GraphLink> = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			link(i, target)
		})
		.collect();
	links.extend((0..n / 4).map(|k| link(k, n - 1 - k)));

	GraphData { nodes, links }
}

/// Vertices added by the add-more-nodes phase, each tied to the sample graph.
fn generate_supplement(n: usize, extra: usize) -> GraphData {
	let nodes = (n..n + extra).map(|i| GraphNode { id: label(i) }).collect();
	let links = (n..n + extra)
		.flat_map(|i| {
			let a = (rand_simple(i) * n as f64) as usize;
			let b = (rand_simple(i * 7) * n as f64) as usize;
			[link(i, a), link(i, b)]
		})
		.collect();
	GraphData { nodes, links }
}

fn label(i: usize) -> String {
	char::from_u32('A' as u32 + i as u32).map_or_else(|| i.to_string(), String::from)
}

fn link(source: usize, target: usize) -> GraphLink {
	GraphLink {
		source: label(source),
		target: label(target),
		weight: None,
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	const VERTICES: usize = 10;

	let graph_data = Signal::derive(move || generate_sample_data(VERTICES));
	let config = MorphConfig {
		supplement: generate_supplement(VERTICES, 3),
		..MorphConfig::default()
	};
	let matrix_style = StyleConfig {
		width: 480.0,
		height: 480.0,
		..StyleConfig::default()
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-matrix">
				<section>
					<h1>"Node-Link to Matrix"</h1>
					<p class="subtitle">"Drag nodes while the layout runs. Continue steps through the morph."</p>
					<MorphCanvas data=graph_data config=config />
				</section>
				<section>
					<h2>"Reorderable Matrix"</h2>
					<p class="subtitle">"Drag a row or column label to move it. Reorder groups connected rows."</p>
					<MatrixCanvas data=graph_data style=matrix_style />
				</section>
			</div>
		</ErrorBoundary>
	}
}
