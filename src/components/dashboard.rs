//! Dashboard page: backend status, sync trigger, automation filter and graph.
//!
//! All graph state lives in one `RwSignal<Explorer>`. Fetch completions and
//! user events are the only writers, and the UI event loop serialises them.

use leptos::ev::{Event, MouseEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::force_graph::{CanvasGraph, ForceGraphCanvas};
use crate::api::{ApiClient, SyncSummary};
use crate::graph::{AutomationCandidate, Explorer};

/// What the header knows about the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Backend {
	Checking,
	Healthy(String),
	Degraded(String),
	Unreachable,
}

/// Progress of the sync button.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SyncState {
	Idle,
	Running,
	Done(SyncSummary),
	Failed(String),
}

impl SyncState {
	fn message(&self) -> String {
		match self {
			SyncState::Idle => String::new(),
			SyncState::Running => "Syncing...".to_string(),
			SyncState::Done(summary) => format!(
				"Synced {} entities, {} automations",
				summary.entity_count, summary.automation_count
			),
			SyncState::Failed(e) => format!("Sync failed: {e}"),
		}
	}
}

/// Main dashboard view.
#[component]
pub fn Dashboard(client: ApiClient) -> impl IntoView {
	let client = StoredValue::new(client);
	let explorer = RwSignal::new(Explorer::new());
	let backend = RwSignal::new(Backend::Checking);
	let sync = RwSignal::new(SyncState::Idle);
	let load_error = RwSignal::new(None::<String>);

	spawn_local(async move {
		let client = client.get_value();
		match client.health().await {
			Ok(health) => {
				info!("ha-validator: backend status {:?}", health.status);
				backend.set(if health.is_ok() {
					Backend::Healthy(health.status)
				} else {
					Backend::Degraded(health.status)
				});
			}
			Err(e) => {
				warn!("ha-validator: health check failed: {}", e);
				backend.set(Backend::Unreachable);
			}
		}
	});

	let load_graph = move || {
		let Some(ticket) = explorer.try_update(|e| e.begin_load()) else {
			return;
		};
		spawn_local(async move {
			let client = client.get_value();
			match client.fetch_graph().await {
				Ok(data) => {
					if let Some(report) = explorer.try_update(|e| e.finish_load(ticket, data)).flatten() {
						info!(
							"ha-validator: loaded {} nodes, {} edges ({} dropped), {} automations",
							report.nodes, report.edges, report.dropped_edges, report.candidates
						);
						load_error.set(None);
					}
				}
				Err(e) => {
					// The installed dataset stays as it was.
					warn!("ha-validator: failed to fetch graph: {}", e);
					if explorer.with_untracked(|ex| ex.is_current(ticket)) {
						load_error.set(Some(format!("Failed to fetch graph: {e}")));
					}
				}
			}
		});
	};

	let run_sync = move |_: MouseEvent| {
		sync.set(SyncState::Running);
		spawn_local(async move {
			let client = client.get_value();
			match client.trigger_sync().await {
				Ok(summary) => {
					info!(
						"ha-validator: sync finished, {} entities, {} automations",
						summary.entity_count, summary.automation_count
					);
					sync.set(SyncState::Done(summary));
					load_graph();
				}
				Err(e) => {
					warn!("ha-validator: sync failed: {}", e);
					sync.set(SyncState::Failed(e.to_string()));
				}
			}
		});
	};

	load_graph();

	let canvas_data = Memo::new(move |_| {
		explorer.with(|e| CanvasGraph::from_subgraph(e.displayed(), e.focal().unwrap_or_default()))
	});
	let manual = Memo::new(move |_| explorer.with(|e| e.overlay().edges().to_vec()));
	let candidates = Memo::new(move |_| explorer.with(|e| e.candidates().to_vec()));
	let selection = Memo::new(move |_| explorer.with(|e| e.selection().to_string()));
	let shown = Memo::new(move |_| explorer.with(|e| e.displayed().nodes.len()));

	let on_connect = Callback::new(move |(source, target): (String, String)| {
		if explorer.try_update(|e| e.connect(&source, &target)).unwrap_or(false) {
			info!("ha-validator: manual connection {} -> {} (view only)", source, target);
		}
	});

	let on_select = move |ev: Event| {
		let id = event_target_value(&ev);
		explorer.update(|e| {
			e.select(&id);
		});
	};

	let status_badge = move || match backend.get() {
		Backend::Checking => view! { <span class="status pending">"Loading..."</span> }.into_any(),
		Backend::Healthy(status) => view! { <span class="status ok">{status}</span> }.into_any(),
		Backend::Degraded(status) => view! { <span class="status bad">{status}</span> }.into_any(),
		Backend::Unreachable => {
			view! { <span class="status bad">"Error connecting to backend"</span> }.into_any()
		}
	};

	view! {
		<div class="layout">
			<aside class="sidebar">
				<h1>"HA Validator"</h1>
				<nav>
					<a href="#" class="active">"Dashboard"</a>
					<a href="#">"Settings"</a>
				</nav>
			</aside>

			<div class="main">
				<header class="header">
					<h2>"Dashboard"</h2>
					<span class="backend">"Backend Status: " {status_badge}</span>
				</header>

				<main class="content">
					<section class="toolbar">
						<button on:click=run_sync disabled=move || sync.get() == SyncState::Running>
							"Sync Home Assistant"
						</button>
						<button on:click=move |_| load_graph()>"Refresh graph"</button>
						<span class="sync-result">{move || sync.get().message()}</span>
					</section>

					<section class="filter">
						<label for="automation-filter">"Filter Automation:"</label>
						<select id="automation-filter" on:change=on_select>
							<For
								each=move || candidates.get()
								key=|candidate| candidate.id.clone()
								children=move |candidate: AutomationCandidate| {
									let id = candidate.id.clone();
									view! {
										<option value=candidate.id selected=move || selection.get() == id>
											{candidate.label}
										</option>
									}
								}
							/>
						</select>
						<span class="count">{move || format!("(Showing {} nodes)", shown.get())}</span>
					</section>

					{move || load_error.get().map(|message| view! { <p class="alert">{message}</p> })}

					<div class="graph-panel">
						<ForceGraphCanvas data=canvas_data manual=manual on_connect=on_connect />
					</div>
					<p class="hint">
						"Drag nodes to reposition. Scroll to zoom. Shift-drag between nodes to sketch a connection (not saved)."
					</p>
				</main>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sync_messages() {
		assert_eq!(SyncState::Idle.message(), "");
		assert_eq!(
			SyncState::Done(SyncSummary {
				entity_count: 3,
				automation_count: 1,
			})
			.message(),
			"Synced 3 entities, 1 automations"
		);
		assert_eq!(SyncState::Failed("HTTP 500: oops".into()).message(), "Sync failed: HTTP 500: oops");
	}
}
