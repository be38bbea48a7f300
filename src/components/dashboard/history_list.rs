//! List of past conversions with per-row delete.

use leptos::prelude::*;

use crate::history::HistoryEntry;

/// Past conversions, newest first.
///
/// Clicking delete writes the row id into `pending_delete`; the owner
/// performs the removal and refreshes `entries`.
#[component]
pub fn HistoryList(
	#[prop(into)] entries: Signal<Vec<HistoryEntry>>,
	pending_delete: RwSignal<Option<String>>,
) -> impl IntoView {
	view! {
		<section class="history">
			<h2 class="theme-transition-item">"History"</h2>
			<Show
				when=move || entries.with(|e| !e.is_empty())
				fallback=|| view! { <p class="history-empty">"No APIs generated yet."</p> }
			>
				<ul class="history-list">
					<For
						each=move || entries.get()
						key=|entry| entry.id.clone()
						children=move |entry| {
							let id = entry.id.clone();
							let created = entry.created_at.format("%Y-%m-%d %H:%M").to_string();
							view! {
								<li class="history-row theme-transition-item">
									<div class="history-url">{entry.url.clone()}</div>
									<code class="history-endpoint">{entry.api_endpoint.clone()}</code>
									<span class=format!("history-status {}", entry.status.label())>
										{entry.status.label()}
									</span>
									<time datetime=entry.created_at.to_rfc3339()>{created}</time>
									<button
										class="history-delete"
										aria-label="Delete entry"
										on:click=move |_| pending_delete.set(Some(id.clone()))
									>
										"Delete"
									</button>
								</li>
							}
						}
					/>
				</ul>
			</Show>
		</section>
	}
}
