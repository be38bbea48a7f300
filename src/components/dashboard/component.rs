//! The dashboard component and the services it drives.

use std::rc::Rc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use log::info;
use wasm_bindgen_futures::spawn_local;

use super::history_list::HistoryList;
use crate::api::{ApiClient, ApiResponse, Backend, validate_url};
use crate::config::AppConfig;
use crate::history::{HistoryEntry, HistoryStore, LocalHistory, NewHistoryEntry, SupabaseHistory};
use crate::storage::BrowserStorage;

struct Services {
	api: ApiClient<Backend>,
	history: HistoryStore<SupabaseHistory>,
}

impl Services {
	fn from_config(config: &AppConfig) -> Self {
		Self {
			api: ApiClient::from_config(config),
			history: HistoryStore::new(
				SupabaseHistory::from_config(config),
				LocalHistory::new(Rc::new(BrowserStorage)),
			),
		}
	}
}

/// History row to record for a finished generation, if any.
///
/// Every success is recorded, with an empty endpoint when the backend did
/// not return one. Failures are only shown.
fn history_entry_for(input: &str, response: &ApiResponse) -> Option<NewHistoryEntry> {
	response.success.then(|| {
		NewHistoryEntry::success(
			input.trim(),
			response.api_endpoint.clone().unwrap_or_default(),
		)
	})
}

/// Main working area of the app.
#[component]
pub fn Dashboard(config: AppConfig) -> impl IntoView {
	let services = Rc::new(Services::from_config(&config));
	info!(
		"web2api: dashboard using {} backend",
		if config.backend_url.is_some() { "remote" } else { "mock" }
	);

	let url = RwSignal::new(String::new());
	let loading = RwSignal::new(false);
	let message = RwSignal::new(None::<String>);
	let result = RwSignal::new(None::<ApiResponse>);
	let history = RwSignal::new(Vec::<HistoryEntry>::new());
	let pending_delete = RwSignal::new(None::<String>);

	let services_load = services.clone();
	spawn_local(async move {
		history.set(services_load.history.list().await);
	});

	let services_delete = services.clone();
	Effect::new(move |_| {
		let Some(id) = pending_delete.get() else {
			return;
		};
		pending_delete.set(None);
		let services = services_delete.clone();
		spawn_local(async move {
			services.history.delete(&id).await;
			history.set(services.history.list().await);
		});
	});

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if loading.get_untracked() {
			return;
		}
		let input = url.get_untracked();
		if let Err(e) = validate_url(&input) {
			message.set(Some(e.to_string()));
			return;
		}

		loading.set(true);
		message.set(None);
		result.set(None);
		let services = services.clone();
		spawn_local(async move {
			let response = services.api.generate_api(&input).await;
			match history_entry_for(&input, &response) {
				Some(entry) => {
					services.history.save(entry).await;
					history.set(services.history.list().await);
				}
				None => message.set(response.error.clone()),
			}
			result.set(Some(response).filter(|r| r.success));
			loading.set(false);
		});
	};

	view! {
		<main class="dashboard">
			<form class="api-form theme-transition-item" on:submit=on_submit>
				<input
					type="url"
					placeholder="https://example.com"
					aria-label="Website URL"
					prop:value=move || url.get()
					on:input=move |ev| url.set(event_target_value(&ev))
				/>
				<button type="submit" disabled=move || loading.get()>
					{move || if loading.get() { "Generating..." } else { "Generate API" }}
				</button>
			</form>

			{move || message.get().map(|m| view! { <p class="form-error" role="alert">{m}</p> })}

			{move || {
				result
					.get()
					.map(|r| {
						let data = r
							.data
							.as_ref()
							.and_then(|d| serde_json::to_string_pretty(d).ok())
							.unwrap_or_default();
						view! {
							<section class="api-result theme-transition-item">
								<h2>"Your API"</h2>
								<code class="api-endpoint">{r.api_endpoint.unwrap_or_default()}</code>
								<pre class="api-documentation">{r.documentation.unwrap_or_default()}</pre>
								<pre class="api-data">{data}</pre>
							</section>
						}
					})
			}}

			<HistoryList entries=history pending_delete=pending_delete />
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::HistoryStatus;

	#[test]
	fn success_without_endpoint_is_still_recorded() {
		let response = ApiResponse {
			success: true,
			documentation: Some("d".into()),
			..ApiResponse::default()
		};
		let entry = history_entry_for("  https://a.test ", &response).unwrap();
		assert_eq!(entry.url, "https://a.test");
		assert_eq!(entry.api_endpoint, "");
		assert_eq!(entry.status, HistoryStatus::Success);
	}

	#[test]
	fn success_records_returned_endpoint() {
		let response = ApiResponse {
			success: true,
			api_endpoint: Some("https://api.web2api.com/v1/x".into()),
			..ApiResponse::default()
		};
		let entry = history_entry_for("https://a.test", &response).unwrap();
		assert_eq!(entry.api_endpoint, "https://api.web2api.com/v1/x");
	}

	#[test]
	fn failure_is_not_recorded() {
		let response = ApiResponse::failure("backend returned HTTP 500");
		assert_eq!(history_entry_for("https://a.test", &response), None);
	}
}
