//! Dashboard: URL form, generated API panel, and conversion history.
//!
//! Submitting validates locally, calls the API facade once, and on success
//! records the endpoint through the history facade and reloads the list.

mod component;
mod history_list;

pub use component::Dashboard;
pub use history_list::HistoryList;
