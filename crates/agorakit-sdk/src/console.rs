//! Agora console URL helpers.
//!
//! Some operations (project deletion, enabling the Media Gateway) have no
//! REST endpoint and must be done in the web console. These helpers build
//! the URLs to hand to the operator.

/// Base URL of the Agora web console.
pub const CONSOLE_BASE: &str = "https://console.agora.io";

/// A console URL, optionally scoped to a sub-page.
pub fn console_url(page: Option<&str>) -> String {
    match page {
        Some(page) => format!("{CONSOLE_BASE}/{page}"),
        None => CONSOLE_BASE.to_string(),
    }
}

/// The project-list page (where projects are deleted).
pub fn projects_page() -> String {
    console_url(Some("projects"))
}

/// The Media Gateway settings page for a project (console-internal id,
/// not the App ID).
pub fn media_gateway_page(project_id: &str) -> String {
    console_url(Some(&format!(
        "project-management/{project_id}/media-gateway"
    )))
}
