use serde::{Deserialize, Serialize};

///
/// # Dashboard
/// A dashboard as listed by `GET /groups/{workspaceId}/dashboards`.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
	pub id: String,
	#[serde(default)]
	pub display_name: Option<String>,
	#[serde(default)]
	pub embed_url: String,
}
