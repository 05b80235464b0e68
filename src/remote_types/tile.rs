use serde::{Deserialize, Serialize};

///
/// # Tile
/// A dashboard tile as listed by `GET /groups/{workspaceId}/dashboards/{dashboardId}/tiles`.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
	pub id: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub embed_url: String,
}
