use std::fmt::Display;

use crate::remote_types::{Dashboard, Report, Tile};
use crate::tokens::{EffectiveIdentity, GenerateTokenRequest};

///
/// # Embed Target
/// The kind of Power BI item an embed workflow is run for.
/// Only reports can carry an effective identity.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedTarget {
	/// The configured report, or the first report of the workspace.
	Report {
		/// User stamped on the embed token; no effective identity when `None`.
		username: Option<String>,
		/// Comma separated row level security roles.
		roles: Option<String>,
	},
	/// The first dashboard of the workspace.
	Dashboard,
	/// The first tile of the first dashboard of the workspace.
	Tile,
}

impl EmbedTarget {
	///
	/// A report target. Blank `username` or `roles` count as not given.
	///
	#[must_use]
	pub fn report(username: &str, roles: &str) -> Self {
		Self::Report { username: non_blank(username), roles: non_blank(roles) }
	}

	///
	/// Body of the `GenerateToken` call for `item`.
	/// Reports embedded for a user get an effective identity on the report's dataset, everything else a plain view token.
	///
	#[must_use]
	pub fn token_request(&self, item: &SelectedItem) -> GenerateTokenRequest {
		match (self, item.dataset_id.as_deref()) {
			(Self::Report { username: Some(username), roles }, Some(dataset_id)) => GenerateTokenRequest::view_as(EffectiveIdentity::new(username, dataset_id, roles.as_deref())),
			_ => GenerateTokenRequest::view(),
		}
	}
}

impl Display for EmbedTarget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Report { .. } => write!(f, "report"),
			Self::Dashboard => write!(f, "dashboard"),
			Self::Tile => write!(f, "tile"),
		}
	}
}

fn non_blank(value: &str) -> Option<String> {
	let value = value.trim();
	(!value.is_empty()).then(|| value.to_string())
}

///
/// # Selected Item
/// The item picked from a workspace listing, reduced to what the rest of the workflow needs.
///
/// ## Fields
/// `token_path`: Path of the item's `GenerateToken` endpoint, relative to the workspace.
/// `dataset_id`: Dataset backing a report, when Power BI lists one.
/// `dashboard_id`: Parent dashboard of a tile.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
	pub id: String,
	pub embed_url: String,
	pub token_path: String,
	pub dataset_id: Option<String>,
	pub dashboard_id: Option<String>,
}

impl From<&Report> for SelectedItem {
	fn from(report: &Report) -> Self {
		Self {
			id: report.id.clone(),
			embed_url: report.embed_url.clone(),
			token_path: format!("reports/{}/GenerateToken", report.id),
			dataset_id: report.dataset_id.as_deref().map(str::trim).filter(|dataset_id| !dataset_id.is_empty()).map(str::to_string),
			dashboard_id: None,
		}
	}
}

impl From<&Dashboard> for SelectedItem {
	fn from(dashboard: &Dashboard) -> Self {
		Self { id: dashboard.id.clone(), embed_url: dashboard.embed_url.clone(), token_path: format!("dashboards/{}/GenerateToken", dashboard.id), dataset_id: None, dashboard_id: None }
	}
}

impl SelectedItem {
	///
	/// A tile together with the dashboard it was listed from.
	///
	#[must_use]
	pub fn tile(dashboard: &Dashboard, tile: &Tile) -> Self {
		Self {
			id: tile.id.clone(),
			embed_url: tile.embed_url.clone(),
			token_path: format!("dashboards/{}/tiles/{}/GenerateToken", dashboard.id, tile.id),
			dataset_id: None,
			dashboard_id: Some(dashboard.id.clone()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn report_item() -> SelectedItem {
		let report = Report { id: "r-1".to_string(), name: None, embed_url: "https://app.powerbi.com/reportEmbed?reportId=r-1".to_string(), dataset_id: Some("ds-1".to_string()) };
		SelectedItem::from(&report)
	}

	#[test]
	fn report_for_user_gets_effective_identity() {
		let request = EmbedTarget::report("89bc4df8-0d2b-4f78-ad55-e4a0e200a5d0", "Admin,Viewer").token_request(&report_item());

		let identities = request.identities.unwrap();
		assert_eq!(identities.len(), 1);
		assert_eq!(identities[0].username, "89bc4df8-0d2b-4f78-ad55-e4a0e200a5d0");
		assert_eq!(identities[0].datasets, vec!["ds-1".to_string()]);
		assert_eq!(identities[0].roles.as_ref().map(Vec::len), Some(2));
		assert_eq!(identities[0].custom_data.as_deref(), Some("BR001"));
	}

	#[test]
	fn report_without_dataset_gets_plain_view_token() {
		let report = Report { id: "r-2".to_string(), name: None, embed_url: "https://app.powerbi.com/reportEmbed?reportId=r-2".to_string(), dataset_id: Some(" ".to_string()) };
		let item = SelectedItem::from(&report);

		assert_eq!(item.dataset_id, None);
		assert_eq!(EmbedTarget::report("alice@contoso.com", "Admin").token_request(&item), GenerateTokenRequest::view());
	}

	#[test]
	fn report_without_user_gets_plain_view_token() {
		let request = EmbedTarget::report(" ", "Admin").token_request(&report_item());

		assert_eq!(request, GenerateTokenRequest::view());
	}

	#[test]
	fn tile_item_points_at_its_dashboard() {
		let dashboard = Dashboard { id: "d-1".to_string(), display_name: None, embed_url: String::new() };
		let tile = Tile { id: "t-1".to_string(), title: None, embed_url: "https://app.powerbi.com/embed?dashboardId=d-1&tileId=t-1".to_string() };

		let item = SelectedItem::tile(&dashboard, &tile);

		assert_eq!(item.token_path, "dashboards/d-1/tiles/t-1/GenerateToken");
		assert_eq!(item.dashboard_id.as_deref(), Some("d-1"));
		assert_eq!(EmbedTarget::Tile.token_request(&item), GenerateTokenRequest::view());
	}
}
