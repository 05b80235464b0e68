use serde::{Deserialize, Serialize};

///
/// # Report
/// A report as listed by `GET /groups/{workspaceId}/reports`.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub embed_url: String,
	#[serde(default)]
	pub dataset_id: Option<String>,
}

impl Report {
	///
	/// Picks the report to embed: the case-insensitive match of `report_id`, or the first report when no id is configured.
	///
	pub fn select<'a>(reports: &'a [Self], report_id: Option<&str>) -> Option<&'a Self> {
		match report_id {
			Some(report_id) => reports.iter().find(|report| report.id.eq_ignore_ascii_case(report_id)),
			None => reports.first(),
		}
	}
}
