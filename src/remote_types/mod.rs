pub use dashboard::Dashboard;
pub use dataset::Dataset;
pub use report::Report;
pub use tile::Tile;

use serde::Deserialize;

mod dashboard;
mod dataset;
mod report;
mod tile;

///
/// # OData List
/// Power BI wraps every collection in an OData envelope, the items live under `value`.
///
#[derive(Debug, Clone, Deserialize)]
pub struct ODataList<T> {
	#[serde(default = "Vec::new")]
	pub value: Vec<T>,
}
