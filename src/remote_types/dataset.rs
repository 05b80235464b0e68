use serde::{Deserialize, Serialize};

///
/// # Dataset
/// The part of `GET /groups/{workspaceId}/datasets/{datasetId}` the embed workflow cares about.
///
/// ## Fields
/// `is_effective_identity_required`: Row level security is defined, tokens must carry an effective identity.
/// `is_effective_identity_roles_required`: The effective identity must name at least one role.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
	pub id: String,
	#[serde(default)]
	pub is_effective_identity_required: bool,
	#[serde(default)]
	pub is_effective_identity_roles_required: bool,
}
