#![deny(missing_docs)]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Custom data stamped on every effective identity.
pub const EFFECTIVE_IDENTITY_CUSTOM_DATA: &str = "BR001";

///
/// # Embed Token
/// Short lived token that lets the browser render a single report, dashboard or tile.
/// Returned by the Power BI `GenerateToken` endpoints.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedToken {
	/// The embed token itself.
	#[serde(default)]
	pub token: String,
	/// Unique id of the token, useful when talking to Power BI support.
	#[serde(default)]
	pub token_id: Option<String>,
	/// When the token stops working.
	#[serde(default)]
	pub expiration: Option<DateTime<Utc>>,
}

///
/// # Access Level
/// What the embed token allows the viewer to do.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
	/// Read only access.
	View,
}

///
/// # Effective Identity
/// Identity stamped on the embed token so Power BI can apply row level security.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveIdentity {
	/// The user the report is rendered for.
	pub username: String,
	/// Datasets the identity applies to.
	pub datasets: Vec<String>,
	/// Row level security roles, omitted when none were requested.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub roles: Option<Vec<String>>,
	/// Value exposed to DAX through `CUSTOMDATA()`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom_data: Option<String>,
}

impl EffectiveIdentity {
	///
	/// Builds the identity for `username` on `dataset_id`.
	/// `roles` is a comma separated list; blank entries are dropped.
	///
	#[must_use]
	pub fn new(username: &str, dataset_id: &str, roles: Option<&str>) -> Self {
		let roles: Vec<String> = roles.unwrap_or_default().split(',').map(str::trim).filter(|role| !role.is_empty()).map(str::to_string).collect();

		Self {
			username: username.to_string(),
			datasets: vec![dataset_id.to_string()],
			roles: (!roles.is_empty()).then_some(roles),
			custom_data: Some(EFFECTIVE_IDENTITY_CUSTOM_DATA.to_string()),
		}
	}
}

///
/// # Generate Token Request
/// Body of a `GenerateToken` call.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
	/// Requested access level.
	pub access_level: AccessLevel,
	/// Effective identities, omitted for plain view tokens.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identities: Option<Vec<EffectiveIdentity>>,
}

impl GenerateTokenRequest {
	///
	/// A view token without effective identity.
	///
	#[must_use]
	pub const fn view() -> Self {
		Self { access_level: AccessLevel::View, identities: None }
	}

	///
	/// A view token carrying a single effective identity.
	///
	#[must_use]
	pub fn view_as(identity: EffectiveIdentity) -> Self {
		Self { access_level: AccessLevel::View, identities: Some(vec![identity]) }
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn identity_splits_roles_on_commas() {
		let identity = EffectiveIdentity::new("89bc4df8-0d2b-4f78-ad55-e4a0e200a5d0", "cfafbeb1-8037-4d0c-896e-a46fb27ff229", Some("Admin,Viewer"));

		assert_eq!(identity.roles, Some(vec!["Admin".to_string(), "Viewer".to_string()]));
		assert_eq!(identity.datasets, vec!["cfafbeb1-8037-4d0c-896e-a46fb27ff229".to_string()]);
		assert_eq!(identity.custom_data.as_deref(), Some("BR001"));
	}

	#[test]
	fn identity_without_roles_omits_the_field() {
		let request = GenerateTokenRequest::view_as(EffectiveIdentity::new("alice@contoso.com", "ds-1", Some(" , ")));

		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"accessLevel": "View",
				"identities": [{ "username": "alice@contoso.com", "datasets": ["ds-1"], "customData": "BR001" }]
			})
		);
	}

	#[test]
	fn plain_view_request_has_no_identities() {
		assert_eq!(serde_json::to_value(GenerateTokenRequest::view()).unwrap(), json!({ "accessLevel": "View" }));
	}

	#[test]
	fn embed_token_parses_power_bi_payload() {
		let token: EmbedToken = serde_json::from_value(json!({
			"@odata.context": "https://api.powerbi.com/v1.0/myorg/$metadata#Microsoft.PowerBI.ServiceContracts.Api.V1.GenerateTokenResponse",
			"token": "H4sIAAAAAAAEAB2W",
			"tokenId": "49ae3742-54c0-4c29-af52-619ff93b5c80",
			"expiration": "2018-07-29T17:58:19Z"
		}))
		.unwrap();

		assert_eq!(token.token, "H4sIAAAAAAAEAB2W");
		assert_eq!(token.token_id.as_deref(), Some("49ae3742-54c0-4c29-af52-619ff93b5c80"));
		assert_eq!(token.expiration.map(|expiration| expiration.timestamp()), Some(1_532_887_099));
	}
}
