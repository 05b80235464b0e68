#![deny(missing_docs)]
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::EmbedError;

///
/// # Authentication Type
/// How the server proves its identity to Azure AD.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthenticationType {
	/// A Power BI Pro account signing in with username and password.
	MasterUser,
	/// An Azure AD application signing in with its client secret.
	#[default]
	ServicePrincipal,
}

///
/// # Embed Settings
/// Connection settings for Azure AD and the Power BI workspace.
/// Loaded once from the `embed` table of the Rocket configuration. Blank strings mean "not set".
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
	/// Which grant is used to acquire the access token.
	pub authentication_type: AuthenticationType,
	/// Azure AD authority, the tenant is appended to it.
	pub authority_url: String,
	/// Resource the access token is requested for.
	pub resource_url: String,
	/// Base URL of the Power BI REST API, including the `v1.0/myorg` segment.
	pub api_url: String,
	/// Application (client) id registered in Azure AD.
	pub application_id: String,
	/// Power BI workspace (group) id.
	pub workspace_id: String,
	/// Report to embed. The first report of the workspace is used when blank.
	pub report_id: String,
	/// Azure AD tenant id or domain.
	pub tenant: String,
	/// Client secret of the application.
	pub application_secret: String,
	/// Key Vault holding the client secret when `application_secret` is blank.
	pub key_vault_url: String,
	/// Name of the client secret inside `key_vault_url`.
	pub application_secret_name: String,
	/// Master user account name.
	pub username: String,
	/// Master user password.
	pub password: String,
}

impl Default for EmbedSettings {
	fn default() -> Self {
		Self {
			authentication_type: AuthenticationType::default(),
			authority_url: "https://login.microsoftonline.com/".to_string(),
			resource_url: "https://analysis.windows.net/powerbi/api".to_string(),
			api_url: "https://api.powerbi.com/v1.0/myorg".to_string(),
			application_id: String::new(),
			workspace_id: String::new(),
			report_id: String::new(),
			tenant: String::new(),
			application_secret: String::new(),
			key_vault_url: String::new(),
			application_secret_name: String::new(),
			username: String::new(),
			password: String::new(),
		}
	}
}

impl EmbedSettings {
	///
	/// Checks that every setting the configured authentication type needs is present and well formed.
	///
	/// # Errors
	/// `EmbedError::Configuration` naming the first offending setting.
	pub fn validate(&self) -> Result<(), EmbedError> {
		if is_blank(&self.application_id) {
			return Err(config_error("ApplicationId is empty. Register your application in Azure AD and set embed.application_id."));
		}
		if Uuid::parse_str(self.application_id.trim()).is_err() {
			return Err(config_error("ApplicationId must be a Guid. Register your application in Azure AD and set its id in embed.application_id."));
		}

		if is_blank(&self.workspace_id) {
			return Err(config_error("WorkspaceId is empty. Select a workspace you own and set its id in embed.workspace_id."));
		}
		if Uuid::parse_str(self.workspace_id.trim()).is_err() {
			return Err(config_error("WorkspaceId must be a Guid. Select a workspace you own and set its id in embed.workspace_id."));
		}

		match self.authentication_type {
			AuthenticationType::MasterUser => {
				if is_blank(&self.username) {
					return Err(config_error("Username is empty. Set the Power BI username in embed.username."));
				}
				if is_blank(&self.password) {
					return Err(config_error("Password is empty. Set the password of the Power BI user in embed.password."));
				}
			}
			AuthenticationType::ServicePrincipal => {
				if is_blank(&self.application_secret) && !self.has_key_vault_secret() {
					return Err(config_error("ApplicationSecret is empty. Set embed.application_secret, or embed.key_vault_url and embed.application_secret_name."));
				}
				if is_blank(&self.tenant) {
					return Err(config_error("Invalid Tenant. Set the Azure AD tenant id in embed.tenant."));
				}
			}
		}

		if Url::parse(&self.authority_url).is_err() {
			return Err(config_error("AuthorityUrl is not a valid URL. Set embed.authority_url, e.g. https://login.microsoftonline.com/."));
		}
		if Url::parse(&self.api_url).is_err() {
			return Err(config_error("ApiUrl is not a valid URL. Set embed.api_url, e.g. https://api.powerbi.com/v1.0/myorg."));
		}

		Ok(())
	}

	///
	/// The configured report id, if any.
	///
	#[must_use]
	pub fn report_id(&self) -> Option<&str> {
		let report_id = self.report_id.trim();
		(!report_id.is_empty()).then_some(report_id)
	}

	///
	/// True when the client secret can be read from Key Vault.
	///
	#[must_use]
	pub fn has_key_vault_secret(&self) -> bool {
		!is_blank(&self.key_vault_url) && !is_blank(&self.application_secret_name)
	}
}

fn is_blank(value: &str) -> bool {
	value.trim().is_empty()
}

fn config_error(message: &str) -> EmbedError {
	EmbedError::Configuration(message.to_string())
}
