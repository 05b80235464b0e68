#![deny(missing_docs)]
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::key_vault;
use crate::settings::{AuthenticationType, EmbedSettings};
use crate::EmbedError;

/// # Microsoft Azure Active Directory Authentication Token
/// Bearer token used to call the Power BI REST API.
/// It lives for a single embed workflow and is never cached or refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MSAccessToken {
	/// Authorization scheme, always `Bearer` for Azure AD.
	pub token_type: String,
	/// Token
	pub access_token: String,
}

/// Token endpoint payload. Azure AD answers both successes and failures with JSON.
#[derive(Debug, Default, Deserialize)]
struct TokenEndpointResponse {
	token_type: Option<String>,
	access_token: Option<String>,
	error: Option<String>,
	error_description: Option<String>,
}

impl MSAccessToken {
	/// # Acquire MSAccessToken
	/// Exchanges the configured credentials for an access token.
	/// Service principals use the client credentials grant against the tenant specific authority,
	/// master users the resource owner password grant against the `common` authority.
	///
	/// # Errors
	/// `EmbedError::Authentication` when Azure AD cannot be reached, rejects the request or returns no token.
	pub async fn acquire(http: &reqwest::Client, settings: &EmbedSettings) -> Result<Self, EmbedError> {
		let authority = settings.authority_url.trim_end_matches('/');

		let (endpoint, params) = match settings.authentication_type {
			AuthenticationType::ServicePrincipal => {
				let secret = key_vault::application_secret(settings).await?;
				let endpoint = format!("{authority}/{}/oauth2/token", settings.tenant.trim());
				let params = vec![
					("grant_type", "client_credentials".to_string()),
					("client_id", settings.application_id.trim().to_string()),
					("client_secret", secret),
					("resource", settings.resource_url.trim().to_string()),
				];
				(endpoint, params)
			}
			AuthenticationType::MasterUser => {
				let endpoint = format!("{authority}/common/oauth2/token");
				let params = vec![
					("grant_type", "password".to_string()),
					("client_id", settings.application_id.trim().to_string()),
					("username", settings.username.trim().to_string()),
					("password", settings.password.clone()),
					("resource", settings.resource_url.trim().to_string()),
					("scope", "openid".to_string()),
				];
				(endpoint, params)
			}
		};

		info!("Requesting Azure AD access token from {endpoint}");
		let response = match http.post(&endpoint).form(&params).send().await {
			Ok(response) => response,
			Err(e) => return Err(EmbedError::Authentication(e.to_string())),
		};

		let status = response.status();
		let body = match response.text().await {
			Ok(body) => body,
			Err(e) => return Err(EmbedError::Authentication(e.to_string())),
		};
		debug!("Token request status: {status}");

		let payload: TokenEndpointResponse = serde_json::from_str(&body).unwrap_or_default();

		if !status.is_success() {
			let detail = payload.error_description.or(payload.error).unwrap_or_else(|| format!("Azure AD returned {status}: {body}"));
			return Err(EmbedError::Authentication(detail));
		}

		match payload.access_token {
			Some(access_token) if !access_token.is_empty() => Ok(Self { token_type: payload.token_type.unwrap_or_else(|| "Bearer".to_string()), access_token }),
			_ => Err(EmbedError::Authentication("Authentication Failed.".to_string())),
		}
	}
}
