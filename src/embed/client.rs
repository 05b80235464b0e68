use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::remote_types::{Dashboard, Dataset, ODataList, Report, Tile};
use crate::tokens::{EmbedToken, GenerateTokenRequest, MSAccessToken};
use crate::EmbedError;

/// Correlation header Power BI sets on every response.
pub const REQUEST_ID_HEADER: &str = "RequestId";

///
/// # Power BI Client
/// Calls the Power BI REST API for a single workspace with the access token of one embed workflow.
///
pub struct PowerBiClient<'a> {
	http: &'a reqwest::Client,
	api_url: &'a str,
	workspace_id: &'a str,
	access_token: &'a MSAccessToken,
}

impl<'a> PowerBiClient<'a> {
	pub fn new(http: &'a reqwest::Client, api_url: &'a str, workspace_id: &'a str, access_token: &'a MSAccessToken) -> Self {
		Self { http, api_url: api_url.trim_end_matches('/'), workspace_id: workspace_id.trim(), access_token }
	}

	/// `GET /groups/{workspaceId}/reports`
	pub async fn reports(&self) -> Result<Vec<Report>, EmbedError> {
		self.list("reports").await
	}

	/// `GET /groups/{workspaceId}/datasets/{datasetId}`
	pub async fn dataset(&self, dataset_id: &str) -> Result<Dataset, EmbedError> {
		self.get(&format!("datasets/{dataset_id}")).await
	}

	/// `GET /groups/{workspaceId}/dashboards`
	pub async fn dashboards(&self) -> Result<Vec<Dashboard>, EmbedError> {
		self.list("dashboards").await
	}

	/// `GET /groups/{workspaceId}/dashboards/{dashboardId}/tiles`
	pub async fn tiles(&self, dashboard_id: &str) -> Result<Vec<Tile>, EmbedError> {
		self.list(&format!("dashboards/{dashboard_id}/tiles")).await
	}

	///
	/// Posts `request` to the `GenerateToken` endpoint at `token_path`.
	/// A successful response without a token is a `TokenGeneration` error.
	///
	pub async fn generate_token(&self, token_path: &str, request: &GenerateTokenRequest) -> Result<EmbedToken, EmbedError> {
		let response = self.send(self.http.post(self.group_url(token_path)).json(request)).await?;
		let body = response.text().await?;

		let token: Option<EmbedToken> = match serde_json::from_str(&body) {
			Ok(token) => token,
			Err(e) if body.trim().is_empty() => {
				debug!("Empty GenerateToken response: {e}");
				None
			}
			Err(e) => return Err(EmbedError::TokenGeneration(format!("Failed to generate embed token. Unexpected response: {e}"))),
		};

		match token {
			Some(token) if !token.token.is_empty() => Ok(token),
			_ => Err(EmbedError::TokenGeneration("Failed to generate embed token.".to_string())),
		}
	}

	async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, EmbedError> {
		let list: ODataList<T> = self.get(path).await?;
		Ok(list.value)
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, EmbedError> {
		let response = self.send(self.http.get(self.group_url(path))).await?;
		Ok(response.json().await?)
	}

	async fn send(&self, request: RequestBuilder) -> Result<Response, EmbedError> {
		let response = request.header(AUTHORIZATION, format!("{} {}", self.access_token.token_type, self.access_token.access_token)).send().await?;
		debug!("{} {}", response.status(), response.url());

		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}

		let request_id = response.headers().get(REQUEST_ID_HEADER).and_then(|value| value.to_str().ok()).map(str::to_string);
		let body = response.text().await.unwrap_or_default();
		Err(EmbedError::RemoteCall { status, body, request_id })
	}

	fn group_url(&self, path: &str) -> String {
		format!("{}/groups/{}/{path}", self.api_url, self.workspace_id)
	}
}
