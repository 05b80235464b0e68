#![deny(missing_docs)]
use log::{info, warn};

use super::client::PowerBiClient;
use super::descriptor::{EmbedConfig, EmbedDescriptor};
use super::target::{EmbedTarget, SelectedItem};
use crate::remote_types::{Dashboard, Report};
use crate::settings::EmbedSettings;
use crate::tokens::MSAccessToken;
use crate::EmbedError;

///
/// # Embed Service
/// Runs the embed workflow: validate settings, acquire an access token, pick the item, request an embed token.
///
/// The service only holds immutable settings and a shared HTTP client,
/// every call returns its own descriptor so concurrent requests do not interfere.
///
#[derive(Debug, Clone)]
pub struct EmbedService {
	settings: EmbedSettings,
	http: reqwest::Client,
}

impl EmbedService {
	///
	/// Creates a service with a default HTTP client.
	///
	#[must_use]
	pub fn new(settings: EmbedSettings) -> Self {
		Self::with_client(settings, reqwest::Client::new())
	}

	///
	/// Creates a service that sends its requests through `http`.
	///
	#[must_use]
	pub const fn with_client(settings: EmbedSettings, http: reqwest::Client) -> Self {
		Self { settings, http }
	}

	///
	/// The settings the service was created with.
	///
	#[must_use]
	pub const fn settings(&self) -> &EmbedSettings {
		&self.settings
	}

	///
	/// Embeds the configured report, or the first report of the workspace.
	/// A non blank `username` adds an effective identity with the comma separated `roles`.
	///
	pub async fn embed_report(&self, username: &str, roles: &str) -> EmbedDescriptor {
		self.embed(&EmbedTarget::report(username, roles)).await
	}

	///
	/// Embeds the first dashboard of the workspace.
	///
	pub async fn embed_dashboard(&self) -> EmbedDescriptor {
		self.embed(&EmbedTarget::Dashboard).await
	}

	///
	/// Embeds the first tile of the first dashboard of the workspace.
	///
	pub async fn embed_tile(&self) -> EmbedDescriptor {
		self.embed(&EmbedTarget::Tile).await
	}

	///
	/// Runs the workflow for `target`. Failures never escape, they end up in the descriptor.
	///
	pub async fn embed(&self, target: &EmbedTarget) -> EmbedDescriptor {
		info!("Embedding {target} from workspace {}", self.settings.workspace_id);

		let result = self.run(target).await;
		match &result {
			Ok(config) => info!("Embedded {target} {}", config.id),
			Err(e) => warn!("Failed to embed {target}: {e}"),
		}

		EmbedDescriptor::from(result)
	}

	async fn run(&self, target: &EmbedTarget) -> Result<EmbedConfig, EmbedError> {
		self.settings.validate()?;
		let access_token = MSAccessToken::acquire(&self.http, &self.settings).await?;

		let client = PowerBiClient::new(&self.http, &self.settings.api_url, &self.settings.workspace_id, &access_token);
		let item = self.select(&client, target).await?;
		if item.embed_url.trim().is_empty() {
			return Err(EmbedError::NotFound(format!("The {target} {} has no embed URL.", item.id)));
		}

		let dataset = match item.dataset_id.as_deref() {
			Some(dataset_id) => Some(client.dataset(dataset_id).await?),
			None => None,
		};

		let request = target.token_request(&item);
		let embed_token = client.generate_token(&item.token_path, &request).await?;

		Ok(EmbedConfig {
			id: item.id,
			embed_url: item.embed_url,
			embed_token,
			dashboard_id: item.dashboard_id,
			is_effective_identity_required: dataset.as_ref().map(|dataset| dataset.is_effective_identity_required),
			is_effective_identity_roles_required: dataset.as_ref().map(|dataset| dataset.is_effective_identity_roles_required),
		})
	}

	async fn select(&self, client: &PowerBiClient<'_>, target: &EmbedTarget) -> Result<SelectedItem, EmbedError> {
		match target {
			EmbedTarget::Report { .. } => {
				let reports = client.reports().await?;
				if reports.is_empty() {
					return Err(EmbedError::NotFound("No reports were found in the workspace".to_string()));
				}

				match Report::select(&reports, self.settings.report_id()) {
					Some(report) => Ok(SelectedItem::from(report)),
					None => Err(EmbedError::NotFound("No report with the given ID was found in the workspace. Make sure ReportId is valid.".to_string())),
				}
			}
			EmbedTarget::Dashboard => Ok(SelectedItem::from(&first_dashboard(client).await?)),
			EmbedTarget::Tile => {
				let dashboard = first_dashboard(client).await?;
				let tiles = client.tiles(&dashboard.id).await?;

				match tiles.first() {
					Some(tile) => Ok(SelectedItem::tile(&dashboard, tile)),
					None => Err(EmbedError::NotFound("Dashboard has no tiles.".to_string())),
				}
			}
		}
	}
}

async fn first_dashboard(client: &PowerBiClient<'_>) -> Result<Dashboard, EmbedError> {
	match client.dashboards().await?.into_iter().next() {
		Some(dashboard) => Ok(dashboard),
		None => Err(EmbedError::NotFound("Workspace has no dashboards.".to_string())),
	}
}
