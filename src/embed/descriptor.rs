#![deny(missing_docs)]
use serde::Serialize;

use crate::tokens::EmbedToken;
use crate::EmbedError;

///
/// # Embed Config
/// Everything the Power BI JavaScript client needs to render one item.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
	/// Id of the embedded report, dashboard or tile.
	pub id: String,
	/// URL the JavaScript client loads in its iframe.
	pub embed_url: String,
	/// Token authorizing the browser to render the item.
	pub embed_token: EmbedToken,
	/// Parent dashboard, set for tiles only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dashboard_id: Option<String>,
	/// Whether the report's dataset enforces row level security, set for reports only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_effective_identity_required: Option<bool>,
	/// Whether the report's dataset requires roles on the effective identity, set for reports only.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_effective_identity_roles_required: Option<bool>,
}

///
/// # Embed Descriptor
/// Result of an embed workflow as handed to the page.
/// Either the item was embedded or the workflow failed with a message meant for the reader.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EmbedDescriptor {
	/// The workflow produced an embed token.
	Embedded(EmbedConfig),
	/// The workflow stopped early.
	Failed {
		/// Human readable reason.
		#[serde(rename = "errorMessage")]
		error_message: String,
	},
}

impl EmbedDescriptor {
	///
	/// True when the descriptor carries an embed token.
	///
	#[must_use]
	pub const fn is_embedded(&self) -> bool {
		matches!(self, Self::Embedded(_))
	}

	///
	/// The embed configuration of a successful workflow.
	///
	#[must_use]
	pub const fn config(&self) -> Option<&EmbedConfig> {
		match self {
			Self::Embedded(config) => Some(config),
			Self::Failed { .. } => None,
		}
	}

	///
	/// The error message of a failed workflow.
	///
	#[must_use]
	pub fn error_message(&self) -> Option<&str> {
		match self {
			Self::Embedded(_) => None,
			Self::Failed { error_message } => Some(error_message),
		}
	}
}

impl From<Result<EmbedConfig, EmbedError>> for EmbedDescriptor {
	fn from(result: Result<EmbedConfig, EmbedError>) -> Self {
		match result {
			Ok(config) => Self::Embedded(config),
			Err(e) => Self::Failed { error_message: e.to_string() },
		}
	}
}
