use azure_security_keyvault::KeyvaultClient;
use log::info;

use crate::settings::EmbedSettings;
use crate::EmbedError;

///
/// # Application Secret
/// Returns the inline client secret, or reads it from Azure Key Vault with the Azure credential of the host.
///
pub async fn application_secret(settings: &EmbedSettings) -> Result<String, EmbedError> {
	if !settings.application_secret.trim().is_empty() || !settings.has_key_vault_secret() {
		return Ok(settings.application_secret.clone());
	}

	info!("Reading application secret {} from {}", settings.application_secret_name, settings.key_vault_url);

	// login to Azure Key Vault
	let azure_credentials = match azure_identity::create_credential() {
		Ok(credentials) => credentials,
		Err(e) => return Err(EmbedError::Authentication(format!("Failed to create an Azure credential for Azure Key Vault: {e}"))),
	};
	let client = match KeyvaultClient::new(settings.key_vault_url.trim(), azure_credentials) {
		Ok(client) => client,
		Err(e) => return Err(EmbedError::Authentication(format!("Failed to login to Azure Key Vault: {e}"))),
	};

	match client.secret_client().get(settings.application_secret_name.trim()).await {
		Ok(secret) => Ok(secret.value),
		Err(e) => Err(EmbedError::Authentication(format!("Failed to get application secret from Azure Key Vault: {e}"))),
	}
}
