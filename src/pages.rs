use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::{get, uri, State};

use crate::embed::{EmbedConfig, EmbedDescriptor, EmbedService};

/// User the embed page stamps on the report's effective identity.
pub const EMBED_USER: &str = "89bc4df8-0d2b-4f78-ad55-e4a0e200a5d0";
/// Row level security role the embed page requests.
pub const EMBED_ROLES: &str = "User_Read";

const POWERBI_CLIENT_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/powerbi-client@2.23.1/dist/powerbi.min.js";

#[get("/")]
pub fn index() -> Redirect {
	Redirect::to(uri!(embed_page))
}

///
/// # Embed Page
/// Runs the report workflow and renders the report, or the reason it could not be embedded.
///
#[get("/embed")]
pub async fn embed_page(service: &State<EmbedService>) -> RawHtml<String> {
	let descriptor = service.embed_report(EMBED_USER, EMBED_ROLES).await;
	RawHtml(render_embed_page(&descriptor))
}

///
/// Renders the HTML page for `descriptor`.
///
#[must_use]
pub fn render_embed_page(descriptor: &EmbedDescriptor) -> String {
	let body = match descriptor {
		EmbedDescriptor::Embedded(config) => match report_script(config) {
			Ok(script) => format!("<div id=\"embedContainer\" style=\"height:100vh\"></div>\n<script src=\"{POWERBI_CLIENT_SCRIPT}\"></script>\n<script>\n{script}\n</script>"),
			Err(e) => error_block(&format!("Failed to render the embed configuration: {e}")),
		},
		EmbedDescriptor::Failed { error_message } => error_block(error_message),
	};

	format!("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>Power BI Embedded</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n")
}

fn report_script(config: &EmbedConfig) -> Result<String, serde_json::Error> {
	// `<` is escaped so the payload cannot close the script element.
	let config = serde_json::to_string(config)?.replace('<', "\\u003c");

	Ok(format!(
		"var embedConfig = {config};\nvar models = window['powerbi-client'].models;\npowerbi.embed(document.getElementById('embedContainer'), {{\n\ttype: 'report',\n\tid: embedConfig.id,\n\tembedUrl: embedConfig.embedUrl,\n\taccessToken: embedConfig.embedToken.token,\n\ttokenType: models.TokenType.Embed,\n\tpermissions: models.Permissions.View\n}});"
	))
}

fn error_block(message: &str) -> String {
	format!("<div id=\"errorWrapper\">\n<h2>Error</h2>\n<pre>{}</pre>\n</div>", escape_html(message))
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			c => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tokens::EmbedToken;

	#[test]
	fn failed_descriptor_renders_escaped_error() {
		let page = render_embed_page(&EmbedDescriptor::Failed { error_message: "Status: 401 Unauthorized\r\nResponse: <html>".to_string() });

		assert!(page.contains("Status: 401 Unauthorized"));
		assert!(page.contains("&lt;html&gt;"));
		assert!(!page.contains("powerbi.embed"));
	}

	#[test]
	fn embedded_descriptor_renders_report_script() {
		let page = render_embed_page(&EmbedDescriptor::Embedded(EmbedConfig {
			id: "r-1".to_string(),
			embed_url: "https://app.powerbi.com/reportEmbed?reportId=r-1&x=</script>".to_string(),
			embed_token: EmbedToken { token: "embed-token".to_string(), token_id: None, expiration: None },
			dashboard_id: None,
			is_effective_identity_required: Some(true),
			is_effective_identity_roles_required: Some(false),
		}));

		assert!(page.contains("powerbi.embed"));
		assert!(page.contains("\"embedToken\":{\"token\":\"embed-token\""));
		assert!(page.contains("x=\\u003c/script>"));
		assert!(!page.contains("errorWrapper"));
	}
}
