use reqwest::StatusCode;
use thiserror::Error;

///
/// # Embed Error
/// Everything that can stop an embed workflow before it produces a token.
/// The `Display` output is what ends up in a failed descriptor, so it is written for the page reader.
///
#[derive(Debug, Error)]
pub enum EmbedError {
	/// A required setting is missing or malformed.
	#[error("{0}")]
	Configuration(String),
	/// Azure AD rejected the credentials or could not be reached.
	#[error("{0}")]
	Authentication(String),
	/// The workspace listing was empty or did not contain the requested item.
	#[error("{0}")]
	NotFound(String),
	/// The Power BI API answered with a non-success status.
	#[error("Status: {status}\r\nResponse: {body}{}", request_id_line(.request_id.as_deref()))]
	RemoteCall {
		/// HTTP status returned by the API.
		status: StatusCode,
		/// Raw response body.
		body: String,
		/// Value of the `RequestId` correlation header, when present.
		request_id: Option<String>,
	},
	/// `GenerateToken` answered without a token.
	#[error("{0}")]
	TokenGeneration(String),
	/// The request never produced a response, or the response could not be decoded.
	#[error("Request to the Power BI API failed: {0}")]
	Transport(#[from] reqwest::Error),
}

fn request_id_line(request_id: Option<&str>) -> String {
	request_id.map_or_else(String::new, |id| format!("\r\nRequestId: {id}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn remote_call_message_carries_status_and_request_id() {
		let error = EmbedError::RemoteCall { status: StatusCode::FORBIDDEN, body: "{\"error\":\"denied\"}".to_string(), request_id: Some("c0ffee".to_string()) };
		let message = error.to_string();

		assert!(message.contains("403"));
		assert!(message.contains("{\"error\":\"denied\"}"));
		assert!(message.ends_with("RequestId: c0ffee"));
	}

	#[test]
	fn remote_call_message_omits_missing_request_id() {
		let error = EmbedError::RemoteCall { status: StatusCode::NOT_FOUND, body: String::new(), request_id: None };

		assert!(!error.to_string().contains("RequestId"));
	}
}
