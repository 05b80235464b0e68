//! The embed page served through Rocket's local client.

use httpmock::prelude::*;
use pbi_embed_server::{EmbedSettings, EMBED_USER};
use rocket::figment::Figment;
use rocket::http::Status;
use rocket::local::asynchronous::Client;
use serde_json::json;

const WORKSPACE_ID: &str = "5a0e8d3b-1f0c-4d7e-8c55-7b1de5c0a9f2";

fn settings(server: &MockServer) -> EmbedSettings {
	EmbedSettings {
		authority_url: server.url("/"),
		api_url: server.url("/v1.0/myorg"),
		application_id: "0b3f1d55-7d5c-4a36-9b4c-3d0f6f5a2e11".to_string(),
		workspace_id: WORKSPACE_ID.to_string(),
		tenant: "contoso.onmicrosoft.com".to_string(),
		application_secret: "app-secret".to_string(),
		..EmbedSettings::default()
	}
}

async fn client(settings: &EmbedSettings) -> Client {
	let figment = Figment::from(rocket::Config::debug_default()).merge(("embed", settings));
	Client::tracked(pbi_embed_server::server(rocket::custom(figment))).await.expect("valid rocket instance")
}

#[rocket::async_test]
async fn page_embeds_report_for_the_page_user() {
	let server = MockServer::start();
	server.mock(|when, then| {
		when.method(POST).path("/contoso.onmicrosoft.com/oauth2/token");
		then.status(200).json_body(json!({ "token_type": "Bearer", "access_token": "aad-token" }));
	});
	server.mock(|when, then| {
		when.method(GET).path(format!("/v1.0/myorg/groups/{WORKSPACE_ID}/reports"));
		then.status(200).json_body(json!({ "value": [{ "id": "r-1", "embedUrl": "https://app.powerbi.com/reportEmbed?reportId=r-1", "datasetId": "ds-1" }] }));
	});
	server.mock(|when, then| {
		when.method(GET).path(format!("/v1.0/myorg/groups/{WORKSPACE_ID}/datasets/ds-1"));
		then.status(200).json_body(json!({ "id": "ds-1", "isEffectiveIdentityRequired": true, "isEffectiveIdentityRolesRequired": true }));
	});
	let generate_mock = server.mock(|when, then| {
		when.method(POST).path(format!("/v1.0/myorg/groups/{WORKSPACE_ID}/reports/r-1/GenerateToken")).json_body(json!({
			"accessLevel": "View",
			"identities": [{ "username": EMBED_USER, "datasets": ["ds-1"], "roles": ["User_Read"], "customData": "BR001" }]
		}));
		then.status(200).json_body(json!({ "token": "page-embed-token" }));
	});

	let client = client(&settings(&server)).await;
	let response = client.get("/embed").dispatch().await;

	assert_eq!(response.status(), Status::Ok);
	let page = response.into_string().await.unwrap();
	assert!(page.contains("page-embed-token"));
	assert!(page.contains("https://app.powerbi.com/reportEmbed?reportId=r-1"));
	generate_mock.assert();
}

#[rocket::async_test]
async fn page_shows_configuration_errors() {
	let server = MockServer::start();
	let token_mock = server.mock(|when, then| {
		when.method(POST);
		then.status(200).json_body(json!({ "access_token": "aad-token" }));
	});

	let client = client(&EmbedSettings { application_id: String::new(), ..settings(&server) }).await;
	let response = client.get("/embed").dispatch().await;

	assert_eq!(response.status(), Status::Ok);
	let page = response.into_string().await.unwrap();
	assert!(page.contains("ApplicationId is empty"));
	token_mock.assert_calls(0);
}

#[rocket::async_test]
async fn index_redirects_to_embed_page() {
	let server = MockServer::start();
	let client = client(&settings(&server)).await;

	let response = client.get("/").dispatch().await;

	assert_eq!(response.status(), Status::SeeOther);
	assert_eq!(response.headers().get_one("Location"), Some("/embed"));
}
