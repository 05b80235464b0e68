#![warn(clippy::pedantic, clippy::nursery, clippy::all, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use log::{error, warn};
use rocket::fairing::AdHoc;
use rocket::{routes, Build, Rocket};

pub use embed::*;
pub use error::EmbedError;
pub use pages::{render_embed_page, EMBED_ROLES, EMBED_USER};
pub use remote_types::*;
pub use settings::*;
pub use tokens::*;

mod embed;
mod error;
mod pages;
mod remote_types;
mod settings;
mod tokens;

///
/// # Embed Server
/// Mounts the embed page on `rocket` and manages an `EmbedService` built from the `embed` table of its configuration.
///
/// Incomplete settings do not stop the launch, the page reports them instead.
///
#[must_use]
pub fn server(rocket: Rocket<Build>) -> Rocket<Build> {
	rocket.mount("/", routes![pages::index, pages::embed_page]).attach(AdHoc::try_on_ignite("Embed Settings", |rocket| async move {
		match rocket.figment().extract_inner::<EmbedSettings>("embed") {
			Ok(settings) => {
				let service = EmbedService::new(settings);
				if let Err(e) = service.settings().validate() {
					warn!("Embed settings are incomplete: {e}");
				}
				Ok(rocket.manage(service))
			}
			Err(e) => {
				error!("Failed to read the embed settings: {e}");
				Err(rocket)
			}
		}
	}))
}
