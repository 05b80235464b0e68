pub use client::{PowerBiClient, REQUEST_ID_HEADER};
pub use descriptor::{EmbedConfig, EmbedDescriptor};
pub use service::EmbedService;
pub use target::{EmbedTarget, SelectedItem};

mod client;
mod descriptor;
mod service;
mod target;
