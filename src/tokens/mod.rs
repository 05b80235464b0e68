#![deny(missing_docs)]
pub use embed_token::{AccessLevel, EffectiveIdentity, EmbedToken, GenerateTokenRequest, EFFECTIVE_IDENTITY_CUSTOM_DATA};
pub use ms_access_token::MSAccessToken;

mod embed_token;
mod key_vault;
mod ms_access_token;
