pub mod api;
pub mod client;
pub mod methods;
pub mod types;

pub use client::{TopClient, API_VERSION, RESPONSE_FORMAT};
pub use methods::{MethodSpec, ALL_METHODS};
pub use types::{SelectedItem, Shop, TmcMessage, User};
