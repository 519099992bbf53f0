pub mod auth;
pub mod gallery;
pub mod media;
pub mod store;
