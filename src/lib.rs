//! Wishlist gateway + storefront sync engine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two halves share this crate. The gateway half (`routes`, `provider`,
//! `state`, `config`, `identity`) is an HTTP service that forwards
//! storefront wishlist calls to the external provider with server-held
//! credentials attached. The engine half (`storage`, `store`, `api`,
//! `bootstrap`, `wishlist`, `catalog`) is the client-side state machinery a
//! storefront embeds: local persistence, session bootstrap, login sync, and
//! the membership toggle / list view surface.

pub mod api;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod identity;
pub mod provider;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod wishlist;
