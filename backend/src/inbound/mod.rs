//! Inbound adapters translating triggers into domain calls.
//!
//! [`gateway`] holds the handler contract shared by every transport; [`http`]
//! serves it over actix-web and [`ui`] drives the notes board.

pub mod gateway;
pub mod http;
pub mod ui;
