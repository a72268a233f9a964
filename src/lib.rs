//! leadbook
//!
//! Client for capturing leads and working through their contact status
//! against a REST backend. [`controller::LeadController`] runs each user
//! action; [`state::ViewModel`] holds what the page shows.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod operator;
pub mod state;

pub use client::{HttpLeadApi, LeadApi};
pub use crate::config::ClientConfig;
pub use controller::LeadController;
pub use errors::ClientError;
pub use operator::{ConsoleOperator, Operator, ScriptedOperator};
pub use state::{Action, EditBuffer, ViewModel};
