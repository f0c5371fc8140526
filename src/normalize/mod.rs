//! Raw backend trees to canonical records.
//!
//! The backend has shipped the same entity nested under several keys, wrapped in `data`
//! envelopes and flattened to prefixed top-level keys. Every function here is total: an
//! unexpected shape produces absent fields, never an error. Resolution order lives in
//! [`tables`] and is fixed.

mod auth;
mod entities;
mod ledger;
mod listing;
mod resolve;
mod tables;

pub use auth::{login, message, user, LoginRecord};
pub use entities::{profile, share_details};
pub use ledger::{due_summary, ledger};
pub use listing::{deposit_page, member_due_page, member_page};
