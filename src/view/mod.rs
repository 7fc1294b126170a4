//! UI view modules — pure rendering functions.
//!
//! Each submodule renders one part of the transfer view. Views read from
//! [`AppState`](crate::state::AppState), call its action methods, and forward
//! the resulting [`UiEvent`](crate::events::UiEvent)s. No async, no network.

pub mod connection;
pub mod detail;
pub mod transfers;
