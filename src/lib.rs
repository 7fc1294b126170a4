//! Desktop viewer for a wallet's token balance and transfer history.
//!
//! The egui front end ([`app`], [`view`], [`state`]) never performs I/O. All
//! network access lives in the [`service`] task, which drives the wallet
//! connector, the balance reader and the transfer history client.

pub mod app;
pub mod balance;
pub mod config;
pub mod events;
pub mod models;
pub mod rpc;
pub mod service;
pub mod state;
pub mod transfer_client;
pub mod view;
pub mod wallet;
