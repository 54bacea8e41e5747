// src/lib.rs

//! Stockwatch Library
//!
//! Keeps a storefront's stock status current by checking each product's
//! ranked suppliers and recording the first one whose inventory page
//! classifies as in stock.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod payment;
pub mod pipeline;
pub mod services;
pub mod store;
