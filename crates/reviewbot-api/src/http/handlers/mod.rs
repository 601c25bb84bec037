//! HTTP request handlers.

pub mod customer;
pub mod review;
pub mod ws;
