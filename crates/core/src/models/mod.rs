pub mod analytics;
pub mod auth;
pub mod broker;
pub mod holding;
pub mod market;
pub mod sourced;
pub mod trade;
