pub mod broker_gateway;
pub mod mock_catalog;
pub mod quote_ticker;
pub mod reconciliation;
pub mod session;
pub mod stats;
