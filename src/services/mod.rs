pub mod quote_client;
pub mod quote_service;

pub use quote_client::QuoteClient;
pub use quote_service::QuoteService;
