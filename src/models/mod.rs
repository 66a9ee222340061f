pub mod exchange_rate;
pub mod quote;

pub use exchange_rate::ExchangeRate;
pub use quote::Quote;
