use derive_getters::Getters;
use derive_new::new;

/// One row of the `exchange_rate` table.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ExchangeRate {
    id: String,
    codein: String,
    name: String,
    high: String,
    low: String,
    var_bid: String,
    pct_change: String,
    bid: String,
    ask: String,
    timestamp: String,
    create_date: String,
}
