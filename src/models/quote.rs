use derive_getters::Getters;
use derive_new::new;

/// A single exchange-rate snapshot, kept exactly as the upstream API sent it.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Quote {
    code: String,
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
