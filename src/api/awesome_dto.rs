use derive_getters::Getters;
use derive_new::new;
use serde::Deserialize;

use crate::models::Quote;

#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct AwesomeQuoteDto {
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
    #[serde(rename = "create_date")]
    create_date: String,
}

impl AwesomeQuoteDto {
    pub fn into_quote(self) -> Quote {
        Quote::new(
            self.code,
            self.codein,
            self.name,
            self.high,
            self.low,
            self.var_bid,
            self.pct_change,
            self.bid,
            self.ask,
            self.timestamp,
            self.create_date,
        )
    }
}
