use anyhow::{Context, Result};
use reqwest::Client;

use super::{
    awesome_dto::AwesomeQuoteDto,
    utils::{make_request, parse_response_object},
};
use crate::models::Quote;

/// Fetches the latest quote for `pair` (e.g. `USD-BRL`) from the AwesomeAPI
/// `json/last` endpoint rooted at `base_url`.
///
/// The response body is an object keyed by the pair without its dash
/// (`USDBRL`), wrapping the quote fields.
pub async fn get_quote(client: &Client, base_url: &str, pair: &str) -> Result<Quote> {
    let res = make_request(client, base_url, pair).await?;

    let key = pair.replace('-', "");
    let quote = res
        .get(&key)
        .with_context(|| format!("Failed to parse JSON response: missing '{}'", key))?;

    parse_response_object::<AwesomeQuoteDto>(quote.clone(), "Failed to parse JSON response")
        .map(AwesomeQuoteDto::into_quote)
}
