use anyhow::{Context, Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub async fn make_request(client: &Client, base_url: &str, endpoint: &str) -> Result<Value> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint);
    let res = client
        .get(&url)
        .send()
        .await
        .context("Failed to fetch data from API")?;

    if !res.status().is_success() {
        return Err(Error::msg(format!(
            "Failed to fetch data from API: request failed with status {}",
            res.status()
        )));
    }

    let text = res
        .text()
        .await
        .context("Failed to fetch data from API")?;
    let data = serde_json::from_str::<Value>(&text).context("Failed to parse JSON response")?;

    Ok(data)
}

pub fn parse_response_object<T>(data: Value, error_msg: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    match data {
        Value::Object(obj) => serde_json::from_value(Value::Object(obj))
            .map_err(|e| Error::msg(format!("{}: {}", error_msg, e))),
        _ => Err(Error::msg(format!(
            "{}: unexpected API response format, not an object",
            error_msg
        ))),
    }
}
