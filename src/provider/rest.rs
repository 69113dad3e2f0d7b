use serde::Deserialize;

use super::{CountryOption, Holiday, Result};
use crate::config::Config;

/// Wire shape of the country endpoint: `[{ "cca2": "...", "name": { "common": "..." } }]`.
#[derive(Debug, Deserialize)]
struct RawCountry {
    cca2: String,
    name: RawCountryName,
}

#[derive(Debug, Deserialize)]
struct RawCountryName {
    common: String,
}

/// Blocking client for the two read-only endpoints. Shared across fetch
/// threads behind an `Arc`; the agent keeps its connection pool.
pub struct RestClient {
    agent: ureq::Agent,
    holiday_url: String,
    country_url: String,
    api_key: Option<String>,
}

impl RestClient {
    pub fn from_config(config: &Config) -> Self {
        RestClient {
            agent: ureq::agent(),
            holiday_url: config.api.holiday_url.clone(),
            country_url: config.api.country_url.clone(),
            api_key: config.api_key(),
        }
    }

    /// Fetches the selectable country list, sorted by display name.
    pub fn countries(&self) -> Result<Vec<CountryOption>> {
        let raw: Vec<RawCountry> = self
            .agent
            .get(&self.country_url)
            .call()?
            .into_json()?;

        Ok(map_countries(raw))
    }

    /// Fetches all public holidays of `country` in `year`.
    pub fn holidays(&self, country: &str, year: i32) -> Result<Vec<Holiday>> {
        let mut request = self
            .agent
            .get(&self.holiday_url)
            .query("country", country)
            .query("year", &year.to_string());

        if let Some(key) = &self.api_key {
            request = request.set("X-Api-Key", key);
        }

        Ok(request.call()?.into_json()?)
    }
}

fn map_countries(raw: Vec<RawCountry>) -> Vec<CountryOption> {
    let mut options: Vec<CountryOption> = raw
        .into_iter()
        .map(|country| CountryOption {
            value: country.cca2,
            label: country.name.common,
        })
        .collect();

    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_records_map_to_options() {
        let raw: Vec<RawCountry> = serde_json::from_str(
            r#"[
                { "cca2": "US", "name": { "common": "United States" } },
                { "cca2": "DE", "name": { "common": "Germany" } }
            ]"#,
        )
        .unwrap();

        let options = map_countries(raw);
        assert_eq!(
            options,
            vec![
                CountryOption {
                    value: "DE".to_owned(),
                    label: "Germany".to_owned(),
                },
                CountryOption {
                    value: "US".to_owned(),
                    label: "United States".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn holiday_records_deserialize() {
        let holidays: Vec<Holiday> = serde_json::from_str(
            r#"[
                { "date": "2024-07-04", "name": "Independence Day" },
                { "date": "2024-01-01", "name": "New Year's Day" }
            ]"#,
        )
        .unwrap();

        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].name, "Independence Day");
        assert_eq!(
            holidays[0].day(),
            chrono::NaiveDate::from_ymd_opt(2024, 7, 4)
        );
    }

    #[test]
    fn extra_provider_fields_are_ignored() {
        let holidays: Vec<Holiday> = serde_json::from_str(
            r#"[{ "date": "2024-12-25", "name": "Christmas", "country": "US", "type": "public_holiday" }]"#,
        )
        .unwrap();

        assert_eq!(holidays[0].name, "Christmas");
    }
}
