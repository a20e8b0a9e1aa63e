use super::model::Conference;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Dates are nullable upstream, but startDate and endDate must always be present as keys
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceResponse {
    pub name: String,
    pub city: String,
    pub country: String,
    pub url: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub cfp_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub cfp_end_date: Option<NaiveDate>,
}

impl ConferenceResponse {
    pub fn into_model(self) -> Conference {
        Conference {
            twitter: self.twitter,
            cfp_url: self.cfp_url,
            cfp_end_date: self.cfp_end_date,
            ..Conference::new(
                self.name,
                self.city,
                self.country,
                self.url,
                self.start_date,
                self.end_date,
            )
        }
    }
}

/// Parses a date strictly as `YYYY-MM-DD` (zero padded, no surrounding text)
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    let well_formed = date.len() == 10
        && date.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if !well_formed {
        return Err(format!("invalid date '{date}', expected YYYY-MM-DD"));
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|err| format!("invalid date '{date}': {err}"))
}

fn deserialize_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) => parse_date(&s).map(Some).map_err(de::Error::custom),
        unknown => Err(de::Error::custom(format!(
            "expected a date string or null, found {unknown}"
        ))),
    }
}

pub fn serialize_date<S>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => s.serialize_str(&date.format(DATE_FORMAT).to_string()),
        None => s.serialize_none(),
    }
}
