use super::dto::{serialize_date, DATE_FORMAT};
use chrono::NaiveDate;
use serde::Serialize;

/// Conferences in the order they were curated upstream
pub type Conferences = Vec<Conference>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub name: String,
    pub city: String,
    pub country: String,
    pub url: String,
    #[serde(serialize_with = "serialize_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfp_url: Option<String>,
    #[serde(serialize_with = "serialize_date")]
    pub cfp_end_date: Option<NaiveDate>,
}

impl Conference {
    pub fn new(
        name: String,
        city: String,
        country: String,
        url: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name,
            city,
            country,
            url,
            start_date,
            end_date,
            twitter: None,
            cfp_url: None,
            cfp_end_date: None,
        }
    }

    /// Whether proposals are still accepted on `on` (the CFP end date is inclusive)
    pub fn is_cfp_open(&self, on: NaiveDate) -> bool {
        self.cfp_end_date.is_some_and(|end| on <= end)
    }

    /// Number of calendar days the conference spans, counting both ends
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    pub fn display_dates(&self) -> String {
        let render = |date: Option<NaiveDate>| {
            date.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "?".to_string())
        };

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start == end => render(Some(start)),
            (start, end) => format!("{} to {}", render(start), render(end)),
        }
    }
}

/// Topic of a conference file upstream.
///
/// The string form of each variant is the file name used in the upstream
/// repository, e.g. `TechComm` lives in `tech-comm.json`.
#[derive(
    strum::IntoStaticStr,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
pub enum Category {
    #[strum(serialize = "android")]
    Android,
    #[strum(serialize = "clojure")]
    Clojure,
    #[strum(serialize = "cpp")]
    Cpp,
    #[strum(serialize = "css")]
    Css,
    #[strum(serialize = "data")]
    Data,
    #[strum(serialize = "devops")]
    DevOps,
    #[strum(serialize = "dotnet")]
    DotNet,
    #[strum(serialize = "elixir")]
    Elixir,
    #[strum(serialize = "elm")]
    Elm,
    #[strum(serialize = "general")]
    General,
    #[strum(serialize = "golang")]
    Golang,
    #[strum(serialize = "graphql")]
    GraphQL,
    #[strum(serialize = "groovy")]
    Groovy,
    #[strum(serialize = "ios")]
    Ios,
    #[strum(serialize = "java")]
    Java,
    /// Also covers Node.js
    #[strum(serialize = "javascript")]
    JavaScript,
    #[strum(serialize = "leadership")]
    Leadership,
    #[strum(serialize = "networking")]
    Networking,
    #[strum(serialize = "php")]
    Php,
    /// Product management
    #[strum(serialize = "product")]
    Product,
    #[strum(serialize = "python")]
    Python,
    #[strum(serialize = "ruby")]
    Ruby,
    #[strum(serialize = "rust")]
    Rust,
    #[strum(serialize = "scala")]
    Scala,
    #[strum(serialize = "security")]
    Security,
    /// Technical communication and documentation
    #[strum(serialize = "tech-comm")]
    TechComm,
    #[strum(serialize = "ux")]
    Ux,
}

impl Category {
    pub fn url_segment(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_log::test]
    fn should_render_url_segment_for_multi_word_categories() {
        assert_eq!(Category::DevOps.url_segment(), "devops");
        assert_eq!(Category::TechComm.url_segment(), "tech-comm");
        assert_eq!(Category::DotNet.to_string(), "dotnet");
        assert_eq!(Category::GraphQL.as_ref(), "graphql");
    }

    #[test_log::test]
    fn every_category_should_have_a_unique_lowercase_segment() {
        let segments: Vec<&'static str> = Category::iter().map(|c| c.url_segment()).collect();
        let unique: HashSet<&&str> = segments.iter().collect();

        assert_eq!(segments.len(), 27);
        assert_eq!(unique.len(), segments.len());
        assert!(segments
            .iter()
            .all(|s| s.chars().all(|c| c.is_ascii_lowercase() || c == '-')));
    }

    #[test_log::test]
    fn every_segment_should_parse_back_to_its_category() {
        for category in Category::iter() {
            assert_eq!(Category::from_str(category.url_segment()), Ok(category));
        }
        assert!(Category::from_str("cobol").is_err());
    }

    #[test_log::test]
    fn cfp_should_be_open_until_its_end_date_inclusive() {
        let mut conference = Conference::new(
            "DevOpsDays".to_string(),
            "Porto".to_string(),
            "Portugal".to_string(),
            "https://devopsdays.org".to_string(),
            Some(date(2019, 6, 3)),
            Some(date(2019, 6, 4)),
        );

        assert!(!conference.is_cfp_open(date(2019, 1, 1)));

        conference.cfp_end_date = Some(date(2019, 3, 31));

        assert!(conference.is_cfp_open(date(2019, 3, 31)));
        assert!(!conference.is_cfp_open(date(2019, 4, 1)));
    }

    #[test_log::test]
    fn duration_should_count_both_ends() {
        let mut conference = Conference::new(
            "SREcon".to_string(),
            "Dublin".to_string(),
            "Ireland".to_string(),
            "https://usenix.org".to_string(),
            Some(date(2019, 10, 2)),
            Some(date(2019, 10, 4)),
        );

        assert_eq!(conference.duration_days(), Some(3));
        assert_eq!(conference.display_dates(), "2019-10-02 to 2019-10-04");

        conference.end_date = conference.start_date;
        assert_eq!(conference.duration_days(), Some(1));
        assert_eq!(conference.display_dates(), "2019-10-02");

        conference.end_date = None;
        assert_eq!(conference.duration_days(), None);
        assert_eq!(conference.display_dates(), "2019-10-02 to ?");
    }
}
