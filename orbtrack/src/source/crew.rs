//! Crew roster from open-notify.

use serde::Deserialize;

use super::http::get_json;
use super::SourceFuture;

/// People-in-space endpoint.
pub const DEFAULT_CREW_URL: &str = "http://api.open-notify.org/astros.json";

/// One person currently in space.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewMember {
    pub name: String,
    /// Spacecraft, e.g. "ISS" or "Tiangong".
    pub craft: String,
}

#[derive(Debug, Deserialize)]
struct AstrosResponse {
    #[serde(default)]
    people: Vec<CrewMember>,
}

/// Something that can list people in space.
pub trait CrewSource: Send + Sync {
    fn fetch_crew(&self) -> SourceFuture<'_, Vec<CrewMember>>;
}

/// reqwest client for open-notify.
pub struct OpenNotifyCrewSource {
    client: reqwest::Client,
    url: String,
}

impl OpenNotifyCrewSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl CrewSource for OpenNotifyCrewSource {
    fn fetch_crew(&self) -> SourceFuture<'_, Vec<CrewMember>> {
        Box::pin(async move {
            let response: AstrosResponse = get_json(&self.client, &self.url).await?;
            Ok(response.people)
        })
    }
}

/// Keep only people aboard the ISS.
pub fn iss_crew(people: Vec<CrewMember>) -> Vec<CrewMember> {
    people.into_iter().filter(|p| p.craft == "ISS").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::http::decode_json;

    #[test]
    fn test_parse_and_filter() {
        let body = r#"{
            "message": "success",
            "number": 3,
            "people": [
                {"name": "Oleg Kononenko", "craft": "ISS"},
                {"name": "Li Guangsu", "craft": "Tiangong"},
                {"name": "Tracy Dyson", "craft": "ISS"}
            ]
        }"#;
        let response: AstrosResponse = decode_json(body.as_bytes()).unwrap();
        let crew = iss_crew(response.people);

        let names: Vec<&str> = crew.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Oleg Kononenko", "Tracy Dyson"]);
    }

    #[test]
    fn test_missing_people_is_empty() {
        let response: AstrosResponse = decode_json(br#"{"message": "success"}"#).unwrap();
        assert!(response.people.is_empty());
    }
}
