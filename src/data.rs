// Location catalogue loading.
use reqwest::Url;

use crate::error::LocationsError;
use crate::model::Location;

pub const LOCATIONS_PATH: &str = "data/locations.json";

/// Resolve `path` against the page URL; the HTTP client only takes absolute URLs.
pub fn resolve_url(page: &str, path: &str) -> Result<String, LocationsError> {
    Url::parse(page)
        .and_then(|base| base.join(path))
        .map(String::from)
        .map_err(|_| LocationsError::NoOrigin(path.to_string()))
}

pub fn parse_locations(raw: &str) -> Result<Vec<Location>, LocationsError> {
    let locations: Vec<Location> = serde_json::from_str(raw)?;
    if locations.is_empty() {
        return Err(LocationsError::Empty);
    }
    Ok(locations)
}

pub async fn fetch_locations(url: &str) -> Result<Vec<Location>, LocationsError> {
    let resp = reqwest::get(url).await?;
    if !resp.status().is_success() {
        return Err(LocationsError::Status(resp.status().as_u16()));
    }
    let body = resp.text().await?;
    parse_locations(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_page() {
        assert_eq!(
            resolve_url("http://localhost:8080/game/index.html", LOCATIONS_PATH).unwrap(),
            "http://localhost:8080/game/data/locations.json"
        );
        assert!(matches!(
            resolve_url("not a url", LOCATIONS_PATH),
            Err(LocationsError::NoOrigin(_))
        ));
    }

    #[test]
    fn empty_or_malformed_catalogue_is_an_error() {
        assert!(matches!(parse_locations("[]"), Err(LocationsError::Empty)));
        assert!(matches!(parse_locations("{"), Err(LocationsError::Parse(_))));
        let ok = parse_locations(r#"[{"image":"a.jpg","coords":{"x":1,"z":2},"biome":"Kelp"}]"#)
            .unwrap();
        assert_eq!(ok.len(), 1);
    }
}
