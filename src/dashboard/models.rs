//! Box and wine records as returned by `getBoxHistory`.
//!
//! These are read-only projections of server data and are passed through
//! unchanged. Identifiers and dates are accepted as JSON strings or numbers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of stars a rating is shown with.
pub const MAX_STARS: u8 = 5;

/// One page of box history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxHistoryPage {
    /// Total number of boxes the user has, across all pages.
    pub box_count: u32,
    /// The boxes on this page.
    #[serde(default)]
    pub boxes: Vec<BoxRecord>,
}

/// A shipped wine box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    /// Server identifier of the box.
    #[serde(deserialize_with = "string_or_number")]
    pub box_id: String,
    /// Shipment date as sent by the server.
    #[serde(deserialize_with = "string_or_number")]
    pub date: String,
    /// Wines in the box.
    #[serde(default)]
    pub wines: Vec<Wine>,
}

impl BoxRecord {
    /// Parses [`date`](Self::date) into a calendar date.
    ///
    /// Accepts RFC 3339 timestamps, `YYYY-MM-DD` dates and millisecond Unix
    /// timestamps. Returns `None` for anything else.
    #[must_use]
    pub fn shipped_on(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.date_naive());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        raw.parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|timestamp| timestamp.date_naive())
    }
}

/// A wine inside a box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    #[serde(deserialize_with = "string_or_number")]
    pub wine_id: String,
    pub wine_name: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub pair_with: Option<String>,
    #[serde(default)]
    pub philosophy: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    /// User rating from 0 to 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_reviewed: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
}

impl Wine {
    /// Returns how many of the [`MAX_STARS`] stars are lit for the rating.
    ///
    /// Star `i` (0-based) is lit when `i < rating`, so a partial rating lights
    /// the next star as well.
    #[must_use]
    pub fn filled_stars(&self) -> u8 {
        (0..MAX_STARS)
            .filter(|&i| f64::from(i) < self.rating)
            .count()
            .try_into()
            .unwrap_or(MAX_STARS)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wine(rating: f64) -> Wine {
        serde_json::from_value(json!({
            "wine_id": 1,
            "wine_name": "Rioja Reserva",
            "rating": rating
        }))
        .unwrap()
    }

    #[test]
    fn test_box_record_deserializes_full_payload() {
        let record: BoxRecord = serde_json::from_value(json!({
            "box_id": "box-1",
            "date": "2024-03-01T10:00:00.000Z",
            "wines": [{
                "wine_id": "w-1",
                "wine_name": "Albariño",
                "image": "https://cdn.example.com/albarino.png",
                "pair_with": "Seafood",
                "philosophy": "Organic",
                "about": "Fresh and saline",
                "rating": 4,
                "is_reviewed": true,
                "score": 91.5,
                "area": "Rías Baixas",
                "store": "Vineo"
            }]
        }))
        .unwrap();

        assert_eq!(record.box_id, "box-1");
        assert_eq!(record.wines.len(), 1);
        assert_eq!(record.wines[0].wine_name, "Albariño");
        assert!(record.wines[0].is_reviewed);
        assert_eq!(record.wines[0].score, Some(91.5));
        assert_eq!(record.wines[0].area.as_deref(), Some("Rías Baixas"));
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let record: BoxRecord = serde_json::from_value(json!({
            "box_id": 17,
            "date": "2024-03-01",
            "wines": [{ "wine_id": 42, "wine_name": "Garnacha" }]
        }))
        .unwrap();

        assert_eq!(record.box_id, "17");
        assert_eq!(record.wines[0].wine_id, "42");
        assert_eq!(record.wines[0].rating, 0.0);
        assert!(record.wines[0].image.is_none());
    }

    #[test]
    fn test_shipped_on_formats() {
        let at = |date: serde_json::Value| -> Option<NaiveDate> {
            let record: BoxRecord =
                serde_json::from_value(json!({ "box_id": "b", "date": date })).unwrap();
            record.shipped_on()
        };

        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(at(json!("2024-03-01T10:00:00.000Z")), expected);
        assert_eq!(at(json!("2024-03-01")), expected);
        assert_eq!(at(json!(1_709_287_200_000_i64)), expected);
        assert_eq!(at(json!("last tuesday")), None);
    }

    #[test]
    fn test_filled_stars() {
        assert_eq!(wine(0.0).filled_stars(), 0);
        assert_eq!(wine(3.0).filled_stars(), 3);
        assert_eq!(wine(3.5).filled_stars(), 4);
        assert_eq!(wine(5.0).filled_stars(), 5);
        assert_eq!(wine(9.0).filled_stars(), 5);
        assert_eq!(wine(-1.0).filled_stars(), 0);
    }

    #[test]
    fn test_page_defaults_to_no_boxes() {
        let page: BoxHistoryPage = serde_json::from_value(json!({ "box_count": 0 })).unwrap();
        assert!(page.boxes.is_empty());
    }
}
