use crate::domain::geometry;
use crate::domain::model::{Record, DESCRIPTION_FIELD, GEOM_FIELD, REQUEST_TYPE_FIELD};

pub const POTHOLE_KEYWORD: &str = "pothole";

/// 分類或描述其中之一提到 pothole 就算符合
pub fn mentions_pothole(record: &Record) -> bool {
    field_contains(record, REQUEST_TYPE_FIELD, POTHOLE_KEYWORD)
        || field_contains(record, DESCRIPTION_FIELD, POTHOLE_KEYWORD)
}

// 缺值一律視為不符合
fn field_contains(record: &Record, field: &str, needle: &str) -> bool {
    record
        .data
        .get(field)
        .and_then(|value| value.as_str())
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// 從 geom 欄位取出 (緯度, 經度)。
/// 解碼失敗或座標非有限值都回傳 None，由清理階段捨棄該列。
pub fn extract_coordinates(record: &Record) -> Option<(f64, f64)> {
    let wkb_hex = record.data.get(GEOM_FIELD)?.as_str()?;

    let point = match geometry::decode_point(wkb_hex) {
        Ok(point) => point,
        Err(e) => {
            tracing::debug!("Row geometry could not be decoded: {}", e);
            return None;
        }
    };

    let (latitude, longitude) = (point.y(), point.x());
    if !latitude.is_finite() || !longitude.is_finite() {
        tracing::debug!("Row geometry has non-finite coordinates");
        return None;
    }

    Some((latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const LE_POINT: &str = "01010000003333333333C354C00AD7A3703D2A4540";
    const NAN_POINT: &str = "0101000000000000000000F87F0AD7A3703D2A4540";

    fn make_record(fields: &[(&str, serde_json::Value)]) -> Record {
        let mut data = HashMap::new();
        for (key, value) in fields {
            data.insert(key.to_string(), value.clone());
        }
        Record { data }
    }

    #[test]
    fn test_matches_on_request_type_title() {
        let record = make_record(&[
            (REQUEST_TYPE_FIELD, "Pothole Repair".into()),
            (DESCRIPTION_FIELD, serde_json::Value::Null),
        ]);
        assert!(mentions_pothole(&record));
    }

    #[test]
    fn test_matches_on_description_only() {
        let record = make_record(&[
            (REQUEST_TYPE_FIELD, "Street Maintenance".into()),
            (DESCRIPTION_FIELD, "there are huge POTHOLES on Woodward".into()),
        ]);
        assert!(mentions_pothole(&record));
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let record = make_record(&[(REQUEST_TYPE_FIELD, "reported PotHole cluster".into())]);
        assert!(mentions_pothole(&record));
    }

    #[test]
    fn test_no_match_without_keyword() {
        let record = make_record(&[
            (REQUEST_TYPE_FIELD, "Traffic Sign Issue".into()),
            (DESCRIPTION_FIELD, "sign is bent".into()),
        ]);
        assert!(!mentions_pothole(&record));
    }

    #[test]
    fn test_missing_and_null_fields_never_match() {
        assert!(!mentions_pothole(&make_record(&[])));

        let record = make_record(&[
            (REQUEST_TYPE_FIELD, serde_json::Value::Null),
            (DESCRIPTION_FIELD, serde_json::Value::Null),
        ]);
        assert!(!mentions_pothole(&record));
    }

    #[test]
    fn test_non_string_fields_never_match() {
        let record = make_record(&[(REQUEST_TYPE_FIELD, serde_json::json!(42))]);
        assert!(!mentions_pothole(&record));
    }

    #[test]
    fn test_extract_coordinates_returns_latitude_then_longitude() {
        let record = make_record(&[(GEOM_FIELD, LE_POINT.into())]);
        assert_eq!(extract_coordinates(&record), Some((42.33, -83.05)));
    }

    #[test]
    fn test_extract_coordinates_missing_geom() {
        assert_eq!(extract_coordinates(&make_record(&[])), None);

        let record = make_record(&[(GEOM_FIELD, serde_json::Value::Null)]);
        assert_eq!(extract_coordinates(&record), None);
    }

    #[test]
    fn test_extract_coordinates_bad_geometry() {
        let record = make_record(&[(GEOM_FIELD, "not-wkb-at-all".into())]);
        assert_eq!(extract_coordinates(&record), None);

        let record = make_record(&[(GEOM_FIELD, "01010000003333".into())]);
        assert_eq!(extract_coordinates(&record), None);
    }

    #[test]
    fn test_extract_coordinates_non_finite_is_missing() {
        let record = make_record(&[(GEOM_FIELD, NAN_POINT.into())]);
        assert_eq!(extract_coordinates(&record), None);
    }
}
