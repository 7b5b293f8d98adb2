//! Timezone catalog - static city reference data for lookup and search
//!
//! One record per supported city: city name, country, IANA timezone id, and
//! the common abbreviation. Records are immutable and keyed by timezone id.

/// A single catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneRecord {
    /// City name (e.g., "New York")
    pub city: &'static str,
    /// Country name (e.g., "USA")
    pub country: &'static str,
    /// IANA timezone identifier (e.g., "America/New_York"), unique per record
    pub timezone_id: &'static str,
    /// Common timezone abbreviation (e.g., "EST")
    pub abbreviation: &'static str,
}

/// Maximum number of results returned by [`search`]
pub const MAX_SEARCH_RESULTS: usize = 10;

macro_rules! record {
    ($city:expr, $country:expr, $tz:expr, $abbrev:expr) => {
        TimezoneRecord {
            city: $city,
            country: $country,
            timezone_id: $tz,
            abbreviation: $abbrev,
        }
    };
}

/// The full city catalog, roughly ordered west to east
pub const CATALOG: &[TimezoneRecord] = &[
    record!("Honolulu", "USA", "Pacific/Honolulu", "HST"),
    record!("Anchorage", "USA", "America/Anchorage", "AKST"),
    record!("Los Angeles", "USA", "America/Los_Angeles", "PST"),
    record!("Vancouver", "Canada", "America/Vancouver", "PST"),
    record!("Denver", "USA", "America/Denver", "MST"),
    record!("Phoenix", "USA", "America/Phoenix", "MST"),
    record!("Chicago", "USA", "America/Chicago", "CST"),
    record!("Mexico City", "Mexico", "America/Mexico_City", "CST"),
    record!("New York", "USA", "America/New_York", "EST"),
    record!("Toronto", "Canada", "America/Toronto", "EST"),
    record!("Bogota", "Colombia", "America/Bogota", "COT"),
    record!("Lima", "Peru", "America/Lima", "PET"),
    record!("Santiago", "Chile", "America/Santiago", "CLT"),
    record!("Halifax", "Canada", "America/Halifax", "AST"),
    record!("Buenos Aires", "Argentina", "America/Argentina/Buenos_Aires", "ART"),
    record!("Sao Paulo", "Brazil", "America/Sao_Paulo", "BRT"),
    record!("Reykjavik", "Iceland", "Atlantic/Reykjavik", "GMT"),
    record!("London", "UK", "Europe/London", "GMT"),
    record!("Dublin", "Ireland", "Europe/Dublin", "GMT"),
    record!("Lisbon", "Portugal", "Europe/Lisbon", "WET"),
    record!("Madrid", "Spain", "Europe/Madrid", "CET"),
    record!("Paris", "France", "Europe/Paris", "CET"),
    record!("Amsterdam", "Netherlands", "Europe/Amsterdam", "CET"),
    record!("Berlin", "Germany", "Europe/Berlin", "CET"),
    record!("Zurich", "Switzerland", "Europe/Zurich", "CET"),
    record!("Rome", "Italy", "Europe/Rome", "CET"),
    record!("Stockholm", "Sweden", "Europe/Stockholm", "CET"),
    record!("Vienna", "Austria", "Europe/Vienna", "CET"),
    record!("Warsaw", "Poland", "Europe/Warsaw", "CET"),
    record!("Lagos", "Nigeria", "Africa/Lagos", "WAT"),
    record!("Athens", "Greece", "Europe/Athens", "EET"),
    record!("Helsinki", "Finland", "Europe/Helsinki", "EET"),
    record!("Cairo", "Egypt", "Africa/Cairo", "EET"),
    record!("Johannesburg", "South Africa", "Africa/Johannesburg", "SAST"),
    record!("Istanbul", "Turkey", "Europe/Istanbul", "TRT"),
    record!("Moscow", "Russia", "Europe/Moscow", "MSK"),
    record!("Nairobi", "Kenya", "Africa/Nairobi", "EAT"),
    record!("Dubai", "UAE", "Asia/Dubai", "GST"),
    record!("Tehran", "Iran", "Asia/Tehran", "IRST"),
    record!("Karachi", "Pakistan", "Asia/Karachi", "PKT"),
    record!("Mumbai", "India", "Asia/Kolkata", "IST"),
    record!("Kathmandu", "Nepal", "Asia/Kathmandu", "NPT"),
    record!("Dhaka", "Bangladesh", "Asia/Dhaka", "BST"),
    record!("Bangkok", "Thailand", "Asia/Bangkok", "ICT"),
    record!("Jakarta", "Indonesia", "Asia/Jakarta", "WIB"),
    record!("Singapore", "Singapore", "Asia/Singapore", "SGT"),
    record!("Hong Kong", "China", "Asia/Hong_Kong", "HKT"),
    record!("Shanghai", "China", "Asia/Shanghai", "CST"),
    record!("Taipei", "Taiwan", "Asia/Taipei", "CST"),
    record!("Perth", "Australia", "Australia/Perth", "AWST"),
    record!("Seoul", "South Korea", "Asia/Seoul", "KST"),
    record!("Tokyo", "Japan", "Asia/Tokyo", "JST"),
    record!("Adelaide", "Australia", "Australia/Adelaide", "ACST"),
    record!("Brisbane", "Australia", "Australia/Brisbane", "AEST"),
    record!("Sydney", "Australia", "Australia/Sydney", "AEST"),
    record!("Auckland", "New Zealand", "Pacific/Auckland", "NZST"),
];

/// Look up a record by its timezone identifier
pub fn find(timezone_id: &str) -> Option<&'static TimezoneRecord> {
    CATALOG.iter().find(|r| r.timezone_id == timezone_id)
}

/// Human-readable name for a timezone id: "City, Country", or the raw id
/// when the id is not in the catalog
pub fn display_name(timezone_id: &str) -> String {
    match find(timezone_id) {
        Some(record) => format!("{}, {}", record.city, record.country),
        None => timezone_id.to_string(),
    }
}

/// The IANA region prefix of a timezone id (e.g., "America" for
/// "America/New_York"), used to group selector entries
pub fn region_of(timezone_id: &str) -> &str {
    timezone_id.split('/').next().unwrap_or(timezone_id)
}

/// Search the catalog with a case-insensitive substring match against city,
/// country, timezone id, and abbreviation
///
/// Returns at most [`MAX_SEARCH_RESULTS`] records in catalog order. An empty
/// query matches everything, so it yields the first N entries.
pub fn search(query: &str) -> Vec<&'static TimezoneRecord> {
    let query_lower = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|r| {
            r.city.to_lowercase().contains(&query_lower)
                || r.country.to_lowercase().contains(&query_lower)
                || r.timezone_id.to_lowercase().contains(&query_lower)
                || r.abbreviation.to_lowercase().contains(&query_lower)
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_timezone_ids_are_unique() {
        let mut seen = HashSet::new();
        for record in CATALOG {
            assert!(
                seen.insert(record.timezone_id),
                "duplicate timezone id: {}",
                record.timezone_id
            );
        }
    }

    #[test]
    fn test_all_ids_parse_as_chrono_tz() {
        for record in CATALOG {
            assert!(
                record.timezone_id.parse::<chrono_tz::Tz>().is_ok(),
                "unparseable timezone id: {}",
                record.timezone_id
            );
        }
    }

    #[test]
    fn test_find_known_city() {
        let record = find("America/New_York").unwrap();
        assert_eq!(record.city, "New York");
        assert_eq!(record.abbreviation, "EST");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(display_name("Europe/London"), "London, UK");
        assert_eq!(display_name("Mars/Olympus_Mons"), "Mars/Olympus_Mons");
    }

    #[test]
    fn test_search_by_city_is_case_insensitive() {
        let results = search("tokyo");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].timezone_id, "Asia/Tokyo");
    }

    #[test]
    fn test_search_by_abbreviation() {
        let results = search("PST");
        assert!(results.iter().any(|r| r.city == "Los Angeles"));
        assert!(results.iter().any(|r| r.city == "Vancouver"));
    }

    #[test]
    fn test_search_caps_results() {
        // "a" matches far more than ten records
        let results = search("a");
        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        // Empty query yields the first N in catalog order
        let all = search("");
        assert_eq!(all.len(), MAX_SEARCH_RESULTS);
        assert_eq!(all[0].timezone_id, CATALOG[0].timezone_id);
    }

    #[test]
    fn test_region_of() {
        assert_eq!(region_of("America/New_York"), "America");
        assert_eq!(region_of("UTC"), "UTC");
    }
}
