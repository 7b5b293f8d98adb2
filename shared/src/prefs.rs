//! Preferences and share links
//!
//! The persisted preferences are the ordered city list and the time-format
//! flag. A share link is the query-string form (`source=..&dest=..&format=12hr`)
//! accepted on the command line; on startup link parameters override stored
//! preferences, which override the hard-coded defaults. Invalid timezone
//! identifiers from either source are logged and ignored, never fatal.

use serde::{Deserialize, Serialize};

use crate::offset;

/// Default city pair used when nothing valid is stored or linked
pub const DEFAULT_CITIES: [&str; 2] = ["America/New_York", "Europe/London"];

/// Persisted time-format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "24hr")]
    TwentyFourHour,
    #[serde(rename = "12hr")]
    TwelveHour,
}

impl TimeFormat {
    pub fn use_24_hour(self) -> bool {
        matches!(self, TimeFormat::TwentyFourHour)
    }

    pub fn from_use_24_hour(use_24_hour: bool) -> Self {
        if use_24_hour {
            TimeFormat::TwentyFourHour
        } else {
            TimeFormat::TwelveHour
        }
    }

    /// Parse the wire form used by links and the store
    pub fn parse_flag(flag: &str) -> Option<Self> {
        match flag {
            "24hr" => Some(TimeFormat::TwentyFourHour),
            "12hr" => Some(TimeFormat::TwelveHour),
            _ => None,
        }
    }
}

/// Persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Ordered timezone ids; the first is the reference dial
    pub cities: Vec<String>,
    /// Display format, serialized as "24hr" / "12hr"
    pub time_format: TimeFormat,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|s| s.to_string()).collect(),
            time_format: TimeFormat::TwentyFourHour,
        }
    }
}

/// Parameters carried by a share link
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShareLink {
    pub source: Option<String>,
    pub dest: Option<String>,
    pub format: Option<TimeFormat>,
}

/// Minimal percent decoding for query values ('+' as space, %XX hex)
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).and_then(|h| {
                    std::str::from_utf8(h)
                        .ok()
                        .and_then(|s| u8::from_str_radix(s, 16).ok())
                });
                match hex {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse a share-link query string; unknown keys are ignored
pub fn parse_share_query(query: &str) -> ShareLink {
    let mut link = ShareLink::default();
    for pair in query.trim_start_matches('?').split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = percent_decode(value);
        match key {
            "source" => link.source = Some(value),
            "dest" => link.dest = Some(value),
            "format" => match TimeFormat::parse_flag(&value) {
                Some(format) => link.format = Some(format),
                None => log::warn!("Ignoring unrecognized format flag: {}", value),
            },
            _ => {}
        }
    }
    link
}

/// Keep only the cities that resolve to real timezones, logging the rest
fn retain_valid_cities(cities: Vec<String>, origin: &str) -> Vec<String> {
    cities
        .into_iter()
        .filter(|id| match offset::validate(id) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Dropping {} city: {}", origin, e);
                false
            }
        })
        .collect()
}

/// Resolve the effective preferences for this session
///
/// Precedence: share-link parameters override stored preferences, which
/// override the defaults. A link's source/dest replace the first two city
/// slots; a slot whose link value is invalid or absent keeps the value from
/// the layer below.
pub fn resolve_preferences(link: Option<&ShareLink>, stored: Option<Preferences>) -> Preferences {
    let defaults = Preferences::default();

    let mut resolved = match stored {
        Some(prefs) => {
            let cities = retain_valid_cities(prefs.cities, "stored");
            Preferences {
                cities: if cities.is_empty() {
                    defaults.cities.clone()
                } else {
                    cities
                },
                time_format: prefs.time_format,
            }
        }
        None => defaults.clone(),
    };

    let Some(link) = link else {
        return resolved;
    };

    if link.source.is_some() || link.dest.is_some() {
        // A shared link pins the dial pair; slots the link does not name (or
        // names invalidly) fall back to the layer below, padded from the
        // defaults when the stored list is shorter than two.
        let mut pair = vec![
            resolved
                .cities
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_CITIES[0].to_string()),
            resolved
                .cities
                .get(1)
                .cloned()
                .unwrap_or_else(|| DEFAULT_CITIES[1].to_string()),
        ];
        for (slot, value) in [&link.source, &link.dest].into_iter().enumerate() {
            if let Some(id) = value {
                match offset::validate(id) {
                    Ok(_) => pair[slot] = id.clone(),
                    Err(e) => log::warn!("Ignoring link parameter: {}", e),
                }
            }
        }
        resolved.cities = pair;
    }

    if let Some(format) = link.format {
        resolved.time_format = format;
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.cities, vec!["America/New_York", "Europe/London"]);
        assert!(prefs.time_format.use_24_hour());
    }

    #[test]
    fn test_time_format_wire_form() {
        assert_eq!(TimeFormat::parse_flag("12hr"), Some(TimeFormat::TwelveHour));
        assert_eq!(
            TimeFormat::parse_flag("24hr"),
            Some(TimeFormat::TwentyFourHour)
        );
        assert_eq!(TimeFormat::parse_flag("13hr"), None);

        let toml = toml::to_string(&Preferences::default()).unwrap();
        assert!(toml.contains("24hr"));
    }

    #[test]
    fn test_parse_share_query() {
        let link =
            parse_share_query("?source=America%2FNew_York&dest=Asia/Tokyo&format=12hr&junk=1");
        assert_eq!(link.source.as_deref(), Some("America/New_York"));
        assert_eq!(link.dest.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(link.format, Some(TimeFormat::TwelveHour));
    }

    #[test]
    fn test_parse_share_query_absent_format_means_default() {
        let link = parse_share_query("source=Europe/Paris");
        assert_eq!(link.format, None);
        let resolved = resolve_preferences(Some(&link), None);
        assert!(resolved.time_format.use_24_hour());
        assert_eq!(resolved.cities, vec!["Europe/Paris", "Europe/London"]);
    }

    #[test]
    fn test_link_overrides_stored() {
        let stored = Preferences {
            cities: vec!["Asia/Tokyo".to_string(), "Europe/Berlin".to_string()],
            time_format: TimeFormat::TwentyFourHour,
        };
        let link = parse_share_query("source=America/Chicago&format=12hr");
        let resolved = resolve_preferences(Some(&link), Some(stored));
        assert_eq!(resolved.cities, vec!["America/Chicago", "Europe/Berlin"]);
        assert_eq!(resolved.time_format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_invalid_link_source_falls_back() {
        let stored = Preferences {
            cities: vec!["Asia/Tokyo".to_string(), "Europe/Berlin".to_string()],
            time_format: TimeFormat::TwentyFourHour,
        };
        let link = parse_share_query("source=Not/AReal_Zone&dest=Australia/Sydney");
        let resolved = resolve_preferences(Some(&link), Some(stored));
        assert_eq!(resolved.cities, vec!["Asia/Tokyo", "Australia/Sydney"]);
    }

    #[test]
    fn test_corrupted_stored_cities_fall_back_to_defaults() {
        let stored = Preferences {
            cities: vec!["garbage".to_string(), "also garbage".to_string()],
            time_format: TimeFormat::TwelveHour,
        };
        let resolved = resolve_preferences(None, Some(stored));
        assert_eq!(resolved.cities, vec!["America/New_York", "Europe/London"]);
        // The format flag survives even when the city list was corrupt
        assert_eq!(resolved.time_format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_partially_valid_stored_cities_are_kept() {
        let stored = Preferences {
            cities: vec![
                "Europe/Madrid".to_string(),
                "Bad/Zone".to_string(),
                "Asia/Seoul".to_string(),
            ],
            time_format: TimeFormat::TwentyFourHour,
        };
        let resolved = resolve_preferences(None, Some(stored));
        assert_eq!(resolved.cities, vec!["Europe/Madrid", "Asia/Seoul"]);
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("America%2FNew_York"), "America/New_York");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }
}
