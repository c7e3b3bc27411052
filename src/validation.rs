//! Input parsing helpers for the command shell
//!
//! Every helper turns one raw token into a typed value or a `HabitError`
//! whose message can be shown to the user as-is.

use crate::error::{HabitError, HabitResult};
use crate::habit::{Reward, YearMonth};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date_str: &str) -> HabitResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| HabitError::InvalidDate(date_str.to_string()))
}

/// Parse a `YYYY-MM` month
pub fn parse_month(month_str: &str) -> HabitResult<YearMonth> {
    month_str.trim().parse()
}

/// Parse a strictly positive point value
///
/// # Arguments
/// * `field` - Name used in the error message (e.g. "Points")
/// * `raw` - Token as typed
pub fn parse_points(field: &'static str, raw: &str) -> HabitResult<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| HabitError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if value <= 0 {
        return Err(HabitError::InvalidPoints { field, value });
    }
    u32::try_from(value).map_err(|_| HabitError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parse a non-negative whole number such as a historical count or streak
pub fn parse_count(field: &'static str, raw: &str) -> HabitResult<u32> {
    raw.trim().parse().map_err(|_| HabitError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parse a numeric id
pub fn parse_id(raw: &str) -> HabitResult<u32> {
    parse_count("Id", raw.trim().trim_start_matches('#'))
}

/// Parse a 1-based position as typed by the user into a 0-based index
///
/// Zero is not a valid position.
pub fn parse_position(raw: &str) -> HabitResult<usize> {
    let position: usize = raw.trim().parse().map_err(|_| HabitError::InvalidNumber {
        field: "Position",
        value: raw.to_string(),
    })?;
    position.checked_sub(1).ok_or(HabitError::InvalidNumber {
        field: "Position",
        value: raw.to_string(),
    })
}

/// Parse a reward written as `name=points`
///
/// The last `=` separates the points, so names may contain `=` themselves.
/// A blank name is kept as-is; month card validation drops it later.
pub fn parse_reward(raw: &str) -> HabitResult<Reward> {
    let Some((name, points)) = raw.rsplit_once('=') else {
        return Err(HabitError::InvalidNumber {
            field: "Reward points",
            value: raw.to_string(),
        });
    };
    Ok(Reward::new(name.trim(), parse_points("Reward points", points)?))
}

/// Parse a `yes`/`no` style flag
pub fn parse_flag(raw: &str) -> HabitResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(HabitError::InvalidChoice {
            kind: "flag",
            value: raw.to_string(),
            options: "yes, no",
        }),
    }
}

/// Split trailing `key=value` tokens into named options
///
/// `reward` may be repeated; every other key keeps its last value. Tokens
/// without `=` are returned separately, in order.
pub fn split_options(tokens: &[String]) -> (Vec<String>, CommandOptions) {
    let mut positional = Vec::new();
    let mut options = CommandOptions::default();
    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) if is_option_key(key) => {
                let key = key.trim().to_ascii_lowercase();
                if key == "reward" {
                    options.rewards.push(value.to_string());
                } else {
                    options.values.insert(key, value.to_string());
                }
            }
            _ => positional.push(token.clone()),
        }
    }
    (positional, options)
}

fn is_option_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Named options collected by `split_options`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub values: BTreeMap<String, String>,
    pub rewards: Vec<String>,
}

impl CommandOptions {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Keys that are not in `allowed`
    pub fn unknown_keys(&self, allowed: &[&str]) -> Vec<String> {
        self.values
            .keys()
            .filter(|k| !allowed.contains(&k.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("2025-03-15").is_ok());
        assert_eq!(
            parse_date("15/03/2025"),
            Err(HabitError::InvalidDate("15/03/2025".to_string()))
        );
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_points_requires_positive() {
        assert_eq!(parse_points("Points", "5"), Ok(5));
        assert_eq!(
            parse_points("Points", "0"),
            Err(HabitError::InvalidPoints {
                field: "Points",
                value: 0
            })
        );
        assert_eq!(
            parse_points("Points", "-3"),
            Err(HabitError::InvalidPoints {
                field: "Points",
                value: -3
            })
        );
        assert!(matches!(
            parse_points("Points", "five"),
            Err(HabitError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_position_is_one_based() {
        assert_eq!(parse_position("1"), Ok(0));
        assert_eq!(parse_position("4"), Ok(3));
        assert!(parse_position("0").is_err());
        assert!(parse_position("-1").is_err());
    }

    #[test]
    fn test_parse_reward() {
        assert_eq!(parse_reward("New Book=150"), Ok(Reward::new("New Book", 150)));
        assert_eq!(parse_reward("a=b=20"), Ok(Reward::new("a=b", 20)));
        assert!(parse_reward("Movie Night").is_err());
        assert!(parse_reward("Movie Night=0").is_err());
    }

    #[test]
    fn test_split_options() {
        let (positional, options) = split_options(&tokens(&[
            "2025-04",
            "target=250",
            "reward=New Book=150",
            "reward=Trip=300",
            "summary=Ship it",
            "push a commit",
        ]));
        assert_eq!(positional, tokens(&["2025-04", "push a commit"]));
        assert_eq!(options.get("target"), Some("250"));
        assert_eq!(options.get("summary"), Some("Ship it"));
        assert_eq!(options.rewards, tokens(&["New Book=150", "Trip=300"]));
        assert!(options.unknown_keys(&["target", "summary"]).is_empty());
    }

    #[test]
    fn test_names_with_symbols_stay_positional() {
        let (positional, options) = split_options(&tokens(&["code war >5 kata"]));
        assert_eq!(positional, tokens(&["code war >5 kata"]));
        assert!(options.values.is_empty());
    }
}
