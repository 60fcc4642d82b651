// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Go-style duration strings ("30s", "1h30m", "250ms") as used by the
//! wait settings of a record and by the provider configuration.

use crate::infrastructure::constants::NEGATIVE_TIMEOUT_CAP_SECS;
use crate::shared::error::{ProviderError, Result};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

fn component_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)(ns|us|µs|ms|s|m|h)").expect("duration component regex")
    })
}

/// Parse a possibly negative duration. Returns the sign and the magnitude.
pub fn parse_signed_duration(input: &str) -> Result<(bool, Duration)> {
    let s = input.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    if body == "0" {
        return Ok((false, Duration::ZERO));
    }
    if body.is_empty() {
        return Err(ProviderError::config_error(format!(
            "Invalid duration: '{}'",
            input
        )));
    }

    let mut consumed = 0;
    let mut total_nanos: f64 = 0.0;
    for caps in component_regex().captures_iter(body) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        if whole.start != consumed {
            break;
        }
        consumed = whole.end;

        let value: f64 = caps[1].parse().map_err(|_| {
            ProviderError::config_error(format!("Invalid duration: '{}'", input))
        })?;
        let unit_nanos = match &caps[2] {
            "ns" => 1.0,
            "us" | "µs" => 1_000.0,
            "ms" => 1_000_000.0,
            "s" => 1_000_000_000.0,
            "m" => 60.0 * 1_000_000_000.0,
            _ => 3_600.0 * 1_000_000_000.0,
        };
        total_nanos += value * unit_nanos;
    }

    if consumed != body.len() {
        return Err(ProviderError::config_error(format!(
            "Invalid duration: '{}' (expected e.g. \"30s\", \"5m\", \"1h30m\")",
            input
        )));
    }

    let duration = Duration::from_nanos(total_nanos.round() as u64);
    Ok((negative && !duration.is_zero(), duration))
}

/// Parse a non-negative duration such as a poll interval.
pub fn parse_duration(input: &str) -> Result<Duration> {
    match parse_signed_duration(input)? {
        (true, _) => Err(ProviderError::config_error(format!(
            "Duration must not be negative: '{}'",
            input
        ))),
        (false, d) => Ok(d),
    }
}

/// Parse a poll interval, which must be strictly positive.
pub fn parse_poll_interval(input: &str) -> Result<Duration> {
    let interval = parse_duration(input)?;
    if interval.is_zero() {
        return Err(ProviderError::config_error("poll_interval must be > 0"));
    }
    Ok(interval)
}

/// Parse a wait timeout. A negative timeout means "wait up to one week".
pub fn parse_timeout(input: &str) -> Result<Duration> {
    let (negative, d) = parse_signed_duration(input)?;
    if negative {
        Ok(Duration::from_secs(NEGATIVE_TIMEOUT_CAP_SECS))
    } else {
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_poll_interval_must_be_positive() {
        assert_eq!(parse_poll_interval("2s").unwrap(), Duration::from_secs(2));
        for input in ["0", "0s", "0ms"] {
            let err = parse_poll_interval(input).unwrap_err();
            assert!(err.to_string().contains("poll_interval must be > 0"));
        }
        assert!(parse_poll_interval("-1s").is_err());
    }

    #[test]
    fn test_parse_compound_and_fractional() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(
            parse_duration("1m0.5s").unwrap(),
            Duration::from_millis(60_500)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("ten seconds").is_err());
        assert!(parse_duration("5s junk").is_err());
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn test_negative_timeout_means_one_week() {
        assert_eq!(
            parse_timeout("-1s").unwrap(),
            Duration::from_secs(7 * 24 * 3600)
        );
        assert_eq!(parse_timeout("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_timeout("-0s").unwrap(), Duration::ZERO);
    }
}
