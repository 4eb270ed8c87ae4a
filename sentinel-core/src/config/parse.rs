//! Minimal TOML parser for the alarm configuration
//!
//! Handles only the subset `alarm.toml` uses. It does NOT support the
//! full TOML spec.
//!
//! Supported features:
//! - `[alarm]` and `[timing]` section headers
//! - Key = value pairs (string, integer)
//! - Comments (# ...), including trailing comments
//!
//! Unknown keys are ignored so newer files still load on older firmware.

use heapless::String;

use super::types::{AlarmConfig, BootPolicy, ConfigError, MAX_PIN_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// PIN longer than [`MAX_PIN_LEN`]
    PinTooLong,
    /// Parsed values violate a configuration invariant
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Config(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Alarm,
    Timing,
}

/// Parse TOML configuration into a validated [`AlarmConfig`]
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<AlarmConfig, ParseError> {
    let mut config = AlarmConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(&mut config, section, key, value)?;
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "alarm" => Ok(Section::Alarm),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    config: &mut AlarmConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Alarm => match key {
            "pin" => config.pin = parse_pin(value)?,
            "grace_seconds" => config.grace_seconds = parse_int(value)?,
            "rearm_seconds" => config.rearm_seconds = parse_int(value)?,
            "boot" => config.boot = parse_boot_policy(value)?,
            _ => {}
        },
        Section::Timing => {
            let timings = &mut config.timings;
            match key {
                "motion_notice_ms" => timings.motion_notice_ms = parse_int(value)?,
                "alarm_notice_ms" => timings.alarm_notice_ms = parse_int(value)?,
                "pin_accepted_ms" => timings.pin_accepted_ms = parse_int(value)?,
                "disarmed_notice_ms" => timings.disarmed_notice_ms = parse_int(value)?,
                "rearm_settle_ms" => timings.rearm_settle_ms = parse_int(value)?,
                "shutdown_notice_ms" => timings.shutdown_notice_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Root => {}
    }
    Ok(())
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments; a # inside a string does not start one
    let comment = value
        .match_indices('#')
        .find(|(pos, _)| value[..*pos].matches('"').count() % 2 == 0);
    let value = match comment {
        Some((hash_pos, _)) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// PIN must be quoted so leading zeros survive
fn parse_pin(value: &str) -> Result<String<MAX_PIN_LEN>, ParseError> {
    if !value.starts_with('"') {
        return Err(ParseError::InvalidValue);
    }
    let mut pin = String::new();
    pin.push_str(parse_string(value))
        .map_err(|_| ParseError::PinTooLong)?;
    Ok(pin)
}

fn parse_boot_policy(value: &str) -> Result<BootPolicy, ParseError> {
    match parse_string(value) {
        "armed" => Ok(BootPolicy::Armed),
        "rearm" => Ok(BootPolicy::Rearm),
        _ => Err(ParseError::InvalidValue),
    }
}
