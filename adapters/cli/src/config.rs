//! Loading and validation of the optional TOML tuning file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use metro_dash_core::{GameTuning, TuningRange};
use thiserror::Error;

/// Errors raised while loading a tuning file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read tuning file {path}")]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or does not match the tuning schema.
    #[error("failed to parse tuning file")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but cannot drive a session.
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the rejected value.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Loads tuning from `path`, or returns the defaults when no path is given.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<GameTuning, ConfigError> {
    let Some(path) = path else {
        return Ok(GameTuning::default());
    };
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tuning(&text)
}

/// Parses and validates tuning from TOML text.
pub(crate) fn parse_tuning(text: &str) -> Result<GameTuning, ConfigError> {
    let tuning: GameTuning = toml::from_str(text)?;
    validate(&tuning)?;
    Ok(tuning)
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite non-negative number"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite positive number"))
    }
}

fn ordered<T: PartialOrd>(field: &'static str, range: TuningRange<T>) -> Result<(), ConfigError> {
    if range.min <= range.max {
        Ok(())
    } else {
        Err(invalid(field, "min must not exceed max"))
    }
}

fn non_negative_range(field: &'static str, range: TuningRange<f32>) -> Result<(), ConfigError> {
    non_negative(field, range.min)?;
    non_negative(field, range.max)?;
    ordered(field, range)
}

fn validate(tuning: &GameTuning) -> Result<(), ConfigError> {
    let city = &tuning.city;
    if city.target_index >= city.building_count {
        return Err(invalid(
            "city.target_index",
            "must be smaller than city.building_count",
        ));
    }
    non_negative_range("city.building_width", city.building_width)?;
    non_negative_range("city.building_height", city.building_height)?;
    ordered("city.building_channel", city.building_channel)?;
    non_negative("city.road_thickness", city.road_thickness)?;

    let population = &tuning.population;
    non_negative("population.radius", population.radius)?;
    non_negative_range("population.speed", population.speed)?;
    ordered("population.turn_interval", population.turn_interval)?;

    let player = &tuning.player;
    non_negative("player.radius", player.radius)?;
    non_negative("player.walk_speed", player.walk_speed)?;
    non_negative("player.run_speed", player.run_speed)?;
    non_negative("player.max_vehicle_speed", player.max_vehicle_speed)?;
    positive("player.throttle_step", player.throttle_step)?;

    let contact = &tuning.contact;
    non_negative("contact.damage_per_npc", contact.damage_per_npc)?;
    non_negative("contact.capture_radius", contact.capture_radius)?;
    non_negative("contact.mission_bonus", contact.mission_bonus)?;

    let joystick = &tuning.joystick;
    non_negative("joystick.deadzone", joystick.deadzone)?;
    positive("joystick.travel", joystick.travel)?;
    if joystick.deadzone >= joystick.travel {
        return Err(invalid(
            "joystick.deadzone",
            "must be smaller than joystick.travel",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(text: &str) -> &'static str {
        match parse_tuning(text) {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_path_yields_defaults() {
        let tuning = load_tuning(None).expect("defaults are valid");
        assert_eq!(tuning, GameTuning::default());
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(
            parse_tuning("").expect("empty file"),
            GameTuning::default()
        );
    }

    #[test]
    fn partial_file_overrides_named_values() {
        let tuning = parse_tuning(
            r#"
            [population]
            count = 3

            [player]
            run_speed = 6.5
            "#,
        )
        .expect("valid overrides");

        assert_eq!(tuning.population.count, 3);
        assert_eq!(tuning.player.run_speed, 6.5);
        assert_eq!(tuning.player.walk_speed, 3.0);
        assert_eq!(tuning.city.building_count, 20);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let field = rejected_field(
            r#"
            [city]
            building_width = { min = 150.0, max = 50.0 }
            "#,
        );
        assert_eq!(field, "city.building_width");
    }

    #[test]
    fn target_outside_building_count_is_rejected() {
        let field = rejected_field(
            r#"
            [city]
            building_count = 5
            "#,
        );
        assert_eq!(field, "city.target_index");
    }

    #[test]
    fn negative_speed_is_rejected() {
        let field = rejected_field(
            r#"
            [player]
            walk_speed = -1.0
            "#,
        );
        assert_eq!(field, "player.walk_speed");
    }

    #[test]
    fn deadzone_must_fit_inside_travel() {
        let field = rejected_field(
            r#"
            [joystick]
            deadzone = 60.0
            "#,
        );
        assert_eq!(field, "joystick.deadzone");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            parse_tuning("[city\nbuilding_count = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unreadable_file_reports_path() {
        let path = Path::new("/nonexistent/metro-dash/tuning.toml");
        match load_tuning(Some(path)) {
            Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a read error, got {other:?}"),
        }
    }
}
