use std::env;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Settings read from the environment at start-up.
#[derive(Clone, Debug)]
pub struct Config {
    /// Port of the public API.
    pub port: u16,

    /// Port of the health check and termination endpoints.
    pub admin_port: u16,

    /// Public URL of the API, including trailing slash.
    pub base_url: String,

    /// Path segment under which calls are served.
    pub calls_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            port: parse_variable("CALLCENTER_PORT", 3000)?,
            admin_port: parse_variable("CALLCENTER_ADMIN_PORT", 3001)?,
            base_url: get_variable_or("CALLCENTER_BASE_URL", "http://localhost:3000/"),
            calls_path: path_segment("CALLCENTER_CALLS_PATH", "calls")?,
        })
    }
}

/// Returns the value of the named environment variable, or `default` if
/// it is unset or empty.
pub fn get_variable_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Parses the named environment variable, falling back to `default` if it
/// is unset or empty.
pub fn parse_variable<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name).ok().filter(|value| !value.is_empty()) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

/// Reads a single URL path segment, which may not contain `/`.
pub fn path_segment(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = get_variable_or(name, default);

    if value.contains('/') {
        return Err(ConfigError::InvalidValue { name, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn unset_variables_fall_back() {
        env::remove_var("CALLCENTER_TEST_UNSET");

        assert_eq!(get_variable_or("CALLCENTER_TEST_UNSET", "calls"), "calls");
        assert_eq!(parse_variable::<u16>("CALLCENTER_TEST_UNSET", 3000).unwrap(), 3000);
    }

    #[test]
    fn invalid_values_are_reported() {
        env::set_var("CALLCENTER_TEST_PORT", "eighty");

        match parse_variable::<u16>("CALLCENTER_TEST_PORT", 3000) {
            Err(ConfigError::InvalidValue { name, value }) => {
                assert_eq!(name, "CALLCENTER_TEST_PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }

        env::set_var("CALLCENTER_TEST_PORT", "8080");
        assert_eq!(parse_variable::<u16>("CALLCENTER_TEST_PORT", 3000).unwrap(), 8080);
    }

    #[test]
    fn path_segments_may_not_nest() {
        env::set_var("CALLCENTER_TEST_CALLS_PATH", "api/calls");

        match path_segment("CALLCENTER_TEST_CALLS_PATH", "calls") {
            Err(ConfigError::InvalidValue { name, value }) => {
                assert_eq!(name, "CALLCENTER_TEST_CALLS_PATH");
                assert_eq!(value, "api/calls");
            }
            other => panic!("expected invalid value, got {:?}", other),
        }

        env::set_var("CALLCENTER_TEST_CALLS_PATH", "records");
        assert_eq!(path_segment("CALLCENTER_TEST_CALLS_PATH", "calls").unwrap(), "records");

        env::remove_var("CALLCENTER_TEST_CALLS_PATH");
        assert_eq!(path_segment("CALLCENTER_TEST_CALLS_PATH", "calls").unwrap(), "calls");
    }
}
