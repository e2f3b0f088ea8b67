use std::convert::Infallible;

use sarge::ArgumentType;

use crate::cli::{InputArgs, OutputArgs};

impl ArgumentType for InputArgs {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        fn normalize(token: &str) -> String {
            if token.eq_ignore_ascii_case("stdin") {
                return "-".to_string();
            }
            token.to_string()
        }

        let mut inputs = Vec::new();
        match val {
            None => inputs.push("-".to_string()),
            Some(v) => {
                for token in v.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    inputs.push(normalize(token));
                }
            }
        }

        Some(Ok(InputArgs(inputs)))
    }

    fn default_value() -> Option<Self> {
        Some(InputArgs::default())
    }
}

impl ArgumentType for OutputArgs {
    type Error = Infallible;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        let token = match val.map(str::trim) {
            None | Some("") => "-".to_string(),
            // Preserve explicit prefixes so callers can disambiguate.
            Some(v) if v.starts_with('@') => v.to_string(),
            Some(v) if v == "-" || v.eq_ignore_ascii_case("stdout") => "-".to_string(),
            Some(v) if v.eq_ignore_ascii_case("stderr") => "stderr".to_string(),
            Some(v) => v.to_string(),
        };

        Some(Ok(OutputArgs(token)))
    }

    fn default_value() -> Option<Self> {
        Some(OutputArgs::default())
    }
}
