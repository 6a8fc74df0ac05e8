use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PERSON_COUNT: u32 = 4;
pub const DEFAULT_COEFFICIENT: f64 = 0.15;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub person_count: u32,
    pub default_coefficient: f64,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            person_count: DEFAULT_PERSON_COUNT,
            default_coefficient: DEFAULT_COEFFICIENT,
            theme: Theme::default(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" | "l" => Ok(Theme::Light),
            "dark" | "d" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme: '{}'", s)),
        }
    }
}
