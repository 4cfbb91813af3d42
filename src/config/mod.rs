//! Scan configuration
//!
//! Feature flags are fixed before the first token is fed. Every flag is off
//! by default, which gives plain C expression recognition.

use std::fmt;
use std::str::FromStr;

use crate::errors::OptionsError;

/// Feature flags for one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanOptions {
    /// Decide whether `<` opens a template argument list
    pub templates: bool,
    /// Decide whether `[` opens a lambda introducer
    pub lambdas: bool,
    /// Merge a literal with an adjacent identifier suffix (`12_km`)
    pub user_defined_literals: bool,
    /// Recognize brace initialization (`T{...}`)
    pub uniform_initialization: bool,
}

/// Language dialect presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    C,
    Cpp98,
    Cpp11,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp98 => "c++98",
            Self::Cpp11 => "c++11",
        }
    }
}

impl FromStr for Dialect {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "c99" | "c11" => Ok(Self::C),
            "c++" | "c++98" | "c++03" | "cpp98" => Ok(Self::Cpp98),
            "c++11" | "c++14" | "c++17" | "c++20" | "cpp11" => Ok(Self::Cpp11),
            other => Err(OptionsError::UnknownDialect(other.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScanOptions {
    /// All features enabled
    pub fn all() -> Self {
        Self {
            templates: true,
            lambdas: true,
            user_defined_literals: true,
            uniform_initialization: true,
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::C => Self::default(),
            Dialect::Cpp98 => Self {
                templates: true,
                ..Self::default()
            },
            Dialect::Cpp11 => Self::all(),
        }
    }

    pub fn with_templates(mut self, on: bool) -> Self {
        self.templates = on;
        self
    }

    pub fn with_lambdas(mut self, on: bool) -> Self {
        self.lambdas = on;
        self
    }

    pub fn with_user_defined_literals(mut self, on: bool) -> Self {
        self.user_defined_literals = on;
        self
    }

    pub fn with_uniform_initialization(mut self, on: bool) -> Self {
        self.uniform_initialization = on;
        self
    }

    fn enable(&mut self, feature: &str) -> Result<(), OptionsError> {
        match feature {
            "templates" => self.templates = true,
            "lambdas" => self.lambdas = true,
            "user-defined-literals" | "user_defined_literals" | "udl" => {
                self.user_defined_literals = true
            }
            "uniform-initialization" | "uniform_initialization" => {
                self.uniform_initialization = true
            }
            "all" => *self = Self::all(),
            other => return Err(OptionsError::UnknownFeature(other.to_string())),
        }
        Ok(())
    }
}

impl From<Dialect> for ScanOptions {
    fn from(dialect: Dialect) -> Self {
        Self::for_dialect(dialect)
    }
}

/// Parse a comma-separated feature list, e.g. `"templates, lambdas"`.
///
/// An empty string yields the default (all off).
impl FromStr for ScanOptions {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Self::default();
        for feature in s.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            options.enable(&feature.to_ascii_lowercase())?;
        }
        Ok(options)
    }
}

impl fmt::Display for ScanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let features = [
            (self.templates, "templates"),
            (self.lambdas, "lambdas"),
            (self.user_defined_literals, "user-defined-literals"),
            (self.uniform_initialization, "uniform-initialization"),
        ];
        let enabled: Vec<&str> = features
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&enabled.join(","))
    }
}
