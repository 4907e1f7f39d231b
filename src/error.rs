use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
#[non_exhaustive]
pub enum AddChildError {
    TooManyNodes,
}

impl Display for AddChildError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::TooManyNodes => write!(fmt, "Attempted to add too many nodes"),
        }
    }
}

pub type AddChildResult = Result<(), AddChildError>;

impl std::error::Error for AddChildError {}

#[derive(Debug)]
pub enum ConfigError {
    Yaml(serde_yaml::Error),
}

impl Display for ConfigError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Yaml(e) => {
                write!(fmt, "Invalid engine config: ")?;
                e.fmt(fmt)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseComparatorError {
    /// The text is not of the form `key op literal`.
    Syntax(String),
    /// The literal could not be parsed into the comparator's value type.
    Literal { literal: String, ty: &'static str },
}

impl Display for ParseComparatorError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Syntax(src) => write!(fmt, "Malformed comparison expression {:?}", src),
            Self::Literal { literal, ty } => {
                write!(fmt, "Literal {:?} cannot be parsed as {}", literal, ty)
            }
        }
    }
}

impl std::error::Error for ParseComparatorError {}
