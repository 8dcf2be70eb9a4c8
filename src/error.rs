use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Timer step interval must be non-zero.
    InvalidTimer,

    /// A slideshow needs at least one step.
    EmptySlideshow,

    /// A step in the definition is unusable.
    InvalidStep { index: usize, reason: String },

    /// The definition file could not be parsed.
    Definition(String),

    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTimer => write!(f, "timer step interval must be greater than zero"),
            Error::EmptySlideshow => write!(f, "slideshow has no steps"),
            Error::InvalidStep { index, reason } => write!(f, "step {}: {}", index, reason),
            Error::Definition(msg) => write!(f, "invalid slideshow definition: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Definition(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_step() {
        let err = Error::InvalidStep { index: 2, reason: "duration is zero".into() };
        assert_eq!(err.to_string(), "step 2: duration is zero");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(Error::from(io), Error::Io(msg) if msg.contains("missing")));
    }
}
