//! Error types for delivery_robot

use std::fmt;

/// Main error type for the grid world and its drivers
#[derive(Debug)]
pub enum SimError {
    /// Grid size, obstacle matrix, or placement cannot form a valid world
    Configuration(String),
    /// Reset gave up without finding a start/goal pair joined by free cells
    Unreachable { attempts: usize },
    /// Invalid parameter passed at call time
    InvalidParameter(String),
    /// I/O error
    IoError(std::io::Error),
    /// Visualization error
    VisualizationError(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            SimError::Unreachable { attempts } => write!(
                f,
                "Configuration error: goal unreachable after {} reset attempts",
                attempts
            ),
            SimError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SimError::IoError(e) => write!(f, "I/O error: {}", e),
            SimError::VisualizationError(msg) => write!(f, "Visualization error: {}", msg),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::IoError(e)
    }
}

impl SimError {
    /// True for errors that can only be fixed by changing how the world is built
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimError::Configuration(_) | SimError::Unreachable { .. })
    }
}

/// Result type alias for simulation operations
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::Configuration("rows must be positive".to_string());
        assert_eq!(format!("{}", err), "Configuration error: rows must be positive");

        let err = SimError::Unreachable { attempts: 3 };
        assert_eq!(
            format!("{}", err),
            "Configuration error: goal unreachable after 3 reset attempts"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SimError = io_err.into();
        assert!(matches!(err, SimError::IoError(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(SimError::Unreachable { attempts: 1 }.is_configuration());
        assert!(SimError::Configuration(String::new()).is_configuration());
        assert!(!SimError::InvalidParameter(String::new()).is_configuration());
    }
}
