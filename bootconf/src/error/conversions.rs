//! Conversions from external error types into `BootError`.

use figment::Error as FigmentError;

use super::BootError;

impl From<FigmentError> for BootError {
    fn from(e: FigmentError) -> Self {
        Self::Settings(Box::new(e))
    }
}
