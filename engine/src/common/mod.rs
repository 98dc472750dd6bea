pub mod errors;

pub use errors::{ColorError, PaletteValidationError, ProviderError, ThemeError};
