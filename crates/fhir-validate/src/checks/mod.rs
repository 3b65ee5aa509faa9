//! Built-in resource checks.

pub mod dates;
pub mod references;
pub mod required;

pub use dates::DateTimeValidator;
pub use references::ReferenceValidator;
pub use required::RequiredFieldsValidator;
