//! Database rows and their conversions into the shared `store` models.

#[cfg(feature = "server")]
mod catalog;
#[cfg(feature = "server")]
mod member;

#[cfg(feature = "server")]
pub use catalog::{BookRow, ProfessorRow};
#[cfg(feature = "server")]
pub use member::MemberRow;
