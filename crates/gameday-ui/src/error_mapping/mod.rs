//! Maps crate errors to gameday_core::AppError and AppError to the error
//! panel shown in the weather area.

mod catalog;
mod panel;
mod weather;

use gameday_core::AppError;

/// Conversion into the application error hierarchy for errors owned by
/// other workspace crates.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
