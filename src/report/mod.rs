//! Rendering and export of computed summaries.

pub mod csv;
pub mod dashboard;
pub mod json;
pub mod theme;

pub use theme::Theme;
