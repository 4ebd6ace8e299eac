//! UI layer for the desktop converter: app shell and field widgets.

pub mod app;

pub use app::ConverterApp;
