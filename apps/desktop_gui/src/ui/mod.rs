//! UI layer for the desktop GUI: app shell, page sections, and theming.

pub mod app;

pub use app::DataBoardApp;
