// UI module - page-level wiring
//
// This module contains:
// - Page: Runs the page-load script, mounts the widgets and dispatches events to them

pub mod page;

pub use page::Page;
