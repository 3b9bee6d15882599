//! UI Modules
//!
//! Each module implements the Module trait and handles its own:
//! - Key input processing
//! - State that outlives a single frame
//!
//! Modules:
//! - sidebar: navigation menu with persisted collapse state

pub mod sidebar;

pub use sidebar::{Sidebar, SidebarState};
