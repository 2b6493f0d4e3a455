//! Interactive widgets drawn on top of a [`Surface`](crate::surface::Surface).
//!
//! - [`menu`]: the picker shown when a completion is ambiguous

pub mod menu;

pub use menu::{Choice, Menu, NumberedMenu};
