pub mod bootstrap;
pub mod clipboard;
pub mod config;
pub mod derive;
pub mod dom;
pub mod events;
pub mod form;
pub mod widget;

pub use bootstrap::{mount, mount_with};
pub use widget::BranchNameWidget;
