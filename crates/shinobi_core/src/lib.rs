pub mod core_api;
pub mod grid;
pub mod layout;
pub mod locator;
pub mod memo;
pub mod personality;
pub mod raw;
pub mod recover;
pub mod source;
pub mod style;
pub mod table;
pub mod text;
