pub mod setup;
pub mod story;
pub mod ui;
pub mod valuate;
