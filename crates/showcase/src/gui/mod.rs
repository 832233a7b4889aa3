pub mod app;
pub mod clipboard;
pub mod deck;
pub mod theme;
pub mod window;
