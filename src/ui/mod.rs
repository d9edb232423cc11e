mod app;
pub mod keybindings;
pub mod terminal_guard;
mod views;

pub use app::App;
