pub mod app;
mod board;
mod dialogs;
mod hud;
mod menu;
mod scene;
mod sound;
mod state;
