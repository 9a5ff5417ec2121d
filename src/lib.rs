pub mod collision;
pub mod config;
pub mod game;
pub mod input;
pub mod piece;
pub mod playfield;
