//! Backend for the Halloween party games: picks a game mode, draws words,
//! runs the round countdown and keeps team scores across restarts.

pub mod config;
pub mod dao;
mod dto;
mod error;
pub mod routes;
pub mod services;
pub mod state;
