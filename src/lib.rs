// Library exports for Battlesnake bot
// This allows the replay tool and integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod decision;
pub mod grid;
pub mod replay;
pub mod safety;
pub mod selector;
pub mod types;
