#![forbid(unsafe_code)]

pub mod args;
pub mod commands;
pub mod display;
pub mod menu;
