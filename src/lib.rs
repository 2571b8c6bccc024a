pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod interactive;
pub mod render;
pub mod scanner;
