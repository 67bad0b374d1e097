// src/lib.rs - Library root for reflect-agent

pub mod cli;
pub mod core;
pub mod infra;
