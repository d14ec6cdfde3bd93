pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod web;
