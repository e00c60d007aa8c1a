pub mod args;
pub mod command;
pub mod controller;
pub mod domain;
pub mod library;
