// Terminal front end for the Python Mastery tracker: the interactive
// dashboard plus one-shot subcommands over the same state file.

pub mod clipboard;
pub mod commands;
pub mod components;
pub mod config;
pub mod keymap;
pub mod screens;
pub mod ui;
