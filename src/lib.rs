//! Terminal speed reader: shows a text one word at a time at a fixed
//! position, paced by word length and punctuation.

pub mod app;
pub mod engine;
pub mod input;
pub mod storage;
pub mod ui;
