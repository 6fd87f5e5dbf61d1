// UI reader component - word rendering with ratatui
pub mod view;
