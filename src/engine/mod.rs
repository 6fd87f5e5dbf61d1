pub mod config;
pub mod ovp;
pub mod playback;
pub mod timing;
pub mod token;
pub mod tokenizer;

pub use config::SessionSettings;
pub use ovp::{format_word, FixationSplit};
pub use playback::{PlaybackEngine, PlaybackObserver, PlaybackState, ScheduledAdvance};
pub use timing::delay_for;
pub use token::Token;
pub use tokenizer::tokenize_text;
