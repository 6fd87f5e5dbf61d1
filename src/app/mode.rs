#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Command deck has focus.
    Command,
    /// A background load is running.
    Loading,
    /// A document is on screen, playing or paused.
    Reading,
    Quit,
}
