/// User intents, decoupled from the key bindings that produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    /// Confirm the highlighted item, or start the download when everything is chosen.
    Confirm,
    StartFilter,
    FilterInput(char),
    FilterBackspace,
    /// Leave filter mode keeping the current filter.
    FilterConfirm,
    /// Leave filter mode and clear the filter.
    FilterCancel,
    Resize(u16, u16),
    Tick,
    None,
}
