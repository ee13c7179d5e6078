//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. Every flag is additionally gated by
//! `cfg(debug_assertions)` at the call site, so release builds stay quiet.

pub struct DebugFlags {
    /// Emit UI interaction logs (category switches, date picks, searches).
    pub print_ui_interactions: bool,
    /// Emit request/response summaries for every analytics fetch.
    pub print_fetch_events: bool,
    /// Emit a line whenever a late response is discarded.
    pub print_stale_responses: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_fetch_events: false,
    print_stale_responses: true,
    print_state_serde: false,
    print_shutdown: false,
};
