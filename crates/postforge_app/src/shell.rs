use chrono::Utc;
use postforge_core::{update, AppState, AppViewModel, Msg};

use crate::effects::EffectRunner;

/// Composition root: owns the flow state the presentation layer reads and
/// the runner that executes its effects.
pub struct AppShell {
    state: AppState,
    runner: EffectRunner,
}

impl AppShell {
    pub fn new(runner: EffectRunner) -> Self {
        let mut shell = Self {
            state: AppState::new(),
            runner,
        };
        // Seed the toast clock so notifications emitted before the first
        // UI loop iteration age correctly.
        shell.dispatch(Msg::Tick { now_ms: now_ms() });
        shell
    }

    /// Applies one message and runs any resulting effects.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Applies pending engine events and advances the toast clock. Call
    /// once per UI loop iteration.
    pub fn pump(&mut self) {
        for msg in self.runner.pump() {
            self.dispatch(msg);
        }
        self.dispatch(Msg::Tick { now_ms: now_ms() });
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
