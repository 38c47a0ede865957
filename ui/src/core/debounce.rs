//! Debounce bookkeeping for bursty inputs.
//!
//! A `Gate` hands out generation tokens: every new input arms the gate and
//! invalidates all earlier tokens. A sleeper that wakes up with a stale
//! token simply drops its work, so only the final input of a burst runs.

/// Default settle time for typed search input.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token(u64);

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the gate for a new input, superseding any pending token.
    pub fn arm(&mut self) -> Token {
        self.generation += 1;
        Token(self.generation)
    }

    /// Whether `token` is still the most recent arm.
    pub fn is_current(&self, token: Token) -> bool {
        self.generation == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_arm_supersedes_pending_token() {
        let mut gate = Gate::new();
        let first = gate.arm();
        let second = gate.arm();

        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn only_the_final_input_of_a_burst_fires() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::{Arc, Mutex};

        let gate = Arc::new(Mutex::new(Gate::new()));
        let fired = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let token = gate.lock().unwrap().arm();
            let gate = gate.clone();
            let fired = fired.clone();
            handles.push(tokio::spawn(async move {
                crate::core::timing::sleep_ms(20).await;
                if gate.lock().unwrap().is_current(token) {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
