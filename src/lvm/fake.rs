//! Scripted command runner for exercising reconcilers without real LVM
//! tools.
//!
//! Outcomes are scripted per program name: a queue of one-shot responses
//! consumed in order, then a sticky default, then plain success with empty
//! output. Every invocation is recorded so tests can assert exact argument
//! vectors and call counts.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CommandError;

use super::runner::CommandRunner;

/// Canned outcome for a scripted command.
#[derive(Debug, Clone)]
pub(crate) enum FakeOutcome {
    /// Command succeeds with the given combined output.
    Ok(String),
    /// Command exits non-zero with the given combined output.
    Fail(String),
}

impl FakeOutcome {
    fn into_result(self, program: &str) -> Result<String, CommandError> {
        match self {
            Self::Ok(output) => Ok(output),
            Self::Fail(output) => Err(CommandError::Failed {
                program: program.to_string(),
                code: Some(5),
                output,
            }),
        }
    }
}

/// Scripted, call-recording command runner.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    queues: Mutex<HashMap<String, VecDeque<FakeOutcome>>>,
    defaults: Mutex<HashMap<String, FakeOutcome>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a one-shot outcome for the next invocation of `program`.
    pub(crate) fn enqueue(&self, program: &str, outcome: FakeOutcome) {
        self.queues
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// Sets the sticky outcome used when `program`'s queue is empty.
    pub(crate) fn set_default(&self, program: &str, outcome: FakeOutcome) {
        self.defaults
            .lock()
            .unwrap()
            .insert(program.to_string(), outcome);
    }

    /// Every recorded invocation, in order.
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded invocations of `program`.
    pub(crate) fn calls_to(&self, program: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.first().is_some_and(|p| p == program))
            .count()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, argv: &[String]) -> Result<String, CommandError> {
        let Some(program) = argv.first().cloned() else {
            return Err(CommandError::EmptyCommand);
        };

        self.calls.lock().unwrap().push(argv.to_vec());

        let queued = self
            .queues
            .lock()
            .unwrap()
            .get_mut(&program)
            .and_then(VecDeque::pop_front);

        queued
            .or_else(|| self.defaults.lock().unwrap().get(&program).cloned())
            .unwrap_or_else(|| FakeOutcome::Ok(String::new()))
            .into_result(&program)
    }
}
