use serde::Serialize;

/// Application phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Uninitialized,
    Running,
    Terminated,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("cannot start from phase {0:?}")]
    CannotStart(Phase),
}

/// Resources released when the loop ends, in the order they are called.
pub trait Teardown {
    fn release_shader(&mut self);
    fn shutdown_gui(&mut self);
    fn terminate_context(&mut self);
}

/// Tracks `Uninitialized -> Running -> Terminated` and guarantees teardown
/// runs once.
#[derive(Debug, Default)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Mark initialization complete.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Uninitialized => {
                self.phase = Phase::Running;
                tracing::debug!("lifecycle: running");
                Ok(())
            }
            other => Err(LifecycleError::CannotStart(other)),
        }
    }

    /// Run teardown if it has not run yet. Returns whether it ran.
    ///
    /// Shutting down from `Uninitialized` is allowed so a failed startup can
    /// still release whatever it created.
    pub fn shutdown(&mut self, resources: &mut impl Teardown) -> bool {
        if self.phase == Phase::Terminated {
            return false;
        }
        resources.release_shader();
        resources.shutdown_gui();
        resources.terminate_context();
        self.phase = Phase::Terminated;
        tracing::debug!("lifecycle: terminated");
        true
    }
}
