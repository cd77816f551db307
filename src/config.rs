use alloc::boxed::Box;
use core::fmt::{self, Debug, Formatter};

use crate::logger::Logger;

/// Config for a [`crate::Graph`]
/// ## Fields
/// - `logger`:
///   If set, the graph narrates which objects it accepts and why it rejects others.
///
///   Without a logger the graph still emits `tracing` events,
///   the outcome of providing objects is the same either way.
#[derive(Default)]
pub struct GraphConfig {
    pub logger: Option<Box<dyn Logger>>,
}

impl GraphConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_logger(mut self, logger: impl Logger) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }
}

impl Debug for GraphConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfig")
            .field("logger", &self.logger.as_ref().map(|_| "dyn Logger"))
            .finish()
    }
}
