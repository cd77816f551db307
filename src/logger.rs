use core::fmt::Arguments;

use crate::utils::thread_safety::{SendSafety, SyncSafety};

/// Sink for messages the graph writes while objects are provided.
///
/// It's optional and only used for observability: a graph without a logger
/// accepts and rejects exactly the same objects.
///
/// Any `Fn(Arguments<'_>)` closure is a logger, and [`TracingLogger`] forwards to [`tracing`].
/// Use [`crate::logger_info!`] to call it with `format!`-style arguments.
pub trait Logger: SendSafety + SyncSafety + 'static {
    fn info(&self, args: Arguments<'_>);
}

impl<F> Logger for F
where
    F: Fn(Arguments<'_>) + SendSafety + SyncSafety + 'static,
{
    #[inline]
    fn info(&self, args: Arguments<'_>) {
        self(args);
    }
}

/// Logger that emits every message as a `tracing` info event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    #[inline]
    fn info(&self, args: Arguments<'_>) {
        tracing::info!("{}", args);
    }
}
