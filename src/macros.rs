macro_rules! all_the_tuples {
    ($name:ident) => {
        $name!([]);
        $name!([T1]);
        $name!([T1, T2]);
        $name!([T1, T2, T3]);
        $name!([T1, T2, T3, T4]);
        $name!([T1, T2, T3, T4, T5]);
        $name!([T1, T2, T3, T4, T5, T6]);
        $name!([T1, T2, T3, T4, T5, T6, T7]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12]);
    };
}

/// Sends a message to the graph logger if one is configured.
macro_rules! narrate {
    ($logger:expr, $($arg:tt)+) => {
        if let Some(logger) = $logger.as_deref() {
            $crate::logger::Logger::info(logger, format_args!($($arg)+));
        }
    };
}

/// Calls [`Logger::info`](crate::Logger::info) with `format!`-style arguments.
///
/// ```rust
/// use wiregraph::{logger_info, TracingLogger};
///
/// logger_info!(TracingLogger, "provided {} objects", 3);
/// ```
#[macro_export]
macro_rules! logger_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::info(&$logger, format_args!($($arg)+))
    };
}
