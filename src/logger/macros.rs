//! Formatting shorthands for the `*f` logging methods.
//!
//! ```ignore
//! infof!(logger, &ctx, "created order {}", order_id);
//! ```

/// `logger.debugf(ctx, format_args!(...))`
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.debugf($ctx, format_args!($($arg)+))
    };
}

/// `logger.infof(ctx, format_args!(...))`
#[macro_export]
macro_rules! infof {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.infof($ctx, format_args!($($arg)+))
    };
}

/// `logger.warnf(ctx, format_args!(...))`
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.warnf($ctx, format_args!($($arg)+))
    };
}

/// `logger.errorf(ctx, format_args!(...))`
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.errorf($ctx, format_args!($($arg)+))
    };
}

/// `logger.fatalf(ctx, format_args!(...))`
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.fatalf($ctx, format_args!($($arg)+))
    };
}
