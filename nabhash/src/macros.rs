macro_rules! std {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "std")]
            #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
            $item
        )*
    };
}

macro_rules! alloc {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "alloc")]
            #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
            $item
        )*
    };
}

macro_rules! no_std_io {
    ($($item:item)*) => {
        $(
            #[cfg(all(feature = "embedded-io", not(feature = "std")))]
            #[cfg_attr(docsrs, doc(cfg(feature = "embedded-io")))]
            $item
        )*
    };
}

/// Emit a `tracing` event, or nothing at all when the `tracing` feature is disabled.
///
/// The arguments are not evaluated without the feature, so nothing passed here may carry side
/// effects.
macro_rules! event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($arg)+);
        }
    };
}
