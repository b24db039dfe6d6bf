//! Shorthand for building and returning errors

/// Build an [`Error`](crate::Error) of one [`ErrorKind`](crate::ErrorKind)
///
/// Anything after the kind is passed to `format!` and becomes the context.
#[macro_export]
macro_rules! err {
    ($kind:ident) => {
        $crate::Error::new($crate::ErrorKind::$kind)
    };
    ($kind:ident, $($context:tt)+) => {
        $crate::Error::new($crate::ErrorKind::$kind).context(format!($($context)+))
    };
}

/// Return early with an error built by [`err!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)+) => {
        return Err($crate::err!($($arg)+).into())
    };
}

/// Return early with an error built by [`err!`] unless the condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::bail!($($arg)+);
        }
    };
}
