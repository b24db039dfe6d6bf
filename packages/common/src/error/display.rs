//! Formatting of errors and their cause chains

use super::types::Error;
use std::fmt;

/// Iterator over the causes of an [`Error`], nearest first
pub struct Chain<'a> {
    next: Option<&'a (dyn std::error::Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn std::error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl Error {
    /// Walk the causes of this error
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: std::error::Error::source(self),
        }
    }
}

impl Error {
    fn write_head(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.context {
            Some(context) => write!(f, "{}: {context}", self.inner.kind),
            None => write!(f, "{}", self.inner.kind),
        }
    }
}

/// `{}` shows the nearest cause, which shows its own; `{:#}` lists every
/// cause once, one per line.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_head(f)?;

        if !f.alternate() {
            if let Some(cause) = self.chain().next() {
                write!(f, "\nCaused by: {cause}")?;
            }
            return Ok(());
        }
        for cause in self.chain() {
            f.write_str("\nCaused by: ")?;
            match cause.downcast_ref::<Error>() {
                Some(err) => err.write_head(f)?,
                None => write!(f, "{cause}")?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let source = self.inner.source.as_deref()?;
        Some(source)
    }
}
