use std::{
    fmt,
    fmt::{Debug, Display, Formatter},
};

/// A constant stored in a chunk's pool. Only numbers for now.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Value(pub f64);

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value(x)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
