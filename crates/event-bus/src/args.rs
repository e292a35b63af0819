//! # Published Arguments
//!
//! Positional, dynamically typed arguments carried from `publish` to every
//! handler of a topic.
//!
//! The bus never inspects argument types. Typed callbacks pull their
//! parameters out with [`Args::extract`], which panics on a count or type
//! mismatch: the fault surfaces when the callback is invoked, not when the
//! event is published.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A single published argument.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Positional argument list shared by every handler of one publish call.
///
/// Cloning is cheap (one reference-count increment), so asynchronous
/// dispatches each get their own handle to the same values.
#[derive(Clone)]
pub struct Args {
    values: Arc<[Value]>,
}

impl Args {
    /// Build an argument list from already-erased values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Borrow the argument at `index` as `T`.
    ///
    /// Returns `None` if the position is empty or holds another type.
    #[must_use]
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Clone the argument at `index` out as `T`.
    ///
    /// # Panics
    ///
    /// Panics if there is no argument at `index` or if it is not a `T`.
    /// This is the call-time fault typed callbacks raise on a mismatch.
    #[must_use]
    pub fn extract<T: Any + Clone>(&self, index: usize) -> T {
        let Some(value) = self.values.get(index) else {
            panic!(
                "missing argument {index}: callback expects `{}` but only {} argument(s) were published",
                type_name::<T>(),
                self.len()
            );
        };
        match value.downcast_ref::<T>() {
            Some(arg) => arg.clone(),
            None => panic!(
                "argument {index} has the wrong type: callback expects `{}`",
                type_name::<T>()
            ),
        }
    }

    /// Panic unless exactly `expected` arguments were published.
    pub(crate) fn check_arity(&self, expected: usize) {
        if self.len() != expected {
            panic!(
                "callback takes {expected} argument(s) but {} were published",
                self.len()
            );
        }
    }

    /// Iterate over the raw values in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

/// Conversion into a positional argument list.
///
/// Implemented for `()`, tuples of up to five values, `Vec<Value>` and
/// [`Args`] itself. A single argument is published as a one-tuple:
/// `bus.publish("topic", (42u32,))`.
pub trait IntoArgs {
    fn into_args(self) -> Args;
}

impl IntoArgs for Args {
    fn into_args(self) -> Args {
        self
    }
}

impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Args {
        Args::new(self)
    }
}

impl IntoArgs for () {
    fn into_args(self) -> Args {
        Args::default()
    }
}

macro_rules! impl_into_args_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> IntoArgs for ($($name,)+)
        where
            $($name: Any + Send + Sync),+
        {
            #[allow(non_snake_case)]
            fn into_args(self) -> Args {
                let ($($name,)+) = self;
                Args::new(vec![$(Arc::new($name) as Value),+])
            }
        }
    };
}

impl_into_args_tuple!(A);
impl_into_args_tuple!(A, B);
impl_into_args_tuple!(A, B, C);
impl_into_args_tuple!(A, B, C, D);
impl_into_args_tuple!(A, B, C, D, E);
