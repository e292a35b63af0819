//! # Callbacks
//!
//! A [`Callback`] is the invocable stored in a handler record. The bus does
//! not know its signature: typed closures are wrapped so that their
//! parameters are pulled out of the published [`Args`] when they run.
//!
//! ## Identity
//!
//! Two callbacks denote the same handler when either
//!
//! - they share the same allocation (one is a clone of the other), or
//! - they were built from the same code entry, i.e. the same closure
//!   expression or the same `fn` item.
//!
//! The second rule means two closures created by the same expression with
//! different captures are interchangeable for `unsubscribe`.

use crate::args::{Args, Value};
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

type Invoke = dyn Fn(&Args) + Send + Sync;

#[derive(Clone)]
enum Target {
    Invocable(Arc<Invoke>),
    Opaque(Value),
}

/// An invocable handler reference with runtime-checked arguments.
#[derive(Clone)]
pub struct Callback {
    target: Target,
    entry: Option<TypeId>,
    name: &'static str,
}

impl Callback {
    /// Wrap a closure that receives the raw argument list.
    ///
    /// Use this for handlers that accept any number of arguments.
    pub fn variadic<F>(f: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        Self::with_entry::<F>(Arc::new(f))
    }

    /// Build a callback from an untyped value.
    ///
    /// A value holding a `Callback` yields that callback. Anything else
    /// becomes an opaque callback which subscription rejects.
    #[must_use]
    pub fn from_any(value: Value) -> Self {
        if let Some(callback) = value.downcast_ref::<Callback>() {
            return callback.clone();
        }
        Self {
            target: Target::Opaque(value),
            entry: None,
            name: "<opaque value>",
        }
    }

    fn with_entry<F: 'static>(invoke: Arc<Invoke>) -> Self {
        Self {
            target: Target::Invocable(invoke),
            entry: Some(TypeId::of::<F>()),
            name: type_name::<F>(),
        }
    }

    /// Whether this callback can be called.
    #[must_use]
    pub fn is_invocable(&self) -> bool {
        matches!(self.target, Target::Invocable(_))
    }

    /// Type name of the wrapped closure or function, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Call the handler with `args`.
    ///
    /// # Panics
    ///
    /// Panics if the callback is opaque, or if `args` do not match the
    /// wrapped closure's parameters.
    pub fn invoke(&self, args: &Args) {
        match &self.target {
            Target::Invocable(f) => f(args),
            Target::Opaque(_) => panic!("callback {} is not invocable", self.name),
        }
    }

    /// Whether `other` denotes the same handler (see module docs).
    #[must_use]
    pub fn same_handler(&self, other: &Callback) -> bool {
        let same_value = match (&self.target, &other.target) {
            (Target::Invocable(a), Target::Invocable(b)) => Arc::ptr_eq(a, b),
            (Target::Opaque(a), Target::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_value || matches!((self.entry, other.entry), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("invocable", &self.is_invocable())
            .finish()
    }
}

/// Conversion into a [`Callback`].
///
/// Implemented for `Callback` itself and for closures and `fn` items
/// taking zero to four cloneable arguments. `Marker` only disambiguates
/// the implementations and is inferred at the call site.
///
/// Closures taking `&Args` should go through [`Callback::variadic`].
pub trait IntoCallback<Marker> {
    fn into_callback(self) -> Callback;
}

/// Marker for the identity conversion.
pub struct Prebuilt;

impl IntoCallback<Prebuilt> for Callback {
    fn into_callback(self) -> Callback {
        self
    }
}

macro_rules! impl_into_callback {
    ($count:expr; $($arg:ident => $idx:tt),*) => {
        impl<F, $($arg),*> IntoCallback<fn($($arg),*)> for F
        where
            F: Fn($($arg),*) + Send + Sync + 'static,
            $($arg: Any + Clone + Send + Sync,)*
        {
            fn into_callback(self) -> Callback {
                let f = self;
                Callback::with_entry::<F>(Arc::new(move |args: &Args| {
                    args.check_arity($count);
                    f($(args.extract::<$arg>($idx)),*)
                }))
            }
        }
    };
}

impl_into_callback!(0;);
impl_into_callback!(1; A => 0);
impl_into_callback!(2; A => 0, B => 1);
impl_into_callback!(3; A => 0, B => 1, C => 2);
impl_into_callback!(4; A => 0, B => 1, C => 2, D => 3);
