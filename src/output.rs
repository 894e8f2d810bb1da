//! Final rendering of a pipeline result and the sinks that receive it.
//!
//! An [`Encoder`] turns a value into bytes (bencode, validated torrent,
//! human-readable text or hex). An [`Output`] is anything that accepts the
//! `(context, value)` pair at the end of a pipeline; [`EncodeOutput`] pairs an
//! encoder with a writer, [`CollectOutput`] keeps results in memory.
//!
//! ```
//! use rbedit::bencode::Value;
//! use rbedit::context::InvocationContext;
//! use rbedit::output::{EncodeOutput, Encoder, Output};
//!
//! let mut out = EncodeOutput::new(Encoder::PrintList, Vec::new());
//! let list = Value::List(vec![Value::string("a"), Value::string("b")]);
//! out.execute(InvocationContext::new(), list).unwrap();
//! assert_eq!(out.into_inner(), b"a\nb\n");
//! ```

mod encode;
mod print;
mod sink;

pub use encode::{EncodeError, Encoder};
pub use sink::{CollectOutput, EncodeOutput};

use crate::bencode::Value;
use crate::context::InvocationContext;
use crate::error::Error;

/// Receiver at the end of a pipeline stage.
///
/// Actions implement this too, so stages chain by nesting.
pub trait Output {
    fn execute(&mut self, ctx: InvocationContext, value: Value) -> Result<(), Error>;
}

impl<O: Output + ?Sized> Output for &mut O {
    fn execute(&mut self, ctx: InvocationContext, value: Value) -> Result<(), Error> {
        (**self).execute(ctx, value)
    }
}

impl<O: Output + ?Sized> Output for Box<O> {
    fn execute(&mut self, ctx: InvocationContext, value: Value) -> Result<(), Error> {
        (**self).execute(ctx, value)
    }
}
