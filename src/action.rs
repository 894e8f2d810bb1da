//! Composable pipeline stages.
//!
//! An [`Action`] resolves a key-path in the value it receives, computes
//! something from the addressed node, delivers the product into the value or
//! the [`InvocationContext`] according to its [`ResultTarget`], and hands the
//! outcome to its [`Output`] exactly once. Actions are themselves outputs, so
//! a pipeline is a nest of actions ending in a sink:
//!
//! ```
//! use rbedit::action::Action;
//! use rbedit::bencode::decode;
//! use rbedit::context::InvocationContext;
//! use rbedit::output::{EncodeOutput, Encoder, Output};
//!
//! let torrent = decode(b"d4:infod6:lengthi1e4:name1:aee").unwrap();
//!
//! let sink = EncodeOutput::new(Encoder::HexString, Vec::new());
//! let mut pipeline = Action::calculate_info_hash(Action::cached_info_hash(sink));
//! pipeline.execute(InvocationContext::new(), torrent).unwrap();
//! ```

use bytes::Bytes;
use tracing::debug;

use crate::bencode::Value;
use crate::constants::INFO_KEY;
use crate::context::{InvocationContext, ResultTarget};
use crate::error::Error;
use crate::metainfo::{compute_hash, InfoHash};
use crate::output::Output;
use crate::path::{self, KeyPath};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Get,
    Sha1,
    CachedInfoHash,
    Replace(Value),
    Insert(Value),
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Sha1 => "sha1",
            Operation::CachedInfoHash => "cached-info-hash",
            Operation::Replace(_) => "replace",
            Operation::Insert(_) => "insert",
        }
    }
}

/// A single pipeline stage: resolve, compute, deliver, emit.
#[derive(Debug)]
pub struct Action<O> {
    path: KeyPath,
    target: ResultTarget,
    operation: Operation,
    output: O,
}

impl<O: Output> Action<O> {
    fn new(operation: Operation, path: KeyPath, target: ResultTarget, output: O) -> Self {
        Self {
            path,
            target,
            operation,
            output,
        }
    }

    /// Passes the node at `path` downstream.
    pub fn get(path: KeyPath, output: O) -> Self {
        Self::new(Operation::Get, path, ResultTarget::Object, output)
    }

    /// Hashes the canonical encoding of the node at `path`.
    ///
    /// With [`ResultTarget::Object`] the raw 20-byte digest is passed
    /// downstream as a byte string. With [`ResultTarget::Metadata`] it is
    /// cached in the context and the input value is passed on unchanged.
    pub fn sha1(path: KeyPath, target: ResultTarget, output: O) -> Self {
        Self::new(Operation::Sha1, path, target, output)
    }

    /// Hashes the `info` dictionary into the context.
    pub fn calculate_info_hash(output: O) -> Self {
        Self::sha1(
            std::iter::once(INFO_KEY).collect(),
            ResultTarget::Metadata,
            output,
        )
    }

    /// Emits the info hash cached by an earlier [`Action::calculate_info_hash`]
    /// as a raw byte string.
    ///
    /// Fails with a state error if nothing was cached. The cache is not
    /// invalidated by [`Action::replace`]; hash again after replacing.
    pub fn cached_info_hash(output: O) -> Self {
        Self::new(
            Operation::CachedInfoHash,
            KeyPath::root(),
            ResultTarget::Object,
            output,
        )
    }

    /// Emits the input with the node at `path` swapped for `value`.
    pub fn replace(path: KeyPath, value: Value, output: O) -> Self {
        Self::new(Operation::Replace(value), path, ResultTarget::Object, output)
    }

    /// Like [`Action::replace`] but creates the final key if it is missing.
    pub fn insert(path: KeyPath, value: Value, output: O) -> Self {
        Self::new(Operation::Insert(value), path, ResultTarget::Object, output)
    }

    /// Overrides where the product is delivered.
    pub fn with_target(mut self, target: ResultTarget) -> Self {
        self.target = target;
        self
    }

    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    pub fn target(&self) -> ResultTarget {
        self.target
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    fn object_only(&self) -> Result<(), Error> {
        match self.target {
            ResultTarget::Object => Ok(()),
            ResultTarget::Metadata => Err(Error::Configuration(format!(
                "{} cannot deliver into {}",
                self.operation.name(),
                self.target
            ))),
        }
    }

    fn run(&self, ctx: &mut InvocationContext, root: Value) -> Result<Value, Error> {
        match &self.operation {
            Operation::Get => {
                let node = path::resolve(&root, &self.path)?.clone();
                self.object_only()?;
                Ok(node)
            }
            Operation::Sha1 => {
                let hash = compute_hash(path::resolve(&root, &self.path)?)?;
                match self.target {
                    ResultTarget::Object => Ok(digest_value(&hash)),
                    ResultTarget::Metadata => {
                        ctx.set_info_hash(hash);
                        Ok(root)
                    }
                }
            }
            Operation::CachedInfoHash => {
                path::resolve(&root, &self.path)?;
                self.object_only()?;
                Ok(digest_value(&ctx.cached_info_hash()?))
            }
            Operation::Replace(value) => {
                let root = path::replace(root, &self.path, value.clone())?;
                self.object_only()?;
                Ok(root)
            }
            Operation::Insert(value) => {
                let root = path::insert(root, &self.path, value.clone())?;
                self.object_only()?;
                Ok(root)
            }
        }
    }
}

impl<O: Output> Output for Action<O> {
    fn execute(&mut self, mut ctx: InvocationContext, root: Value) -> Result<(), Error> {
        debug!(
            action = self.operation.name(),
            path = %self.path,
            target = %self.target,
            "executing action"
        );

        let result = self.run(&mut ctx, root)?;
        self.output.execute(ctx, result)
    }
}

fn digest_value(hash: &InfoHash) -> Value {
    Value::Bytes(Bytes::copy_from_slice(hash.as_bytes()))
}

#[cfg(test)]
mod tests;
