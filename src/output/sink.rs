use std::io::Write;

use super::encode::Encoder;
use super::Output;
use crate::bencode::Value;
use crate::context::InvocationContext;
use crate::error::Error;

/// Encodes the final value and writes it to `W`.
///
/// Textual encoders get a trailing newline by default. Nothing is written if
/// encoding fails.
#[derive(Debug)]
pub struct EncodeOutput<W> {
    encoder: Encoder,
    writer: W,
    trailing_newline: bool,
    context: Option<InvocationContext>,
}

impl<W: Write> EncodeOutput<W> {
    pub fn new(encoder: Encoder, writer: W) -> Self {
        Self {
            encoder,
            writer,
            trailing_newline: encoder.is_text(),
            context: None,
        }
    }

    pub fn with_trailing_newline(mut self, enabled: bool) -> Self {
        self.trailing_newline = enabled;
        self
    }

    /// Context as returned by the encoder on the last successful write.
    pub fn context(&self) -> Option<&InvocationContext> {
        self.context.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for EncodeOutput<W> {
    fn execute(&mut self, ctx: InvocationContext, value: Value) -> Result<(), Error> {
        let (ctx, bytes) = self.encoder.encode(ctx, &value)?;

        self.writer.write_all(&bytes)?;
        if self.trailing_newline {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;

        tracing::debug!(encoder = %self.encoder, len = bytes.len(), "wrote output");
        self.context = Some(ctx);
        Ok(())
    }
}

/// Keeps every `(context, value)` pair it receives.
#[derive(Debug, Default)]
pub struct CollectOutput {
    results: Vec<(InvocationContext, Value)>,
}

impl CollectOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[(InvocationContext, Value)] {
        &self.results
    }

    pub fn last(&self) -> Option<&(InvocationContext, Value)> {
        self.results.last()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl Output for CollectOutput {
    fn execute(&mut self, ctx: InvocationContext, value: Value) -> Result<(), Error> {
        self.results.push((ctx, value));
        Ok(())
    }
}
