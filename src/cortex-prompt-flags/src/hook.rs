//! One hook invocation: compose, emit, log.

use std::io::Write;

use crate::composer::{Composition, ContextComposer};
use crate::config::PromptFlagsConfig;
use crate::environment::Environment;
use crate::input::HookInput;
use crate::registry::FlagRegistry;
use crate::session_log::{SessionLogEntry, SessionLogger};
use crate::Result;

/// Runs the prompt flag pipeline for hook inputs.
#[derive(Debug, Clone)]
pub struct HookRunner<'a> {
    config: PromptFlagsConfig,
    registry: &'a FlagRegistry,
}

impl HookRunner<'static> {
    pub fn new(config: PromptFlagsConfig) -> Self {
        Self::with_registry(config, FlagRegistry::builtin())
    }
}

impl<'a> HookRunner<'a> {
    pub fn with_registry(config: PromptFlagsConfig, registry: &'a FlagRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &PromptFlagsConfig {
        &self.config
    }

    /// Compose the context for `input`, write it to `out` and log the
    /// invocation.
    ///
    /// The context is written with a single `write_all`, so it is emitted
    /// whole or not at all. Nothing is written when no fragment was
    /// produced. The session log entry is appended even if writing fails;
    /// log failures never surface.
    pub fn run<E, W>(&self, input: &HookInput, environment: E, out: &mut W) -> Result<Composition>
    where
        E: Environment,
        W: Write + ?Sized,
    {
        let composer =
            ContextComposer::with_registry(self.registry, environment, self.config.context.clone());
        let composition = composer.compose(&input.prompt);

        let written = match composition.context() {
            Some(context) => emit(out, &context),
            None => Ok(()),
        };

        let logger = SessionLogger::new(self.config.logging.clone());
        logger.append(&SessionLogEntry::from_composition(&composition, &input.session_id));

        written?;
        Ok(composition)
    }
}

fn emit<W: Write + ?Sized>(out: &mut W, context: &str) -> std::io::Result<()> {
    let mut block = String::with_capacity(context.len() + 1);
    block.push_str(context);
    block.push('\n');
    out.write_all(block.as_bytes())?;
    out.flush()
}

/// Run one invocation with the built-in registry.
pub fn run_hook<E, W>(
    input: &HookInput,
    config: &PromptFlagsConfig,
    environment: E,
    out: &mut W,
) -> Result<Composition>
where
    E: Environment,
    W: Write + ?Sized,
{
    HookRunner::new(config.clone()).run(input, environment, out)
}
