//! FIFO command queue with chained undo.

use std::collections::VecDeque;

use tracing::warn;

use super::{Command, CommandContext, CommandError, CommandPhase, CommandStatus};

/// Executes queued commands strictly in enqueue order.
///
/// Completed commands move to a history stack; `undo_last`/`undo_all`
/// revert them in reverse execution order. The queue itself is the
/// single-writer guarantee: nothing mutates the board between a command's
/// steps except that command.
#[derive(Default)]
pub struct CommandManager {
    queue: VecDeque<Box<dyn Command>>,
    history: Vec<Box<dyn Command>>,
}

impl CommandManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command to the queue.
    pub fn enqueue(&mut self, command: impl Command + 'static) {
        self.queue.push_back(Box::new(command));
    }

    /// Number of commands waiting to execute.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of executed commands available for undo.
    #[must_use]
    pub fn executed(&self) -> usize {
        self.history.len()
    }

    /// Drain the queue, driving every command to completion in order.
    ///
    /// Returns the number of commands completed. The first failure (or a
    /// cancellation observed at a suspension point) propagates as an
    /// error; side effects already applied stay applied, and the failing
    /// command is retained in history so its applied steps remain
    /// inspectable.
    pub fn execute_all(&mut self, ctx: &mut CommandContext<'_>) -> Result<usize, CommandError> {
        let mut completed = 0;
        while let Some(mut command) = self.queue.pop_front() {
            loop {
                match command.advance(ctx) {
                    Ok(CommandStatus::Completed) => {
                        self.history.push(command);
                        completed += 1;
                        break;
                    }
                    Ok(CommandStatus::Suspended) => {
                        if ctx.cancel.is_cancelled() {
                            warn!("command execution cancelled at suspension point");
                            self.history.push(command);
                            return Err(CommandError::Cancelled);
                        }
                    }
                    Err(err) => {
                        self.history.push(command);
                        return Err(err);
                    }
                }
            }
        }
        Ok(completed)
    }

    /// Advance the front command by one step.
    ///
    /// Returns `None` when the queue is empty. Harness-facing: lets tests
    /// observe every suspension without driving to completion.
    pub fn step(
        &mut self,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Option<CommandStatus>, CommandError> {
        let Some(command) = self.queue.front_mut() else {
            return Ok(None);
        };
        match command.advance(ctx) {
            Ok(CommandStatus::Completed) => {
                let command = self.queue.pop_front().expect("front checked above");
                self.history.push(command);
                Ok(Some(CommandStatus::Completed))
            }
            Ok(CommandStatus::Suspended) => Ok(Some(CommandStatus::Suspended)),
            Err(err) => {
                let command = self.queue.pop_front().expect("front checked above");
                self.history.push(command);
                Err(err)
            }
        }
    }

    /// Fully revert the most recently executed command.
    ///
    /// Returns false if there is nothing to undo. A command that never
    /// completed execution cannot be undone.
    pub fn undo_last(&mut self, ctx: &mut CommandContext<'_>) -> Result<bool, CommandError> {
        let Some(command) = self.history.last() else {
            return Ok(false);
        };
        if matches!(
            command.phase(),
            CommandPhase::NotStarted | CommandPhase::Running { .. } | CommandPhase::Suspended { .. }
        ) {
            warn!("undo requested for a command that never completed");
            return Err(CommandError::NotCompleted);
        }

        let mut command = self.history.pop().expect("last checked above");
        loop {
            match command.revert(ctx)? {
                CommandStatus::Completed => return Ok(true),
                CommandStatus::Suspended => {
                    if ctx.cancel.is_cancelled() {
                        warn!("undo cancelled at suspension point");
                        self.history.push(command);
                        return Err(CommandError::Cancelled);
                    }
                }
            }
        }
    }

    /// Revert every executed command, most recent first.
    ///
    /// Returns the number of commands reverted.
    pub fn undo_all(&mut self, ctx: &mut CommandContext<'_>) -> Result<usize, CommandError> {
        let mut reverted = 0;
        while self.undo_last(ctx)? {
            reverted += 1;
        }
        Ok(reverted)
    }
}

impl std::fmt::Debug for CommandManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandManager")
            .field("pending", &self.queue.len())
            .field("executed", &self.history.len())
            .finish()
    }
}
