//! Commands grouped and executed as one unit.

use super::{Command, CommandContext, CommandError, CommandPhase, CommandStatus};

/// Runs child commands in order as a single reversible action.
///
/// Suspension points of children are suspension points of the composite;
/// revert walks the children backwards, each reverted fully before the
/// previous one starts.
pub struct CompositeCommand {
    children: Vec<Box<dyn Command>>,
    cursor: usize,
    revert_cursor: usize,
    phase: CommandPhase,
    priority: i32,
}

impl CompositeCommand {
    /// Create an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            cursor: 0,
            revert_cursor: 0,
            phase: CommandPhase::NotStarted,
            priority: 0,
        }
    }

    /// Set the scheduler re-insertion priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Append a child command (builder pattern).
    #[must_use]
    pub fn with_child(mut self, child: impl Command + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Append a child command.
    pub fn push(&mut self, child: impl Command + 'static) {
        self.children.push(Box::new(child));
    }

    /// Number of child commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the composite has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for CompositeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for CompositeCommand {
    fn advance(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError> {
        if matches!(self.phase, CommandPhase::Completed) {
            return Ok(CommandStatus::Completed);
        }

        if self.cursor >= self.children.len() {
            self.phase = CommandPhase::Completed;
            return Ok(CommandStatus::Completed);
        }

        match self.children[self.cursor].advance(ctx)? {
            CommandStatus::Completed => {
                self.cursor += 1;
                if self.cursor >= self.children.len() {
                    self.phase = CommandPhase::Completed;
                    Ok(CommandStatus::Completed)
                } else {
                    self.phase = CommandPhase::Suspended { step: self.cursor };
                    Ok(CommandStatus::Suspended)
                }
            }
            CommandStatus::Suspended => {
                self.phase = CommandPhase::Suspended { step: self.cursor };
                Ok(CommandStatus::Suspended)
            }
        }
    }

    fn revert(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError> {
        match self.phase {
            CommandPhase::Completed => {
                self.revert_cursor = self.children.len();
            }
            CommandPhase::Reverting { .. } => {}
            CommandPhase::Reverted => return Ok(CommandStatus::Completed),
            _ => return Err(CommandError::NotCompleted),
        }

        if self.revert_cursor == 0 {
            self.phase = CommandPhase::Reverted;
            return Ok(CommandStatus::Completed);
        }

        match self.children[self.revert_cursor - 1].revert(ctx)? {
            CommandStatus::Completed => {
                self.revert_cursor -= 1;
                if self.revert_cursor == 0 {
                    self.phase = CommandPhase::Reverted;
                    Ok(CommandStatus::Completed)
                } else {
                    self.phase = CommandPhase::Reverting {
                        step: self.revert_cursor,
                    };
                    Ok(CommandStatus::Suspended)
                }
            }
            CommandStatus::Suspended => {
                self.phase = CommandPhase::Reverting {
                    step: self.revert_cursor,
                };
                Ok(CommandStatus::Suspended)
            }
        }
    }

    fn phase(&self) -> CommandPhase {
        self.phase
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
