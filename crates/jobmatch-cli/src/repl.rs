//! Interactive session commands
//!
//! A line-oriented stand-in for the dashboard: one live table per process,
//! reinitialized only when asked.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use rand::rngs::StdRng;
use tracing::debug;

use jobmatch_rl::{Session, UniformReward};

use crate::render::{render, OutputFormat};

pub const HELP: &str = "\
Commands:
  show                     Print the Q-table
  update [N]               Update every state-action pair N times (default 1)
  init                     Reset the Q-table to zeros
  select <state> [EPS]     Pick an action for <state> (epsilon-greedy)
  stats                    Show session statistics
  help                     Show this help
  quit                     Leave the session";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Show,
    Update { batches: usize },
    Init,
    /// Raw argument text; resolved against the table's state labels
    Select { args: String },
    Stats,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "show" => Self::Show,
            "update" => {
                let batches = if rest.is_empty() {
                    1
                } else {
                    rest.parse::<usize>()
                        .map_err(|_| anyhow!("update expects a batch count, got {rest:?}"))?
                };
                Self::Update { batches }
            }
            "init" => Self::Init,
            "select" => {
                if rest.is_empty() {
                    bail!("select expects a state label");
                }
                Self::Select {
                    args: rest.to_string(),
                }
            }
            "stats" => Self::Stats,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}; type 'help' for a list"),
        };

        Ok(Some(command))
    }
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session state: the live table plus its random sources
pub struct Repl {
    session: Session,
    rewards: UniformReward,
    rng: StdRng,
    format: OutputFormat,
}

impl Repl {
    pub fn new(session: Session, rewards: UniformReward, rng: StdRng, format: OutputFormat) -> Self {
        Self {
            session,
            rewards,
            rng,
            format,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one command, writing its output to `out`
    pub fn execute<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing session command");

        match command {
            ReplCommand::Show => {
                writeln!(out, "Q-Table:")?;
                write!(out, "{}", render(self.session.table(), self.format)?)?;
            }
            ReplCommand::Update { batches } => {
                for _ in 0..batches {
                    self.session.simulate_batch(&mut self.rewards)?;
                }
                writeln!(out, "Updated Q-Table:")?;
                write!(out, "{}", render(self.session.table(), self.format)?)?;
            }
            ReplCommand::Init => {
                self.session.reinitialize();
                writeln!(out, "Q-Table reinitialized")?;
            }
            ReplCommand::Select { args } => {
                let (state, epsilon) = self.resolve_select(&args)?;
                let epsilon = epsilon.unwrap_or(self.session.params().epsilon());
                let action =
                    jobmatch_rl::select_action(self.session.table(), &state, epsilon, &mut self.rng)?;
                writeln!(out, "{state}: {action} (epsilon {epsilon})")?;
            }
            ReplCommand::Stats => {
                let stats = self.session.stats();
                writeln!(out, "Batches:        {}", stats.batches)?;
                writeln!(out, "Updates:        {}", stats.total_updates)?;
                writeln!(out, "Total reward:   {}", stats.total_reward)?;
                writeln!(out, "Average reward: {:.4}", stats.average_reward())?;
            }
            ReplCommand::Help => writeln!(out, "{HELP}")?,
            ReplCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Split `args` into a state label and an optional trailing epsilon.
    ///
    /// Labels may contain spaces and end in digits ("State 1"), so an exact
    /// label match wins over reading the last token as epsilon.
    fn resolve_select(&self, args: &str) -> Result<(String, Option<f64>)> {
        let table = self.session.table();
        if table.contains_state(args) {
            return Ok((args.to_string(), None));
        }

        if let Some((state, last)) = args.rsplit_once(char::is_whitespace) {
            let state = state.trim();
            if let Ok(epsilon) = last.parse::<f64>() {
                if table.contains_state(state) {
                    return Ok((state.to_string(), Some(epsilon)));
                }
            }
        }

        // Let the engine report the missing key
        Ok((args.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobmatch_rl::QLearning;
    use rand::SeedableRng;

    fn repl() -> Repl {
        let session = Session::new(
            &["State 1", "State 2"],
            &["Cashier", "Mechanic"],
            QLearning::new(0.1, 0.9, 0.0).unwrap(),
        )
        .unwrap();
        Repl::new(
            session,
            UniformReward::seeded(-10, 10, 1).unwrap(),
            StdRng::seed_from_u64(2),
            OutputFormat::Table,
        )
    }

    fn run(repl: &mut Repl, line: &str) -> Result<String> {
        let mut out = Vec::new();
        if let Some(command) = ReplCommand::parse(line)? {
            repl.execute(command, &mut out)?;
        }
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("  ").unwrap(), None);
        assert_eq!(ReplCommand::parse("show").unwrap(), Some(ReplCommand::Show));
        assert_eq!(
            ReplCommand::parse("update").unwrap(),
            Some(ReplCommand::Update { batches: 1 })
        );
        assert_eq!(
            ReplCommand::parse("UPDATE 3").unwrap(),
            Some(ReplCommand::Update { batches: 3 })
        );
        assert_eq!(
            ReplCommand::parse("select State 1 0.5").unwrap(),
            Some(ReplCommand::Select {
                args: "State 1 0.5".to_string()
            })
        );
        assert_eq!(ReplCommand::parse("exit").unwrap(), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(ReplCommand::parse("update many").is_err());
        assert!(ReplCommand::parse("select").is_err());
        assert!(ReplCommand::parse("dance").is_err());
    }

    #[test]
    fn test_update_then_init() {
        let mut repl = repl();

        let output = run(&mut repl, "update 2").unwrap();
        assert!(output.starts_with("Updated Q-Table:"));
        assert_eq!(repl.session().stats().batches, 2);
        assert_eq!(repl.session().stats().total_updates, 8);

        run(&mut repl, "init").unwrap();
        assert_eq!(repl.session().stats().total_updates, 0);
        assert!(repl.session().table().iter().all(|(_, _, v)| v == 0.0));
    }

    #[test]
    fn test_select_resolves_labels() {
        let mut repl = repl();
        repl.session.update("State 1", "Mechanic", 5.0).unwrap();

        let output = run(&mut repl, "select State 1").unwrap();
        assert_eq!(output.trim(), "State 1: Mechanic (epsilon 0)");

        let output = run(&mut repl, "select State 1 0").unwrap();
        assert_eq!(output.trim(), "State 1: Mechanic (epsilon 0)");
    }

    #[test]
    fn test_select_unknown_state_errors() {
        let mut repl = repl();
        let err = run(&mut repl, "select State 9").unwrap_err();
        assert!(err.to_string().contains("State 9"));
    }

    #[test]
    fn test_quit_flow() {
        let mut repl = repl();
        let mut out = Vec::new();
        assert_eq!(repl.execute(ReplCommand::Quit, &mut out).unwrap(), Flow::Quit);
        assert_eq!(repl.execute(ReplCommand::Help, &mut out).unwrap(), Flow::Continue);
    }
}
