//! Terminal Session Adapter
//!
//! Drives the workflow from line-based input: every line is either the
//! answer to a pending prompt or a command. Workflow events and display
//! changes are processed on the same task as the input.

use crate::adapters::outbound::TerminalUi;
use crate::application::{LocationAddressWorkflow, WorkflowEvent};
use crate::domain::entities::DisplayState;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, watch};

const HELP: &str = "\
Commands:
  l, locate   look up the current address (also: empty line)
  o, open     open the shown location in a map application
  h, help     show this help
  q, quit     exit";

/// A command typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Locate,
    Open,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "l" | "locate" => Ok(Command::Locate),
            "o" | "open" => Ok(Command::Open),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command {:?}, type 'help'", other)),
        }
    }
}

/// Terminal session - inbound adapter for interactive use.
pub struct TerminalSession {
    workflow: LocationAddressWorkflow,
    events: mpsc::UnboundedReceiver<WorkflowEvent>,
    ui: Arc<TerminalUi>,
}

impl TerminalSession {
    pub fn new(
        workflow: LocationAddressWorkflow,
        events: mpsc::UnboundedReceiver<WorkflowEvent>,
        ui: Arc<TerminalUi>,
    ) -> Self {
        Self {
            workflow,
            events,
            ui,
        }
    }

    /// Watch the display state of the underlying workflow.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.workflow.subscribe()
    }

    /// Run until the user quits or the input ends.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run<R>(mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut display = self.workflow.subscribe();
        println!("{}", HELP);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("input closed");
                        break;
                    };
                    if self.ui.answer_pending(&line) {
                        continue;
                    }
                    match line.parse::<Command>() {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.execute(command).await,
                        Err(message) => println!("{}", message),
                    }
                }
                Some(event) = self.events.recv() => {
                    self.workflow.handle(event);
                }
                changed = display.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = display.borrow_and_update().clone();
                    self.ui.render(&state);
                }
            }
        }

        tracing::info!("session ended");
        Ok(())
    }

    async fn execute(&mut self, command: Command) {
        match command {
            Command::Locate => self.workflow.request_location(),
            Command::Open => {
                if let Ok(uri) = self.workflow.open_external_map().await {
                    println!("Opened {}", uri);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => {}
        }
    }
}
