//! REPL (Read-Eval-Print Loop) for interactive research
//!
//! The REPL owns the conversation state across turns, which is what makes
//! the clarification loop work: when a run pauses with a question, the
//! next input is treated as the follow-up and re-enters analysis with the
//! clarification round counter advanced. A completed answer resets the
//! counter.

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use research_application::{
    LlmGateway, PlanPublisher, RunResearchInput, RunResearchUseCase, RunResult,
};
use research_domain::{ConversationState, Query};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Interactive research REPL
pub struct ResearchRepl<G: LlmGateway + 'static> {
    use_case: RunResearchUseCase<G>,
    publisher: Option<Arc<dyn PlanPublisher>>,
    conversation: ConversationState,
    clarification_round: usize,
    show_progress: bool,
    want_plan: bool,
}

impl<G: LlmGateway + 'static> ResearchRepl<G> {
    pub fn new(use_case: RunResearchUseCase<G>) -> Self {
        Self {
            use_case,
            publisher: None,
            conversation: ConversationState::new(),
            clarification_round: 0,
            show_progress: true,
            want_plan: false,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Publisher used when a study plan is produced
    pub fn with_publisher(mut self, publisher: Arc<dyn PlanPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path =
            dirs::data_dir().map(|p| p.join("copilot-research").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_query(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("+---------------------------------------------+");
        println!("|        Copilot Research - Chat Mode         |");
        println!("+---------------------------------------------+");
        println!();
        println!("Ask a research question. Commands:");
        println!("  /plan     - Toggle study-plan generation");
        println!("  /clear    - Forget the conversation so far");
        println!("  /help     - Show this help");
        println!("  /quit     - Exit");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /plan            - Toggle study-plan generation (now: {})", self.want_plan);
                println!("  /clear           - Forget the conversation so far");
                println!("  /help, /h, /?    - Show this help");
                println!("  /quit, /exit, /q - Exit");
                println!();
                false
            }
            "/plan" => {
                self.want_plan = !self.want_plan;
                println!(
                    "Study-plan generation is now {}",
                    if self.want_plan { "on" } else { "off" }
                );
                false
            }
            "/clear" => {
                self.conversation = ConversationState::new();
                self.clarification_round = 0;
                println!("Conversation cleared.");
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_query(&mut self, line: &str) {
        let query = match Query::try_new(line) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        println!();

        let mut input = RunResearchInput::new(query, self.conversation.clone())
            .with_clarification_round(self.clarification_round);
        if self.want_plan {
            input = input.with_plan();
        }

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute(input).await
        };

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        self.conversation = output.conversation;

        match output.result {
            RunResult::NeedsClarification(request) => {
                self.clarification_round += 1;
                println!("{}", request.message);
            }
            RunResult::Answered { response, plan } => {
                self.clarification_round = 0;
                println!("{}", ConsoleFormatter::format(&response));

                if let Some(plan_result) = plan {
                    match plan_result {
                        Ok(plan) => {
                            println!("{}", ConsoleFormatter::format_plan(&plan));
                            self.publish(&plan).await;
                        }
                        Err(e) => eprintln!("Study plan unavailable: {}", e),
                    }
                }
            }
        }
        println!();
    }

    async fn publish(&self, plan: &research_domain::StudyPlan) {
        let Some(publisher) = &self.publisher else {
            return;
        };
        match publisher.publish(plan).await {
            Ok(published) => println!("Plan published to {}", published.location),
            Err(e) => eprintln!("Publish failed: {}", e),
        }
    }
}
