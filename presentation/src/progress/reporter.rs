//! Progress reporting for research runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use research_application::ProgressNotifier;
use research_domain::{RunStage, SourceKind};
use std::sync::Mutex;

/// Reports progress during a research run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: RunStage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("...");

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn on_agent_complete(&self, _stage: RunStage, agent: SourceKind, success: bool) {
        if let Some(pb) = self.stage_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent)
            } else {
                format!("{} {}", "x".red(), agent)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: RunStage) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} done", stage.as_str().green()));
        }
    }

    fn on_clarification(&self, _message: &str) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.finish_with_message("clarification needed".yellow().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: RunStage, total_tasks: usize) {
        if total_tasks > 1 {
            println!(
                "{} {} ({} agents)",
                "->".cyan(),
                stage.display_name().bold(),
                total_tasks
            );
        } else {
            println!("{} {}", "->".cyan(), stage.display_name().bold());
        }
    }

    fn on_agent_complete(&self, _stage: RunStage, agent: SourceKind, success: bool) {
        if success {
            println!("  {} {}", "v".green(), agent);
        } else {
            println!("  {} {} (failed)", "x".red(), agent);
        }
    }

    fn on_stage_complete(&self, _stage: RunStage) {}
}
