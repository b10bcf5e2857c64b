use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};

// Progress bar style templates as constants
const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// How chatty the reporter is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Progress and log sink handed to each pipeline stage.
///
/// Stages take an `Option<&ProgressReporter>`; `None` keeps them silent,
/// which is what the tests use.
pub struct ProgressReporter {
    term: Term,
    verbosity: Verbosity,
    interactive: bool,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Mutex<Option<ProgressBar>>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl ProgressReporter {
    pub fn new(verbosity: Verbosity) -> Self {
        let term = Term::stderr();
        let interactive = term.is_term();
        Self {
            term,
            verbosity,
            interactive,
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: Mutex::new(None),
        }
    }

    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            self.emit(format!("{} {}", style("ℹ").blue(), message));
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            self.emit(format!("{} {}", style("·").dim(), style(message).dim()));
        }
    }

    pub fn warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            self.emit(format!("{} {}", style("⚠").yellow(), message));
        }
    }

    /// Print a line without tearing an active progress bar
    fn emit(&self, line: String) {
        match self.bar() {
            Some(pb) => pb.println(line),
            None => {
                let _ = self.term.clear_line();
                eprintln!("{line}");
            }
        }
    }

    fn bar(&self) -> Option<ProgressBar> {
        self.current_bar.lock().ok().and_then(|bar| bar.clone())
    }

    fn set_bar(&self, bar: Option<ProgressBar>) -> Option<ProgressBar> {
        match self.current_bar.lock() {
            Ok(mut current) => std::mem::replace(&mut *current, bar),
            Err(_) => None,
        }
    }

    pub fn create_progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new(len));
        if let Ok(bar_style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
            pb.set_style(bar_style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            pb.set_style(
                spinner_style.tick_strings(&["🎠 ", "🎠⊙", "🎠◐", "🎠◓", "🎠◑", "🎠◒", "🎠○", "🎠●", "✓"]),
            );
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn get_carousel_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    fn show_progress(&self) -> bool {
        self.interactive && self.verbosity >= Verbosity::Normal
    }

    pub fn start_discovery(&self, root: &Path) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        let _ = self.term.clear_line();
        eprintln!(
            "{} Discovering packages under {}...",
            style("🔍").cyan(),
            style(root.display()).dim()
        );
        if self.show_progress() {
            let spinner = self.create_spinner("Reading package.json files...");
            self.set_bar(Some(spinner));
        }
    }

    pub fn checking_manifest(&self, path: &Path) {
        if let Some(pb) = self.bar() {
            pb.set_message(format!("Checking: {}...", path.display()));
        } else if self.show_progress() {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Checking: {}... ",
                style(self.get_carousel_frame()).cyan(),
                style(path.display()).dim()
            );
        }
        self.debug(&format!("Reading manifest {}", path.display()));
    }

    pub fn finish_discovery(&self, count: usize) {
        if let Some(pb) = self.set_bar(None) {
            pb.finish_and_clear();
        }
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        let _ = self.term.clear_line();
        if count == 0 {
            eprintln!("\r{} No packages found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Discovery complete: found {} package{}",
                style("✓").green(),
                style(count).yellow().bold(),
                if count == 1 { "" } else { "s" }
            );
        }
    }

    pub fn start_extraction(&self, total_packages: usize) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        eprintln!("\n{} Extracting imports...", style("📥").blue());
        if self.show_progress() {
            let pb = self.create_progress_bar(total_packages as u64, "Extracting imports");
            self.set_bar(Some(pb));
        }
    }

    pub fn extracting_package(&self, package_name: &str) {
        if let Some(pb) = self.bar() {
            pb.set_message(format!("Processing package: {package_name}"));
            pb.inc(1);
        }
        self.debug(&format!("Extracting imports for {package_name}"));
    }

    pub fn cache_hit(&self, package_dir: &Path) {
        self.debug(&format!(
            "Using cached imports for '{}'",
            package_dir.display()
        ));
    }

    pub fn finish_extraction(&self, record_count: usize) {
        if let Some(pb) = self.set_bar(None) {
            pb.finish_with_message("Import extraction complete");
        }
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        eprintln!(
            "{} Collected {} internal import{}",
            style("✓").green(),
            style(record_count).yellow().bold(),
            if record_count == 1 { "" } else { "s" }
        );
    }

    pub fn start_cycle_detection(&self) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        eprintln!("\n{} Detecting dependency cycles...", style("🔄").yellow());
    }

    pub fn finish_cycle_detection(&self, cycles_found: usize) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        if cycles_found == 0 {
            eprintln!(
                "{} No cycles detected! {}",
                style("✓").green().bold(),
                style("🎉").dim()
            );
        } else {
            eprintln!(
                "{} Found {} cycle{}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                if cycles_found == 1 { "" } else { "s" }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_quiet_reporter_does_not_panic() {
        let reporter = ProgressReporter::new(Verbosity::Quiet);
        reporter.start_discovery(Path::new("."));
        reporter.checking_manifest(Path::new("package.json"));
        reporter.finish_discovery(3);
        reporter.start_extraction(3);
        reporter.extracting_package("@org/a");
        reporter.finish_extraction(0);
        reporter.warn("quiet reporters drop warnings");
        assert!(!reporter.show_progress());
    }
}
