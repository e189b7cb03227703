use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ljcluster::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Bar state shared with the engine callback. Rejections are counted per atom range.
struct BuildDisplay {
    pb: ProgressBar,
    rejections: u64,
}

/// Renders cluster preparation on stderr: a spinner per phase and one bar per random atom
/// range, annotated with the number of rejected draws so far.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<BuildDisplay>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(Self::spinner_style());
        pb.finish_and_clear();

        Self {
            display: Arc::new(Mutex::new(BuildDisplay { pb, rejections: 0 })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut display) = display.lock() else {
                warn!("Progress display mutex was poisoned. Cannot update progress.");
                return;
            };
            display.apply(progress);
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn range_style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix:>14} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Failed to create range style template")
            .progress_chars("##-")
    }
}

impl BuildDisplay {
    fn apply(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                self.pb.reset();
                self.pb.set_length(0);
                self.pb.set_prefix("");
                self.pb.set_style(CliProgressHandler::spinner_style());
                self.pb
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                self.pb.set_message(name);
            }
            Progress::PhaseFinish => {
                self.pb.disable_steady_tick();
                self.pb.finish_with_message("✓ Done");
            }
            Progress::RangeStart { range } => {
                self.rejections = 0;
                self.pb.disable_steady_tick();
                self.pb.reset();
                self.pb.set_length(range.len() as u64);
                self.pb.set_style(CliProgressHandler::range_style());
                self.pb
                    .set_prefix(format!("atoms {}-{}", range.start + 1, range.end));
                self.pb.set_message("0 rejected");
            }
            Progress::AtomPlaced { attempts, .. } => {
                self.rejections += attempts.saturating_sub(1);
                self.pb.inc(1);
                self.pb.set_message(format!("{} rejected", self.rejections));
            }
            Progress::RangeFinish { placed, rejections } => {
                self.pb
                    .finish_with_message(format!("{placed} placed, {rejections} rejected"));
            }
            Progress::RangeExhausted { index } => {
                self.pb.abandon_with_message(format!(
                    "gave up on atom {} after {} rejected draws",
                    index + 1,
                    self.rejections
                ));
            }
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
