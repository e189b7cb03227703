use std::ops::Range;

/// Events emitted while a cluster is prepared.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A random build of the atoms in `range` begins.
    RangeStart { range: Range<usize> },
    /// One atom of a random build was accepted after `attempts` draws.
    AtomPlaced { index: usize, attempts: u64 },
    RangeFinish { placed: usize, rejections: u64 },
    /// The build gave up on atom `index` after the retry ceiling.
    RangeExhausted { index: usize },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::RangeStart { range: 0..3 });
        reporter.report(Progress::RangeExhausted { index: 1 });
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            let label = match event {
                Progress::PhaseStart { name } => name.to_string(),
                Progress::RangeStart { range } => format!("range {range:?}"),
                Progress::AtomPlaced { index, attempts } => format!("atom {index}/{attempts}"),
                Progress::RangeFinish { placed, rejections } => {
                    format!("placed {placed}/{rejections}")
                }
                Progress::RangeExhausted { index } => format!("exhausted {index}"),
                Progress::PhaseFinish => "phase done".to_string(),
            };
            seen.lock().unwrap().push(label);
        }));

        reporter.report(Progress::PhaseStart { name: "Placement" });
        reporter.report(Progress::RangeStart { range: 4..5 });
        reporter.report(Progress::AtomPlaced {
            index: 4,
            attempts: 2,
        });
        reporter.report(Progress::RangeFinish {
            placed: 1,
            rejections: 1,
        });
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["Placement", "range 4..5", "atom 4/2", "placed 1/1"]
        );
    }
}
