use std::cell::Cell;
use std::collections::HashMap;
use std::fmt::Write;
use std::io::stdout;
use std::num::NonZeroU64;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use thread_local::ThreadLocal;
use tracing::field::{Field, Visit};
use tracing::span::Id;
use tracing::{span, Event, Level, Metadata, Subscriber};
use tracing_core::Interest;

struct SpanState {
    parent: Option<Id>,
    /// how many handles to the span currently exist; the span is removed
    /// from the span map once this reaches zero
    reference_counter: AtomicUsize,
    /// span name, followed by the recorded fields
    description: String,
    metadata: &'static Metadata<'static>,
    /// time (relative to the creation of the subscriber) when the span was entered
    entered_timestamp: AtomicU64,
    /// depth of the span in the span tree
    level: usize
}

///
/// A [`Subscriber`] that prints the tree of spans of a computation up to some
/// depth, together with the time spent in each printed span. Only events whose
/// level is within the configured range are printed.
///
/// The output is written using `print!()`, thus it is captured in tests.
///
pub struct LogAlgorithmSubscriber {
    span_ids: AtomicU64,
    span_map: RwLock<HashMap<Id, SpanState>>,
    current_span: ThreadLocal<Cell<Option<NonZeroU64>>>,
    default_instant: Instant,
    interested_level: RangeInclusive<Level>,
    max_depth: usize
}

impl LogAlgorithmSubscriber {

    fn create(levels: RangeInclusive<Level>, max_depth: usize) -> Self {
        Self {
            span_ids: AtomicU64::new(1),
            span_map: RwLock::new(HashMap::new()),
            current_span: ThreadLocal::new(),
            default_instant: Instant::now(),
            interested_level: levels,
            max_depth: max_depth
        }
    }

    ///
    /// Installs the subscriber as global default, logging events and spans whose
    /// level is in `levels`, up to a span depth of `max_depth`.
    ///
    /// Panics if a global default subscriber has already been set.
    ///
    pub fn init(levels: RangeInclusive<Level>, max_depth: usize) {
        tracing::subscriber::set_global_default(Self::create(levels, max_depth)).unwrap()
    }

    ///
    /// Installs the subscriber as global default with settings suitable for tests,
    /// unless a global default has already been set, in which case this does nothing.
    ///
    pub fn init_test() {
        _ = tracing::subscriber::set_global_default(Self::create(Level::INFO..=Level::INFO, 2))
    }

    fn span_map<'a>(&'a self) -> RwLockReadGuard<'a, HashMap<Id, SpanState>> {
        self.span_map.read().unwrap()
    }

    fn span_map_mut<'a>(&'a self) -> RwLockWriteGuard<'a, HashMap<Id, SpanState>> {
        self.span_map.write().unwrap()
    }

    fn current_span_id(&self) -> Option<Id> {
        self.current_span.get_or(|| Cell::new(None)).get().map(Id::from_non_zero_u64)
    }
}

struct FieldRecorder {
    message: Option<String>,
    fields: Option<String>
}

impl FieldRecorder {

    fn new() -> Self {
        Self { message: None, fields: None }
    }

    fn into_string(self) -> String {
        match (self.message, self.fields) {
            (Some(message), Some(fields)) => format!("{}({})", message, fields),
            (Some(message), None) => format!("{}.", message),
            (None, Some(fields)) => format!("({})", fields),
            (None, None) => ".".to_owned()
        }
    }
}

impl Visit for FieldRecorder {

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else if let Some(fields) = &mut self.fields {
            _ = write!(fields, ", {}={:?}", field.name(), value);
        } else {
            self.fields = Some(format!("{}={:?}", field.name(), value));
        }
    }
}

impl Subscriber for LogAlgorithmSubscriber {

    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if self.interested_level.contains(metadata.level()) {
            Interest::always()
        } else {
            Interest::never()
        }
    }

    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.interested_level.contains(metadata.level())
    }

    fn current_span(&self) -> tracing_core::span::Current {
        match self.current_span_id() {
            Some(id) => match self.span_map().get(&id) {
                Some(state) => tracing_core::span::Current::new(id, state.metadata),
                None => tracing_core::span::Current::none()
            },
            None => tracing_core::span::Current::none()
        }
    }

    fn new_span(&self, span: &span::Attributes<'_>) -> Id {
        let id = Id::from_u64(self.span_ids.fetch_add(1, Ordering::Relaxed));
        let parent = span.parent().cloned().or_else(|| self.current_span_id());
        let mut spans = self.span_map_mut();
        let level = parent.as_ref().and_then(|id| spans.get(id)).map(|state| state.level + 1).unwrap_or(0);

        let mut description = FieldRecorder::new();
        span.record(&mut description);
        description.message = Some(span.metadata().name().to_owned());

        spans.insert(id.clone(), SpanState {
            parent: parent,
            level: level,
            metadata: span.metadata(),
            reference_counter: AtomicUsize::new(1),
            description: description.into_string(),
            entered_timestamp: AtomicU64::new(0)
        });
        return id;
    }

    fn record(&self, _span: &Id, _values: &span::Record<'_>) {
        // fields are only recorded at span creation
    }

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {
        // we only care about parent spans currently
    }

    fn event(&self, event: &Event<'_>) {
        let span_map = self.span_map();
        let depth = self.current_span_id().and_then(|id| span_map.get(&id)).map(|state| state.level + 1).unwrap_or(0);
        if depth <= self.max_depth {
            let mut description = FieldRecorder::new();
            event.record(&mut description);
            print!("{}", description.into_string());
            _ = std::io::Write::flush(&mut stdout());
        }
    }

    fn enter(&self, span: &Id) {
        self.current_span.get_or(|| Cell::new(None)).set(Some(span.into_non_zero_u64()));
        let span_map = self.span_map();
        if let Some(entered_span) = span_map.get(span) {
            if entered_span.level < self.max_depth {
                print!("{}", entered_span.description);
                _ = std::io::Write::flush(&mut stdout());
            } else if entered_span.level == self.max_depth {
                print!("{}...", entered_span.description);
                _ = std::io::Write::flush(&mut stdout());
            }
            entered_span.entered_timestamp.store(Instant::now().duration_since(self.default_instant).as_micros() as u64, Ordering::SeqCst);
        }
    }

    fn exit(&self, span: &Id) {
        let span_map = self.span_map();
        if let Some(exited_span) = span_map.get(span) {
            let entered_timestamp = exited_span.entered_timestamp.swap(0, Ordering::SeqCst);
            let time = (Instant::now().duration_since(self.default_instant).as_micros() as u64).saturating_sub(entered_timestamp);
            if exited_span.level <= self.max_depth {
                print!("done({}us)", time);
                if exited_span.level == 0 {
                    println!();
                }
                _ = std::io::Write::flush(&mut stdout());
            }
            self.current_span.get_or(|| Cell::new(None)).set(exited_span.parent.as_ref().map(|id| id.into_non_zero_u64()));
        }
    }

    fn clone_span(&self, id: &Id) -> Id {
        if let Some(state) = self.span_map().get(id) {
            _ = state.reference_counter.fetch_add(1, Ordering::Relaxed);
        }
        return id.clone();
    }

    fn try_close(&self, id: Id) -> bool {
        let remaining_handles = match self.span_map().get(&id) {
            Some(state) => state.reference_counter.fetch_sub(1, Ordering::Relaxed) - 1,
            None => return false
        };
        if remaining_handles == 0 {
            _ = self.span_map_mut().remove(&id);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
use tracing::{event, instrument};

#[cfg(test)]
#[instrument(skip_all, level = "info")]
fn traced_sum(values: &[u64]) -> u64 {
    event!(Level::INFO, len = values.len(), "summing");
    values.iter().sum()
}

#[test]
fn test_log_algorithm_subscriber() {
    LogAlgorithmSubscriber::init_test();
    assert_eq!(6, traced_sum(&[1, 2, 3]));
    assert_eq!(0, traced_sum(&[]));
}

#[test]
fn test_field_recorder() {
    let mut recorder = FieldRecorder::new();
    recorder.message = Some("factor".to_owned());
    assert_eq!("factor.", FieldRecorder { message: Some("factor".to_owned()), fields: None }.into_string());
    recorder.fields = Some("degree=3".to_owned());
    assert_eq!("factor(degree=3)", recorder.into_string());
}
