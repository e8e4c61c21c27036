//! Console output for learning runs.
//!
//! Provides a `tracing` layer that prints one colored line per learning
//! lifecycle event. Initialized by [`learn`](crate::learn) when the `console` feature
//! is enabled.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVES: &str = "ncs_learning=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter. Does nothing if another global subscriber
/// is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(LearningConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats learning events.
pub struct LearningConsoleLayer;

impl<S: Subscriber> Layer<S> for LearningConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("ncs") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = value.trim_matches('"').to_string();
        if field.name() == "event" {
            self.event = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("learn_start") => format_learn_start(v),
        Some("learn_end") => format_learn_end(v),
        Some("learn_failed") => format!(
            "{} {} {} Learning failed: {}",
            timestamp().bright_black(),
            "WARN".bright_yellow(),
            "[NCS]".bright_cyan(),
            v.get("reason").unwrap_or("unknown").bright_red()
        ),
        _ => String::new(),
    }
}

fn format_learn_start(v: &EventVisitor) -> String {
    let mut line = format!(
        "{} {} {} Learning started:",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[NCS]".bright_cyan()
    );
    for (label, field) in [
        ("criteria", "criteria_count"),
        ("categories", "categories_count"),
        ("alternatives", "alternatives_count"),
        ("coalitions", "coalitions_count"),
    ] {
        let _ = write!(line, " {} ({})", label, count(v, field).bright_yellow());
    }
    line
}

fn format_learn_end(v: &EventVisitor) -> String {
    let correct = count(v, "correct_count");
    let total = count(v, "alternatives_count");
    let classified = format!("{}/{}", correct, total);
    let classified = if correct == total {
        classified.bright_green().bold().to_string()
    } else {
        classified.yellow().to_string()
    };
    format!(
        "{} {} {} Learning ended: correctly classified ({}), roots ({}), solve time ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[NCS]".bright_cyan(),
        classified,
        count(v, "roots_count").white(),
        v.get("solve_ms")
            .and_then(|ms| ms.parse::<u64>().ok())
            .map_or_else(|| "?".to_string(), format_duration_ms)
            .yellow(),
    )
}

/// A numeric field with thousands separators, or `?` when missing.
fn count(v: &EventVisitor, field: &str) -> String {
    v.get(field)
        .and_then(|value| value.parse::<u64>().ok())
        .map_or_else(|| "?".to_string(), |n| n.to_formatted_string(&Locale::en))
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100_000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
