//! Tracing setup and a layer that forwards funnel events to the host UI.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Installs the global fmt subscriber. `RUST_LOG` overrides `default_level`.
///
/// When `events` is given, a [`FunnelEventLayer`] is installed as well.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(default_level: &str, events: Option<FunnelEventLayer>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(events)
        .try_init();
    if result.is_err() {
        tracing::debug!("[Telemetry] Global subscriber already installed");
    }
}

/// Event forwarded to the host, e.g. to show a non-blocking banner.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FunnelEvent {
    pub target: String,
    pub level: String,
    pub message: String,
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

impl FunnelEvent {
    /// The bracketed component prefix of the message, e.g. `SwipeSession`.
    pub fn component(&self) -> Option<&str> {
        let rest = self.message.strip_prefix('[')?;
        rest.split_once(']').map(|(component, _)| component)
    }
}

/// Tracing layer sending events at or above a level to a channel.
pub struct FunnelEventLayer {
    sender: mpsc::UnboundedSender<FunnelEvent>,
    min_level: Level,
}

impl FunnelEventLayer {
    /// Forwards warnings and errors.
    pub fn new(sender: mpsc::UnboundedSender<FunnelEvent>) -> Self {
        Self {
            sender,
            min_level: Level::WARN,
        }
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }
}

impl<S> Layer<S> for FunnelEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Level ordering is inverted: ERROR < WARN < INFO.
        if *event.metadata().level() > self.min_level {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let funnel_event = FunnelEvent {
            target: event.metadata().target().to_string(),
            level: event.metadata().level().to_string(),
            message: fields
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody is listening any more.
        let _ = self.sender.send(funnel_event);
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(format!("{:?}", value)));
    }
}
