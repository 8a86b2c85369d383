//! Module `telemetry` is for handling logging and tracing.
//! It provides two funcionalities:
//! - build a subscriber with the configured format, level and sink.
//! - install it as the global logger.

use anyhow::Context;
use is_terminal::IsTerminal;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    EnvFilter, Registry,
};

/// Name stamped on every bunyan record.
pub const APP_NAME: &str = "cron_ack";

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggerFormat {
    /// Single line, no timestamp or target. Handy under a platform that stamps lines itself.
    Compact,
    Full,
    /// Multi-line, for local development.
    Pretty,
    Json,
    /// Bunyan JSON, one record per event. Span lifecycle records are not written.
    Bunyan,
}

/// Where formatted log lines end up: stdout, stderr, `std::io::sink`, or a test buffer.
/// Colours are only enabled through [`LoggerOutbound::stdout`] on a terminal.
pub struct LoggerOutbound<W> {
    make_writer: W,
    ansi: bool,
}

impl LoggerOutbound<fn() -> std::io::Stdout> {
    /// Stdout, coloured only when it is attached to a terminal.
    pub fn stdout() -> Self {
        Self {
            make_writer: std::io::stdout,
            ansi: std::io::stdout().is_terminal(),
        }
    }
}

impl<W> LoggerOutbound<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    pub fn new(make_writer: W) -> Self {
        Self {
            make_writer,
            ansi: false,
        }
    }

    fn fmt_layer_full<S>(self) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        tracing_subscriber::fmt::Layer::new()
            .with_ansi(self.ansi)
            .with_writer(self.make_writer)
    }

    fn fmt_layer_pretty<S>(self) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        tracing_subscriber::fmt::Layer::new()
            .with_ansi(self.ansi)
            .with_writer(self.make_writer)
            .pretty()
    }

    fn fmt_layer_json<S>(self) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        tracing_subscriber::fmt::Layer::new()
            .with_writer(self.make_writer)
            .json()
    }

    fn fmt_layer_compact<S>(self) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        tracing_subscriber::fmt::Layer::new()
            .with_ansi(self.ansi)
            .with_writer(self.make_writer)
            .compact()
            .without_time()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
    }

    fn fmt_layer_bunyan<S>(self) -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        // span open/close records are dropped, only events reach the sink
        BunyanFormattingLayer::new(APP_NAME.into(), self.make_writer)
            .with_filter(filter_fn(|metadata| metadata.is_event()))
    }
}

/// Get the subscriber for the logger.
/// - `env_filter` is the fallback directive when `RUST_LOG` is unset,
///   e.g. "info" or "cron_ack=debug".
/// - `format` picks the line layout, see [`LoggerFormat`].
/// - `output` is where the log will be written to.
pub fn get_subscriber<Sink>(
    env_filter: String,
    format: LoggerFormat,
    output: LoggerOutbound<Sink>,
) -> Box<dyn Subscriber + Send + Sync>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    build_subscriber(env_filter, format, output)
}

/// Like [`get_subscriber`], with the filter fixed by the caller and `RUST_LOG` ignored.
pub fn build_subscriber<Sink>(
    env_filter: EnvFilter,
    format: LoggerFormat,
    output: LoggerOutbound<Sink>,
) -> Box<dyn Subscriber + Send + Sync>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter_layer = Registry::default().with(env_filter);

    match format {
        LoggerFormat::Compact => Box::new(filter_layer.with(output.fmt_layer_compact())),
        LoggerFormat::Full => Box::new(filter_layer.with(output.fmt_layer_full())),
        LoggerFormat::Pretty => Box::new(filter_layer.with(output.fmt_layer_pretty())),
        LoggerFormat::Json => Box::new(filter_layer.with(output.fmt_layer_json())),
        LoggerFormat::Bunyan => Box::new(
            filter_layer
                .with(JsonStorageLayer)
                .with(output.fmt_layer_bunyan()),
        ),
    }
}

/// Install the subscriber globally and bridge `log` records into it.
/// Can only succeed once per process.
pub fn init_subscriber<S>(subscriber: S) -> anyhow::Result<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    LogTracer::init().context("Failed to set logger")?;
    set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}
