use tracing::{error, info};

use crate::ports::{StatusSink, StatusStyle};

/// Status sink that surfaces notifications on the terminal and in the
/// structured log. Stands in for the HUD/toast surface of a host
/// environment; swap the sink to integrate a real one.
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn notify(&self, style: StatusStyle, title: &str, message: Option<&str>) {
        match style {
            StatusStyle::InProgress => match message {
                Some(msg) => info!(target: "murmur::status", "{}: {}", title, msg),
                None => info!(target: "murmur::status", "{}", title),
            },
            StatusStyle::Success => match message {
                Some(msg) => info!(target: "murmur::status", "{}: {}", title, msg),
                None => info!(target: "murmur::status", "{}", title),
            },
            StatusStyle::Failure => match message {
                Some(msg) => error!(target: "murmur::status", "{}: {}", title, msg),
                None => error!(target: "murmur::status", "{}", title),
            },
        }
    }
}
