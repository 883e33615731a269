//! Logging event sink.
//!
//! The dispatcher reports every state transition through [`EventSink`];
//! this sink renders them as structured log lines so the serial console
//! tells the whole story of a boot.

use log::{info, warn};

use crate::app::events::{AppEvent, ChangeSource};
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::Started { on } => {
                info!("STATE | boot complete, relay {}", on_str(on));
            }
            AppEvent::RelayChanged { on, source } => {
                let src = match source {
                    ChangeSource::Button => "button",
                    ChangeSource::Remote => "remote",
                };
                info!("STATE | relay {} ({})", on_str(on), src);
            }
            AppEvent::Identify => {
                info!("STATE | identify requested");
            }
            AppEvent::FactoryResetRequested => {
                warn!("STATE | factory reset requested");
            }
        }
    }
}

fn on_str(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
