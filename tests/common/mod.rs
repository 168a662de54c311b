//! Shared fixtures for integration tests.

#![allow(dead_code)]

use showreel::{EffectError, EffectHandlers, Script, Step, ViewId};
use std::time::Duration;

pub const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Everything the sequencer asked the host to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Text(String),
    Stream(String),
    Navigate(String),
    Effect(String, Option<String>),
    Finish,
    Interrupt,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn texts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Text(t) | Event::Stream(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Navigate(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EffectHandlers for Recorder {
    fn on_navigate(&mut self, view: &ViewId) -> Result<(), EffectError> {
        self.events.push(Event::Navigate(view.to_string()));
        Ok(())
    }

    fn on_text_partial(&mut self, text: &str) {
        self.events.push(Event::Text(text.to_string()));
    }

    fn on_stream_partial(&mut self, text: &str) {
        self.events.push(Event::Stream(text.to_string()));
    }

    fn on_effect(&mut self, name: &str, payload: Option<&str>) -> Result<(), EffectError> {
        self.events
            .push(Event::Effect(name.to_string(), payload.map(str::to_string)));
        Ok(())
    }

    fn on_finish(&mut self) {
        self.events.push(Event::Finish);
    }

    fn on_interrupt(&mut self) {
        self.events.push(Event::Interrupt);
    }
}

/// `[Wait(500), TypeText("hello", 50ms/unit), Navigate("B", 300), Finish]`
pub fn hello_script() -> Script {
    Script::new(vec![
        Step::wait(ms(500)),
        Step::type_text("hello", ms(300)).with_unit_delay(ms(50)),
        Step::navigate("B", ms(300)),
        Step::finish(),
    ])
}

/// A natural-language-to-SQL session, as a product page would play it.
pub fn sql_session_script() -> Script {
    Script::new(vec![
        Step::wait(ms(800)),
        Step::navigate("chat", ms(400)),
        Step::type_text("Which customers spent the most last quarter?", ms(2400)),
        Step::effect("submit-prompt", None, ms(600)),
        Step::stream_text(
            "Joining orders with customers and summing totals for Q3.",
            ms(1200),
        ),
        Step::navigate("sql", ms(500)),
        Step::type_text(
            "SELECT c.name, SUM(o.total) AS spent\nFROM orders o JOIN customers c ON c.id = o.customer_id\nGROUP BY c.name ORDER BY spent DESC LIMIT 5;",
            ms(4000),
        )
        .with_unit_delay(ms(25)),
        Step::effect("run-query", Some("q3-top-customers".to_string()), ms(900)),
        Step::navigate("results", ms(2500)),
        Step::finish(),
    ])
}
