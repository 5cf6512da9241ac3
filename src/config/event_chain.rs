// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

/// Newtype wrapper for the port event chain: producer port name -> the ports
/// consuming the event it produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventChain(pub BTreeMap<String, Vec<String>>);

impl EventChain {
    /// Create a new empty event chain
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record that `consumer` runs on the event `producer` emits
    pub fn add_edge(&mut self, producer: &str, consumer: &str) {
        self.0
            .entry(producer.to_string())
            .or_default()
            .push(consumer.to_string());
    }

    /// Ports consuming what `producer` emits
    pub fn consumers_of(&self, producer: &str) -> &[String] {
        self.0.get(producer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether any port produces the event `port` consumes
    pub fn has_producer(&self, port: &str) -> bool {
        self.0.values().any(|consumers| consumers.iter().any(|c| c == port))
    }

    /// All (producer, consumer) pairs
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(p, cs)| cs.iter().map(move |c| (p.as_str(), c.as_str())))
    }
}

impl From<BTreeMap<String, Vec<String>>> for EventChain {
    fn from(chain: BTreeMap<String, Vec<String>>) -> Self {
        Self(chain)
    }
}

impl From<EventChain> for BTreeMap<String, Vec<String>> {
    fn from(chain: EventChain) -> Self {
        chain.0
    }
}
