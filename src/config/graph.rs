// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The active port graph an external orchestrator drives.
//!
//! Only enabled ports take part. Edges run from the port producing an event to
//! every port consuming it. Outbound ports with no event wiring (persistence
//! calls, compensations such as `cancelShipment` and `refundPayment`) have no
//! edges; orchestration logic invokes them explicitly.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::config::{Direction, EntryPoints, EventChain, PortConfig, PortSpec};
use crate::errors::ValidationError;

#[derive(Debug, Clone)]
pub struct PortGraph {
    ports: Vec<PortSpec>,
    chain: EventChain,
}

impl PortGraph {
    pub fn from_config(config: &PortConfig) -> Self {
        let ports: Vec<PortSpec> = config.enabled().cloned().collect();

        let mut chain = EventChain::new();
        for producer in &ports {
            let Some(event) = &producer.produces_event else {
                continue;
            };
            for consumer in ports.iter().filter(|p| p.consumes_event.as_ref() == Some(event)) {
                chain.add_edge(&producer.name, &consumer.name);
            }
        }

        Self { ports, chain }
    }

    /// Enabled ports in declaration order.
    pub fn ports(&self) -> &[PortSpec] {
        &self.ports
    }

    pub fn port(&self, name: &str) -> Option<&PortSpec> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn edges(&self) -> &EventChain {
        &self.chain
    }

    /// Wired ports nothing in the graph feeds.
    pub fn entry_points(&self) -> EntryPoints {
        self.ports
            .iter()
            .filter(|p| p.is_wired() && !self.chain.has_producer(&p.name))
            .map(|p| p.name.clone())
            .collect::<Vec<_>>()
            .into()
    }

    /// Outbound ports with no event wiring, invoked by name rather than by
    /// event matching.
    pub fn explicit_ports(&self) -> Vec<&str> {
        self.ports
            .iter()
            .filter(|p| p.direction == Direction::Outbound && !p.is_wired())
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Response window of an active port. `None` when the port is unknown,
    /// disabled, or waits indefinitely.
    pub fn timeout(&self, name: &str) -> Option<Duration> {
        self.port(name).and_then(PortSpec::timeout)
    }

    /// Kahn's algorithm over the event chain; ties keep declaration order.
    pub fn topological_order(&self) -> Result<Vec<String>, ValidationError> {
        let mut in_degree: HashMap<&str, usize> = self.ports.iter().map(|p| (p.name.as_str(), 0)).collect();
        for (_, consumer) in self.chain.edges() {
            if let Some(degree) = in_degree.get_mut(consumer) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<&str> = self
            .ports
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| in_degree.get(name) == Some(&0))
            .collect();
        let mut order = Vec::with_capacity(self.ports.len());

        while let Some(name) = queue.pop_front() {
            order.push(name.to_string());
            for consumer in self.chain.consumers_of(name) {
                if let Some(degree) = in_degree.get_mut(consumer.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(consumer.as_str());
                    }
                }
            }
        }

        if order.len() < self.ports.len() {
            let remaining: Vec<String> = self
                .ports
                .iter()
                .filter(|p| !order.contains(&p.name))
                .map(|p| p.name.clone())
                .collect();
            return Err(ValidationError::CyclicEventChain { cycle: remaining });
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, ConfigFormat};

    const PORTS: &str = r#"
model: order
ports:
  - name: listen
    service: Event
    direction: inbound
  - name: save
    service: Persistence
    direction: outbound
  - name: validateAddress
    service: Address
    direction: outbound
    consumes_event: validateAddress
    produces_event: addressValidated
    enabled: false
  - name: fillOrder
    service: Inventory
    direction: outbound
    consumes_event: fillOrder
    produces_event: orderFilled
    timeout_ms: 440000000
  - name: shipOrder
    service: Shipping
    direction: outbound
    consumes_event: orderFilled
    produces_event: orderShipped
  - name: trackShipment
    service: Shipping
    direction: outbound
    consumes_event: orderShipped
  - name: refundPayment
    service: Payment
    direction: outbound
"#;

    fn graph() -> PortGraph {
        PortGraph::from_config(&parse_config(PORTS, ConfigFormat::Yaml).unwrap())
    }

    #[test]
    fn test_disabled_ports_are_excluded() {
        let graph = graph();
        assert!(graph.port("validateAddress").is_none());
        assert_eq!(graph.ports().len(), 6);
    }

    #[test]
    fn test_edges_follow_events() {
        let graph = graph();
        assert_eq!(graph.edges().consumers_of("fillOrder"), ["shipOrder".to_string()]);
        assert_eq!(graph.edges().consumers_of("shipOrder"), ["trackShipment".to_string()]);
        assert!(graph.edges().consumers_of("trackShipment").is_empty());
    }

    #[test]
    fn test_entry_points_and_explicit_ports() {
        let graph = graph();
        assert_eq!(Vec::<String>::from(graph.entry_points()), vec!["fillOrder"]);
        assert_eq!(graph.explicit_ports(), vec!["save", "refundPayment"]);
    }

    #[test]
    fn test_timeouts() {
        let graph = graph();
        assert_eq!(graph.timeout("fillOrder"), Some(Duration::from_millis(440_000_000)));
        assert_eq!(graph.timeout("shipOrder"), None);
        assert_eq!(graph.timeout("validateAddress"), None);
        assert_eq!(graph.timeout("nope"), None);
    }

    #[test]
    fn test_topological_order() {
        let order = graph().topological_order().unwrap();
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();

        assert_eq!(order.len(), 6);
        assert!(position("fillOrder") < position("shipOrder"));
        assert!(position("shipOrder") < position("trackShipment"));
    }

    #[test]
    fn test_topological_order_reports_cycle() {
        let cfg = parse_config(
            r#"
model: order
ports:
  - name: a
    service: S
    direction: outbound
    consumes_event: y
    produces_event: x
  - name: b
    service: S
    direction: outbound
    consumes_event: x
    produces_event: y
"#,
            ConfigFormat::Yaml,
        )
        .unwrap();

        let result = PortGraph::from_config(&cfg).topological_order();
        assert!(matches!(result, Err(ValidationError::CyclicEventChain { .. })));
    }
}
