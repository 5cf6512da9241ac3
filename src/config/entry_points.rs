// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A type-safe wrapper for port graph entry points - wired ports whose
/// consumed event no other active port produces.
///
/// Entry points are where an orchestrator starts driving an entity: their
/// events arrive from outside the model's own port graph.
///
/// # Examples
///
/// ```
/// use entity_mixins::config::EntryPoints;
///
/// let mut entry_points = EntryPoints::new();
/// entry_points.add("authorizePayment".to_string());
/// entry_points.add("fillOrder".to_string());
///
/// assert!(entry_points.contains("fillOrder"));
/// let ports: Vec<String> = entry_points.into();
/// assert_eq!(ports, vec!["authorizePayment", "fillOrder"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPoints(pub Vec<String>);

impl EntryPoints {
    /// Create a new empty entry point list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an entry point
    pub fn add(&mut self, port: String) {
        self.0.push(port);
    }

    pub fn contains(&self, port: &str) -> bool {
        self.0.iter().any(|p| p == port)
    }

    /// Get iterator over entry points
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for EntryPoints {
    fn from(ports: Vec<String>) -> Self {
        Self(ports)
    }
}

impl From<EntryPoints> for Vec<String> {
    fn from(value: EntryPoints) -> Self {
        value.0
    }
}
