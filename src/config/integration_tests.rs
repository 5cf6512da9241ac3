#[cfg(test)]
mod integration_tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::config::{
        load_and_validate_config, timeout_callbacks_without_timeout, BoundPorts, Direction, PortGraph,
    };
    use crate::entity::Entity;
    use crate::errors::{CallbackError, ConfigError};
    use crate::models::order::{order_callbacks, Order, OrderField};
    use crate::models::user::User;

    const ORDER_PORTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/order-ports.yaml");

    /// The shipped order port file loads and validates
    #[test]
    fn test_order_ports_yaml_loading() {
        let config = load_and_validate_config::<Order, _>(ORDER_PORTS).unwrap();

        assert_eq!(config.model, "order");
        assert_eq!(config.ports.len(), 13);
        assert_eq!(config.ports[0].name, "listen");
        assert_eq!(config.ports[0].direction, Direction::Inbound);
        assert!(!config.port("validateAddress").unwrap().enabled);
        assert_eq!(config.enabled().count(), 12);

        let ship = config.port("shipOrder").unwrap();
        assert_eq!(ship.on_timeout.as_deref(), Some("handleLatePickup"));
        assert_eq!(ship.timeout(), Some(Duration::from_millis(440_000_000)));
    }

    /// `completePayment` names a timeout callback but never times out
    #[test]
    fn test_order_ports_timeout_warning() {
        let config = load_and_validate_config::<Order, _>(ORDER_PORTS).unwrap();

        let unreachable: Vec<&str> = timeout_callbacks_without_timeout(&config)
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();

        assert_eq!(unreachable, vec!["completePayment"]);
    }

    /// Validating the order ports against another model fails
    #[test]
    fn test_order_ports_rejected_for_user_model() {
        let result = load_and_validate_config::<User, _>(ORDER_PORTS);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    /// Active graph shape of the order workflow
    #[test]
    fn test_order_port_graph() {
        let config = load_and_validate_config::<Order, _>(ORDER_PORTS).unwrap();
        let graph = PortGraph::from_config(&config);

        assert_eq!(
            Vec::<String>::from(graph.entry_points()),
            vec!["authorizePayment", "fillOrder"]
        );
        assert_eq!(
            graph.explicit_ports(),
            vec!["notify", "save", "find", "cancelShipment", "refundPayment"]
        );
        assert_eq!(graph.edges().consumers_of("fillOrder"), ["shipOrder".to_string()]);
        assert_eq!(graph.edges().consumers_of("verifyDelivery"), ["completePayment".to_string()]);
        assert_eq!(graph.timeout("verifyDelivery"), Some(Duration::from_secs(10)));
        assert_eq!(graph.timeout("listen"), None);

        let order = graph.topological_order().unwrap();
        let fulfillment: Vec<&str> = order
            .iter()
            .map(String::as_str)
            .filter(|name| {
                ["fillOrder", "shipOrder", "trackShipment", "verifyDelivery", "completePayment"].contains(name)
            })
            .collect();
        assert_eq!(
            fulfillment,
            vec!["fillOrder", "shipOrder", "trackShipment", "verifyDelivery", "completePayment"]
        );
    }

    /// Every callback the order ports reference is registered
    #[tokio::test]
    async fn test_order_ports_bind_and_dispatch() {
        let config = load_and_validate_config::<Order, _>(ORDER_PORTS).unwrap();
        let graph = PortGraph::from_config(&config);
        let ports = BoundPorts::bind(&graph, &order_callbacks()).unwrap();

        let entity: Entity<Order> = Entity::new([
            (OrderField::OrderNo, json!("A-100")),
            (OrderField::ShippingAddress, json!("1 Main St")),
            (OrderField::OrderStatus, json!("SHIPPING")),
        ]);

        let shipped = ports
            .handle("shipOrder", &entity, &json!({"trackingId": "TRK-1"}))
            .await
            .unwrap();
        assert_eq!(shipped.get(OrderField::TrackingId), Some(&json!("TRK-1")));

        let late = ports.handle_timeout("shipOrder", &entity).await.unwrap();
        assert_eq!(late.get(OrderField::OrderStatus), Some(&json!("CANCELED")));

        let not_ready = ports.handle("trackShipment", &entity, &json!({})).await;
        assert!(matches!(not_ready, Err(CallbackError::NotReady { .. })));

        let disabled = ports.handle("validateAddress", &entity, &json!({})).await;
        assert!(matches!(disabled, Err(CallbackError::UnknownPort(_))));
    }
}
