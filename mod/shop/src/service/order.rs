use robostore_core::{ListParams, ListResult, ServiceError, new_id, now_stamp};
use robostore_sql::Value;

use crate::model::{Order, OrderWithCustomer};

use super::ShopService;

impl ShopService {
    /// Create a standing request for a robot serial.
    ///
    /// The serial need not match any existing robot — matching happens
    /// later, when a robot with that serial is created.
    pub fn create_order(
        &self,
        customer_id: String,
        robot_serial: String,
    ) -> Result<Order, ServiceError> {
        if robot_serial.is_empty() {
            return Err(ServiceError::Validation("robot serial must not be empty".into()));
        }

        // The order owns a reference to the customer; refuse dangling ones.
        if self.get_customer(&customer_id).is_err() {
            return Err(ServiceError::Validation(format!(
                "customer '{customer_id}' does not exist"
            )));
        }

        let record = Order {
            id: new_id(),
            customer_id: customer_id.clone(),
            robot_serial: robot_serial.clone(),
            created_at: Some(now_stamp()),
        };

        self.insert_record(
            "orders",
            &record.id,
            &record,
            &[
                ("customer_id", Value::Text(customer_id)),
                ("robot_serial", Value::Text(robot_serial)),
                ("created_at", Value::Text(record.created_at.clone().unwrap_or_default())),
            ],
        )?;

        Ok(record)
    }

    /// List orders with the customer email preloaded via a join.
    pub fn list_orders(
        &self,
        params: &ListParams,
    ) -> Result<ListResult<OrderWithCustomer>, ServiceError> {
        let total = self.count_records("orders", &[])? as usize;

        let limit = params.limit.min(500);
        let rows = self
            .sql
            .query(
                "SELECT o.data AS data, c.email AS email
                 FROM orders o JOIN customers c ON c.id = o.customer_id
                 ORDER BY o.created_at DESC, o.id LIMIT ?1 OFFSET ?2",
                &[
                    Value::Integer(limit as i64),
                    Value::Integer(params.offset as i64),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| ServiceError::Internal("missing data column".into()))?;
            let order: Order =
                serde_json::from_str(data).map_err(|e| ServiceError::Internal(e.to_string()))?;
            let email = row
                .get_str("email")
                .ok_or_else(|| ServiceError::Internal("missing email column".into()))?;
            items.push(OrderWithCustomer {
                id: order.id,
                customer_id: order.customer_id,
                customer_email: email.to_string(),
                robot_serial: order.robot_serial,
                created_at: order.created_at,
            });
        }

        Ok(ListResult { items, total })
    }
}
