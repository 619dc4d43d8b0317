//! Notification dispatcher — bridges robot creation to customer emails.
//!
//! When a robot is persisted for the first time, every order whose
//! requested serial equals the robot's serial gets one email. There is
//! no queue and no retry: sends run synchronously in query order, and a
//! transport failure aborts the remainder of the batch.

use tracing::{info, warn};

use robostore_core::ServiceError;
use robostore_sql::Value;

use crate::model::Robot;
use crate::service::ShopService;

/// Subject line, interpolated with model and version.
fn subject_for(robot: &Robot) -> String {
    format!("{}-{} снова в наличие!", robot.model, robot.version)
}

/// Message body, interpolated with model and version.
fn body_for(robot: &Robot) -> String {
    format!(
        "Добрый день!\nНедавно вы интересовались нашим роботом модели {}, версии {}. \
         Этот робот теперь в наличии. Если вам подходит этот вариант - пожалуйста, \
         свяжитесь с нами.",
        robot.model, robot.version
    )
}

impl ShopService {
    /// Notify every customer whose order requests `robot.serial`.
    ///
    /// `created` distinguishes first-time persistence from a re-save;
    /// only the former notifies. The serial comparison is exact and
    /// case-sensitive. A customer with two matching orders receives
    /// two separate emails.
    ///
    /// A [`ServiceError::Mail`] from the transport propagates to the
    /// caller and abandons the remaining sends in the batch.
    pub fn notify_matching_orders(
        &self,
        robot: &Robot,
        created: bool,
    ) -> Result<(), ServiceError> {
        if !created {
            return Ok(());
        }

        let rows = self
            .sql
            .query(
                "SELECT c.email AS email
                 FROM orders o JOIN customers c ON c.id = o.customer_id
                 WHERE o.robot_serial = ?1",
                &[Value::Text(robot.serial.clone())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if rows.is_empty() {
            return Ok(());
        }

        info!(
            serial = %robot.serial,
            matches = rows.len(),
            "notifying customers with pending orders"
        );

        let subject = subject_for(robot);
        let body = body_for(robot);

        for row in &rows {
            let email = row
                .get_str("email")
                .ok_or_else(|| ServiceError::Internal("missing email column".into()))?;
            self.mailer.send(email, &subject, &body).map_err(|e| {
                warn!(to = email, serial = %robot.serial, error = %e, "notification send failed");
                ServiceError::Mail(e.to_string())
            })?;
        }

        Ok(())
    }
}
