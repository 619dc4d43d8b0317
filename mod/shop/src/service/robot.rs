use tracing::info;

use robostore_core::{STAMP_FORMAT, ServiceError, new_id, parse_stamp};
use robostore_sql::Value;

use crate::model::Robot;
use crate::model::robot::{derive_serial, is_valid_model};

use super::ShopService;

impl ShopService {
    /// Persist a new robot and run the notification dispatcher against it.
    ///
    /// Both intake paths (form and JSON API) funnel through here.
    /// `created` must be in the `YYYY-MM-DD HH:MM:SS` wire format.
    ///
    /// There is no transaction spanning the insert and the notification
    /// batch: a transport failure leaves the robot persisted and the
    /// request failed.
    pub fn create_robot(
        &self,
        model: &str,
        version: &str,
        created: &str,
    ) -> Result<Robot, ServiceError> {
        if !is_valid_model(model) {
            return Err(ServiceError::Validation("Invalid model.".into()));
        }

        let stamp = parse_stamp(created)
            .map_err(|_| ServiceError::Validation("Invalid date format.".into()))?;

        let record = Robot {
            id: new_id(),
            serial: derive_serial(model, version),
            model: model.to_string(),
            version: version.to_string(),
            created: stamp.format(STAMP_FORMAT).to_string(),
        };

        self.insert_record(
            "robots",
            &record.id,
            &record,
            &[
                ("serial", Value::Text(record.serial.clone())),
                ("model", Value::Text(record.model.clone())),
                ("version", Value::Text(record.version.clone())),
                ("created", Value::Text(record.created.clone())),
            ],
        )?;

        info!(serial = %record.serial, model = %record.model, "robot created");

        // First-time persistence only; an update path would pass false.
        self.notify_matching_orders(&record, true)?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use crate::service::testutil::test_service;
    use robostore_core::ServiceError;

    #[test]
    fn create_robot_derives_serial() {
        let (svc, _mailer) = test_service();
        let r = svc.create_robot("R2", "D2", "2024-01-15 09:30:00").unwrap();
        assert_eq!(r.serial, "R2-D2");
        assert_eq!(r.created, "2024-01-15 09:30:00");
    }

    #[test]
    fn invalid_model_is_rejected_before_persisting() {
        let (svc, mailer) = test_service();
        let err = svc.create_robot("BadModel", "v1", "2024-01-15 09:30:00").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid model.");

        // Nothing persisted, nothing sent.
        assert_eq!(svc.count_records("robots", &[]).unwrap(), 0);
        assert_eq!(mailer.sent_count(), 0);
    }

    #[test]
    fn model_check_is_case_sensitive() {
        let (svc, _mailer) = test_service();
        let err = svc.create_robot("r2", "D2", "2024-01-15 09:30:00").unwrap_err();
        assert_eq!(err.to_string(), "Invalid model.");
    }

    #[test]
    fn unparsable_date_is_rejected_before_persisting() {
        let (svc, _mailer) = test_service();
        let err = svc.create_robot("R2", "D2", "15.01.2024").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid date format.");
        assert_eq!(svc.count_records("robots", &[]).unwrap(), 0);
    }
}
