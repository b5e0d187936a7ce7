pub mod aggregation_service;
pub mod alert_service;
pub mod calendar_service;
pub mod classifier_service;
pub mod dashboard_service;
pub mod runway_service;
pub mod variance_service;
