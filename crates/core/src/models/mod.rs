pub mod aligned;
pub mod alert;
pub mod burn;
pub mod dashboard;
pub mod runway;
pub mod settings;
pub mod transaction;
pub mod variance;
