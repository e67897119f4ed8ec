//! Domain layer: application dispatch, mail and uploads

pub mod applications;
pub mod communication;
pub mod uploads;
