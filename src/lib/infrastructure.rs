//! Infrastructure layer: HTTP, mail transports and file storage

pub mod email;
pub mod http;
pub mod storage;
