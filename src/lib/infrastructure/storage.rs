//! File storage backends

pub mod local;
