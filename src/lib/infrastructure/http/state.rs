//! Application state module

use std::{fmt, sync::Arc};

use crate::domain::{applications::ApplicationService, uploads::FileStore};

/// Global application state
#[derive(Clone)]
pub struct AppState<A: ApplicationService, S: FileStore> {
    /// Application dispatch service
    pub applications: Arc<A>,

    /// Where uploaded resumes are written
    pub uploads: Arc<S>,
}

/// Implementation of the application state
impl<A, S> AppState<A, S>
where
    A: ApplicationService,
    S: FileStore,
{
    /// Create a new application state
    pub fn new(applications: A, uploads: S) -> Self {
        Self {
            applications: Arc::new(applications),
            uploads: Arc::new(uploads),
        }
    }
}

impl<A, S> fmt::Debug for AppState<A, S>
where
    A: ApplicationService,
    S: FileStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("applications", &"ApplicationService")
            .field("uploads", &"FileStore")
            .finish()
    }
}
