use serde::Serialize;
use warp::reject;

use crate::errors::CallCenterError;

/// A failed request: which operation failed, and why.
#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: CallCenterError,
}

impl Rejection {
    pub fn new(context: Context, error: CallCenterError) -> Self {
        Rejection { context, error }
    }

    /// The body sent to the client, if the error warrants one.
    pub fn body(&self) -> Option<ErrorBody> {
        use CallCenterError::*;

        match &self.error {
            Validation(..) | MalformedBody { .. } => Some(ErrorBody {
                error: format!("{}", self.error),
            }),
            _ => None,
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub(crate) error: String,
}

/// Identifies the operation that failed, for the logs.
#[derive(Clone, Debug)]
pub enum Context {
    Create,
    Recording { id: String },
    Retrieve { id: String },
    Update { id: String },
}

impl Context {
    pub fn create() -> Context {
        Context::Create
    }

    pub fn recording(id: String) -> Context {
        Context::Recording { id }
    }

    pub fn retrieve(id: String) -> Context {
        Context::Retrieve { id }
    }

    pub fn update(id: String) -> Context {
        Context::Update { id }
    }
}
