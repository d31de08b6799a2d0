use std::sync::Arc;

use log::Logger;

use crate::dictionary::Dictionaries;
use crate::directory::Directory;
use crate::store::CallStore;
use crate::urls::Urls;

/// Everything a request handler needs, shared between requests.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub store: Arc<dyn CallStore>,
    pub dictionaries: Arc<Dictionaries>,
    pub directory: Arc<Directory>,
    pub urls: Arc<Urls>,
}

impl Environment {
    pub fn new(
        logger: Arc<Logger>,
        store: Arc<dyn CallStore>,
        dictionaries: Arc<Dictionaries>,
        directory: Arc<Directory>,
        urls: Arc<Urls>,
    ) -> Self {
        Self {
            logger,
            store,
            dictionaries,
            directory,
            urls,
        }
    }
}
