//! Nullable content directory: a fixed map of content to instructor.

use std::collections::HashMap;
use std::sync::Mutex;
use tribunal_access::ContentDirectory;
use tribunal_types::{AccountId, ContentId};

#[derive(Default)]
pub struct NullContentDirectory {
    instructors: Mutex<HashMap<ContentId, AccountId>>,
}

impl NullContentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instructor` as the owner of `content`.
    pub fn publish(&self, content: ContentId, instructor: &AccountId) {
        self.instructors
            .lock()
            .unwrap()
            .insert(content, instructor.clone());
    }
}

impl ContentDirectory for NullContentDirectory {
    fn instructor_of(&self, content: ContentId) -> Option<AccountId> {
        self.instructors.lock().unwrap().get(&content).cloned()
    }
}
