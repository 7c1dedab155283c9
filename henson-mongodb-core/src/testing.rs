//! Test doubles.

use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mongodb::Database;

use crate::auth::Authenticator;
use crate::credential::AuthCredential;
use crate::error::{MongoError, MongoResult};

/// Records authentication calls instead of talking to a server.
#[derive(Debug, Default)]
pub struct CountingAuthenticator {
    calls: AtomicUsize,
    last_identity: Mutex<Option<String>>,
    fail: bool,
}

impl CountingAuthenticator {
    /// An authenticator that rejects every attempt.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of authentication attempts.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Identity of the most recent attempt.
    pub fn last_identity(&self) -> Option<String> {
        self.last_identity.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl Authenticator for CountingAuthenticator {
    async fn authenticate(
        &self,
        _database: &Database,
        credential: &AuthCredential,
    ) -> MongoResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_identity.lock() {
            *last = credential.identity().map(str::to_string);
        }

        if self.fail {
            let denied = io::Error::new(io::ErrorKind::PermissionDenied, "bad credentials");
            return Err(MongoError::Driver(mongodb::error::Error::from(denied)));
        }
        Ok(())
    }
}
