//! Per-call scope guard.
//!
//! Every aggregate call runs inside a `CallGuard`. Dropping the guard
//! closes an auto-close session and then resets the statement, on the
//! success path and on every early return.

use std::ops::{Deref, DerefMut};

use log::debug;

use crate::session::{Session, SessionState};

pub(crate) struct CallGuard<'c, 'e> {
    session: &'c mut Session<'e>,
}

impl<'c, 'e> CallGuard<'c, 'e> {
    /// Mark the session in flight. A closed session stays closed.
    pub(crate) fn enter(session: &'c mut Session<'e>) -> Self {
        if session.state == SessionState::Ready {
            session.state = SessionState::InFlight;
        }
        Self { session }
    }
}

impl<'e> Deref for CallGuard<'_, 'e> {
    type Target = Session<'e>;

    fn deref(&self) -> &Self::Target {
        &*self.session
    }
}

impl<'e> DerefMut for CallGuard<'_, 'e> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.session
    }
}

impl Drop for CallGuard<'_, '_> {
    fn drop(&mut self) {
        let session = &mut *self.session;

        if session.auto_close {
            debug!("session {}: auto-closing", session.id());
            session.close_quietly();
        }

        session.statement.reset();

        if session.state == SessionState::InFlight {
            session.state = SessionState::Ready;
        }
    }
}
