//! Open terminal sessions, keyed by a random id handed to the browser.
//!
//! The table is bounded: opening a session beyond the cap evicts the oldest
//! one. Sessions are discarded when the overlay closes.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

use super::session::TerminalSession;

#[derive(Default)]
struct Table {
    sessions: HashMap<Uuid, TerminalSession>,
    /// Creation order, oldest first.
    order: VecDeque<Uuid>,
}

pub struct TerminalSessions {
    table: Mutex<Table>,
    cap: usize,
}

impl TerminalSessions {
    pub fn new(cap: usize) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            cap: cap.max(1),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Table>, AppError> {
        self.table
            .lock()
            .map_err(|_| AppError::Web("terminal session lock poisoned".into()))
    }

    /// Open a fresh session and return its id and a snapshot of it.
    pub fn open(&self) -> Result<(Uuid, TerminalSession), AppError> {
        let id = Uuid::new_v4();
        let session = TerminalSession::new();
        let mut table = self.lock()?;
        while table.order.len() >= self.cap {
            let Some(oldest) = table.order.pop_front() else { break };
            table.sessions.remove(&oldest);
            debug!(session_id = %oldest, "terminal session evicted");
        }
        table.sessions.insert(id, session.clone());
        table.order.push_back(id);
        Ok((id, session))
    }

    /// Run `f` against session `id`. Returns `Ok(None)` for unknown ids.
    ///
    /// A session that ends up closed is removed once `f` returns.
    pub fn with<R>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut TerminalSession) -> R,
    ) -> Result<Option<R>, AppError> {
        let mut table = self.lock()?;
        let Some(session) = table.sessions.get_mut(id) else {
            return Ok(None);
        };
        let result = f(session);
        if session.is_closed() {
            table.sessions.remove(id);
            table.order.retain(|x| x != id);
            debug!(session_id = %id, "terminal session closed");
        }
        Ok(Some(result))
    }

    /// Drop session `id`. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> Result<bool, AppError> {
        let mut table = self.lock()?;
        table.order.retain(|x| x != id);
        Ok(table.sessions.remove(id).is_some())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|t| t.sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystems::terminal::session::CollectedLinks;

    #[test]
    fn open_and_use_session() {
        let reg = TerminalSessions::new(4);
        let (id, snapshot) = reg.open().unwrap();
        assert_eq!(snapshot.lines().len(), 2);

        let lines = reg
            .with(&id, |s| {
                s.submit("pwd", &mut CollectedLinks::default());
                s.lines().len()
            })
            .unwrap();
        assert_eq!(lines, Some(4));
    }

    #[test]
    fn unknown_id_is_none() {
        let reg = TerminalSessions::new(4);
        assert_eq!(reg.with(&Uuid::new_v4(), |_| ()).unwrap(), None);
        assert!(!reg.remove(&Uuid::new_v4()).unwrap());
    }

    #[test]
    fn exit_discards_session() {
        let reg = TerminalSessions::new(4);
        let (id, _) = reg.open().unwrap();
        reg.with(&id, |s| s.submit("exit", &mut CollectedLinks::default()))
            .unwrap();
        assert!(reg.is_empty());
        assert_eq!(reg.with(&id, |_| ()).unwrap(), None);
    }

    #[test]
    fn oldest_evicted_at_cap() {
        let reg = TerminalSessions::new(2);
        let (first, _) = reg.open().unwrap();
        let (second, _) = reg.open().unwrap();
        let (third, _) = reg.open().unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.with(&first, |_| ()).unwrap(), None);
        assert!(reg.with(&second, |_| ()).unwrap().is_some());
        assert!(reg.with(&third, |_| ()).unwrap().is_some());
    }

    #[test]
    fn remove_drops_session() {
        let reg = TerminalSessions::new(2);
        let (id, _) = reg.open().unwrap();
        assert!(reg.remove(&id).unwrap());
        assert!(reg.is_empty());
    }
}
