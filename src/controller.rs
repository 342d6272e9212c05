//! Top-level front-end controller.
//!
//! Owns the session state and the store. Every network response is folded
//! into the observable cells so whatever is subscribed sees the outcome.

use chrono::NaiveDate;

use crate::error::{AppError, StoreError};
use crate::state::SessionState;
use crate::store::{NewPrediction, Prediction, PredictionStore, sort_predictions};
use crate::utils::debug_log;

pub(crate) struct Controller<S> {
    store: S,
    state: SessionState,
}

impl<S: PredictionStore> Controller<S> {
    pub(crate) fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::new(),
        }
    }

    pub(crate) fn state(&self) -> &SessionState {
        &self.state
    }

    /// Adopt `token` as this session's id. A different token resets the
    /// submitted flag until the next refresh says otherwise.
    pub(crate) fn begin_session(&self, token: String) {
        if self.state.user_session.with(|s| s.as_deref() != Some(token.as_str())) {
            self.state.has_submitted.set(false);
        }
        debug_log!("session {token}");
        self.state.user_session.set(Some(token));
    }

    /// Fetch every prediction and recompute whether this session has one
    pub(crate) fn refresh(&self) -> Result<(), StoreError> {
        let mut rows = self.store.fetch_all()?;
        sort_predictions(&mut rows);
        debug_log!("fetched {} predictions", rows.len());
        let submitted = self
            .state
            .user_session
            .with(|s| s.as_deref().is_some_and(|s| rows.iter().any(|p| p.belongs_to(s))));
        self.state.predictions.set(rows);
        if submitted {
            self.state.has_submitted.set(true);
        }
        Ok(())
    }

    /// Submit this session's one prediction.
    ///
    /// Fails with [`StoreError::AlreadySubmitted`] without a request when
    /// the state already knows about a submission; a uniqueness conflict
    /// from the service marks the session as submitted too.
    pub(crate) fn submit(&self, name: &str, date: NaiveDate) -> Result<Prediction, AppError> {
        let session = self.state.user_session.get().ok_or(AppError::NoSession)?;
        if self.state.has_submitted.get() {
            return Err(StoreError::AlreadySubmitted.into());
        }
        let new = NewPrediction::new(name, date, &session)?;
        match self.store.insert(&new) {
            Ok(row) => {
                let inserted = row.clone();
                self.state.predictions.update(|current| {
                    let mut next = current.clone();
                    next.push(inserted);
                    sort_predictions(&mut next);
                    next
                });
                self.state.has_submitted.set(true);
                Ok(row)
            }
            Err(err) => {
                if err.is_already_submitted() {
                    self.state.has_submitted.set(true);
                }
                Err(err.into())
            }
        }
    }

    /// This session's row among the fetched predictions, if any
    pub(crate) fn own_prediction(&self) -> Option<Prediction> {
        let session = self.state.user_session.get()?;
        self.state
            .predictions
            .with(|rows| rows.iter().find(|p| p.belongs_to(&session)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// In-memory stand-in enforcing the same unique constraint
    #[derive(Default)]
    struct MemoryStore {
        rows: RefCell<Vec<Prediction>>,
        fail_next: Cell<bool>,
        inserts: Cell<usize>,
    }

    impl MemoryStore {
        fn with_rows(rows: Vec<Prediction>) -> Self {
            Self {
                rows: RefCell::new(rows),
                ..Self::default()
            }
        }
    }

    impl PredictionStore for &MemoryStore {
        fn fetch_all(&self) -> Result<Vec<Prediction>, StoreError> {
            if self.fail_next.replace(false) {
                return Err(StoreError::Transient("connection reset".into()));
            }
            Ok(self.rows.borrow().clone())
        }

        fn insert(&self, new: &NewPrediction) -> Result<Prediction, StoreError> {
            self.inserts.set(self.inserts.get() + 1);
            if self.fail_next.replace(false) {
                return Err(StoreError::Transient("timed out".into()));
            }
            let mut rows = self.rows.borrow_mut();
            if rows.iter().any(|p| p.belongs_to(new.user_session())) {
                return Err(StoreError::AlreadySubmitted);
            }
            let row = Prediction {
                id: rows.len() as i64 + 1,
                name: new.name().to_string(),
                prediction_date: new.prediction_date(),
                created_at: Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap(),
                user_session: Some(new.user_session().to_string()),
            };
            rows.push(row.clone());
            Ok(row)
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(id: i64, name: &str, date: NaiveDate, session: &str) -> Prediction {
        Prediction {
            id,
            name: name.to_string(),
            prediction_date: date,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            user_session: Some(session.to_string()),
        }
    }

    #[test]
    fn refresh_orders_rows_and_detects_own_submission() {
        let store = MemoryStore::with_rows(vec![
            row(1, "late", ymd(2025, 11, 1), "other"),
            row(2, "mine", ymd(2025, 3, 1), "me"),
        ]);
        let controller = Controller::new(&store);
        controller.begin_session("me".to_string());
        controller.refresh().unwrap();
        let names: Vec<String> = controller
            .state()
            .predictions
            .with(|rows| rows.iter().map(|p| p.name.clone()).collect());
        assert_eq!(names, vec!["mine", "late"]);
        assert!(controller.state().has_submitted.get());
        assert_eq!(controller.own_prediction().unwrap().id, 2);
    }

    #[test]
    fn submit_updates_state_and_notifies() {
        let store = MemoryStore::default();
        let controller = Controller::new(&store);
        let flips = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&flips);
        controller
            .state()
            .has_submitted
            .subscribe(move |v| sink.borrow_mut().push(*v));

        controller.begin_session("s1".to_string());
        let saved = controller.submit("Ada", ymd(2025, 7, 2)).unwrap();
        assert_eq!(saved.name, "Ada");
        assert!(controller.state().predictions.with(|rows| rows.len() == 1));
        assert_eq!(*flips.borrow(), vec![false, true]);
    }

    #[test]
    fn second_submit_short_circuits() {
        let store = MemoryStore::default();
        let controller = Controller::new(&store);
        controller.begin_session("s1".to_string());
        controller.submit("Ada", ymd(2025, 7, 2)).unwrap();
        let err = controller.submit("Ada again", ymd(2025, 8, 2)).unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::AlreadySubmitted)));
        assert_eq!(store.inserts.get(), 1);
    }

    #[test]
    fn service_conflict_marks_session_submitted() {
        let store = MemoryStore::with_rows(vec![row(1, "earlier", ymd(2025, 5, 5), "s1")]);
        let controller = Controller::new(&store);
        // no refresh, so the state does not know about the existing row yet
        controller.begin_session("s1".to_string());
        let err = controller.submit("Ada", ymd(2025, 7, 2)).unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::AlreadySubmitted)));
        assert!(controller.state().has_submitted.get());
    }

    #[test]
    fn transient_failure_leaves_state_alone() {
        let store = MemoryStore::default();
        store.fail_next.set(true);
        let controller = Controller::new(&store);
        controller.begin_session("s1".to_string());
        let err = controller.submit("Ada", ymd(2025, 7, 2)).unwrap_err();
        match err {
            AppError::Store(e) => assert!(e.is_transient()),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!controller.state().has_submitted.get());
        assert!(controller.submit("Ada", ymd(2025, 7, 2)).is_ok());
    }

    #[test]
    fn refresh_failure_keeps_previous_rows() {
        let store = MemoryStore::with_rows(vec![row(1, "a", ymd(2025, 5, 5), "x")]);
        let controller = Controller::new(&store);
        controller.begin_session("me".to_string());
        controller.refresh().unwrap();
        store.fail_next.set(true);
        assert!(controller.refresh().unwrap_err().is_transient());
        assert!(controller.state().predictions.with(|rows| rows.len() == 1));
    }

    #[test]
    fn submit_without_session_fails() {
        let store = MemoryStore::default();
        let controller = Controller::new(&store);
        assert!(matches!(
            controller.submit("Ada", ymd(2025, 7, 2)),
            Err(AppError::NoSession)
        ));
    }

    #[test]
    fn invalid_name_never_reaches_store() {
        let store = MemoryStore::default();
        let controller = Controller::new(&store);
        controller.begin_session("s1".to_string());
        assert!(matches!(
            controller.submit("   ", ymd(2025, 7, 2)),
            Err(AppError::InvalidName { .. })
        ));
        assert_eq!(store.inserts.get(), 0);
    }

    #[test]
    fn switching_session_resets_submitted_flag() {
        let store = MemoryStore::default();
        let controller = Controller::new(&store);
        controller.begin_session("s1".to_string());
        controller.submit("Ada", ymd(2025, 7, 2)).unwrap();
        controller.begin_session("s2".to_string());
        assert!(!controller.state().has_submitted.get());
        controller.begin_session("s2".to_string());
        assert_eq!(controller.state().user_session.get().as_deref(), Some("s2"));
    }
}
