use adboard_client::ClientError;
use tokio::sync::watch;

/// One observable slice of loader state: `{data, loading, error}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loadable<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Loadable<T> {
    /// Marks a request in flight and clears the previous error.
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.error = None;
    }

    /// Records a failure. Previously loaded data stays visible.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Applies a request result.
    ///
    /// A 401 only ends the loading state: the client has already expired the
    /// session and is redirecting, so a second banner would be noise.
    pub fn apply(&mut self, result: Result<T, ClientError>, fallback: &str) {
        match result {
            Ok(data) => self.succeed(data),
            Err(ClientError::Unauthorized) => self.loading = false,
            Err(err) => {
                tracing::warn!(error = %err, "load failed");
                self.fail(err.user_message(fallback));
            }
        }
    }
}

impl<T: Default> Loadable<T> {
    /// Drops data and error alike.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Owner-side handle of a loader's state.
///
/// The loader mutates through [`StateCell::update`]; consumers either take
/// a [`StateCell::snapshot`] or [`StateCell::subscribe`] to changes.
#[derive(Debug)]
pub struct StateCell<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> StateCell<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Mutates the state in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    #[must_use]
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}

impl<S: Clone + Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
