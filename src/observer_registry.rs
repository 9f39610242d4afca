use std::fmt::{Debug, Formatter};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Changes made while a notification pass runs are applied in request order once the outermost pass completes.
pub struct ObserverRegistry<O: ?Sized, T> {
    inner: Mutex<Inner<O, T>>,
    deliver: fn(&O, &T),
}

struct Inner<O: ?Sized, T> {
    observers: Vec<Arc<O>>,
    passes: usize,
    pending: Vec<PendingChange<O, T>>,
}

enum PendingChange<O: ?Sized, T> {
    Add { observer: Arc<O>, replay: Option<T> },
    Remove(Arc<O>),
}

impl<O: ?Sized, T> ObserverRegistry<O, T> {
    pub fn new(deliver: fn(&O, &T)) -> Self {
        ObserverRegistry {
            inner: Mutex::new(Inner {
                observers: Vec::new(),
                passes: 0,
                pending: Vec::new(),
            }),
            deliver,
        }
    }

    pub fn add(&self, observer: Arc<O>, replay: Option<T>) {
        {
            let mut inner = self.lock();
            if inner.passes > 0 {
                trace!("Deferring observer registration until the notification pass completes");
                inner.pending.push(PendingChange::Add { observer, replay });
                return;
            }

            if inner.observers.iter().any(|registered| same_observer(registered, &observer)) {
                trace!("Observer is already registered");
                return;
            }

            inner.observers.push(observer.clone());
        }

        if let Some(value) = replay {
            self.run_pass(vec![observer], |observer| (self.deliver)(observer, &value));
        }
    }

    pub fn remove(&self, observer: &Arc<O>) {
        let mut inner = self.lock();
        if inner.passes > 0 {
            trace!("Deferring observer removal until the notification pass completes");
            inner.pending.push(PendingChange::Remove(observer.clone()));
            return;
        }

        inner.observers.retain(|registered| !same_observer(registered, observer));
    }

    pub fn notify_all(&self, value: &T) {
        self.notify_each(|observer| (self.deliver)(observer, value));
    }

    pub fn notify_each(&self, f: impl Fn(&O)) {
        let observers = self.lock().observers.clone();
        self.run_pass(observers, f);
    }

    pub fn len(&self) -> usize {
        self.lock().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn run_pass(&self, observers: Vec<Arc<O>>, f: impl Fn(&O)) {
        {
            let _pass = Pass::enter(self);
            for observer in &observers {
                f(&**observer);
            }
        }

        let pending = {
            let mut inner = self.lock();
            if inner.passes > 0 {
                return;
            }
            mem::take(&mut inner.pending)
        };

        for change in pending {
            match change {
                PendingChange::Add { observer, replay } => self.add(observer, replay),
                PendingChange::Remove(observer) => self.remove(&observer),
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<O, T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Pass<'a, O: ?Sized, T> {
    registry: &'a ObserverRegistry<O, T>,
}

impl<'a, O: ?Sized, T> Pass<'a, O, T> {
    fn enter(registry: &'a ObserverRegistry<O, T>) -> Self {
        registry.lock().passes += 1;
        Pass { registry }
    }
}

impl<O: ?Sized, T> Drop for Pass<'_, O, T> {
    fn drop(&mut self) {
        self.registry.lock().passes -= 1;
    }
}

impl<O: ?Sized, T> Debug for ObserverRegistry<O, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ObserverRegistry")
            .field("observers", &inner.observers.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

fn same_observer<O: ?Sized>(a: &Arc<O>, b: &Arc<O>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}
