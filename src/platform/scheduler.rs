//! Tick scheduling
//!
//! One frame callback per display refresh, strictly serialized. Suspending
//! cancels any pending frame immediately so nothing fires against state that
//! has been torn down.

/// A cancellable repeating frame task
pub trait FrameScheduler {
    /// Start (or keep) requesting frames
    fn resume(&mut self);
    /// Stop requesting frames and cancel any pending one
    fn suspend(&mut self);
    fn is_active(&self) -> bool;
}

/// Scheduler driven by the caller, for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    active: bool,
    pub resumes: u32,
    pub suspends: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for ManualScheduler {
    fn resume(&mut self) {
        if !self.active {
            self.active = true;
            self.resumes += 1;
        }
    }

    fn suspend(&mut self) {
        if self.active {
            self.active = false;
            self.suspends += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameLoop;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::FrameScheduler;

    struct LoopInner {
        active: Cell<bool>,
        /// Pending requestAnimationFrame id
        handle: Cell<Option<i32>>,
        callback: RefCell<Box<dyn FnMut(f64)>>,
        closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    }

    impl LoopInner {
        fn request(&self) {
            if self.handle.get().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else { return };
            if let Some(closure) = self.closure.borrow().as_ref() {
                match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    Ok(id) => self.handle.set(Some(id)),
                    Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }

        fn cancel(&self) {
            if let Some(id) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    /// requestAnimationFrame loop. Dropping it cancels the pending frame.
    pub struct AnimationFrameLoop {
        inner: Rc<LoopInner>,
    }

    impl AnimationFrameLoop {
        /// `callback` receives the frame timestamp in milliseconds
        pub fn new(callback: impl FnMut(f64) + 'static) -> Self {
            let inner = Rc::new(LoopInner {
                active: Cell::new(false),
                handle: Cell::new(None),
                callback: RefCell::new(Box::new(callback)),
                closure: RefCell::new(None),
            });

            let weak: Weak<LoopInner> = Rc::downgrade(&inner);
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let Some(inner) = weak.upgrade() else { return };
                inner.handle.set(None);
                if !inner.active.get() {
                    return;
                }
                (inner.callback.borrow_mut())(time);
                // The callback may have suspended us
                if inner.active.get() {
                    inner.request();
                }
            });
            *inner.closure.borrow_mut() = Some(closure);

            Self { inner }
        }
    }

    impl FrameScheduler for AnimationFrameLoop {
        fn resume(&mut self) {
            if !self.inner.active.replace(true) {
                log::debug!("Frame loop resumed");
            }
            self.inner.request();
        }

        fn suspend(&mut self) {
            if self.inner.active.replace(false) {
                log::debug!("Frame loop suspended");
            }
            self.inner.cancel();
        }

        fn is_active(&self) -> bool {
            self.inner.active.get()
        }
    }

    impl Drop for AnimationFrameLoop {
        fn drop(&mut self) {
            self.inner.active.set(false);
            self.inner.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_counts_transitions() {
        let mut s = ManualScheduler::new();
        assert!(!s.is_active());

        s.resume();
        s.resume();
        assert!(s.is_active());
        assert_eq!(s.resumes, 1);

        s.suspend();
        s.suspend();
        assert!(!s.is_active());
        assert_eq!(s.suspends, 1);
    }
}
