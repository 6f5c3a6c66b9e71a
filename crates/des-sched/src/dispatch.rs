//! The `Dispatcher` trait — the boundary between the kernel and its host.

use crate::Scheduler;

/// Host-side dispatch entry points.
///
/// The kernel stores handler references without ever looking at them.  When
/// an event fires it hands each reference back to the dispatcher through the
/// entry point matching the registration's [`Arity`](crate::Arity).
///
/// The implementing value is the *context owner*: it is moved into the
/// scheduler once, at construction, and passed as `&mut self` to every
/// invocation (init handlers included).  Each scheduler owns its own
/// dispatcher, so independent simulations never share callbacks.
///
/// # Reentrancy
///
/// Every entry point also receives the scheduler itself.  Handlers may call
/// `schedule`, `cancel`, `attach_handler`, `detach_handler` and `stop` on it
/// while the run loop is active.  The event being dispatched has already been
/// removed from the queue when its handlers run.
///
/// # Example
///
/// ```rust,ignore
/// struct Counter { fired: usize }
///
/// impl Dispatcher for Counter {
///     type Handler = fn(&mut Counter);
///     type Attachment = ();
///
///     fn call_empty(&mut self, _s: &mut Scheduler<Self>, h: &Self::Handler) {
///         h(self)
///     }
///     fn call_index(&mut self, _s: &mut Scheduler<Self>, h: &Self::Handler, _i: i64) {
///         h(self)
///     }
///     fn call_attachment(&mut self, _s: &mut Scheduler<Self>, h: &Self::Handler, _a: Option<&()>) {
///         h(self)
///     }
///     fn call_index_attachment(
///         &mut self, _s: &mut Scheduler<Self>, h: &Self::Handler, _i: i64, _a: Option<&()>,
///     ) {
///         h(self)
///     }
/// }
/// ```
pub trait Dispatcher: Sized {
    /// Opaque handler reference.  Cloned when a dispatch snapshot is taken.
    type Handler: Clone;

    /// Counted handle to host-owned event data, e.g. `Rc<T>`.
    type Attachment: Clone;

    /// Invoked for `Arity::Empty` registrations and for init handlers.
    fn call_empty(&mut self, sched: &mut Scheduler<Self>, handler: &Self::Handler);

    fn call_index(&mut self, sched: &mut Scheduler<Self>, handler: &Self::Handler, index: i64);

    fn call_attachment(
        &mut self,
        sched:      &mut Scheduler<Self>,
        handler:    &Self::Handler,
        attachment: Option<&Self::Attachment>,
    );

    fn call_index_attachment(
        &mut self,
        sched:      &mut Scheduler<Self>,
        handler:    &Self::Handler,
        index:      i64,
        attachment: Option<&Self::Attachment>,
    );
}
