//! Handler arity classes and registry entries.

use des_core::HandlerId;

/// Which of the event's `(index, attachment)` pair a handler receives.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Arity {
    /// No event arguments.
    Empty,
    /// The event's `index` only.
    Index,
    /// The event's attachment only.
    Attachment,
    /// Both `index` and attachment.
    IndexAttachment,
}

/// One registration: the opaque handler reference plus its arity class.
///
/// The same handler may appear in several entries (under several codes, or
/// several times under one code); each entry fires independently.
#[derive(Clone, Debug)]
pub struct HandlerEntry<H> {
    pub id:      HandlerId,
    pub handler: H,
    pub arity:   Arity,
}
