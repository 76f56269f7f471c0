use crate::{
    error::{IntermediateTypeIssue, ResolveError},
    model::{TypeDescriptor, TypeKind},
    recorder::session::{OutputProbe, SharedSession},
    traits::Recordable,
};
use std::{
    any::{Any, TypeId},
    fmt,
    ops::Deref,
    panic,
};

///
/// RecordingAborted
///
/// Unwind payload used to leave a closure once the session holds a failure.
/// Raised with `resume_unwind`, so no panic hook runs.
///

pub(crate) struct RecordingAborted;

///
/// Stage
/// What the recorder allows on a proxy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    Navigable,
    Leaf,
    Blocked(IntermediateTypeIssue),
}

///
/// Proxy
///
/// Synthetic stand-in for a `T` during chain recording.
///
/// Generated accessors (`<Entity>Accessors`) route every call through
/// [`Proxy::call`], which records the property and hands back the next
/// stand-in. `Deref` exposes the synthesized `T` value so the remainder of
/// a closure body can run; nothing read through it enters the result.
///

pub struct Proxy<T: Recordable> {
    session: SharedSession,
    seq: u64,
    declared: TypeDescriptor,
    stage: Stage,
    stand_in: Option<T>,
}

impl<T: Recordable> Proxy<T> {
    /// Stand-in for the root of a chain.
    pub(crate) fn root(session: &SharedSession) -> Result<Self, ResolveError> {
        let declared = T::descriptor();
        let issue = match declared.kind {
            TypeKind::Entity => None,
            TypeKind::Interface => Some(IntermediateTypeIssue::Interface),
            TypeKind::Sealed => Some(IntermediateTypeIssue::Sealed),
            _ => Some(IntermediateTypeIssue::NotAnEntity),
        };
        if let Some(issue) = issue {
            return Err(session.borrow().unsupported(declared, issue));
        }
        let Some(stand_in) = T::stand_in() else {
            return Err(session
                .borrow()
                .unsupported(declared, IntermediateTypeIssue::NoConstructor));
        };

        let seq = session.borrow_mut().register_root(Self::probe());

        Ok(Self {
            session: SharedSession::clone(session),
            seq,
            declared,
            stage: Stage::Navigable,
            stand_in: Some(stand_in),
        })
    }

    /// Intercept a zero-argument accessor whose declared return type is `R`.
    #[must_use]
    pub fn accessor<R: Recordable>(&self, method: &'static str) -> Proxy<R> {
        self.intercept(method, 0, R::descriptor())
    }

    /// Intercept a zero-argument accessor whose declared return type wraps
    /// `R` (e.g. `Option<R>`); `declared` is what gets recorded as leaf type.
    #[must_use]
    pub fn accessor_declared<R: Recordable>(
        &self,
        method: &'static str,
        declared: TypeDescriptor,
    ) -> Proxy<R> {
        self.intercept(method, 0, declared)
    }

    /// Intercept an arbitrary method call. Anything that is not a
    /// zero-argument accessor fails the recording.
    #[must_use]
    pub fn call<R: Recordable>(&self, method: &'static str, arity: usize) -> Proxy<R> {
        self.intercept(method, arity, R::descriptor())
    }

    /// Declared type this stand-in was produced for.
    #[must_use]
    pub const fn declared_type(&self) -> TypeDescriptor {
        self.declared
    }

    fn intercept<R: Recordable>(
        &self,
        method: &'static str,
        arity: usize,
        declared: TypeDescriptor,
    ) -> Proxy<R> {
        let blocked = match self.stage {
            Stage::Navigable => None,
            Stage::Leaf => Some(IntermediateTypeIssue::Leaf),
            Stage::Blocked(issue) => Some(issue),
        };
        let checked =
            self.session
                .borrow()
                .check_call(self.seq, self.declared, blocked, method, arity);
        if let Err(error) = checked {
            abort(&self.session, error);
        }

        let seq = self
            .session
            .borrow_mut()
            .record(method, declared, Proxy::<R>::probe());

        let (stage, stand_in) = match declared.kind {
            TypeKind::Entity => match R::stand_in() {
                Some(stand_in) => (Stage::Navigable, Some(stand_in)),
                None => {
                    let error = self
                        .session
                        .borrow()
                        .unsupported(declared, IntermediateTypeIssue::NoConstructor);
                    abort(&self.session, error);
                }
            },
            TypeKind::Interface => (
                Stage::Blocked(IntermediateTypeIssue::Interface),
                R::stand_in(),
            ),
            TypeKind::Sealed => (Stage::Blocked(IntermediateTypeIssue::Sealed), R::stand_in()),
            _ => (Stage::Leaf, R::stand_in()),
        };

        Proxy {
            session: SharedSession::clone(&self.session),
            seq,
            declared,
            stage,
            stand_in,
        }
    }

    fn probe() -> OutputProbe {
        OutputProbe {
            type_id: TypeId::of::<Self>(),
            read_seq: read_seq::<T>,
        }
    }
}

fn read_seq<T: Recordable>(value: &dyn Any) -> Option<u64> {
    value.downcast_ref::<Proxy<T>>().map(|proxy| proxy.seq)
}

fn abort(session: &SharedSession, error: ResolveError) -> ! {
    session.borrow_mut().fail(error);
    panic::resume_unwind(Box::new(RecordingAborted))
}

impl<T: Recordable> Deref for Proxy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.stand_in {
            Some(stand_in) => stand_in,
            None => {
                let issue = match self.stage {
                    Stage::Blocked(issue) => issue,
                    Stage::Navigable | Stage::Leaf => IntermediateTypeIssue::NoConstructor,
                };
                let error = self.session.borrow().unsupported(self.declared, issue);
                abort(&self.session, error)
            }
        }
    }
}

impl<T: Recordable> fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("declared", &self.declared)
            .field("seq", &self.seq)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
