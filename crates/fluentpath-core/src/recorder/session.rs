use crate::{
    accessor,
    error::{IntermediateTypeIssue, ResolveError},
    model::TypeDescriptor,
    property::ResolvedProperty,
};
use std::{
    any::{Any, TypeId, type_name},
    cell::RefCell,
    rc::Rc,
};
use tracing::trace;

pub(crate) type SharedSession = Rc<RefCell<RecorderSession>>;

///
/// OutputProbe
///
/// Recognizes a proxy type among closure return values: which `Proxy<X>`
/// type it is, and how to read its sequence number back out of `dyn Any`.
///

#[derive(Clone, Copy)]
pub(crate) struct OutputProbe {
    pub type_id: TypeId,
    pub read_seq: fn(&dyn Any) -> Option<u64>,
}

///
/// RecorderSession
///
/// State of one recording: created per chain, mutated by every intercepted
/// call, consumed when the closure returns or unwinds.
///

pub(crate) struct RecorderSession {
    closure: String,
    root: TypeDescriptor,
    max_depth: usize,
    segments: Vec<&'static str>,
    leaf: Option<TypeDescriptor>,
    latest: u64,
    probes: Vec<OutputProbe>,
    failure: Option<ResolveError>,
}

impl RecorderSession {
    pub(crate) fn shared(closure: String, root: TypeDescriptor, max_depth: usize) -> SharedSession {
        Rc::new(RefCell::new(Self {
            closure,
            root,
            max_depth,
            segments: Vec::new(),
            leaf: None,
            latest: 0,
            probes: Vec::new(),
            failure: None,
        }))
    }

    /// Validate an intercepted call made on the proxy with sequence `seq`
    /// and declared type `receiver`.
    pub(crate) fn check_call(
        &self,
        seq: u64,
        receiver: TypeDescriptor,
        blocked: Option<IntermediateTypeIssue>,
        method: &'static str,
        arity: usize,
    ) -> Result<(), ResolveError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if arity != 0 || !accessor::is_accessor(method) {
            return Err(self.non_accessor(format!(
                "`{method}` with {arity} argument(s) on `{}`",
                receiver.name
            )));
        }
        if seq != self.latest {
            return Err(self.branching(format!(
                "`{method}` was invoked on an earlier stand-in after the chain had moved on"
            )));
        }
        if let Some(issue) = blocked {
            return Err(self.unsupported(receiver, issue));
        }
        if self.segments.len() >= self.max_depth {
            return Err(ResolveError::ChainDepthExceeded {
                closure: self.closure.clone(),
                max_depth: self.max_depth,
                path: self.describe_path(),
            });
        }

        Ok(())
    }

    /// Append one accessor call; returns the sequence number of the proxy
    /// it produces.
    pub(crate) fn record(
        &mut self,
        method: &'static str,
        declared: TypeDescriptor,
        probe: OutputProbe,
    ) -> u64 {
        let property = accessor::property_name(method).unwrap_or(method);
        trace!(
            closure = %self.closure,
            property,
            declared = declared.name,
            "recorded accessor"
        );

        self.segments.push(property);
        self.leaf = Some(declared);
        self.remember(probe);
        self.latest += 1;

        self.latest
    }

    /// The root proxy always has sequence number zero.
    pub(crate) fn register_root(&mut self, probe: OutputProbe) -> u64 {
        self.remember(probe);

        0
    }

    fn remember(&mut self, probe: OutputProbe) {
        if !self.probes.iter().any(|known| known.type_id == probe.type_id) {
            self.probes.push(probe);
        }
    }

    /// Keep the first failure; later ones are consequences of it.
    pub(crate) fn fail(&mut self, error: ResolveError) {
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }

    pub(crate) fn take_failure(&mut self) -> Option<ResolveError> {
        self.failure.take()
    }

    /// Validate the closure's return value and produce the result.
    pub(crate) fn finish<R: 'static>(&mut self, output: &R) -> Result<ResolvedProperty, ResolveError> {
        if let Some(failure) = self.take_failure() {
            return Err(failure);
        }
        let Some(leaf) = self.leaf.filter(|_| !self.segments.is_empty()) else {
            return Err(ResolveError::EmptyChainDetected {
                closure: self.closure.clone(),
                root: self.root.name.to_string(),
            });
        };

        let output: &dyn Any = output;
        let probe = self
            .probes
            .iter()
            .find(|probe| probe.type_id == TypeId::of::<R>());

        match probe.and_then(|probe| (probe.read_seq)(output)) {
            Some(seq) if seq == self.latest => {
                Ok(ResolvedProperty::new(self.segments.join("."), leaf))
            }
            Some(_) => Err(self.branching(
                "the closure returned an earlier stand-in instead of the last accessor result"
                    .to_string(),
            )),
            None => Err(self.non_accessor(format!(
                "an operation producing `{}` after the last accessor",
                type_name::<R>()
            ))),
        }
    }

    /// Translate a panic that escaped the closure.
    pub(crate) fn panicked(&self, payload: &(dyn Any + Send)) -> ResolveError {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        self.non_accessor(format!("an operation that panicked ({message})"))
    }

    pub(crate) fn unsupported(
        &self,
        declared: TypeDescriptor,
        issue: IntermediateTypeIssue,
    ) -> ResolveError {
        ResolveError::UnsupportedIntermediateType {
            closure: self.closure.clone(),
            type_name: declared.name.to_string(),
            issue,
            path: self.describe_path(),
        }
    }

    fn non_accessor(&self, call: String) -> ResolveError {
        ResolveError::NonAccessorCallDetected {
            closure: self.closure.clone(),
            call,
            path: self.describe_path(),
        }
    }

    fn branching(&self, detail: String) -> ResolveError {
        ResolveError::BranchingChainDetected {
            closure: self.closure.clone(),
            detail,
            path: self.describe_path(),
        }
    }

    // Accumulated path, or the root type name before the first accessor.
    fn describe_path(&self) -> String {
        if self.segments.is_empty() {
            self.root.name.to_string()
        } else {
            self.segments.join(".")
        }
    }
}
