//! Observability hook for the policy engine. Sinks receive structured
//! events while a tree is filled or pruned; the default sink discards them,
//! so the algorithms never depend on a global logger.

/// Events emitted while a policy tree is processed.
#[derive(Clone, Copy, Debug)]
pub enum TraceEvent<'a> {
    /// encryption: a leaf received its share of the root secret
    ShareAssigned { attr: &'a str },
    /// decryption: a leaf was matched against the key components
    LeafChecked { attr: &'a str, satisfied: bool },
    /// decryption: a threshold gate counted its satisfiable children
    GateChecked { threshold: usize, satisfied: usize, arity: usize },
    /// decryption: cheapest child subset picked for a gate, 1-based
    ChildrenSelected { threshold: usize, selected: &'a [usize] },
}

/// Receiver for [`TraceEvent`]s. Sinks observe, they cannot steer the
/// algorithms.
pub trait TraceSink {
    fn notify(&self, event: TraceEvent);
}

/// Default sink, discards every event.
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn notify(&self, _event: TraceEvent) {}
}
