//! # Axon: Executable Circuit
//!
//! The `Axon` is the runtime execution path of a chain of transitions.
//! It functions as a reusable Pipeline<In, Out>.
//!
//! * **Axon flows, Schematic shows**: Axon executes; Schematic describes
//! * **Builder pattern**: `Axon::new(label).then(a).then(b)`
//! * **Fault short-circuits**: the first `Outcome::Fault` ends the run

use bandroute_core::bus::Bus;
use bandroute_core::outcome::Outcome;
use bandroute_core::schematic::{Edge, Node, NodeKind, Schematic};
use bandroute_core::transition::Transition;
use std::any::type_name;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::Instrument;

/// Type alias for async boxed futures used in Axon execution.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executor type for Axon steps.
/// Must be Send + Sync to be reusable across connections.
pub type Executor<In, Out, E> =
    Arc<dyn for<'a> Fn(In, &'a mut Bus) -> BoxFuture<'a, Outcome<Out, E>> + Send + Sync>;

/// Helper to extract a readable type name from a type.
fn type_name_of<T: ?Sized>() -> String {
    let full = type_name::<T>();
    // Strip generic arguments before taking the last path segment
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// The Axon Builder and Runtime.
///
/// ```rust,ignore
/// let pages = Axon::new("Pages")
///     .then(MatchRoute::new(table))
///     .then(ResolveView)
///     .then(RenderPage);
///
/// let page = pages.execute(PageRequest::new("/albums"), &mut bus).await;
/// ```
pub struct Axon<In, Out, E> {
    /// The static structure (for visualization/analysis)
    pub schematic: Schematic,
    executor: Executor<In, Out, E>,
}

impl<In, Out, E> Clone for Axon<In, Out, E> {
    fn clone(&self) -> Self {
        Self {
            schematic: self.schematic.clone(),
            executor: self.executor.clone(),
        }
    }
}

impl<In, E> Axon<In, In, E>
where
    In: Send + Sync + 'static,
    E: Send + 'static,
{
    /// Start defining a new Axon flow (identity: In -> In).
    pub fn new(label: &str) -> Self {
        let node = Node {
            id: uuid::Uuid::new_v4().to_string(),
            kind: NodeKind::Ingress,
            label: label.to_string(),
            input_type: "void".to_string(),
            output_type: type_name_of::<In>(),
        };

        let mut schematic = Schematic::new(label);
        schematic.nodes.push(node);

        let executor: Executor<In, In, E> = Arc::new(
            move |input: In, _bus: &mut Bus| -> BoxFuture<'_, Outcome<In, E>> {
                Box::pin(std::future::ready(Outcome::Next(input)))
            },
        );

        Self {
            schematic,
            executor,
        }
    }
}

impl<In, Out, E> Axon<In, Out, E>
where
    In: Send + Sync + 'static,
    Out: Send + Sync + 'static,
    E: Send + 'static,
{
    /// Chain a transition to this Axon.
    pub fn then<Next, Trans>(self, transition: Trans) -> Axon<In, Next, E>
    where
        Next: Send + Sync + 'static,
        Trans: Transition<Out, Next, Error = E> + Clone + Send + Sync + 'static,
    {
        let trans_label = type_name_of::<Trans>();

        let Axon {
            mut schematic,
            executor: prev_executor,
        } = self;

        let next_node_id = uuid::Uuid::new_v4().to_string();
        let last_node_id = schematic.last_node_id().unwrap_or_default().to_string();

        schematic.nodes.push(Node {
            id: next_node_id.clone(),
            kind: NodeKind::Atom,
            label: trans_label.clone(),
            input_type: type_name_of::<Out>(),
            output_type: type_name_of::<Next>(),
        });
        schematic.edges.push(Edge {
            from: last_node_id,
            to: next_node_id,
            label: Some("Next".to_string()),
        });

        let next_executor: Executor<In, Next, E> = Arc::new(
            move |input: In, bus: &mut Bus| -> BoxFuture<'_, Outcome<Next, E>> {
                let prev = prev_executor.clone();
                let trans = transition.clone();
                let label = trans_label.clone();

                Box::pin(async move {
                    let state = match prev(input, &mut *bus).await {
                        Outcome::Next(t) => t,
                        Outcome::Fault(e) => return Outcome::Fault(e),
                    };

                    let outcome = trans.run(state, bus).await;
                    if outcome.is_fault() {
                        tracing::warn!(step = %label, "Step faulted");
                    } else {
                        tracing::trace!(step = %label, "Step completed");
                    }
                    outcome
                })
            },
        );

        Axon {
            schematic,
            executor: next_executor,
        }
    }

    /// Execute the Axon with the given input.
    pub async fn execute(&self, input: In, bus: &mut Bus) -> Outcome<Out, E> {
        let label = self.schematic.name.clone();
        async move { (self.executor)(input, bus).await }
            .instrument(tracing::info_span!("Circuit", bandroute.circuit = %label))
            .await
    }

    /// Get a reference to the Schematic (structural view).
    pub fn schematic(&self) -> &Schematic {
        &self.schematic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone)]
    struct Double;

    #[async_trait]
    impl Transition<u32, u32> for Double {
        type Error = String;

        async fn run(&self, state: u32, _bus: &mut Bus) -> Outcome<u32, String> {
            Outcome::Next(state * 2)
        }
    }

    #[derive(Clone)]
    struct RejectOdd;

    #[async_trait]
    impl Transition<u32, String> for RejectOdd {
        type Error = String;

        async fn run(&self, state: u32, _bus: &mut Bus) -> Outcome<String, String> {
            if state % 2 == 1 {
                Outcome::Fault(format!("{state} is odd"))
            } else {
                Outcome::Next(state.to_string())
            }
        }
    }

    #[derive(Clone)]
    struct Unreachable;

    #[async_trait]
    impl Transition<String, String> for Unreachable {
        type Error = String;

        async fn run(&self, _state: String, bus: &mut Bus) -> Outcome<String, String> {
            bus.insert(true);
            Outcome::Next("ran".into())
        }
    }

    #[tokio::test]
    async fn chains_run_in_order_and_are_reusable() {
        let axon = Axon::<u32, u32, String>::new("Math")
            .then(Double)
            .then(Double)
            .then(RejectOdd);

        let mut bus = Bus::new();
        assert_eq!(axon.execute(3, &mut bus).await, Outcome::Next("12".to_string()));
        assert_eq!(axon.execute(5, &mut bus).await, Outcome::Next("20".to_string()));
    }

    #[tokio::test]
    async fn fault_stops_the_chain() {
        let axon = Axon::<u32, u32, String>::new("Strict")
            .then(RejectOdd)
            .then(Unreachable);

        let mut bus = Bus::new();
        let outcome = axon.execute(7, &mut bus).await;

        assert_eq!(outcome, Outcome::Fault("7 is odd".to_string()));
        assert!(!bus.contains::<bool>());
    }

    #[test]
    fn schematic_records_each_step() {
        let axon = Axon::<u32, u32, String>::new("Math")
            .then(Double)
            .then(RejectOdd);

        let schematic = axon.schematic();
        assert_eq!(schematic.name, "Math");
        assert_eq!(schematic.nodes.len(), 3);
        assert_eq!(schematic.edges.len(), 2);
        assert_eq!(schematic.nodes[0].kind, NodeKind::Ingress);
        assert_eq!(schematic.nodes[1].label, "Double");
        assert_eq!(schematic.nodes[2].output_type, "String");
        assert_eq!(schematic.edges[1].from, schematic.nodes[1].id);
    }
}
