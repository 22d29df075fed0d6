// Event registration and bubbling dispatch
use super::node::NodeFlags;
use super::{Document, DomError, NodeId};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::rc::Rc;

/// Handler callback invoked during dispatch
///
/// The return value is the propagation contract: `true` lets the event
/// keep bubbling, `false` stops it at the current node.
pub type EventHandler = Rc<dyn Fn(&Event) -> bool>;

/// Context handed to a handler
///
/// `target` is the node the dispatch started at; `current` is the node
/// whose handler is running right now. As the event bubbles, each
/// ancestor's handler sees itself as `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: SmolStr,
    pub target: NodeId,
    pub current: NodeId,
}

/// A registered handler
///
/// A disabled slot passes events through exactly like a node that never
/// registered anything; the slot only exists so `on` can re-enable it.
#[derive(Clone)]
pub(crate) struct HandlerSlot {
    pub(crate) callback: EventHandler,
    pub(crate) enabled: bool,
}

impl Document {
    /// Register `handler` for `name` on a node
    ///
    /// Replaces any prior registration for the same name and re-enables a
    /// slot disabled by [`Document::off`]. A blank event name is a caller
    /// contract violation, rejected before anything is stored.
    pub fn on(&mut self, node: NodeId, name: &str, handler: EventHandler) -> Result<(), DomError> {
        if name.trim().is_empty() {
            return Err(DomError::InvalidHandler(name.to_string()));
        }

        let element = self.node_mut(node);
        element.handlers.insert(
            SmolStr::new(name),
            HandlerSlot {
                callback: handler,
                enabled: true,
            },
        );
        element.flags.insert(NodeFlags::HAS_HANDLERS);
        Ok(())
    }

    /// Disable the handler for `name` on a node
    ///
    /// Idempotent; a name that was never registered is a no-op, not an
    /// error. A later [`Document::on`] re-enables dispatch for the name.
    pub fn off(&mut self, node: NodeId, name: &str) {
        if let Some(slot) = self.node_mut(node).handlers.get_mut(name) {
            slot.enabled = false;
        }
    }

    /// Dispatch an event from `origin`, bubbling upward
    ///
    /// A single synchronous walk from the origin to the root, both
    /// inclusive. At each node the enabled handler for `name` runs with
    /// that node as the dispatch context; a missing or disabled handler
    /// passes the event through. A handler returning `false` stops the
    /// walk; no further ancestors are visited.
    ///
    /// Returns `true` when the walk reached the root, `false` when a
    /// handler cancelled it. Zero handlers anywhere on the path is a
    /// normal no-op.
    pub fn dispatch_event(&self, origin: NodeId, name: &str) -> bool {
        tracing::debug!(
            "Dispatching {:?} from <{}> (node {})",
            name,
            self.tag(origin),
            origin
        );

        let mut visited = FxHashSet::default();
        let mut current = Some(origin);

        while let Some(id) = current {
            if !visited.insert(id) {
                tracing::warn!("Cycle in the parent chain at node {}; dispatch stopped", id);
                return false;
            }

            let element = self.element(id);
            if element.flags.has_handlers() {
                // clone the callback out of the map before invoking it
                let callback = element
                    .handlers
                    .get(name)
                    .filter(|slot| slot.enabled)
                    .map(|slot| slot.callback.clone());

                if let Some(callback) = callback {
                    let event = Event {
                        name: SmolStr::new(name),
                        target: origin,
                        current: id,
                    };
                    if !(callback)(&event) {
                        tracing::debug!("{:?} cancelled at <{}> (node {})", name, self.tag(id), id);
                        return false;
                    }
                }
            }

            current = self.parent(id);
        }

        true
    }
}
