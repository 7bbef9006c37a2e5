use std::collections::BTreeMap;

use crate::dom::NodePath;

/// Field events that can trigger re-derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TriggerKind {
    Change,
    Input,
    Blur,
}

impl TriggerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Input => "input",
            Self::Blur => "blur",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    Field { kind: TriggerKind, target: NodePath },
    PointerLeave,
    FadeComplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub generation: u64,
    pub targets: Vec<NodePath>,
}

/// At most one handler per trigger kind.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    bindings: BTreeMap<TriggerKind, Binding>,
    next_generation: u64,
}

impl HandlerRegistry {
    /// Attach a handler for `kind` on `targets`, detaching the previous one first.
    /// Returns the new binding's generation.
    pub fn bind(&mut self, kind: TriggerKind, targets: Vec<NodePath>) -> u64 {
        if let Some(old) = self.unbind(kind) {
            tracing::debug!(
                kind = kind.as_str(),
                generation = old.generation,
                "detached previous handler"
            );
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        tracing::debug!(
            kind = kind.as_str(),
            generation,
            targets = targets.len(),
            "attached handler"
        );
        self.bindings.insert(kind, Binding { generation, targets });
        generation
    }

    pub fn unbind(&mut self, kind: TriggerKind) -> Option<Binding> {
        self.bindings.remove(&kind)
    }

    pub fn binding(&self, kind: TriggerKind) -> Option<&Binding> {
        self.bindings.get(&kind)
    }

    /// Elements the `kind` handler listens on; empty when unbound.
    pub fn targets_for(&self, kind: TriggerKind) -> &[NodePath] {
        self.bindings
            .get(&kind)
            .map(|b| b.targets.as_slice())
            .unwrap_or(&[])
    }

    /// Whether an event of `kind` on `target` reaches a handler.
    pub fn handles(&self, kind: TriggerKind, target: &NodePath) -> bool {
        self.targets_for(kind).contains(target)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Vec<NodePath> {
        vec![NodePath::from(vec![0, 0]), NodePath::from(vec![0, 1])]
    }

    #[test]
    fn rebinding_replaces_instead_of_accumulating() {
        let mut reg = HandlerRegistry::default();
        let first = reg.bind(TriggerKind::Change, paths());
        let second = reg.bind(TriggerKind::Change, paths());
        assert_ne!(first, second);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.binding(TriggerKind::Change).unwrap().generation, second);
    }

    #[test]
    fn handles_only_bound_targets() {
        let mut reg = HandlerRegistry::default();
        reg.bind(TriggerKind::Input, paths());
        assert!(reg.handles(TriggerKind::Input, &NodePath::from(vec![0, 1])));
        assert!(!reg.handles(TriggerKind::Input, &NodePath::from(vec![3])));
        assert!(!reg.handles(TriggerKind::Blur, &NodePath::from(vec![0, 1])));
    }

    #[test]
    fn targets_for_unbound_kind_is_empty() {
        let mut reg = HandlerRegistry::default();
        assert!(reg.targets_for(TriggerKind::Change).is_empty());
        reg.bind(TriggerKind::Change, paths());
        assert_eq!(reg.targets_for(TriggerKind::Change), paths().as_slice());
    }

    #[test]
    fn unbind_removes_kind() {
        let mut reg = HandlerRegistry::default();
        reg.bind(TriggerKind::Blur, paths());
        assert!(reg.unbind(TriggerKind::Blur).is_some());
        assert!(reg.is_empty());
        assert!(reg.unbind(TriggerKind::Blur).is_none());
    }
}
