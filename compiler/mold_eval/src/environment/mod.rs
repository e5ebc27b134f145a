//! Runtime bindings.
//!
//! An [`Environment`] is an immutable chain of frames. Extending it pushes a
//! frame in front of a shared tail, so every template call and loop
//! iteration gets its own view without copying or mutating the caller's.
//! Two kinds of frame exist:
//!
//! - dynamic frames, holding `$name` values bound by `::let`, `::call`
//!   arguments, `::each ... as $name` and external bindings;
//! - element frames, holding the current element of one `::each` node whose
//!   target is a lexical name. Lexical lookup that reaches that node asks
//!   the environment for its element.
//!
//! Lookups return the innermost match.

use std::fmt;
use std::sync::Arc;

use mold_ir::NodeId;
use mold_value::Value;
use rustc_hash::FxHashMap;

#[derive(Debug)]
enum Binding {
    Dynamic(FxHashMap<String, Value>),
    Element { each: NodeId, value: Value },
}

#[derive(Debug)]
struct Frame {
    binding: Binding,
    parent: Option<Arc<Frame>>,
}

/// Dynamic variables and loop elements visible to a node.
#[derive(Clone, Default)]
pub struct Environment {
    head: Option<Arc<Frame>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment holding `bindings` as dynamic variables.
    pub fn from_bindings<I, K>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let frame: FxHashMap<String, Value> = bindings
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Environment::new().with_dynamic(frame)
    }

    /// Extend with dynamic variables. Names already bound are shadowed.
    #[must_use]
    pub fn with_dynamic(&self, bindings: FxHashMap<String, Value>) -> Environment {
        if bindings.is_empty() {
            return self.clone();
        }
        self.push(Binding::Dynamic(bindings))
    }

    /// Extend with a single dynamic variable.
    #[must_use]
    pub fn with_var(&self, name: &str, value: Value) -> Environment {
        let mut frame = FxHashMap::default();
        frame.insert(name.to_string(), value);
        self.push(Binding::Dynamic(frame))
    }

    /// Extend with the current element of the `::each` node `each`.
    #[must_use]
    pub fn with_element(&self, each: NodeId, value: Value) -> Environment {
        self.push(Binding::Element { each, value })
    }

    fn push(&self, binding: Binding) -> Environment {
        Environment {
            head: Some(Arc::new(Frame {
                binding,
                parent: self.head.clone(),
            })),
        }
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |frame| frame.parent.as_deref())
    }

    pub fn get_dynamic(&self, name: &str) -> Option<&Value> {
        self.frames().find_map(|frame| match &frame.binding {
            Binding::Dynamic(vars) => vars.get(name),
            Binding::Element { .. } => None,
        })
    }

    /// The element the innermost iteration of `each` is visiting.
    pub fn element(&self, each: NodeId) -> Option<&Value> {
        self.frames().find_map(|frame| match &frame.binding {
            Binding::Element { each: id, value } if *id == each => Some(value),
            _ => None,
        })
    }

    /// Number of frames, for diagnostics.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for frame in self.frames() {
            match &frame.binding {
                Binding::Dynamic(vars) => {
                    let mut names: Vec<&str> = vars.keys().map(String::as_str).collect();
                    names.sort_unstable();
                    list.entry(&names);
                }
                Binding::Element { each, .. } => {
                    list.entry(each);
                }
            }
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests;
