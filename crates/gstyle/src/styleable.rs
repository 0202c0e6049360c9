use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

/// The capability a host tree node must provide to be styled.
///
/// Implement it on the host's node handle: an `Rc` to a node, an arena
/// index, or any cheap clone that refers to the same node. Every method
/// must leave the shape of the tree untouched.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use gstyle::Styleable;
///
/// /// A single-node tree.
/// #[derive(Clone)]
/// struct Leaf(&'static str);
///
/// impl Styleable for Leaf {
///     type Key = &'static str;
///
///     fn node_key(&self) -> Self::Key { self.0 }
///     fn parent_node(&self) -> Option<Self> { None }
///     fn first_child(&self) -> Option<Self> { None }
///     fn next_sibling(&self) -> Option<Self> { None }
///     fn previous_sibling(&self) -> Option<Self> { None }
///     fn node_name(&self) -> Cow<'_, str> { Cow::Borrowed(self.0) }
///     fn attribute(&self, _name: &str) -> Option<String> { None }
///     fn children_count(&self) -> usize { 0 }
///     fn index(&self) -> usize { 0 }
/// }
/// ```
pub trait Styleable: Clone {
    /// Node identity. Two handles to the same host node return equal keys.
    type Key: Copy + Eq + Hash + fmt::Debug;

    fn node_key(&self) -> Self::Key;

    fn parent_node(&self) -> Option<Self>;
    fn first_child(&self) -> Option<Self>;
    fn next_sibling(&self) -> Option<Self>;
    fn previous_sibling(&self) -> Option<Self>;

    /// Name matched by type selectors. Must not be empty.
    fn node_name(&self) -> Cow<'_, str>;
    fn attribute(&self, name: &str) -> Option<String>;
    fn children_count(&self) -> usize;
    /// Zero-based position among siblings.
    fn index(&self) -> usize;

    /// Called each time a reference to this node is handed out for matching.
    fn retain(&self) {}

    /// Called once for every earlier [`retain`](Styleable::retain) when the
    /// reference is given back.
    fn release(&self) {}
}
