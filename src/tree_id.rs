//! The stable identity key shared by the element arena and the render tree.

/// An arena key identifying one node of the element tree.
///
/// Stable for the lifetime of the element it names; never reused after the
/// element unmounts, so a stale id held past unmount simply fails lookups
/// rather than aliasing a different element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u64);
