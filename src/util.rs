/// Whether a subtree's height moved during an insert or delete. On the way into an insert this
/// means "grew taller by one", on the way out of a delete it means "shrank by one".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Height {
    /// The subtree has the same height it had before the operation.
    Unchanged,
    /// The subtree's height moved by one level.
    Changed,
}

/// What happened when inserting into a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// The key was already present. Nothing was modified.
    Duplicate,
    /// A new node was linked in, possibly making the subtree taller.
    Added(Height),
}

/// What happened when deleting from a subtree.
pub(crate) enum Removal<K, V> {
    /// The key wasn't found so nothing was deleted.
    NotFound,
    /// A node was unlinked and destroyed, yielding its payload.
    Removed {
        /// The key and value of the destroyed node.
        entry: (K, V),
        /// Whether the subtree got shorter.
        height: Height,
    },
}
