use std::fmt;

/// Stable label for an input element: its index in the original sequence.
///
/// Assigned once when recording starts and never recomputed from the
/// element's current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(usize);

impl Identity {
    pub fn new(index: usize) -> Self {
        Identity(index)
    }

    /// Index into the original input.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Two-way `(identity, current_position)` mapping kept next to a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMap {
    at_position: Vec<Identity>,
    position_of: Vec<usize>,
}

impl IdentityMap {
    /// Identity `i` at position `i` for every element.
    pub fn new(len: usize) -> Self {
        IdentityMap {
            at_position: (0..len).map(Identity).collect(),
            position_of: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.at_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.at_position.is_empty()
    }

    pub fn identity_at(&self, position: usize) -> Identity {
        self.at_position[position]
    }

    pub fn position_of(&self, identity: Identity) -> usize {
        self.position_of[identity.0]
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.at_position.swap(a, b);
        self.position_of[self.at_position[a].0] = a;
        self.position_of[self.at_position[b].0] = b;
    }

    /// Put `identity` at `position`.
    ///
    /// The identity previously there keeps its old `position_of` entry until
    /// it is placed again, as happens mid-merge.
    pub fn place(&mut self, position: usize, identity: Identity) {
        self.at_position[position] = identity;
        self.position_of[identity.0] = position;
    }

    /// Identities in current position order.
    pub fn order(&self) -> &[Identity] {
        &self.at_position
    }
}

/// Working copy of the input with identities that follow every move.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    values: Vec<T>,
    ids: IdentityMap,
}

impl<T: Clone> Tracked<T> {
    pub fn new(data: &[T]) -> Self {
        Tracked {
            values: data.to_vec(),
            ids: IdentityMap::new(data.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, position: usize) -> &T {
        &self.values[position]
    }

    pub fn identity(&self, position: usize) -> Identity {
        self.ids.identity_at(position)
    }

    /// Identity and a copy of the value at `position`.
    pub fn entry(&self, position: usize) -> (Identity, T) {
        (self.identity(position), self.values[position].clone())
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.ids.swap(a, b);
    }

    pub fn place(&mut self, position: usize, identity: Identity, value: T) {
        self.values[position] = value;
        self.ids.place(position, identity);
    }

    pub fn identities(&self) -> &IdentityMap {
        &self.ids
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}
