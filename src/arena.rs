use crate::token::Token;

/// Stable handle to a node inside a [`TokenArena`]. Only meaningful against
/// the arena that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Growable node store backing a parsed tree. Nodes reference each other by
/// `NodeId`, are never moved out, and are only freed in bulk by `clear` or
/// by dropping the arena along with its owning expression.
#[derive(Default)]
pub struct TokenArena {
    nodes: Vec<Token>,
}

impl TokenArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, token: Token) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(token);
        id
    }

    pub fn get(&self, id: NodeId) -> &Token {
        &self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
