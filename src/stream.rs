//! A doubly-linked list of tokens stored in an arena. Nodes are addressed by
//! [`NodeId`]s that stay valid until the node itself is erased, no matter what
//! else is erased around them.

use std::fmt::Display;

use crate::{
    error::CalcError,
    token::{Token, TokenValue},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    token: Token,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    live: bool,
}

#[derive(Debug, Default)]
pub struct TokenStream {
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<NodeId> {
        self.head
    }

    pub fn last(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn push(&mut self, token: Token) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            token,
            prev: self.tail,
            next: None,
            live: true,
        });

        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;

        id
    }

    fn node(&self, id: NodeId) -> &Node {
        let node = &self.nodes[id.0];
        debug_assert!(node.live, "cursor {id:?} points at an erased node");
        node
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub fn get(&self, id: NodeId) -> &Token {
        &self.node(id).token
    }

    /// The token at `id`, if there is one. Convenient with the optional
    /// results of [`TokenStream::next`] and [`TokenStream::prev`].
    pub fn token(&self, id: Option<NodeId>) -> Option<&Token> {
        id.map(|id| self.get(id))
    }

    pub fn replace(&mut self, id: NodeId, token: Token) {
        debug_assert!(self.nodes[id.0].live);
        self.nodes[id.0].token = token;
    }

    pub fn erase(&mut self, id: NodeId) -> Result<(), CalcError> {
        self.erase_range(id, id)
    }

    /// Unlinks `first..=last`. `last` must be reachable from `first` by
    /// following `next` links.
    pub fn erase_range(&mut self, first: NodeId, last: NodeId) -> Result<(), CalcError> {
        let before = self.node(first).prev;
        let after = self.node(last).next;

        let mut erased = 0;
        let mut cursor = Some(first);
        loop {
            let id = cursor.ok_or(CalcError::Internal("erased range is not linked"))?;
            let node = &mut self.nodes[id.0];
            node.live = false;
            cursor = node.next;
            erased += 1;
            if id == last {
                break;
            }
        }

        match before {
            Some(prev) => self.nodes[prev.0].next = after,
            None => self.head = after,
        }
        match after {
            Some(next) => self.nodes[next.0].prev = before,
            None => self.tail = before,
        }
        self.len -= erased;

        Ok(())
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(&Token) -> bool,
    {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            if predicate(self.get(id)) {
                return Some(id);
            }
            cursor = self.next(id);
        }

        None
    }

    pub fn rfind<P>(&self, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(&Token) -> bool,
    {
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            if predicate(self.get(id)) {
                return Some(id);
            }
            cursor = self.prev(id);
        }

        None
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stream: self,
            cursor: self.head,
        }
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut stream = TokenStream::new();
        for token in iter {
            stream.push(token);
        }
        stream
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match token.value() {
                TokenValue::Number(n) => write!(f, "{}", n)?,
                TokenValue::Text(s) => write!(f, "{}", s)?,
            }
        }
        Ok(())
    }
}

pub struct Iter<'stream> {
    stream: &'stream TokenStream,
    cursor: Option<NodeId>,
}

impl<'stream> Iterator for Iter<'stream> {
    type Item = &'stream Token;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = self.stream.next(id);
        Some(self.stream.get(id))
    }
}
