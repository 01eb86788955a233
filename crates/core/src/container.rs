//! Container module - a bounded stack of elements (one test tube)
//!
//! Only the top (last) element can be lifted. `len() <= capacity()` holds at
//! all times: `push` refuses to overfill and hands the element back.

use crate::types::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    elements: Vec<Element>,
    capacity: usize,
}

impl Container {
    pub fn new(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a container holding `elements`, or `None` if they do not fit
    pub fn with_elements(capacity: usize, elements: Vec<Element>) -> Option<Self> {
        if elements.len() > capacity {
            return None;
        }
        Some(Self { elements, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.elements.len() >= self.capacity
    }

    /// Elements bottom to top
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The liftable element
    pub fn top(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Push onto the top; a full container returns the element unchanged.
    pub fn push(&mut self, element: Element) -> Result<(), Element> {
        if self.is_full() {
            return Err(element);
        }
        self.elements.push(element);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }
}
