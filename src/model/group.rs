//! Lines of words and groups of lines.

use std::cell::OnceCell;

use crate::error::{Error, Result};
use crate::geometry::{slope, BoundingBox, Element, Extent};

use super::Word;

/// A line of words, left to right.
pub type Line = Group<Word>;

/// A paragraph-like group of lines, top to bottom.
pub type LineGroup = Group<Line>;

/// An ordered collection of elements that behaves as one element.
///
/// The bounding box is the union of the children's extents. It is computed
/// on first use and cached until the next mutation.
#[derive(Debug, Clone)]
pub struct Group<C> {
    children: Vec<C>,
    bounds: OnceCell<BoundingBox>,
}

impl<C: Element> Group<C> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            bounds: OnceCell::new(),
        }
    }

    /// Create a group holding a single child.
    pub fn with_child(child: C) -> Self {
        let mut group = Self::new();
        group.add(child);
        group
    }

    /// Append a child.
    pub fn add(&mut self, child: C) -> &mut Self {
        self.invalidate();
        self.children.push(child);
        self
    }

    /// Append all children of another group.
    pub fn append(&mut self, other: Group<C>) -> &mut Self {
        self.invalidate();
        self.children.extend(other.children);
        self
    }

    /// Remove and return the child at `index`.
    pub fn remove(&mut self, index: usize) -> C {
        self.invalidate();
        self.children.remove(index)
    }

    /// Keep only the children matching the predicate.
    pub fn retain(&mut self, keep: impl FnMut(&C) -> bool) {
        self.invalidate();
        self.children.retain(keep);
    }

    /// Remove leading and trailing children matching the predicate.
    ///
    /// Children in between are kept even when they match. Returns the number
    /// of removed children.
    pub fn trim_by(&mut self, matches: impl Fn(&C) -> bool) -> usize {
        let before = self.children.len();

        let trailing = self.children.iter().rev().take_while(|&c| matches(c)).count();
        self.children.truncate(before - trailing);

        let leading = self.children.iter().take_while(|&c| matches(c)).count();
        self.children.drain(..leading);

        let removed = before - self.children.len();
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    /// Drop the cached bounding box.
    pub fn invalidate(&mut self) {
        self.bounds = OnceCell::new();
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Mutable access to every child.
    ///
    /// Bounds are invalidated since any child may change.
    pub fn children_mut(&mut self) -> &mut [C] {
        self.invalidate();
        &mut self.children
    }

    pub fn first(&self) -> Option<&C> {
        self.children.first()
    }

    pub fn last(&self) -> Option<&C> {
        self.children.last()
    }

    /// Mutable access to the last child.
    ///
    /// Bounds are invalidated since the child may change.
    pub fn last_mut(&mut self) -> Option<&mut C> {
        self.invalidate();
        self.children.last_mut()
    }

    pub fn into_children(self) -> Vec<C> {
        self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn compute_bounds(&self) -> Result<BoundingBox> {
        let mut children = self.children.iter();
        let first = children.next().ok_or(Error::EmptyElement)?.extent()?;
        let extent = children.try_fold(first, |acc, child| -> Result<Extent> {
            Ok(acc.union(&child.extent()?))
        })?;
        Ok(BoundingBox::from_extent(extent))
    }
}

impl<C: Element> Default for Group<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Element> Element for Group<C> {
    fn bounds(&self) -> Result<BoundingBox> {
        if let Some(bounds) = self.bounds.get() {
            return Ok(*bounds);
        }
        let bounds = self.compute_bounds()?;
        let _ = self.bounds.set(bounds);
        Ok(bounds)
    }

    fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            text.push_str(&child.text());
            text.push_str(child.break_text());
        }
        text
    }

    fn break_text(&self) -> &str {
        "\n"
    }

    /// Mean slope between consecutive children's centers.
    fn slope(&self) -> Result<f32> {
        match self.children.as_slice() {
            [] => Ok(0.0),
            [only] => only.slope(),
            children => {
                let mut total = 0.0;
                for pair in children.windows(2) {
                    total += slope(pair[0].center()?, pair[1].center()?);
                }
                Ok(total / (children.len() - 1) as f32)
            }
        }
    }
}
