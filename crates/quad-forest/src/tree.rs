use alloc::format;

use quad::{Quadrant, MAX_LEVEL};
use quad_alloc::DynArray;

use crate::context::UserDataHandle;

/// One level slot per `0..=MAX_LEVEL`.
const LEVELS: usize = (MAX_LEVEL as usize) + 1;

/// A [`Quadrant`] as stored in a [`Tree`], paired with its optional
/// user-data slot in the forest's user-data pool.
#[derive(Debug, Clone, Default)]
pub struct StoredQuadrant {
    pub quadrant: Quadrant,
    pub user_data: Option<UserDataHandle>,
}

/// An ordered collection of quadrants with per-level counts and a
/// maxlevel invariant.
#[derive(Debug)]
pub struct Tree {
    pub quadrants: DynArray<StoredQuadrant>,
    pub quadrants_per_level: [u32; LEVELS],
    pub maxlevel: i8,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            quadrants: DynArray::new(),
            quadrants_per_level: [0; LEVELS],
            maxlevel: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.quadrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadrants.is_empty()
    }

    /// Appends `quadrant` as the new last element and bumps the
    /// per-level/maxlevel aggregates. Callers (notably
    /// [`crate::region_complete`]) are responsible for appending in
    /// Morton order; this does not sort.
    pub(crate) fn append(&mut self, quadrant: Quadrant, user_data: Option<UserDataHandle>) {
        self.quadrants.push(StoredQuadrant {
            quadrant,
            user_data,
        });
        self.quadrants_per_level[quadrant.level() as usize] += 1;
        self.maxlevel = self.maxlevel.max(quadrant.level());
    }

    /// Strict Morton-increasing order over `quadrants`.
    pub fn is_sorted(&self) -> bool {
        self.quadrants
            .as_slice()
            .windows(2)
            .all(|w| quad::compare(&w[0].quadrant, &w[1].quadrant) == core::cmp::Ordering::Less)
    }

    /// `is_sorted` plus `is_next` holding between every adjacent pair —
    /// a complete, gap- and overlap-free tiling.
    pub fn is_complete(&self) -> bool {
        self.is_sorted()
            && self
                .quadrants
                .as_slice()
                .windows(2)
                .all(|w| w[0].quadrant.is_next(&w[1].quadrant))
    }

    /// Emits one line per quadrant describing its relationship to the
    /// previous quadrant in the array: `S<c>` sibling, `C<c>`
    /// child, `D` descendant, `N<c>` successor, `Q<c>` other, `I`
    /// identical, `R` out-of-order.
    pub fn print<S: Sink>(&self, tree_id: i32, sink: &mut S) -> Result<(), S::Error> {
        let mut previous: Option<&Quadrant> = None;
        for (index, stored) in self.quadrants.as_slice().iter().enumerate() {
            let q = &stored.quadrant;
            let code = match previous {
                None => format!("Q{}", q.child_id()),
                Some(p) => relationship(p, q),
            };
            sink.write_line(&format!(
                "tree {tree_id} quadrant {index}: x={} y={} level={} {code}",
                q.x(),
                q.y(),
                q.level()
            ))?;
            previous = Some(q);
        }
        Ok(())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

fn relationship(previous: &Quadrant, current: &Quadrant) -> alloc::string::String {
    use alloc::string::ToString;
    use core::cmp::Ordering;

    match quad::compare(previous, current) {
        Ordering::Greater => "R".to_string(),
        Ordering::Equal => "I".to_string(),
        Ordering::Less => {
            if previous.is_sibling(current) {
                format!("S{}", current.child_id())
            } else if previous.is_parent(current) {
                format!("C{}", current.child_id())
            } else if previous.is_ancestor(current) {
                "D".to_string()
            } else if previous.is_next(current) {
                format!("N{}", current.child_id())
            } else {
                format!("Q{}", current.child_id())
            }
        }
    }
}

/// A line-oriented diagnostic sink for [`Tree::print`] — anything that
/// implements [`core::fmt::Write`] works out of the box; `quad-mesh`
/// adapts `std::io::Write` to this trait at its I/O boundary.
pub trait Sink {
    type Error;

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}

impl<W: core::fmt::Write> Sink for W {
    type Error = core::fmt::Error;

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.write_str(line)?;
        self.write_char('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn empty_tree_is_sorted_and_complete() {
        let tree = Tree::new();
        assert!(tree.is_sorted());
        assert!(tree.is_complete());
        assert_eq!(tree.maxlevel, 0);
    }

    #[test]
    fn append_updates_aggregates() {
        let mut tree = Tree::new();
        let root = Quadrant::ROOT;
        let [c0, c1, ..] = root.children();
        tree.append(c0, None);
        tree.append(c1, None);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.quadrants_per_level[1], 2);
        assert_eq!(tree.maxlevel, 1);
        assert!(tree.is_sorted());
        assert!(tree.is_complete());
    }

    #[test]
    fn out_of_order_append_is_not_sorted() {
        let mut tree = Tree::new();
        let root = Quadrant::ROOT;
        let [c0, c1, ..] = root.children();
        tree.append(c1, None);
        tree.append(c0, None);
        assert!(!tree.is_sorted());
    }

    #[test]
    fn print_emits_one_line_per_quadrant() {
        let mut tree = Tree::new();
        let root = Quadrant::ROOT;
        for child in root.children() {
            tree.append(child, None);
        }

        let mut out = String::new();
        tree.print(0, &mut out).unwrap();
        assert_eq!(out.lines().count(), 4);
    }
}
