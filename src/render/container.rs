use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Which of a renderer's two surfaces an attached child is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceKind {
    Vector,
    Pixel,
}

/// Identity of one attached surface. Renderer identity is positional, so the
/// slot plus the surface kind names the element for the lifetime of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceKey {
    pub slot: usize,
    pub kind: SurfaceKind,
}

impl SurfaceKey {
    #[must_use]
    pub const fn vector(slot: usize) -> Self {
        Self {
            slot,
            kind: SurfaceKind::Vector,
        }
    }

    #[must_use]
    pub const fn pixel(slot: usize) -> Self {
        Self {
            slot,
            kind: SurfaceKind::Pixel,
        }
    }
}

/// How an attached child takes part in its container's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    /// Stacked vertically after the previous in-flow sibling.
    Block,
    /// Positioned elsewhere; takes no space in the container.
    Absolute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachedSurface {
    pub key: SurfaceKey,
    pub width: f64,
    pub height: f64,
    pub flow: Flow,
    pub anchor_name: Option<String>,
}

#[derive(Debug)]
struct ContainerInner {
    name: String,
    origin: (f64, f64),
    children: IndexMap<SurfaceKey, AttachedSurface>,
}

/// Host element that chart surfaces are appended into.
///
/// Handles are cheap clones of one shared container, like DOM element
/// references. Appending a child that is already attached moves it to the end
/// instead of duplicating it.
#[derive(Debug, Clone)]
pub struct ContainerHandle {
    inner: Rc<RefCell<ContainerInner>>,
}

impl ContainerHandle {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_origin(name, 0.0, 0.0)
    }

    #[must_use]
    pub fn with_origin(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ContainerInner {
                name: name.into(),
                origin: (x, y),
                children: IndexMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    #[must_use]
    pub fn origin(&self) -> (f64, f64) {
        self.inner.borrow().origin
    }

    pub fn append(&self, key: SurfaceKey, width: f64, height: f64, flow: Flow) {
        let mut inner = self.inner.borrow_mut();
        let anchor_name = inner
            .children
            .shift_remove(&key)
            .and_then(|previous| previous.anchor_name);
        inner.children.insert(
            key,
            AttachedSurface {
                key,
                width,
                height,
                flow,
                anchor_name,
            },
        );
    }

    /// Sets the CSS-style `anchor-name` of an attached child. Returns `false`
    /// when `key` is not attached here.
    pub fn set_anchor_name(&self, key: SurfaceKey, anchor_name: impl Into<String>) -> bool {
        let mut inner = self.inner.borrow_mut();
        let anchor_name = anchor_name.into();
        // An anchor name identifies a single element.
        for child in inner.children.values_mut() {
            if child.anchor_name.as_deref() == Some(anchor_name.as_str()) {
                child.anchor_name = None;
            }
        }
        match inner.children.get_mut(&key) {
            Some(child) => {
                child.anchor_name = Some(anchor_name);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, key: SurfaceKey) -> bool {
        self.inner.borrow().children.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attached children in document order.
    #[must_use]
    pub fn keys(&self) -> Vec<SurfaceKey> {
        self.inner.borrow().children.keys().copied().collect()
    }

    #[must_use]
    pub fn child(&self, key: SurfaceKey) -> Option<AttachedSurface> {
        self.inner.borrow().children.get(&key).cloned()
    }

    /// Layout box of an in-flow child in host coordinates.
    #[must_use]
    pub fn child_rect(&self, key: SurfaceKey) -> Option<Rect> {
        let inner = self.inner.borrow();
        let (origin_x, origin_y) = inner.origin;
        let mut y = origin_y;
        for child in inner.children.values() {
            if child.flow == Flow::Absolute {
                continue;
            }
            if child.key == key {
                return Some(Rect::new(origin_x, y, child.width, child.height));
            }
            y += child.height;
        }
        None
    }

    /// Layout box of the child currently carrying `anchor_name`.
    #[must_use]
    pub fn anchor_rect(&self, anchor_name: &str) -> Option<Rect> {
        let key = self
            .inner
            .borrow()
            .children
            .values()
            .find(|child| child.anchor_name.as_deref() == Some(anchor_name))
            .map(|child| child.key)?;
        self.child_rect(key)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContainerHandle, Flow, SurfaceKey};
    use crate::core::Rect;

    #[test]
    fn append_moves_an_attached_child_to_the_end() {
        let container = ContainerHandle::new("charts");
        container.append(SurfaceKey::vector(0), 10.0, 20.0, Flow::Block);
        container.append(SurfaceKey::vector(1), 10.0, 20.0, Flow::Block);
        container.append(SurfaceKey::vector(0), 10.0, 20.0, Flow::Block);

        assert_eq!(container.len(), 2);
        assert_eq!(
            container.keys(),
            vec![SurfaceKey::vector(1), SurfaceKey::vector(0)]
        );
    }

    #[test]
    fn block_children_stack_vertically_and_absolute_ones_take_no_space() {
        let container = ContainerHandle::with_origin("charts", 5.0, 7.0);
        container.append(SurfaceKey::vector(0), 100.0, 30.0, Flow::Block);
        container.append(SurfaceKey::pixel(0), 80.0, 10.0, Flow::Absolute);
        container.append(SurfaceKey::vector(1), 100.0, 30.0, Flow::Block);

        assert_eq!(
            container.child_rect(SurfaceKey::vector(1)),
            Some(Rect::new(5.0, 37.0, 100.0, 30.0))
        );
        assert_eq!(container.child_rect(SurfaceKey::pixel(0)), None);
    }

    #[test]
    fn anchor_names_survive_reappend_and_stay_unique() {
        let container = ContainerHandle::new("charts");
        container.append(SurfaceKey::vector(0), 10.0, 10.0, Flow::Block);
        container.append(SurfaceKey::vector(1), 10.0, 10.0, Flow::Block);
        assert!(container.set_anchor_name(SurfaceKey::vector(0), "--chart-0"));
        container.append(SurfaceKey::vector(0), 10.0, 10.0, Flow::Block);

        assert_eq!(
            container.anchor_rect("--chart-0"),
            Some(Rect::new(0.0, 10.0, 10.0, 10.0))
        );

        assert!(container.set_anchor_name(SurfaceKey::vector(1), "--chart-0"));
        assert_eq!(
            container.anchor_rect("--chart-0"),
            Some(Rect::new(0.0, 0.0, 10.0, 10.0))
        );
        assert!(!container.set_anchor_name(SurfaceKey::vector(9), "--chart-9"));
    }
}
