//! A small reference-counted widget tree used as the host in integration
//! tests. Every widget shares a [`Ledger`] that counts retains and releases
//! coming from the adapter.

#![allow(dead_code)]

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gstyle::Styleable;

#[derive(Debug, Default)]
pub struct Ledger {
    retains: Cell<usize>,
    releases: Cell<usize>,
}

impl Ledger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn retains(&self) -> usize {
        self.retains.get()
    }

    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    pub fn balanced(&self) -> bool {
        self.retains() == self.releases()
    }
}

#[derive(Debug)]
struct WidgetData {
    name: String,
    attributes: RefCell<Vec<(String, String)>>,
    parent: RefCell<Weak<WidgetData>>,
    children: RefCell<Vec<Widget>>,
    ledger: Rc<Ledger>,
}

#[derive(Clone, Debug)]
pub struct Widget(Rc<WidgetData>);

impl Widget {
    pub fn new(ledger: &Rc<Ledger>, name: &str) -> Self {
        Self(Rc::new(WidgetData {
            name: name.to_string(),
            attributes: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            ledger: Rc::clone(ledger),
        }))
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .attributes
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
        self
    }

    /// Appends `child` and returns it.
    pub fn append(&self, child: Widget) -> Widget {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        child
    }

    fn siblings(&self) -> Option<Vec<Widget>> {
        let parent = self.0.parent.borrow().upgrade()?;
        let children = parent.children.borrow().clone();
        Some(children)
    }

    fn sibling_at(&self, offset: isize) -> Option<Widget> {
        let siblings = self.siblings()?;
        let position = self.index().checked_add_signed(offset)?;
        siblings.get(position).cloned()
    }
}

impl Styleable for Widget {
    type Key = usize;

    fn node_key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    fn parent_node(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Widget)
    }

    fn first_child(&self) -> Option<Self> {
        self.0.children.borrow().first().cloned()
    }

    fn next_sibling(&self) -> Option<Self> {
        self.sibling_at(1)
    }

    fn previous_sibling(&self) -> Option<Self> {
        self.sibling_at(-1)
    }

    fn node_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0.name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .attributes
            .borrow()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn children_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    fn index(&self) -> usize {
        self.siblings()
            .and_then(|siblings| siblings.iter().position(|w| Rc::ptr_eq(&w.0, &self.0)))
            .unwrap_or(0)
    }

    fn retain(&self) {
        let ledger = &self.0.ledger;
        ledger.retains.set(ledger.retains.get() + 1);
    }

    fn release(&self) {
        let ledger = &self.0.ledger;
        ledger.releases.set(ledger.releases.get() + 1);
    }
}

/// Builds:
///
/// ```text
/// Window#main
///   Box.toolbar
///     Button.primary (label=Save)
///     Button (label=Open)
///   Label
/// ```
pub struct Sample {
    pub ledger: Rc<Ledger>,
    pub window: Widget,
    pub toolbar: Widget,
    pub save: Widget,
    pub open: Widget,
    pub label: Widget,
}

pub fn sample() -> Sample {
    let ledger = Ledger::new();
    let window = Widget::new(&ledger, "Window").with_attr("id", "main");
    let toolbar = window.append(Widget::new(&ledger, "Box").with_attr("class", "toolbar"));
    let save = toolbar.append(
        Widget::new(&ledger, "Button")
            .with_attr("class", "primary")
            .with_attr("label", "Save"),
    );
    let open = toolbar.append(Widget::new(&ledger, "Button").with_attr("label", "Open"));
    let label = window.append(Widget::new(&ledger, "Label"));
    Sample {
        ledger,
        window,
        toolbar,
        save,
        open,
        label,
    }
}
