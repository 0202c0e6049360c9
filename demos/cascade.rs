//! Resolves a few properties over a small widget tree.
//!
//! Run with `cargo run --example cascade [stylesheet.css]`. Without an
//! argument a built-in stylesheet is used. Trace output goes to
//! `cascade.log`.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gstyle_rs::{Styleable, Stylesheet, init_logger};
use log::LevelFilter;

const CSS: &str = r#"
Screen { background: black; }
Panel > Button { color: white; padding: 0 1; }
Button:first-child { color: yellow; }
Button.danger { color: red; border: heavy red; }
Panel Label:last-child { text-style: bold; }
"#;

struct Node {
    name: &'static str,
    classes: &'static str,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<Rc<Node>>>,
}

#[derive(Clone)]
struct Widget(Rc<Node>);

impl Widget {
    fn new(name: &'static str, classes: &'static str) -> Self {
        Self(Rc::new(Node {
            name,
            classes,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    fn mount(&self, child: Widget) -> Widget {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(Rc::clone(&child.0));
        child
    }

    fn sibling(&self, offset: isize) -> Option<Widget> {
        let parent = self.0.parent.borrow().upgrade()?;
        let children = parent.children.borrow();
        let position = self.index().checked_add_signed(offset)?;
        children.get(position).cloned().map(Widget)
    }
}

impl Styleable for Widget {
    type Key = *const Node;

    fn node_key(&self) -> Self::Key {
        Rc::as_ptr(&self.0)
    }
    fn parent_node(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(Widget)
    }
    fn first_child(&self) -> Option<Self> {
        self.0.children.borrow().first().cloned().map(Widget)
    }
    fn next_sibling(&self) -> Option<Self> {
        self.sibling(1)
    }
    fn previous_sibling(&self) -> Option<Self> {
        self.sibling(-1)
    }
    fn node_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0.name)
    }
    fn attribute(&self, name: &str) -> Option<String> {
        (name == "class" && !self.0.classes.is_empty()).then(|| self.0.classes.to_string())
    }
    fn children_count(&self) -> usize {
        self.0.children.borrow().len()
    }
    fn index(&self) -> usize {
        let Some(parent) = self.0.parent.borrow().upgrade() else {
            return 0;
        };
        let children = parent.children.borrow();
        children
            .iter()
            .position(|c| Rc::ptr_eq(c, &self.0))
            .unwrap_or(0)
    }
}

fn main() -> gstyle_rs::Result<()> {
    if let Err(err) = init_logger("cascade.log", LevelFilter::Trace) {
        eprintln!("logging disabled: {err}");
    }

    let sheet = match std::env::args().nth(1) {
        Some(path) => Stylesheet::from_file(path)?,
        None => Stylesheet::from_source(CSS)?,
    };

    let screen = Widget::new("Screen", "");
    let panel = screen.mount(Widget::new("Panel", ""));
    let ok = panel.mount(Widget::new("Button", ""));
    let delete = panel.mount(Widget::new("Button", "danger"));
    let status = panel.mount(Widget::new("Label", "status"));

    for (label, widget) in [
        ("screen", &screen),
        ("ok", &ok),
        ("delete", &delete),
        ("status", &status),
    ] {
        println!("{label}:");
        for (property, value) in sheet.computed_properties(widget)? {
            println!("  {property}: {value}");
        }
    }

    let color = sheet.get_property(&delete, "color")?;
    println!("delete color = {}", color.as_deref().unwrap_or("<unset>"));
    Ok(())
}
