//! FAQ accordion: at most one item open at a time.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionItem {
    pub title: String,
    pub body: String,
}

impl AccordionItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Accordion {
    items: Vec<AccordionItem>,
    open: Option<usize>,
}

impl Accordion {
    /// All items start closed.
    pub fn new(items: Vec<AccordionItem>) -> Self {
        Self { items, open: None }
    }

    pub fn items(&self) -> &[AccordionItem] {
        &self.items
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Handle a click on the header of `index`.
    ///
    /// Opening an item closes whichever other item was open; clicking the open
    /// item closes it. Returns `false` for an index with no item.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }

        self.open = if self.is_open(index) { None } else { Some(index) };
        true
    }
}
