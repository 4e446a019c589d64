use tiptoi_core::{AudioCandidate, CatalogEntry, DestinationOption, Labeled};

/// What the shared list shows at the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerItem {
    Product(CatalogEntry),
    Audio(AudioCandidate),
    Destination(DestinationOption),
}

impl Labeled for PickerItem {
    fn label(&self) -> &str {
        match self {
            Self::Product(p) => p.label(),
            Self::Audio(a) => a.label(),
            Self::Destination(d) => d.label(),
        }
    }

    fn locator(&self) -> &str {
        match self {
            Self::Product(p) => p.locator(),
            Self::Audio(a) => a.locator(),
            Self::Destination(d) => d.locator(),
        }
    }
}

/// A selectable list of labelled items with a cursor and a label filter.
#[derive(Debug, Clone)]
pub struct Picker<T> {
    items: Vec<T>,
    /// Indices into `items` that pass the filter, in original order.
    visible: Vec<usize>,
    /// Position within `visible`.
    cursor: usize,
    filter: String,
    width: u16,
    height: u16,
}

impl<T> Default for Picker<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            filter: String::new(),
            width: 80,
            height: 20,
        }
    }
}

impl<T: Labeled> Picker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents, resetting cursor and filter.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.visible.clear();
        self.filter.clear();
        self.cursor = 0;
        self.recompute_visible();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items passing the filter, in display order.
    pub fn visible_items(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The highlighted item, if any item is visible.
    pub fn selected(&self) -> Option<&T> {
        self.visible.get(self.cursor).map(|&i| &self.items[i])
    }

    /// Move the cursor to the first visible item matching `pred`.
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) {
        if let Some(pos) = self.visible.iter().position(|&i| pred(&self.items[i])) {
            self.cursor = pos;
        }
    }

    pub fn move_down(&mut self) {
        let max = self.visible.len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        let max = self.visible.len().saturating_sub(1);
        self.cursor = (self.cursor + self.page_size()).min(max);
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.page_size());
    }

    pub fn go_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_bottom(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.recompute_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.recompute_visible();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.recompute_visible();
    }

    /// Record the list viewport size. Never touches items or cursor.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// First visible row so that the cursor stays on screen in `rows` rows.
    pub fn scroll_offset(&self, rows: usize) -> usize {
        if rows == 0 || self.cursor < rows {
            0
        } else {
            self.cursor + 1 - rows
        }
    }

    fn page_size(&self) -> usize {
        (self.height as usize).max(1)
    }

    /// Re-apply the filter, keeping the cursor on the same item when it survives.
    fn recompute_visible(&mut self) {
        let prev = self.visible.get(self.cursor).copied();
        let query = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| query.is_empty() || item.label().to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();

        self.cursor = prev
            .and_then(|p| self.visible.iter().position(|&i| i == p))
            .unwrap_or(0)
            .min(self.visible.len().saturating_sub(1));
    }
}
