use crossterm::event::KeyCode;

/// Apply a key to a text buffer. Returns true if the key edited the
/// buffer.
pub fn apply_key(buffer: &mut String, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// Focus cursor cycling over a fixed number of form fields
#[derive(Debug, Clone, Copy)]
pub struct FieldCursor {
    index: usize,
    count: usize,
}

impl FieldCursor {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.count;
    }

    pub fn prev(&mut self) {
        self.index = if self.index == 0 {
            self.count - 1
        } else {
            self.index - 1
        };
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
