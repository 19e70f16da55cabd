//! Editable form primitives shared by the creation screen and key handling.

/// Fields of the person form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    State,
    City,
    Submit,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::State,
            FormField::State => FormField::City,
            FormField::City => FormField::Submit,
            FormField::Submit => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Submit,
            FormField::Email => FormField::Name,
            FormField::State => FormField::Email,
            FormField::City => FormField::State,
            FormField::Submit => FormField::City,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Name | FormField::Email)
    }
}

/// Single-line text input. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
    /// Typed characters past this count are dropped
    pub max_chars: Option<usize>,
}

impl TextField {
    pub fn with_limit(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        if self.max_chars.is_some_and(|max| self.len() >= max) {
            return;
        }
        let index = self.byte_index();
        self.value.insert(index, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index();
            self.value.remove(index);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let index = self.byte_index();
            self.value.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Steps through a select's options, where position 0 is the empty
/// placeholder and wraps around at both ends.
pub fn cycle_option(options: &[u64], current: Option<u64>, forward: bool) -> Option<u64> {
    let slots = options.len() + 1;
    let index = current
        .and_then(|id| options.iter().position(|&o| o == id))
        .map(|p| p + 1)
        .unwrap_or(0);

    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };

    if next == 0 { None } else { Some(options[next - 1]) }
}
