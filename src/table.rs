use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
struct Entry<T> {
    value: Option<T>,
    /// Index of the next free cell (only meaningful for free cells).
    next: usize,
}

impl<T> Entry<T> {
    fn vacant(next: usize) -> Self {
        Self { value: None, next }
    }

    /// Check if the cell is occupied.
    fn occupied(&self) -> bool {
        self.value.is_some()
    }
}

/// Growable slot arena.
///
/// Cells are addressed by `usize` indices. Index 0 is a sentry that is never handed out,
/// so a zero index can be used as "no cell" by callers. Freed cells are chained into a free
/// list through their `next` field and are reused by subsequent allocations.
#[derive(Debug, Clone)]
pub struct Table<T> {
    data: Vec<Entry<T>>,

    /// Head of the free list (0 when empty).
    free_head: usize,
    /// Number of occupied cells.
    real_size: usize,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new table with room for `capacity` values before reallocation.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut data = Vec::with_capacity(capacity + 1);
        data.push(Entry::vacant(0)); // sentry
        Self {
            data,
            free_head: 0,
            real_size: 0,
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    /// Get the number of cells ever allocated (including free ones).
    pub fn size(&self) -> usize {
        self.data.len() - 1
    }
    /// Get the number of occupied cells.
    pub fn real_size(&self) -> usize {
        self.real_size
    }

    /// Check if the cell at the given index is occupied.
    pub fn is_occupied(&self, index: usize) -> bool {
        assert_ne!(index, 0, "Index is 0");
        self.data.get(index).is_some_and(Entry::occupied)
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        match &self.data[index].value {
            Some(value) => value,
            None => panic!("Cell {} is free", index),
        }
    }
    /// Get the mutable reference to the value at the given index.
    pub fn value_mut(&mut self, index: usize) -> &mut T {
        assert_ne!(index, 0, "Index is 0");
        match &mut self.data[index].value {
            Some(value) => value,
            None => panic!("Cell {} is free", index),
        }
    }

    /// Add a new value to the table and return its index.
    pub fn add(&mut self, value: T) -> usize {
        self.real_size += 1;

        if self.free_head != 0 {
            let index = self.free_head;
            let entry = &mut self.data[index];
            self.free_head = entry.next;
            entry.value = Some(value);
            entry.next = 0;
            return index;
        }

        self.data.push(Entry {
            value: Some(value),
            next: 0,
        });
        self.data.len() - 1
    }

    /// Drop the value at the given index, returning it.
    pub fn drop(&mut self, index: usize) -> T {
        assert_ne!(index, 0, "Index is 0");

        let entry = &mut self.data[index];
        let value = match entry.value.take() {
            Some(value) => value,
            None => panic!("Double free of cell {}", index),
        };
        entry.next = self.free_head;
        self.free_head = index;
        self.real_size -= 1;

        value
    }

    /// Iterate over the indices of the occupied cells.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.data
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, entry)| entry.occupied())
            .map(|(i, _)| i)
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}

impl<T> IndexMut<usize> for Table<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.value_mut(index)
    }
}
