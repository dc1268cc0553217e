
/// Dense array of boolean flags whose bulk reset is O(1) amortized: each
/// flag stores the generation in which it was last set, and resetting
/// advances the current generation.
/// # Examples
/// ```
/// use edge_hierarchies::data_structure::TimestampFlags;
/// let mut flags = TimestampFlags::init(3);
/// flags.set(1);
/// assert!(flags.is_set(1));
/// assert!(!flags.is_set(0));
/// flags.reset_all();
/// assert!(!flags.is_set(1));
/// ```
#[derive(Debug, Clone)]
pub struct TimestampFlags {
    generations: Vec<u32>,
    current: u32,
}

impl TimestampFlags {
    /// Creates `nb_flags` flags, all unset.
    pub fn init(nb_flags: usize) -> Self {
        Self {
            generations: vec![0; nb_flags],
            current: 1,
        }
    }

    /// Gives the number of flags.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Tests whether there are no flags at all.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Sets one flag.
    pub fn set(&mut self, index: usize) {
        // run time complexity O(1)
        self.generations[index] = self.current;
    }

    /// Tests one flag.
    pub fn is_set(&self, index: usize) -> bool {
        // run time complexity O(1)
        self.generations[index] == self.current
    }

    /// Unsets every flag by advancing the generation counter. When the
    /// counter would wrap around, the array is rewritten instead so stale
    /// generations can never read as set.
    pub fn reset_all(&mut self) {
        // run time complexity O(1) amortized
        if self.current == u32::MAX {
            self.generations.fill(0);
            self.current = 0;
        }
        self.current += 1;
    }
}
