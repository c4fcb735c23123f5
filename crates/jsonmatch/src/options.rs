/// Tunables for how a single path segment resolves against a container.
///
/// Options never change path syntax or value equality, only lookup.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Resolve negative array indices from the end, so `-1` addresses the
    /// last element. When disabled, a negative index is an error.
    pub support_negative_indices: bool,
    /// Match object keys ASCII case-insensitively. The first member in
    /// document order wins when several keys differ only by case.
    pub case_insensitive_keys: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            support_negative_indices: false,
            case_insensitive_keys: false,
        }
    }
}
