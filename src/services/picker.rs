use rand::Rng;

/// Number of top-ranked candidates a recommendation is drawn from
pub const SHORTLIST_LEN: usize = 3;

/// Chooses one entry from a ranked shortlist
#[cfg_attr(test, mockall::automock)]
pub trait CandidatePicker: Send + Sync {
    /// Returns an index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draw from the thread-local RNG, independent per call
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl CandidatePicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Picks an entry of `shortlist`, clamping out-of-range picks to the last entry
pub fn choose<'a, T>(picker: &dyn CandidatePicker, shortlist: &'a [T]) -> Option<&'a T> {
    if shortlist.is_empty() {
        return None;
    }
    let index = picker.pick(shortlist.len()).min(shortlist.len() - 1);
    shortlist.get(index)
}
