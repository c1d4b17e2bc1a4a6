use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;

/// A finished conversion tagged with the load that produced it.
#[derive(Debug, PartialEq, Eq)]
pub struct Rendered {
    pub generation: u64,
    pub text: String,
}

/// Latest-load-wins bookkeeping for watch mode.
///
/// Every new load takes a generation number from [`Session::bump`]. A
/// conversion result is only published if no newer load has started
/// since, so an older conversion finishing late never replaces a newer
/// one.
#[derive(Default)]
pub struct Session {
    generation: AtomicU64,
    latest: ArcSwapOption<Rendered>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load and return its generation.
    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Generation of the newest load started so far.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Publish `text` for `generation`.
    ///
    /// Returns `false` (and drops `text`) when a newer load exists or a
    /// newer result is already published.
    pub fn publish(&self, generation: u64, text: String) -> bool {
        if generation < self.current() {
            return false;
        }
        let candidate = Arc::new(Rendered { generation, text });
        let previous = self.latest.rcu(|cur| match cur {
            Some(cur) if cur.generation > generation => Some(Arc::clone(cur)),
            _ => Some(Arc::clone(&candidate)),
        });
        previous
            .as_ref()
            .is_none_or(|p| p.generation <= generation)
    }

    /// Most recently published result.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Rendered>> {
        self.latest.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let s = Session::new();
        assert_eq!(s.current(), 0);
        assert_eq!(s.bump(), 1);
        assert_eq!(s.bump(), 2);
        assert_eq!(s.current(), 2);
        assert!(s.latest().is_none());
    }

    #[test]
    fn stale_result_is_discarded() {
        let s = Session::new();
        let first = s.bump();
        let second = s.bump();
        assert!(!s.publish(first, "old".into()));
        assert!(s.latest().is_none());
        assert!(s.publish(second, "new".into()));
        assert_eq!(s.latest().map(|r| r.text.clone()), Some("new".into()));
    }

    #[test]
    fn newer_result_is_not_overwritten() {
        let s = Session::new();
        let g = s.bump();
        assert!(s.publish(g, "a".into()));
        assert!(s.publish(g, "b".into()));
        assert_eq!(s.latest().map(|r| r.text.clone()), Some("b".into()));
    }

    #[test]
    fn concurrent_publishers_keep_newest() {
        let s = Arc::new(Session::new());
        let generations: Vec<u64> = (0..8).map(|_| s.bump()).collect();
        let handles: Vec<_> = generations
            .into_iter()
            .rev()
            .map(|g| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || s.publish(g, format!("gen {g}")))
            })
            .collect();
        let published: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(published, 1);
        let latest = s.latest().unwrap();
        assert_eq!(latest.generation, 8);
        assert_eq!(latest.text, "gen 8");
    }
}
