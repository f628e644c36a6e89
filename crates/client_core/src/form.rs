//! Per-page UI flags: the loading flag and the success/error banner.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::notification::{Banner, BannerKind};

/// Set while a page has a request in flight. Clones observe the same flag, so
/// a renderer can watch it while the page is busy submitting.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Raises the flag, or returns `None` if it is already up. The flag drops
    /// back when the guard does.
    pub fn begin(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(Arc::clone(&self.0)))
    }
}

#[must_use = "the loading flag clears as soon as the guard is dropped"]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    banner: Option<Banner>,
}

impl FormStatus {
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn success(&self) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|b| b.kind == BannerKind::Success)
            .map(|b| b.text.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|b| b.kind == BannerKind::Error)
            .map(|b| b.text.as_str())
    }

    pub fn clear(&mut self) {
        self.banner = None;
    }

    pub fn succeed(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner::success(text));
    }

    pub fn fail(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner::error(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_until_guard_drops() {
        let flag = LoadingFlag::default();
        let observer = flag.clone();

        let guard = flag.begin().expect("first begin");
        assert!(observer.is_set());
        assert!(flag.begin().is_none());

        drop(guard);
        assert!(!observer.is_set());
        assert!(flag.begin().is_some());
    }

    #[test]
    fn banner_kind_selects_accessor() {
        let mut status = FormStatus::default();
        status.fail("boom");
        assert_eq!(status.error(), Some("boom"));
        assert_eq!(status.success(), None);

        status.succeed("done");
        assert_eq!(status.success(), Some("done"));
        assert_eq!(status.error(), None);

        status.clear();
        assert!(status.banner().is_none());
    }
}
