use client_core::{BannerKind, FormStatus, Location, Navigator, Toast};
use shared::domain::Step;

pub fn heading(step: Step, href: &str) {
    println!();
    println!("== {} ({href}) ==", step.title());
}

pub fn status(status: &FormStatus) {
    if let Some(banner) = status.banner() {
        match banner.kind {
            BannerKind::Success => println!("[ok] {}", banner.text),
            BannerKind::Error => println!("[error] {}", banner.text),
        }
    }
}

pub fn toast(toast: &Toast) {
    println!(
        "[notice {}] {}",
        toast.shown_at.format("%H:%M:%S"),
        toast.text
    );
}

pub fn location(navigator: &Navigator) {
    match navigator.current() {
        Location::Route(step) => println!("-> {} ({})", step.title(), navigator.href()),
        Location::External(url) => println!("-> redirecting to {url}"),
    }
}
