//! Transient toast notifications.
//!
//! Each call produces an independent, independently-timed toast: slide in
//! on the next timer tick, hold for three seconds, slide out, remove. No
//! queue and no deduplication. Nothing ever cancels a toast, so the timer
//! handles are deliberately leaked.

use gloo_timers::callback::Timeout;

use crate::dom;

/// How long a toast stays fully visible.
const VISIBLE_MS: u32 = 3000;
/// Slide transition length.
const SLIDE_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn background(self) -> &'static str {
        match self {
            Severity::Info => "#3498db",
            Severity::Success => "#06d6a0",
            Severity::Error => "#e74c3c",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Severity::Info => "notification-info",
            Severity::Success => "notification-success",
            Severity::Error => "notification-error",
        }
    }
}

/// Show a transient toast.
pub fn notify(message: &str, severity: Severity) {
    let toast = dom::create_element("div");
    let _ = toast.set_attribute("class", &format!("notification {}", severity.class()));
    toast.set_text_content(Some(message));
    let _ = toast.set_attribute(
        "style",
        &format!(
            "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
             padding: 15px 20px; border-radius: 8px; \
             box-shadow: 0 4px 12px rgba(0,0,0,0.15); z-index: 10000; \
             transform: translateX(100%); transition: transform 0.3s ease; \
             font-weight: 500; max-width: 300px;",
            severity.background()
        ),
    );

    let _ = dom::page_body().append_child(&toast);

    {
        let toast = toast.clone();
        Timeout::new(10, move || {
            dom::set_style(&toast, "transform", "translateX(0)");
        })
        .forget();
    }

    Timeout::new(VISIBLE_MS, move || {
        dom::set_style(&toast, "transform", "translateX(100%)");
        Timeout::new(SLIDE_MS, move || toast.remove()).forget();
    })
    .forget();
}
