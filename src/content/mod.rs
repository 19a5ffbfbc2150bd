//! Site content module
//!
//! Typed access to the static documents the marketing site renders next to
//! the listings: testimonials, FAQ and footer, plus the clock stamps.
//!
//! Unlike listings, content failures are ordinary errors; the caller decides
//! what empty state to show.

mod loader;
pub mod stamp;
mod types;

pub use loader::{ContentClient, FAQ_PATH, FOOTER_PATH, TESTIMONIALS_PATH};
pub use types::{
    faq_number, marquee_loop, Contact, Faq, FaqId, Footer, Link, LinkSection, SocialLink,
    Testimonial, MARQUEE_COPIES,
};
