//! Site content document models
//!
//! Shapes of the static JSON documents under `/data/` on the site.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Whitespace runs, stripped from phone numbers before building `tel:` links
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Number of times the testimonial list is repeated for the marquee loop
pub const MARQUEE_COPIES: usize = 6;

// ============================================================================
// Testimonials (client.json)
// ============================================================================

/// One client testimonial
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Testimonial {
    /// Client name
    #[serde(default)]
    pub name: String,
    /// Social handle without the leading `@`
    #[serde(default)]
    pub title: String,
    /// Avatar image URL
    #[serde(default)]
    pub avatar: String,
    /// Iconify icon name of the social network
    #[serde(default)]
    pub icon: String,
    /// Testimonial body
    #[serde(default)]
    pub desc: String,
    /// Date as shown
    #[serde(default)]
    pub date: String,
    /// Time as shown
    #[serde(default)]
    pub time: String,
}

impl Testimonial {
    /// Handle with the `@` prefix
    pub fn handle(&self) -> String {
        format!("@{}", self.title)
    }

    /// Alt text for the avatar image
    pub fn avatar_alt(&self) -> String {
        format!("{}'s profile picture", self.name)
    }
}

/// Repeat `items` `copies` times back to back, for a seamless marquee
pub fn marquee_loop<T: Clone>(items: &[T], copies: usize) -> Vec<T> {
    let mut looped = Vec::with_capacity(items.len() * copies);
    for _ in 0..copies {
        looped.extend_from_slice(items);
    }
    looped
}

// ============================================================================
// FAQ (faq.json)
// ============================================================================

/// FAQ identifier, numeric or textual in the source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaqId {
    Number(u64),
    Text(String),
}

impl fmt::Display for FaqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One question and answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
}

impl Faq {
    /// Id of the question element
    pub fn question_id(&self) -> String {
        format!("faq-question-{}", self.id)
    }

    /// Id of the answer region
    pub fn answer_id(&self) -> String {
        format!("faq-answer-{}", self.id)
    }
}

/// Two-digit, 1-based label for the FAQ at `index` ("01", "02", ...)
pub fn faq_number(index: usize) -> String {
    format!("{:02}", index + 1)
}

// ============================================================================
// Footer (footer.json)
// ============================================================================

/// A labelled link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// A titled group of links
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Contact block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    /// Section heading, "Contact" when the document has none
    pub fn heading(&self) -> &str {
        self.title.as_deref().unwrap_or("Contact")
    }

    /// `tel:` link with whitespace removed from the number
    pub fn tel_href(&self) -> Option<String> {
        self.phone
            .as_deref()
            .map(|phone| format!("tel:{}", WHITESPACE_REGEX.replace_all(phone, "")))
    }

    /// `mailto:` link
    pub fn mailto_href(&self) -> Option<String> {
        self.email.as_deref().map(|email| format!("mailto:{email}"))
    }
}

/// A social network link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub href: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl SocialLink {
    /// Text shown when there is no icon
    pub fn fallback_text(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }
}

/// Footer document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub company: Option<LinkSection>,
    #[serde(default)]
    pub why: Option<LinkSection>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub legal: Option<LinkSection>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

impl Footer {
    /// Link sections in display order (company, then why)
    pub fn link_sections(&self) -> Vec<&LinkSection> {
        [self.company.as_ref(), self.why.as_ref()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Legal links, empty if the document has none
    pub fn legal_links(&self) -> &[Link] {
        match &self.legal {
            Some(legal) => &legal.links,
            None => &[],
        }
    }
}
