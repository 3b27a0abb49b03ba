//! Field extraction rules and their compiled matchers.
//!
//! Profiles describe each field as an ordered list of rules. The adapter
//! compiles them once and evaluates them in order per container; the first
//! rule that yields a value wins.

use scraper::{ElementRef, Selector};
use smartshop_core::Platform;

use crate::error::ScraperError;

/// Rule for a text-valued field (name or price text).
#[derive(Debug, Clone, Copy)]
pub enum TextRule {
    /// Walk anchors in order; the first with a non-empty `title` attribute or
    /// non-empty text supplies the value.
    AnchorTitleOrText,
    /// First element matching the selector with non-empty text.
    ElementText(&'static str),
    /// First text fragment anywhere in the container carrying the currency marker.
    CurrencyFragment,
    /// First element matching the selector whose text carries the currency marker.
    CurrencyElement(&'static str),
}

/// Rule for an attribute-valued field (product link or image).
#[derive(Debug, Clone, Copy)]
pub struct AttrRule {
    pub selector: &'static str,
    pub attr: &'static str,
}

/// Skip a container outright when `attr` equals `value`.
#[derive(Debug, Clone, Copy)]
pub struct Exclusion {
    pub attr: &'static str,
    pub value: &'static str,
    pub reason: &'static str,
}

impl Exclusion {
    pub(crate) fn matches(&self, container: ElementRef<'_>) -> bool {
        container.value().attr(self.attr) == Some(self.value)
    }
}

pub(crate) fn compile_selector(
    platform: Platform,
    selector: &'static str,
) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        platform,
        selector,
        reason: format!("{e:?}"),
    })
}

#[derive(Debug)]
pub(crate) enum TextMatcher {
    AnchorTitleOrText(Selector),
    ElementText(Selector),
    CurrencyFragment,
    CurrencyElement(Selector),
}

impl TextMatcher {
    pub(crate) fn compile(platform: Platform, rule: TextRule) -> Result<Self, ScraperError> {
        Ok(match rule {
            TextRule::AnchorTitleOrText => {
                TextMatcher::AnchorTitleOrText(compile_selector(platform, "a")?)
            }
            TextRule::ElementText(s) => TextMatcher::ElementText(compile_selector(platform, s)?),
            TextRule::CurrencyFragment => TextMatcher::CurrencyFragment,
            TextRule::CurrencyElement(s) => {
                TextMatcher::CurrencyElement(compile_selector(platform, s)?)
            }
        })
    }

    pub(crate) fn extract(&self, container: ElementRef<'_>, currency: &str) -> Option<String> {
        match self {
            TextMatcher::AnchorTitleOrText(anchor) => container.select(anchor).find_map(|a| {
                a.value()
                    .attr("title")
                    .map(clean_text)
                    .filter(|t| !t.is_empty())
                    .or_else(|| Some(element_text(a)).filter(|t| !t.is_empty()))
            }),
            TextMatcher::ElementText(selector) => container
                .select(selector)
                .map(element_text)
                .find(|t| !t.is_empty()),
            TextMatcher::CurrencyFragment => container
                .text()
                .map(clean_text)
                .find(|t| t.contains(currency)),
            TextMatcher::CurrencyElement(selector) => container
                .select(selector)
                .map(element_text)
                .find(|t| t.contains(currency)),
        }
    }
}

#[derive(Debug)]
pub(crate) struct AttrMatcher {
    selector: Selector,
    attr: &'static str,
}

impl AttrMatcher {
    pub(crate) fn compile(platform: Platform, rule: AttrRule) -> Result<Self, ScraperError> {
        Ok(Self {
            selector: compile_selector(platform, rule.selector)?,
            attr: rule.attr,
        })
    }

    /// First element matching the selector that carries a non-empty attribute.
    pub(crate) fn extract(&self, container: ElementRef<'_>) -> Option<String> {
        container.select(&self.selector).find_map(|el| {
            el.value()
                .attr(self.attr)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        })
    }
}

/// Joins an element's text nodes with single spaces.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
