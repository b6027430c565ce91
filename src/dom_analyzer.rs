// File: dom_analyzer.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{ExtractError, Result};
use crate::urlinfo::{hostname_of, DomainResolver};

static ALL_ELEMENTS: Lazy<Selector> = Lazy::new(|| Selector::parse("*").unwrap());
static FORM: Lazy<Selector> = Lazy::new(|| Selector::parse("form").unwrap());
static PASSWORD_INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="password"]"#).unwrap());
static IFRAME: Lazy<Selector> = Lazy::new(|| Selector::parse("iframe").unwrap());
static META: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").unwrap());
static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());
static ANCHOR_WITH_HREF: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static HIDDEN_INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="hidden"]"#).unwrap());
static HIDDEN_ATTR: Lazy<Selector> = Lazy::new(|| Selector::parse("[hidden]").unwrap());
static STYLED: Lazy<Selector> = Lazy::new(|| Selector::parse("[style]").unwrap());

// The parser synthesizes <body> for any input, so absence of the literal
// tag in the snapshot text is what distinguishes a real rendered page from
// an error blob.
static BODY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[\s/>]").unwrap());
static DISPLAY_NONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)display:\s*none").unwrap());
static META_REFRESH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^refresh$").unwrap());

/// Structural metrics of the rendered DOM snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DomFeatures {
    pub total_nodes: u32,
    pub max_depth: u32,
    pub num_forms: u32,
    pub num_password_fields: u32,
    pub form_action_suspicious: bool,
    pub num_iframes: u32,
    pub has_js_redirect: bool,
    pub percent_external_links: f64,
    pub num_hidden_elements: u32,
}

pub struct DomAnalyzer;

impl DomAnalyzer {
    /// Computes the 9 DOM slots from a snapshot. A snapshot without a body
    /// element is not a rendered page and fails structurally; the caller
    /// turns that into 9 missing slots.
    pub fn analyze(
        dom_html: &str,
        page_domain: Option<&str>,
        resolver: &DomainResolver,
    ) -> Result<DomFeatures> {
        if !BODY_TAG.is_match(dom_html) {
            return Err(ExtractError::Structural(
                "DOM snapshot has no body element".to_string(),
            ));
        }

        let document = Html::parse_document(dom_html);

        let mut total_nodes = 0u32;
        let mut max_depth = 0u32;
        for element in document.select(&ALL_ELEMENTS) {
            total_nodes += 1;
            let depth = element.ancestors().count() as u32;
            if depth > max_depth {
                max_depth = depth;
            }
        }

        let mut num_forms = 0u32;
        let mut form_action_suspicious = false;
        for form in document.select(&FORM) {
            num_forms += 1;
            let action = form
                .value()
                .attr("action")
                .unwrap_or("")
                .trim()
                .to_lowercase();
            if action.is_empty() || action == "#" || action.starts_with("javascript:") {
                form_action_suspicious = true;
            }
        }

        let num_password_fields = document.select(&PASSWORD_INPUT).count() as u32;
        let num_iframes = document.select(&IFRAME).count() as u32;

        debug!(
            "DOM analyzer: {} elements, depth {}, {} forms",
            total_nodes, max_depth, num_forms
        );

        Ok(DomFeatures {
            total_nodes,
            max_depth,
            num_forms,
            num_password_fields,
            form_action_suspicious,
            num_iframes,
            has_js_redirect: has_js_redirect(&document),
            percent_external_links: percent_external_links(&document, page_domain, resolver),
            num_hidden_elements: count_hidden_elements(&document),
        })
    }
}

/// Meta-refresh or an inline script touching the location object.
fn has_js_redirect(document: &Html) -> bool {
    let meta_refresh = document.select(&META).any(|meta| {
        meta.value()
            .attr("http-equiv")
            .map(|equiv| META_REFRESH.is_match(equiv))
            .unwrap_or(false)
    });
    if meta_refresh {
        return true;
    }

    document.select(&SCRIPT).any(|script| {
        let text: String = script.text().collect();
        text.contains("window.location") || text.contains("document.location")
    })
}

/// Share (in percent) of absolute http(s) anchors pointing off the page's
/// registrable domain. Relative and fragment links qualify as neither
/// internal nor external. 0.0 when nothing qualifies or the page domain
/// does not resolve.
fn percent_external_links(
    document: &Html,
    page_domain: Option<&str>,
    resolver: &DomainResolver,
) -> f64 {
    let Some(page_domain) = page_domain.and_then(|domain| resolver.registrable_domain(domain))
    else {
        return 0.0;
    };

    let mut qualifying = 0u32;
    let mut external = 0u32;
    for anchor in document.select(&ANCHOR_WITH_HREF) {
        let href = anchor.value().attr("href").unwrap_or("");
        if !href.starts_with("http://") && !href.starts_with("https://") {
            continue;
        }
        qualifying += 1;

        let link_domain = hostname_of(href)
            .and_then(|host| resolver.registrable_domain(&host));
        if let Some(link_domain) = link_domain {
            if link_domain != page_domain {
                external += 1;
            }
        }
    }

    if qualifying == 0 {
        return 0.0;
    }
    f64::from(external) / f64::from(qualifying) * 100.0
}

/// Inline `display:none`, hidden inputs and the `hidden` attribute are
/// counted as three separate passes; an element matching more than one
/// pass counts each time.
fn count_hidden_elements(document: &Html) -> u32 {
    let styled_hidden = document
        .select(&STYLED)
        .filter(|el| {
            el.value()
                .attr("style")
                .map(|style| DISPLAY_NONE.is_match(style))
                .unwrap_or(false)
        })
        .count();
    let hidden_inputs = document.select(&HIDDEN_INPUT).count();
    let hidden_attr = document.select(&HIDDEN_ATTR).count();

    (styled_hidden + hidden_inputs + hidden_attr) as u32
}

#[cfg(test)]
#[path = "dom_analyzer_tests.rs"]
mod tests;
