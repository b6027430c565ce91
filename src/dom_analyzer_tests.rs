// File: dom_analyzer_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::dom_analyzer::*;
    use crate::urlinfo::DomainResolver;
    use pretty_assertions::assert_eq;

    fn analyze(html: &str, page_domain: Option<&str>) -> crate::error::Result<DomFeatures> {
        let resolver = DomainResolver::new();
        DomAnalyzer::analyze(html, page_domain, &resolver)
    }

    #[test]
    fn test_body_less_snapshot_is_structural_fault() {
        assert!(analyze("", None).is_err());
        assert!(analyze("ERR_CONNECTION_REFUSED", None).is_err());
        assert!(analyze("<html><div>x</div></html>", None).is_err());
    }

    #[test]
    fn test_node_count_and_depth() {
        let html =
            "<html><head><title>t</title></head><body><div><p>hi</p></div></body></html>";
        let features = analyze(html, None).unwrap();
        // html, head, title, body, div, p
        assert_eq!(features.total_nodes, 6);
        // p sits under div > body > html > document
        assert_eq!(features.max_depth, 4);
    }

    #[test]
    fn test_form_and_credential_metrics() {
        let html = r##"<html><body>
            <form action="#"><input type="password" name="pw"></form>
            <form action="https://example.com/login"></form>
            <iframe src="a.html"></iframe>
            <iframe src="b.html"></iframe>
            <iframe src="c.html"></iframe>
        </body></html>"##;
        let features = analyze(html, None).unwrap();
        assert_eq!(features.num_forms, 2);
        assert_eq!(features.num_password_fields, 1);
        assert_eq!(features.num_iframes, 3);
        assert!(features.form_action_suspicious);
    }

    #[test]
    fn test_form_action_empty_and_javascript_are_suspicious() {
        let empty = analyze("<body><form></form></body>", None).unwrap();
        assert!(empty.form_action_suspicious);

        let js = analyze(
            r#"<body><form action="JavaScript:void(0)"></form></body>"#,
            None,
        )
        .unwrap();
        assert!(js.form_action_suspicious);

        let normal = analyze(
            r#"<body><form action="/submit"></form></body>"#,
            None,
        )
        .unwrap();
        assert!(!normal.form_action_suspicious);
    }

    #[test]
    fn test_meta_refresh_is_js_redirect() {
        let html = r#"<body><meta http-equiv="Refresh" content="0; url=http://x.example/"></body>"#;
        let features = analyze(html, None).unwrap();
        assert!(features.has_js_redirect);
    }

    #[test]
    fn test_script_location_assignment_is_js_redirect() {
        let html = r#"<body><script>window.location = "http://x.example/";</script></body>"#;
        assert!(analyze(html, None).unwrap().has_js_redirect);

        let doc = r#"<body><script>document.location.replace("http://x.example/");</script></body>"#;
        assert!(analyze(doc, None).unwrap().has_js_redirect);

        let benign = r#"<body><script>console.log("hello");</script></body>"#;
        assert!(!analyze(benign, None).unwrap().has_js_redirect);
    }

    #[test]
    fn test_percent_external_links() {
        let html = r##"<body>
            <a href="https://www.example.com/about">internal</a>
            <a href="https://evil.net/login">external</a>
            <a href="/relative">relative</a>
            <a href="#top">fragment</a>
        </body>"##;
        let features = analyze(html, Some("example.com")).unwrap();
        // 2 qualifying absolute links, 1 external
        assert_eq!(features.percent_external_links, 50.0);
    }

    #[test]
    fn test_percent_external_links_without_page_domain() {
        let html = r#"<body><a href="https://evil.net/">x</a></body>"#;
        let features = analyze(html, None).unwrap();
        assert_eq!(features.percent_external_links, 0.0);
    }

    #[test]
    fn test_percent_external_links_no_qualifying_links() {
        let html = r#"<body><a href="/local">x</a></body>"#;
        let features = analyze(html, Some("example.com")).unwrap();
        assert_eq!(features.percent_external_links, 0.0);
    }

    #[test]
    fn test_hidden_elements_are_counted_additively() {
        let html = r#"<body>
            <div style="display: none">a</div>
            <div style="DISPLAY:NONE">b</div>
            <input type="hidden" name="token">
            <span hidden>c</span>
        </body>"#;
        let features = analyze(html, None).unwrap();
        assert_eq!(features.num_hidden_elements, 4);
    }

    #[test]
    fn test_hidden_element_matching_two_passes_counts_twice() {
        let html = r#"<body><div style="display:none" hidden>x</div></body>"#;
        let features = analyze(html, None).unwrap();
        assert_eq!(features.num_hidden_elements, 2);
    }

    #[test]
    fn test_quiet_page_has_no_signals() {
        let html = "<html><body><p>welcome</p></body></html>";
        let features = analyze(html, Some("example.com")).unwrap();
        assert_eq!(features.num_forms, 0);
        assert_eq!(features.num_password_fields, 0);
        assert_eq!(features.num_iframes, 0);
        assert_eq!(features.num_hidden_elements, 0);
        assert!(!features.form_action_suspicious);
        assert!(!features.has_js_redirect);
        assert_eq!(features.percent_external_links, 0.0);
    }
}
