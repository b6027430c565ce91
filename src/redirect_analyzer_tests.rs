// File: redirect_analyzer_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::artifact::ScanArtifact;
    use crate::redirect_analyzer::*;
    use crate::urlinfo::DomainResolver;
    use crate::whitelist::Whitelist;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn whitelist(entries: &str) -> Whitelist {
        let resolver = DomainResolver::new();
        Whitelist::from_reader(Cursor::new(entries.to_string()), &resolver)
    }

    fn artifact(initial: &str, fin: &str) -> ScanArtifact {
        let raw = format!(
            r#"{{"task": {{"url": "{initial}"}}, "page": {{"url": "{fin}"}}}}"#
        );
        ScanArtifact::from_json(&raw).unwrap()
    }

    #[test]
    fn test_same_domain_is_level0() {
        let resolver = DomainResolver::new();
        let wl = whitelist("");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://www.example.com/", "https://login.example.com/next"),
            &wl,
            &resolver,
        );
        assert_eq!(features.level, Some(RedirectLevel::Level0));
    }

    #[test]
    fn test_whitelisted_to_whitelisted_is_level0() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\nexample.org\n");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://example.com/", "http://example.org/"),
            &wl,
            &resolver,
        );
        assert_eq!(features.level, Some(RedirectLevel::Level0));
    }

    #[test]
    fn test_whitelisted_to_unknown_is_level1() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://example.com/", "http://evil-landing.net/"),
            &wl,
            &resolver,
        );
        assert_eq!(features.level, Some(RedirectLevel::Level1));
    }

    #[test]
    fn test_unknown_to_unknown_is_level2() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://first-stop.net/", "http://evil-landing.net/"),
            &wl,
            &resolver,
        );
        assert_eq!(features.level, Some(RedirectLevel::Level2));
    }

    #[test]
    fn test_unknown_to_whitelisted_is_level3() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://typo-squat.net/", "http://example.com/"),
            &wl,
            &resolver,
        );
        assert_eq!(features.level, Some(RedirectLevel::Level3));
    }

    #[test]
    fn test_missing_endpoint_skips_whole_group() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let raw = r#"{"task": {"url": "http://example.com/"}}"#;
        let features = RedirectAnalyzer::analyze(
            &ScanArtifact::from_json(raw).unwrap(),
            &wl,
            &resolver,
        );
        assert_eq!(features, RedirectFeatures::default());
    }

    #[test]
    fn test_hop_count_zero_for_same_host() {
        let resolver = DomainResolver::new();
        let wl = whitelist("");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://example.com/a", "http://example.com/b"),
            &wl,
            &resolver,
        );
        assert_eq!(features.hop_count, Some(0));
    }

    #[test]
    fn test_hop_count_synthesized_chain() {
        let resolver = DomainResolver::new();
        let wl = whitelist("");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://start.example/", "http://end.example/"),
            &wl,
            &resolver,
        );
        assert_eq!(features.hop_count, Some(1));
    }

    #[test]
    fn test_hop_count_walks_recorded_chain() {
        let raw = r#"{
            "task": {"url": "http://a.example/"},
            "page": {"url": "http://c.example/"},
            "data": {"requests": [
                {"request": {"primaryRequest": true},
                 "requests": [
                    {"request": {"url": "http://a.example/"}},
                    {"request": {"url": "http://a.example/interstitial"}},
                    {"request": {"url": "http://b.example/"}},
                    {"request": {"url": "http://c.example/"}}
                 ]}
            ]}
        }"#;
        let resolver = DomainResolver::new();
        let wl = whitelist("");
        let features = RedirectAnalyzer::analyze(
            &ScanArtifact::from_json(raw).unwrap(),
            &wl,
            &resolver,
        );
        // a -> a (same host), a -> b, b -> c
        assert_eq!(features.hop_count, Some(2));
    }

    #[test]
    fn test_host_similarity_identical_hosts() {
        let resolver = DomainResolver::new();
        let wl = whitelist("");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://example.com/", "http://example.com/landing"),
            &wl,
            &resolver,
        );
        assert_eq!(features.host_similarity, Some(1.0));
    }

    #[test]
    fn test_host_similarity_near_miss_domains() {
        let resolver = DomainResolver::new();
        let wl = whitelist("");
        let features = RedirectAnalyzer::analyze(
            &artifact("http://paypal.com/", "http://paypa1.com/"),
            &wl,
            &resolver,
        );
        let sim = features.host_similarity.unwrap();
        assert!(sim > 0.85 && sim < 1.0);
    }

    #[test]
    fn test_level_display_tokens() {
        assert_eq!(RedirectLevel::Level0.to_string(), "level0");
        assert_eq!(RedirectLevel::Level1.to_string(), "level1");
        assert_eq!(RedirectLevel::Level2.to_string(), "level2");
        assert_eq!(RedirectLevel::Level3.to_string(), "level3");
    }

    #[test]
    fn test_initial_host_whitelisted() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let hit = RedirectAnalyzer::initial_host_whitelisted(
            &artifact("http://www.example.com/login", "http://example.com/"),
            &wl,
            &resolver,
        );
        assert_eq!(hit.unwrap(), true);

        let miss = RedirectAnalyzer::initial_host_whitelisted(
            &artifact("http://unknown-host.net/", "http://example.com/"),
            &wl,
            &resolver,
        );
        assert_eq!(miss.unwrap(), false);
    }

    #[test]
    fn test_initial_host_whitelisted_missing_task_url() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let artifact = ScanArtifact::from_json("{}").unwrap();
        assert!(RedirectAnalyzer::initial_host_whitelisted(&artifact, &wl, &resolver).is_err());
    }

    #[test]
    fn test_initial_host_whitelisted_ip_is_not_whitelisted() {
        let resolver = DomainResolver::new();
        let wl = whitelist("example.com\n");
        let hit = RedirectAnalyzer::initial_host_whitelisted(
            &artifact("http://192.168.0.1/", "http://example.com/"),
            &wl,
            &resolver,
        );
        assert_eq!(hit.unwrap(), false);
    }
}
