//! Question normalization and field extraction.
//!
//! Rule predicates and most extractors operate on a normalized form of the
//! question: lowercased, punctuation collapsed to spaces (double quotes and
//! hyphens survive), whitespace squeezed. Search-query extraction is the one
//! exception and reads the original text first, so quoted phrases keep their
//! case and punctuation verbatim.

use regex::Regex;

/// Lookback window in hours when the question names none.
pub const DEFAULT_HOURS: u64 = 1;

/// Compiled extraction patterns. Built once per router, then shared
/// immutably by every call.
#[derive(Debug)]
pub(crate) struct Extractors {
    strip: Regex,
    spaces: Regex,
    namespace: [Regex; 2],
    hours: Regex,
    pod_name: [Regex; 3],
    quoted: Regex,
    search: [Regex; 4],
}

impl Extractors {
    pub(crate) fn new() -> Self {
        Extractors {
            strip: Regex::new(r#"[^a-z0-9\-\s"]+"#).expect("valid pattern"),
            spaces: Regex::new(r"\s+").expect("valid pattern"),
            namespace: [
                Regex::new(r"(?:in|from) (?:the )?([a-z0-9\-]+) namespace").expect("valid pattern"),
                Regex::new(r"namespace ([a-z0-9\-]+)").expect("valid pattern"),
            ],
            hours: Regex::new(r"(?:last|past) (\d+) hours?").expect("valid pattern"),
            pod_name: [
                Regex::new(r"logs from (?:the )?([a-z0-9\-*]+)").expect("valid pattern"),
                Regex::new(r"logs for (?:the )?([a-z0-9\-*]+)").expect("valid pattern"),
                Regex::new(r"pod ([a-z0-9\-*]+)").expect("valid pattern"),
            ],
            quoted: Regex::new(r#""([^"]+)""#).expect("valid pattern"),
            search: [
                Regex::new(r"search for ([a-z0-9 _.\-]+)").expect("valid pattern"),
                Regex::new(r"find logs containing ([a-z0-9 _.\-]+)").expect("valid pattern"),
                Regex::new(r"containing ([a-z0-9 _.\-]+)").expect("valid pattern"),
                Regex::new(r"mentions ([a-z0-9 _.\-]+)").expect("valid pattern"),
            ],
        }
    }

    /// Lowercase, replace punctuation with spaces (keeping quotes and
    /// hyphens), collapse whitespace runs, trim.
    pub(crate) fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.strip.replace_all(&lowered, " ");
        let collapsed = self.spaces.replace_all(&stripped, " ");
        collapsed.trim().to_string()
    }

    /// Namespace named by the question, or empty (meaning "all namespaces")
    /// when absent.
    pub(crate) fn namespace(&self, normalized: &str) -> String {
        self.namespace
            .iter()
            .find_map(|pattern| pattern.captures(normalized))
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }

    /// Lookback window in hours, floored at 1. Unparseable or absent
    /// windows fall back to [`DEFAULT_HOURS`].
    pub(crate) fn hours(&self, normalized: &str) -> u64 {
        self.hours
            .captures(normalized)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .map(|hours| hours.max(1))
            .unwrap_or(DEFAULT_HOURS)
    }

    /// Pod name or wildcard prefix mentioned by the question, or empty when
    /// the question names no pod.
    pub(crate) fn pod_name(&self, normalized: &str) -> String {
        self.pod_name
            .iter()
            .find_map(|pattern| pattern.captures(normalized))
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }

    /// Search phrase, or empty when the question carries none.
    ///
    /// A double-quoted substring of the original text wins and is returned
    /// verbatim. Otherwise the keyword forms ("search for ...", "find logs
    /// containing ...") are matched against the lowercased text, which keeps
    /// characters like `.` and `_` that normalization would strip. The bare
    /// word "timeout" anywhere is the final fallback.
    pub(crate) fn search_query(&self, original: &str) -> String {
        if let Some(caps) = self.quoted.captures(original) {
            return caps[1].to_string();
        }

        let lowered = original.to_lowercase();
        for pattern in &self.search {
            if let Some(caps) = pattern.captures(&lowered) {
                return caps[1].trim().to_string();
            }
        }

        if lowered.contains("timeout") {
            return "timeout".to_string();
        }

        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractors() -> Extractors {
        Extractors::new()
    }

    #[test]
    fn normalize_lowercases_and_strips_punctuation() {
        let e = extractors();
        assert_eq!(
            e.normalize("Which Pods are Crashing?!"),
            "which pods are crashing"
        );
    }

    #[test]
    fn normalize_keeps_quotes_and_hyphens() {
        let e = extractors();
        assert_eq!(
            e.normalize("Search for \"Connection Refused\" in kube-system"),
            "search for \"connection refused\" in kube-system"
        );
    }

    #[test]
    fn normalize_collapses_whitespace() {
        let e = extractors();
        assert_eq!(e.normalize("  pods\t\tin    ai  "), "pods in ai");
    }

    #[test]
    fn namespace_from_in_the_form() {
        let e = extractors();
        assert_eq!(e.namespace("errors in the kube-system namespace"), "kube-system");
        assert_eq!(e.namespace("logs from ai namespace"), "ai");
    }

    #[test]
    fn namespace_from_bare_form() {
        let e = extractors();
        assert_eq!(e.namespace("namespace monitoring please"), "monitoring");
    }

    #[test]
    fn namespace_defaults_to_empty() {
        let e = extractors();
        assert_eq!(e.namespace("any errors lately"), "");
    }

    #[test]
    fn hours_parses_last_and_past_forms() {
        let e = extractors();
        assert_eq!(e.hours("errors in the last 12 hours"), 12);
        assert_eq!(e.hours("restarts over the past 1 hour"), 1);
    }

    #[test]
    fn hours_floors_at_one() {
        let e = extractors();
        assert_eq!(e.hours("errors in the last 0 hours"), 1);
    }

    #[test]
    fn hours_defaults_when_absent_or_unparseable() {
        let e = extractors();
        assert_eq!(e.hours("errors right now"), DEFAULT_HOURS);
        // Larger than u64 falls back to the default rather than panicking.
        assert_eq!(
            e.hours("errors in the last 99999999999999999999999 hours"),
            DEFAULT_HOURS
        );
    }

    #[test]
    fn pod_name_from_logs_forms() {
        let e = extractors();
        assert_eq!(e.pod_name("show logs from the ollama container"), "ollama");
        assert_eq!(e.pod_name("logs for api-server-7d9f please"), "api-server-7d9f");
    }

    #[test]
    fn pod_name_from_pod_form_allows_wildcard() {
        let e = extractors();
        assert_eq!(e.pod_name("what is pod ingress-* doing"), "ingress-*");
    }

    #[test]
    fn pod_name_defaults_to_empty() {
        let e = extractors();
        assert_eq!(e.pod_name("is anything broken"), "");
    }

    #[test]
    fn search_query_prefers_quoted_phrase_verbatim() {
        let e = extractors();
        assert_eq!(
            e.search_query("Search for \"Connection REFUSED\" in ai"),
            "Connection REFUSED"
        );
    }

    #[test]
    fn search_query_from_keyword_forms() {
        let e = extractors();
        assert_eq!(e.search_query("search for oom_kill events"), "oom_kill events");
        assert_eq!(
            e.search_query("Find logs containing tls handshake"),
            "tls handshake"
        );
        assert_eq!(e.search_query("anything containing x509.name"), "x509.name");
        assert_eq!(e.search_query("which line mentions retry-after"), "retry-after");
    }

    #[test]
    fn search_query_falls_back_to_timeout_keyword() {
        let e = extractors();
        assert_eq!(e.search_query("Any timeouts lately?"), "timeout");
    }

    #[test]
    fn search_query_defaults_to_empty() {
        let e = extractors();
        assert_eq!(e.search_query("how is the cluster"), "");
    }
}
