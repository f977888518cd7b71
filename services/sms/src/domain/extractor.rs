//! Verification-code extraction from free-form SMS text.
//!
//! Two matchers run in order and the first hit wins:
//!
//! 1. [`AnchoredMatcher`]: an anchor phrase ("verification code", "code", `验证码`, ...)
//!    followed by non-digit characters and then a digit run of acceptable length.
//! 2. [`DigitRunMatcher`]: the last digit run of acceptable length anywhere in the text.
//!
//! A digit run is always the maximal contiguous `[0-9]` sequence, so `123456789` is a
//! single nine-digit run and never yields `12345678`.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::types::{MAX_CODE_LEN, MIN_CODE_LEN, VerificationCode};

/// Phrases that label the number following them as the code. Case-insensitive.
pub const ANCHOR_PHRASES: &[&str] = &[
    "verification code",
    "验证码",
    "校验码",
    "动态码",
    "確認碼",
    "驗證碼",
    "code",
];

fn is_code_len(run: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&run.len())
}

/// Finds the first anchor phrase whose following digit run has an acceptable length.
#[derive(Debug, Clone)]
pub struct AnchoredMatcher {
    pattern: Regex,
}

impl AnchoredMatcher {
    pub fn new(phrases: &[&str]) -> Result<Self, regex::Error> {
        let (latin, cjk): (Vec<&str>, Vec<&str>) =
            phrases.iter().copied().partition(|p| p.is_ascii());
        let join = |ps: &[&str]| {
            ps.iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|")
        };

        // Latin phrases must not touch another Latin letter ("barcode", "codes").
        // `\b` is Unicode-aware and would also reject "的code", so the guard is ASCII only.
        // CJK text has no word separators, so those phrases match anywhere.
        let mut branches = Vec::new();
        if !latin.is_empty() {
            branches.push(format!(
                "(?:^|[^A-Za-z])(?:{})(?:[^A-Za-z0-9][^0-9]*)?",
                join(&latin)
            ));
        }
        if !cjk.is_empty() {
            branches.push(format!("(?:{})[^0-9]*", join(&cjk)));
        }
        let pattern = Regex::new(&format!("(?i)(?:{})([0-9]+)", branches.join("|")))?;
        Ok(Self { pattern })
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|run| is_code_len(run))
    }
}

/// Picks the last maximal digit run of acceptable length.
#[derive(Debug, Clone)]
pub struct DigitRunMatcher {
    pattern: Regex,
}

impl DigitRunMatcher {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new("[0-9]+").expect("valid digit-run regex"),
        }
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|run| is_code_len(run))
            .last()
    }
}

impl Default for DigitRunMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Anchored matcher first, digit-run fallback second.
#[derive(Debug, Clone)]
pub struct CodeExtractor {
    anchored: AnchoredMatcher,
    fallback: DigitRunMatcher,
}

impl CodeExtractor {
    pub fn new(anchored: AnchoredMatcher, fallback: DigitRunMatcher) -> Self {
        Self { anchored, fallback }
    }

    /// Shared extractor built from [`ANCHOR_PHRASES`].
    pub fn global() -> &'static CodeExtractor {
        static EXTRACTOR: OnceLock<CodeExtractor> = OnceLock::new();
        EXTRACTOR.get_or_init(|| {
            let anchored = AnchoredMatcher::new(ANCHOR_PHRASES).expect("valid anchor regex");
            CodeExtractor::new(anchored, DigitRunMatcher::new())
        })
    }

    pub fn extract(&self, text: &str) -> Option<VerificationCode> {
        let run = self
            .anchored
            .find(text)
            .or_else(|| self.fallback.find(text))?;
        VerificationCode::try_from(run).ok()
    }
}

/// Extract a verification code with the shared extractor.
pub fn extract(text: &str) -> Option<VerificationCode> {
    CodeExtractor::global().extract(text)
}
