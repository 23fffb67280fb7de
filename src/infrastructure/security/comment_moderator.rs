use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of assessing a submitted comment.
///
/// `flags` names every rule that matched; a comment is auto-approved exactly
/// when no rule matched. The decision is made once at creation time and is
/// never re-evaluated — later approval is a manual staff action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationOutcome {
    pub approved: bool,
    pub flags: Vec<String>,
}

impl ModerationOutcome {
    fn from_flags(flags: Vec<String>) -> Self {
        Self {
            approved: flags.is_empty(),
            flags,
        }
    }
}

/// Tokens held pending moderation when they appear anywhere in a comment.
/// Plain substring match, deliberately not word-boundary aware: catching
/// embedded variants is worth the occasional false positive.
const DEFAULT_DENYLIST: &[&str] = &[
    "anjing",
    "bangsat",
    "bajingan",
    "goblok",
    "tolol",
    "kampret",
    "brengsek",
    "bego",
    "fuck",
    "shit",
    "bitch",
    "asshole",
    "bastard",
];

const MIN_CONTENT_CHARS: usize = 5;
const MAX_ALNUM_RUN: usize = 30;

lazy_static! {
    static ref ALNUM_RUN: Regex = Regex::new(&format!(r"[A-Za-z0-9]{{{},}}", MAX_ALNUM_RUN))
        .expect("valid alnum-run regex");
}

/// Decides the initial `is_approved` value for submitted comments.
///
/// Pure denylist + spam heuristics over the content string; no network, no
/// model, no retry. False positives and negatives are an accepted trade-off,
/// and staff can always approve or delete afterwards. Callers are expected to
/// have validated non-emptiness and the maximum length already.
///
/// The denylist is injected at construction so deployments can swap it
/// without touching the policy.
#[derive(Debug, Clone)]
pub struct CommentModerator {
    denylist: Vec<String>,
}

impl CommentModerator {
    pub fn new(denylist: Vec<String>) -> Self {
        Self {
            denylist: denylist
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn with_default_denylist() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().map(|t| t.to_string()).collect())
    }

    pub fn assess(&self, content: &str) -> ModerationOutcome {
        let lowered = content.to_lowercase();
        let mut flags = Vec::new();

        for token in &self.denylist {
            if lowered.contains(token.as_str()) {
                flags.push(format!("DENYLIST:{}", token));
            }
        }

        // Link sharing is the dominant spam vector; a bare "https" without
        // "://" is ordinary prose and must not trigger.
        if lowered.contains("http://") || lowered.contains("https://") {
            flags.push("SPAM:url".to_string());
        }

        if content.chars().count() < MIN_CONTENT_CHARS {
            flags.push("SPAM:too_short".to_string());
        }

        if ALNUM_RUN.is_match(content) {
            flags.push(format!("SPAM:alnum_run_{}", MAX_ALNUM_RUN));
        }

        ModerationOutcome::from_flags(flags)
    }
}

impl Default for CommentModerator {
    fn default() -> Self {
        Self::with_default_denylist()
    }
}

#[cfg(test)]
mod tests {
    use super::CommentModerator;

    fn moderator() -> CommentModerator {
        CommentModerator::with_default_denylist()
    }

    #[test]
    fn clean_comment_is_auto_approved() {
        let outcome = moderator().assess("Artikel yang bagus, terima kasih");
        assert!(outcome.approved);
        assert!(outcome.flags.is_empty());
    }

    #[test]
    fn denylisted_token_blocks() {
        let outcome = moderator().assess("anjing kamu jelek");
        assert!(!outcome.approved);
        assert!(outcome.flags.iter().any(|f| f == "DENYLIST:anjing"));
    }

    #[test]
    fn denylist_match_is_case_insensitive() {
        assert!(!moderator().assess("dasar AnJiNg").approved);
    }

    #[test]
    fn denylist_matches_inside_words() {
        // Substring semantics, not word boundaries.
        assert!(!moderator().assess("kamu anjinglah pokoknya").approved);
    }

    #[test]
    fn urls_block() {
        assert!(!moderator().assess("cek link ini https://spam.com").approved);
        assert!(!moderator().assess("visit http://example.com now").approved);
    }

    #[test]
    fn https_without_scheme_separator_does_not_block() {
        let outcome = moderator().assess("artikel tentang https sangat membantu");
        assert!(outcome.approved, "flags: {:?}", outcome.flags);
    }

    #[test]
    fn short_content_blocks() {
        let outcome = moderator().assess("ok");
        assert!(!outcome.approved);
        assert!(outcome.flags.iter().any(|f| f == "SPAM:too_short"));
    }

    #[test]
    fn exactly_five_chars_passes() {
        assert!(moderator().assess("mantu").approved);
        assert!(!moderator().assess("mant").approved);
    }

    #[test]
    fn long_alphanumeric_run_blocks_at_thirty() {
        let run_29 = "a".repeat(29);
        let run_30 = "a".repeat(30);
        assert!(moderator().assess(&format!("kode: {}", run_29)).approved);
        assert!(!moderator().assess(&format!("kode: {}", run_30)).approved);
    }

    #[test]
    fn injected_denylist_replaces_the_default() {
        let custom = CommentModerator::new(vec!["Hoax".to_string()]);
        assert!(!custom.assess("ini berita HOAX").approved);
        // Default tokens are no longer consulted.
        assert!(custom.assess("anjing kamu").approved);
    }

    #[test]
    fn multiple_rules_all_flagged() {
        let outcome = moderator().assess("anjing https://spam.com");
        assert!(!outcome.approved);
        assert!(outcome.flags.len() >= 2);
    }
}
