//! Latest version tag of a repository.
//!
//! Tags look like `v1.2.3`, optionally followed by a pre-release suffix such
//! as `-rc1` or `alpha`. A plain release tag always beats pre-releases of the
//! same version, which plain version sorting gets wrong.

use crate::error::Result;
use crate::git::{self, GitRunner};
use regex::Regex;
use std::cmp::Ordering;

const TAG_PATTERN: &str = r"^([vV]?)(\d+)\.(\d+)\.(\d+)([^\d.].*)?$";

/// A tag that looks like a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Everything after the patch number; empty for a release tag.
    pub suffix: String,
}

impl VersionTag {
    /// Parses `name`, returning `None` if it is not version-like.
    pub fn parse(name: &str) -> Option<Self> {
        let re = Regex::new(TAG_PATTERN).ok()?;
        let caps = re.captures(name.trim())?;

        Some(VersionTag {
            name: name.trim().to_string(),
            major: caps.get(2)?.as_str().parse().ok()?,
            minor: caps.get(3)?.as_str().parse().ok()?,
            patch: caps.get(4)?.as_str().parse().ok()?,
            suffix: caps
                .get(5)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    pub fn is_prerelease(&self) -> bool {
        !self.suffix.is_empty()
    }
}

impl Ord for VersionTag {
    /// Numeric on major/minor/patch, then lexical on suffix.
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| self.suffix.cmp(&other.suffix))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Picks the latest version among `tags`.
///
/// 1. The base version is the greatest major.minor.patch of any
///    version-like tag. Suffix and `v` prefix are ignored.
/// 2. If a tag of that version without a suffix exists, it wins.
/// 3. Otherwise the base only exists as pre-releases, and the one with the
///    greatest suffix wins.
///
/// Returns `None` if no tag is version-like.
pub fn latest<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    let parsed: Vec<VersionTag> = tags
        .iter()
        .filter_map(|t| VersionTag::parse(t.as_ref()))
        .collect();

    let base = parsed.iter().map(VersionTag::triple).max()?;
    let candidates: Vec<&VersionTag> = parsed.iter().filter(|t| t.triple() == base).collect();

    candidates
        .iter()
        .filter(|t| !t.is_prerelease())
        .max()
        .or_else(|| candidates.iter().max())
        .map(|t| t.name.clone())
}

/// Reads the repository's tags and resolves the latest version.
pub fn run<G: GitRunner>(git: &G) -> Result<Option<String>> {
    let tags = git::list_tags(git)?;
    let found = latest(&tags);
    tracing::debug!(tags = tags.len(), latest = ?found, "resolved latest version tag");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::git::mock::MockGit;

    #[test]
    fn parse_release_tag() {
        let tag = VersionTag::parse("v1.2.3").unwrap();
        assert_eq!(tag.triple(), (1, 2, 3));
        assert!(tag.suffix.is_empty());
        assert!(!tag.is_prerelease());
    }

    #[test]
    fn parse_prerelease_tag() {
        let tag = VersionTag::parse("v1.3.0-rc1").unwrap();
        assert_eq!(tag.triple(), (1, 3, 0));
        assert_eq!(tag.suffix, "-rc1");
        assert!(tag.is_prerelease());

        let bare = VersionTag::parse("2.0.0alpha").unwrap();
        assert_eq!(bare.suffix, "alpha");
        assert_eq!(bare.triple(), (2, 0, 0));
    }

    #[test]
    fn parse_rejects_non_versions() {
        assert!(VersionTag::parse("release").is_none());
        assert!(VersionTag::parse("v1.2").is_none());
        assert!(VersionTag::parse("v1.2.3.4").is_none());
        assert!(VersionTag::parse("build-1.2.3").is_none());
        assert!(VersionTag::parse("").is_none());
    }

    #[test]
    fn ordering_is_numeric_then_suffix() {
        let a = VersionTag::parse("v1.10.0").unwrap();
        let b = VersionTag::parse("v1.9.0").unwrap();
        assert!(a > b);

        let rc1 = VersionTag::parse("v1.3.0-rc1").unwrap();
        let rc2 = VersionTag::parse("v1.3.0-rc2").unwrap();
        assert!(rc2 > rc1);
    }

    #[test]
    fn plain_tag_preferred_over_prerelease() {
        let tags = ["v1.2.0", "v1.3.0", "v1.3.0-rc1"];
        assert_eq!(latest(&tags), Some("v1.3.0".to_string()));
    }

    #[test]
    fn plain_tag_preferred_regardless_of_prefix() {
        assert_eq!(latest(&["1.3.0", "v1.3.0-rc1"]), Some("1.3.0".to_string()));
        assert_eq!(latest(&["v1.3.0", "1.3.0-rc1"]), Some("v1.3.0".to_string()));
    }

    #[test]
    fn prereleases_compared_across_prefixes() {
        assert_eq!(
            latest(&["v1.3.0-rc1", "1.3.0-rc2", "V1.2.9"]),
            Some("1.3.0-rc2".to_string())
        );
    }

    #[test]
    fn highest_suffix_when_no_plain_tag() {
        let tags = ["v1.3.0-rc1", "v1.3.0-rc2"];
        assert_eq!(latest(&tags), Some("v1.3.0-rc2".to_string()));
    }

    #[test]
    fn newer_prerelease_beats_older_release() {
        let tags = ["v1.2.0", "v1.3.0-alpha", "v1.3.0-beta"];
        assert_eq!(latest(&tags), Some("v1.3.0-beta".to_string()));
    }

    #[test]
    fn numeric_not_textual_ordering() {
        let tags = ["v1.9.0", "v1.10.0", "v1.2.0"];
        assert_eq!(latest(&tags), Some("v1.10.0".to_string()));
    }

    #[test]
    fn non_version_tags_ignored() {
        let tags = ["nightly", "v0.1.0", "deploy-2024"];
        assert_eq!(latest(&tags), Some("v0.1.0".to_string()));
    }

    #[test]
    fn no_tags_no_answer() {
        let none: Vec<String> = Vec::new();
        assert_eq!(latest(&none), None);
        assert_eq!(latest(&["nightly"]), None);
    }

    #[test]
    fn run_reads_tags_from_git() {
        let git = MockGit::new().with_output("tag", "v1.2.0\nv1.3.0\nv1.3.0-rc1\n");
        assert_eq!(run(&git).unwrap(), Some("v1.3.0".to_string()));
        assert_eq!(git.calls()[0].display(), "tag --list");
    }

    #[test]
    fn run_empty_repository() {
        let git = MockGit::new();
        assert_eq!(run(&git).unwrap(), None);
    }

    #[test]
    fn run_propagates_git_failure() {
        let git = MockGit::new().with_failure("tag", "fatal: not a git repository");
        assert!(matches!(run(&git), Err(Error::GitFailed { .. })));
    }
}
