//! Name resolution
//!
//! A target name is matched in two tiers. The first compares normalized
//! names (whitespace runs collapsed to `_`, lowercased). Only when that finds
//! nothing does the second tier compare the lowercased display name against
//! the lowercased target as a prefix, without collapsing whitespace. Within a
//! tier the first section in document order wins.

use crate::models::{MatchKind, Section};
use crate::scanner::normalize_name;

/// A section picked by the resolver and the tier that picked it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub section: &'a Section,
    pub kind: MatchKind,
}

/// Resolve a name to its section
pub fn resolve<'a>(target: &str, sections: &'a [Section]) -> Option<&'a Section> {
    resolve_match(target, sections).map(|r| r.section)
}

/// Resolve a name and report which tier matched
pub fn resolve_match<'a>(target: &str, sections: &'a [Section]) -> Option<Resolution<'a>> {
    let normalized = normalize_name(target);
    if let Some(section) = sections.iter().find(|s| s.normalized_name() == normalized) {
        tracing::debug!(target_name = target, section = %section.name, "exact section match");
        return Some(Resolution {
            section,
            kind: MatchKind::Exact,
        });
    }

    let prefix = target.to_lowercase();
    let found = sections
        .iter()
        .find(|s| s.name.to_lowercase().starts_with(&prefix))
        .map(|section| Resolution {
            section,
            kind: MatchKind::Prefix,
        });

    match &found {
        Some(r) => tracing::debug!(target_name = target, section = %r.section.name, "prefix section match"),
        None => tracing::debug!(target_name = target, "no section matches"),
    }

    found
}
