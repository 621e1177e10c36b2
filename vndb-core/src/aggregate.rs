//! Deduplication and language-preference ordering of embedded records.
//!
//! Related records such as release producers are repeated once per parent
//! that references them. Downstream code reads list order as preference
//! ("the first developer in the preferred language is canonical"), so the
//! result must be deterministic for a given input and priority list.

use std::{cmp::Ordering, collections::HashSet};

use vndb_model::{Release, ReleaseProducer};

/// A record embedded in a parent entity.
pub trait SubEntity {
    /// Identity used for deduplication.
    fn identity(&self) -> &str;
    /// Language code used for ordering.
    fn language(&self) -> &str;
}

impl SubEntity for ReleaseProducer {
    fn identity(&self) -> &str {
        &self.producer.id
    }

    fn language(&self) -> &str {
        &self.producer.lang
    }
}

/// Ordered list of preferred language codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguagePriority {
    languages: Vec<String>,
}

impl LanguagePriority {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Position of `lang` in the list, `None` when it is not listed.
    pub fn rank(&self, lang: &str) -> Option<usize> {
        self.languages.iter().position(|candidate| candidate == lang)
    }

    /// Listed languages first, in list order, then unlisted ones. Ties fall
    /// back to the language codes so only identical codes compare equal.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let by_rank = match (self.rank(a), self.rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_rank.then_with(|| a.cmp(b))
    }
}

/// Flatten the children of every parent, keep the first occurrence of each
/// identity and stable-sort the survivors by language preference.
pub fn aggregate<'a, P, C, F>(
    parents: &'a [P],
    children: F,
    priority: &LanguagePriority,
) -> Vec<C>
where
    P: 'a,
    C: SubEntity + Clone + 'a,
    F: Fn(&'a P) -> &'a [C],
{
    let mut seen = HashSet::new();
    let mut unique: Vec<C> = parents
        .iter()
        .flat_map(children)
        .filter(|child| seen.insert(child.identity()))
        .cloned()
        .collect();

    // `sort_by` is stable: equal languages keep first-seen order
    unique.sort_by(|a, b| priority.compare(a.language(), b.language()));
    unique
}

/// Unique producers credited across `releases`, preferred languages first.
pub fn release_producers(
    releases: &[Release],
    priority: &LanguagePriority,
) -> Vec<ReleaseProducer> {
    aggregate(releases, |release| release.producers.as_slice(), priority)
}
