//! The ordered tag collection.

use tracing::debug;

use super::tag::TagRecord;

/// An ordered list of tags, de-duplicated by exact text match.
///
/// Insertion order is display order. Lookups are linear scans; the widget
/// is built for small collections (well under a hundred tags).
#[derive(Debug, Clone, Default)]
pub struct TagCollection {
    tags: Vec<TagRecord>,
}

impl TagCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Append a tag.
    ///
    /// A record with empty text, or one whose text is already present
    /// (case-sensitive exact match), is silently ignored. Returns whether
    /// an insertion occurred.
    pub fn add(&mut self, record: TagRecord) -> bool {
        if record.is_empty() || self.exists(record.text()) {
            return false;
        }
        debug!(text = record.text(), pending = record.pending(), "tag added");
        self.tags.push(record);
        true
    }

    /// Remove the tag with the given text, if any.
    ///
    /// Removing an absent text is a silent no-op.
    pub fn remove_by_text(&mut self, text: &str) -> Option<TagRecord> {
        let pos = self.tags.iter().position(|t| t.text() == text)?;
        debug!(text, "tag removed");
        Some(self.tags.remove(pos))
    }

    /// Remove every tag whose pending flag matches `pending`.
    ///
    /// Returns the number of tags removed.
    pub fn remove_where(&mut self, pending: bool) -> usize {
        let before = self.tags.len();
        self.tags.retain(|t| t.pending() != pending);
        before - self.tags.len()
    }

    /// Exact-match membership test.
    pub fn exists(&self, text: &str) -> bool {
        self.tags.iter().any(|t| t.text() == text)
    }

    /// Promote the pending tag with the given text into a permanent one.
    ///
    /// Returns whether a pending tag was found and promoted.
    pub fn confirm(&mut self, text: &str) -> bool {
        match self.tags.iter_mut().find(|t| t.text() == text && t.pending()) {
            Some(tag) => {
                tag.confirm();
                debug!(text, "pending tag confirmed");
                true
            }
            None => false,
        }
    }

    /// Promote every pending tag into a permanent one.
    ///
    /// Returns the number of tags promoted.
    pub fn confirm_all(&mut self) -> usize {
        let mut promoted = 0;
        for tag in self.tags.iter_mut().filter(|t| t.pending()) {
            tag.confirm();
            promoted += 1;
        }
        if promoted > 0 {
            debug!(promoted, "pending tags confirmed");
        }
        promoted
    }

    /// The last tag in display order.
    pub fn last(&self) -> Option<&TagRecord> {
        self.tags.last()
    }

    /// The tag at the given display position.
    pub fn get(&self, index: usize) -> Option<&TagRecord> {
        self.tags.get(index)
    }

    /// Iterate over the tags in display order.
    pub fn iter(&self) -> impl Iterator<Item = &TagRecord> {
        self.tags.iter()
    }

    /// The number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the collection holds no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Consume the collection, yielding the tags in display order.
    pub fn into_tags(self) -> Vec<TagRecord> {
        self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(text: &str) -> TagRecord {
        let mut tag = TagRecord::new(text);
        tag.mark_pending();
        tag
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut tags = TagCollection::new();
        assert!(tags.add(TagRecord::new("beta")));
        assert!(tags.add(TagRecord::new("alpha")));

        let order: Vec<&str> = tags.iter().map(|t| t.text()).collect();
        assert_eq!(order, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_add_is_idempotent_for_duplicates() {
        let mut tags = TagCollection::new();
        assert!(tags.add(TagRecord::new("alpha")));
        assert!(!tags.add(TagRecord::new("alpha")));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_add_is_case_sensitive() {
        let mut tags = TagCollection::new();
        assert!(tags.add(TagRecord::new("alpha")));
        assert!(tags.add(TagRecord::new("Alpha")));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_add_rejects_empty_text() {
        let mut tags = TagCollection::new();
        assert!(!tags.add(TagRecord::new("   ")));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_remove_by_text() {
        let mut tags = TagCollection::new();
        tags.add(TagRecord::new("alpha"));
        tags.add(TagRecord::new("beta"));

        let removed = tags.remove_by_text("alpha").unwrap();
        assert_eq!(removed.text(), "alpha");
        assert_eq!(tags.len(), 1);
        assert!(!tags.exists("alpha"));
    }

    #[test]
    fn test_remove_absent_is_a_no_op() {
        let mut tags = TagCollection::new();
        tags.add(TagRecord::new("alpha"));

        assert!(tags.remove_by_text("missing").is_none());
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_remove_where_pending() {
        let mut tags = TagCollection::new();
        tags.add(TagRecord::new("kept"));
        tags.add(pending("stale-1"));
        tags.add(pending("stale-2"));

        assert_eq!(tags.remove_where(true), 2);
        assert_eq!(tags.len(), 1);
        assert!(tags.exists("kept"));
    }

    #[test]
    fn test_remove_where_confirmed() {
        let mut tags = TagCollection::new();
        tags.add(TagRecord::new("gone"));
        tags.add(pending("kept"));

        assert_eq!(tags.remove_where(false), 1);
        assert_eq!(tags.len(), 1);
        assert!(tags.exists("kept"));
    }

    #[test]
    fn test_confirm_single_pending() {
        let mut tags = TagCollection::new();
        tags.add(pending("alpha"));
        tags.add(pending("beta"));

        assert!(tags.confirm("alpha"));
        assert!(!tags.get(0).unwrap().pending());
        assert!(tags.get(1).unwrap().pending());
    }

    #[test]
    fn test_confirm_ignores_confirmed_and_absent() {
        let mut tags = TagCollection::new();
        tags.add(TagRecord::new("alpha"));

        assert!(!tags.confirm("alpha"));
        assert!(!tags.confirm("missing"));
    }

    #[test]
    fn test_confirm_all() {
        let mut tags = TagCollection::new();
        tags.add(TagRecord::new("old"));
        tags.add(pending("one"));
        tags.add(pending("two"));

        assert_eq!(tags.confirm_all(), 2);
        assert!(tags.iter().all(|t| !t.pending()));
    }

    #[test]
    fn test_last() {
        let mut tags = TagCollection::new();
        assert!(tags.last().is_none());
        tags.add(TagRecord::new("alpha"));
        tags.add(TagRecord::new("beta"));
        assert_eq!(tags.last().unwrap().text(), "beta");
    }
}
