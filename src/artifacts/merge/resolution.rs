//! Per-file three-way merge decisions
//!
//! Every file tracked by the split point, the current tip or the given tip is
//! classified by comparing its blob IDs across the three commits. Rules are
//! checked in order and the first match wins:
//!
//! | Rule              | Condition                                              | Outcome           |
//! |-------------------|--------------------------------------------------------|-------------------|
//! | `AddedInGiven`    | absent in split and current, present in given          | take given        |
//! | `AddedInCurrent`  | absent in split and given, present in current          | keep current      |
//! | `ModifiedInGiven` | present everywhere, unchanged in current, changed in given | take given    |
//! | `ModifiedInCurrent` | present everywhere, unchanged in given, changed in current | keep current |
//! | `DeletedInGiven`  | present in split, unchanged in current, absent in given | remove           |
//! | `DeletedInCurrent` | present in split, unchanged in given, absent in current | keep absent     |
//! | `SameOnBothSides` | current and given identical (including both absent)    | nothing to do     |
//! | `Conflict`        | anything else                                          | conflict markers  |

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::BTreeSet;

bitflags! {
    /// Commits of the merge that track a given file
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Presence: u8 {
        const SPLIT = 0b001;
        const CURRENT = 0b010;
        const GIVEN = 0b100;
        const ALL = Self::SPLIT.bits() | Self::CURRENT.bits() | Self::GIVEN.bits();
    }
}

/// Blob IDs of one file in the split point, current and given commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileVersions<'c> {
    pub split: Option<&'c ObjectId>,
    pub current: Option<&'c ObjectId>,
    pub given: Option<&'c ObjectId>,
}

impl<'c> FileVersions<'c> {
    pub fn of(name: &str, split: &'c Commit, current: &'c Commit, given: &'c Commit) -> Self {
        Self {
            split: split.blob_for(name),
            current: current.blob_for(name),
            given: given.blob_for(name),
        }
    }

    pub fn presence(&self) -> Presence {
        let mut presence = Presence::empty();
        presence.set(Presence::SPLIT, self.split.is_some());
        presence.set(Presence::CURRENT, self.current.is_some());
        presence.set(Presence::GIVEN, self.given.is_some());
        presence
    }

    pub fn current_changed(&self) -> bool {
        self.split != self.current
    }

    pub fn given_changed(&self) -> bool {
        self.split != self.given
    }

    pub fn sides_differ(&self) -> bool {
        self.current != self.given
    }
}

/// Outcome of the three-way comparison for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeRule {
    /// Only the given branch added the file: take the given version
    AddedInGiven,
    /// Only the current branch added the file: keep it
    AddedInCurrent,
    /// Only the given branch modified the file: take the given version
    ModifiedInGiven,
    /// Only the current branch modified the file: keep it
    ModifiedInCurrent,
    /// The given branch deleted an unmodified file: remove it
    DeletedInGiven,
    /// The current branch deleted a file the given branch left alone: keep it deleted
    DeletedInCurrent,
    /// Both sides ended up with the same content, or both deleted the file
    SameOnBothSides,
    /// Both sides changed the file in different ways
    Conflict,
}

impl MergeRule {
    pub fn classify(versions: &FileVersions) -> Self {
        let presence = versions.presence();

        if presence == Presence::GIVEN {
            MergeRule::AddedInGiven
        } else if presence == Presence::CURRENT {
            MergeRule::AddedInCurrent
        } else if presence == Presence::ALL
            && !versions.current_changed()
            && versions.given_changed()
        {
            MergeRule::ModifiedInGiven
        } else if presence == Presence::ALL
            && !versions.given_changed()
            && versions.current_changed()
        {
            MergeRule::ModifiedInCurrent
        } else if presence.contains(Presence::SPLIT)
            && !versions.current_changed()
            && !presence.contains(Presence::GIVEN)
        {
            MergeRule::DeletedInGiven
        } else if presence.contains(Presence::SPLIT)
            && !versions.given_changed()
            && !presence.contains(Presence::CURRENT)
        {
            MergeRule::DeletedInCurrent
        } else if !versions.sides_differ() {
            MergeRule::SameOnBothSides
        } else {
            MergeRule::Conflict
        }
    }

    /// Whether the rule requires writing the given version into the working tree
    pub fn takes_given(&self) -> bool {
        matches!(self, MergeRule::AddedInGiven | MergeRule::ModifiedInGiven)
    }
}

/// Names of every file tracked by at least one of the merge commits, in name order
pub fn merge_candidates(split: &Commit, current: &Commit, given: &Commit) -> BTreeSet<String> {
    [split, current, given]
        .iter()
        .flat_map(|commit| commit.tracked().keys().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::log::test_support::create_oid;
    use rstest::rstest;

    fn versions<'c>(
        split: Option<&'c ObjectId>,
        current: Option<&'c ObjectId>,
        given: Option<&'c ObjectId>,
    ) -> FileVersions<'c> {
        FileVersions {
            split,
            current,
            given,
        }
    }

    #[rstest]
    #[case::added_in_given(None, None, Some("g"), MergeRule::AddedInGiven)]
    #[case::added_in_current(None, Some("c"), None, MergeRule::AddedInCurrent)]
    #[case::modified_in_given(Some("s"), Some("s"), Some("g"), MergeRule::ModifiedInGiven)]
    #[case::modified_in_current(Some("s"), Some("c"), Some("s"), MergeRule::ModifiedInCurrent)]
    #[case::deleted_in_given(Some("s"), Some("s"), None, MergeRule::DeletedInGiven)]
    #[case::deleted_in_current(Some("s"), None, Some("s"), MergeRule::DeletedInCurrent)]
    #[case::unchanged(Some("s"), Some("s"), Some("s"), MergeRule::SameOnBothSides)]
    #[case::same_change_on_both_sides(Some("s"), Some("x"), Some("x"), MergeRule::SameOnBothSides)]
    #[case::deleted_on_both_sides(Some("s"), None, None, MergeRule::SameOnBothSides)]
    #[case::added_identically(None, Some("x"), Some("x"), MergeRule::SameOnBothSides)]
    #[case::modified_differently(Some("s"), Some("c"), Some("g"), MergeRule::Conflict)]
    #[case::added_differently(None, Some("c"), Some("g"), MergeRule::Conflict)]
    #[case::modified_in_current_deleted_in_given(Some("s"), Some("c"), None, MergeRule::Conflict)]
    #[case::deleted_in_current_modified_in_given(Some("s"), None, Some("g"), MergeRule::Conflict)]
    fn test_classify(
        #[case] split: Option<&str>,
        #[case] current: Option<&str>,
        #[case] given: Option<&str>,
        #[case] expected: MergeRule,
    ) {
        let split = split.map(create_oid);
        let current = current.map(create_oid);
        let given = given.map(create_oid);

        let rule = MergeRule::classify(&versions(
            split.as_ref(),
            current.as_ref(),
            given.as_ref(),
        ));

        assert_eq!(rule, expected);
    }

    #[test]
    fn test_presence_flags() {
        let s = create_oid("s");
        let g = create_oid("g");

        assert_eq!(
            versions(Some(&s), None, Some(&g)).presence(),
            Presence::SPLIT | Presence::GIVEN
        );
        assert_eq!(versions(None, None, None).presence(), Presence::empty());
    }

    #[test]
    fn test_only_given_side_rules_take_given_version() {
        assert!(MergeRule::AddedInGiven.takes_given());
        assert!(MergeRule::ModifiedInGiven.takes_given());
        assert!(!MergeRule::DeletedInGiven.takes_given());
        assert!(!MergeRule::Conflict.takes_given());
    }
}
