use std::collections::HashSet;

use crate::explorer::path::ExplorerPath;

/// Which explorer paths are currently expanded.
///
/// Absent paths are collapsed. Only the path passed to [`toggle`] ever
/// changes, so collapsing an ancestor leaves descendant flags intact and
/// re-expanding it restores the previous shape.
///
/// [`toggle`]: ExpansionState::toggle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<ExplorerPath>,
}

impl ExpansionState {
    /// Flip `path` and return its new state.
    pub fn toggle(&mut self, path: &ExplorerPath) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.clone());
            true
        }
    }

    pub fn is_expanded(&self, path: &ExplorerPath) -> bool {
        self.expanded.contains(path)
    }

    /// Number of expanded paths, visible or not.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_paths_are_collapsed() {
        let state = ExpansionState::default();
        assert!(!state.is_expanded(&ExplorerPath::disk(0)));
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn toggle_cycles_absent_true_false() {
        let mut state = ExpansionState::default();
        let path = ExplorerPath::disk(0);
        assert!(state.toggle(&path));
        assert!(state.is_expanded(&path));
        assert!(!state.toggle(&path));
        assert!(!state.is_expanded(&path));
        assert!(state.toggle(&path));
    }

    #[test]
    fn even_number_of_toggles_restores_state() {
        let path = ExplorerPath::disk(1).partition(0);
        for initial in [false, true] {
            let mut state = ExpansionState::default();
            if initial {
                state.toggle(&path);
            }
            for n in [2, 4, 10] {
                for _ in 0..n {
                    state.toggle(&path);
                }
                assert_eq!(state.is_expanded(&path), initial);
            }
        }
    }

    #[test]
    fn toggle_touches_only_the_given_path() {
        let mut state = ExpansionState::default();
        let disk = ExplorerPath::disk(0);
        let partition = disk.partition(0);
        let root = partition.child("/");
        state.toggle(&disk);
        state.toggle(&partition);
        state.toggle(&root);

        // Collapsing the disk keeps the descendants' flags.
        state.toggle(&disk);
        assert!(!state.is_expanded(&disk));
        assert!(state.is_expanded(&partition));
        assert!(state.is_expanded(&root));
        assert_eq!(state.len(), 2);

        // Expanding a deep node never cascades to its ancestors.
        let mut fresh = ExpansionState::default();
        fresh.toggle(&root);
        assert!(!fresh.is_expanded(&disk));
        assert!(!fresh.is_expanded(&partition));
    }
}
