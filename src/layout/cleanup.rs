//! Post-grouping cleanup: filler trimming and ghost group merging.

use crate::error::Result;
use crate::model::LineGroup;

use super::grouper::is_in_line;
use super::options::GroupingOptions;

/// Trim filler words from both ends of every line.
///
/// Lines and groups left empty are removed. Filler words between real words
/// are kept. Returns the number of removed words. Running it twice changes
/// nothing the second time.
pub fn clean_words(groups: &mut Vec<LineGroup>, options: &GroupingOptions) -> usize {
    let mut trimmed = 0;

    if options.ignore_pattern.is_some() {
        for group in groups.iter_mut() {
            for line in group.children_mut() {
                trimmed += line.trim_by(|word| options.is_ignorable(word.as_str()));
            }
        }
    }

    for group in groups.iter_mut() {
        if group.children().iter().any(|line| line.is_empty()) {
            group.retain(|line| !line.is_empty());
        }
    }
    groups.retain(|group| !group.is_empty());

    trimmed
}

/// Whether every word of the group is a filler token.
fn is_ghost(group: &LineGroup, options: &GroupingOptions) -> bool {
    group
        .children()
        .iter()
        .flat_map(|line| line.children())
        .all(|word| options.is_ignorable(word.as_str()))
}

/// Append `next` to `previous`, joining the boundary lines.
fn fuse(previous: &mut LineGroup, next: LineGroup) {
    let mut lines = next.into_children().into_iter();
    if let Some(first) = lines.next() {
        match previous.last_mut() {
            Some(last) => {
                last.append(first);
            }
            None => {
                previous.add(first);
            }
        }
    }
    for line in lines {
        previous.add(line);
    }
}

/// Remove groups made only of filler tokens.
///
/// Ghosts at either end are dropped. An interior ghost is removed, and its
/// neighbours fused, only when the previous group's last line lines up with
/// the next group's first line; otherwise it is left for [`clean_words`].
/// Returns the number of groups removed.
pub fn merge_ghost_groups(groups: &mut Vec<LineGroup>, options: &GroupingOptions) -> Result<usize> {
    let before = groups.len();
    let mut index = 0;

    while index < groups.len() {
        if !is_ghost(&groups[index], options) {
            index += 1;
            continue;
        }

        if index == 0 || index + 1 == groups.len() {
            groups.remove(index);
            continue;
        }

        let lines_up = match (groups[index - 1].last(), groups[index + 1].first()) {
            (Some(previous), Some(next)) => is_in_line(previous, next, &options.thresholds)?,
            _ => false,
        };
        if !lines_up {
            index += 1;
            continue;
        }

        groups.remove(index);
        let next = groups.remove(index);
        fuse(&mut groups[index - 1], next);
    }

    Ok(before - groups.len())
}
