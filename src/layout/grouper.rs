//! Greedy clustering of words into lines and lines into groups.
//!
//! Words are consumed once, in reading order. Each word either extends the
//! current line, starts a new line in the current group, or starts a new
//! group. Line membership uses the slope between centers and the height
//! difference rather than a fixed vertical distance, which keeps mildly
//! skewed scans on one line. This only works for left-to-right text.

use crate::error::Result;
use crate::geometry::{slope, Element};
use crate::model::{Line, LineGroup, Word};

use super::cleanup::{clean_words, merge_ghost_groups};
use super::options::{GroupingOptions, ProximityThresholds};

/// Whether `element` sits on the same visual line as `line`.
///
/// Shared by word placement and the ghost group merge.
pub fn is_in_line<E: Element>(
    element: &E,
    line: &Line,
    thresholds: &ProximityThresholds,
) -> Result<bool> {
    let candidate = element.extent()?;
    let target = line.extent()?;

    if slope(target.center(), candidate.center()) > thresholds.line_slope {
        return Ok(false);
    }

    if (candidate.height() - target.height()).abs() > thresholds.height {
        return Ok(false);
    }

    Ok(true)
}

/// Clusters the words of one page region.
#[derive(Debug, Clone)]
pub struct WordGrouper<'a> {
    page_width: f32,
    page_height: f32,
    options: &'a GroupingOptions,
}

impl<'a> WordGrouper<'a> {
    /// Create a grouper for a page of the given size.
    pub fn new(page_width: f32, page_height: f32, options: &'a GroupingOptions) -> Self {
        Self {
            page_width,
            page_height,
            options,
        }
    }

    /// Page dimensions as (width, height).
    pub fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    /// Group words into line groups and trim filler tokens.
    pub fn group(&self, words: Vec<Word>) -> Result<Vec<LineGroup>> {
        let word_count = words.len();
        let mut words = words.into_iter();
        let Some(first) = words.next() else {
            return Ok(Vec::new());
        };

        let mut groups = vec![LineGroup::with_child(Line::with_child(first))];
        for word in words {
            self.place(&mut groups, word)?;
        }

        if self.options.merge_ghost_groups {
            let merged = merge_ghost_groups(&mut groups, self.options)?;
            log::debug!("Ghost group pass removed {} groups", merged);
        }

        let trimmed = clean_words(&mut groups, self.options);

        log::debug!(
            "Grouped {} words into {} groups on a {:.0}x{:.0} page ({} filler words trimmed)",
            word_count,
            groups.len(),
            self.page_width,
            self.page_height,
            trimmed
        );

        Ok(groups)
    }

    fn place(&self, groups: &mut Vec<LineGroup>, word: Word) -> Result<()> {
        let Some(group) = groups.last_mut() else {
            groups.push(LineGroup::with_child(Line::with_child(word)));
            return Ok(());
        };

        let joins_line = match group.last() {
            Some(line) => self.word_in_line(&word, line)?,
            None => false,
        };
        if joins_line {
            if let Some(line) = group.last_mut() {
                line.add(word);
            }
            return Ok(());
        }

        let line = Line::with_child(word);
        if !group.is_empty() && self.line_in_group(&line, group)? {
            group.add(line);
        } else {
            groups.push(LineGroup::with_child(line));
        }
        Ok(())
    }

    /// Whether a word continues a line: in line and close enough horizontally.
    pub fn word_in_line(&self, word: &Word, line: &Line) -> Result<bool> {
        let thresholds = &self.options.thresholds;
        if !is_in_line(word, line, thresholds)? {
            return Ok(false);
        }

        let gap = (word.extent()?.min_x - line.extent()?.max_x).abs();
        Ok(gap < thresholds.word)
    }

    /// Whether a line is close enough below a group to extend it.
    pub fn line_in_group(&self, line: &Line, group: &LineGroup) -> Result<bool> {
        let gap = (line.extent()?.min_y - group.extent()?.max_y).abs();
        Ok(gap <= self.options.thresholds.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn word(text: &str, left: f32, top: f32, right: f32, bottom: f32) -> Word {
        Word::new(text, BoundingBox::from_rect(left, top, right, bottom), " ")
    }

    fn texts(groups: &[LineGroup]) -> Vec<Vec<Vec<String>>> {
        groups
            .iter()
            .map(|g| {
                g.children()
                    .iter()
                    .map(|l| l.children().iter().map(|w| w.text()).collect())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        assert!(grouper.group(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_single_line() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        let words = vec![
            word("Chapter", 10.0, 100.0, 80.0, 120.0),
            word("1", 85.0, 100.0, 95.0, 120.0),
            word("The", 100.0, 100.0, 140.0, 120.0),
            word("Beginning", 145.0, 100.0, 250.0, 120.0),
        ];

        let groups = grouper.group(words).unwrap();
        assert_eq!(
            texts(&groups),
            vec![vec![vec!["Chapter", "1", "The", "Beginning"]]]
        );
        assert_eq!(groups[0].text(), "Chapter 1 The Beginning \n");
    }

    #[test]
    fn test_wide_gap_breaks_the_line() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        let words = vec![
            word("Left", 10.0, 100.0, 60.0, 120.0),
            word("Right", 200.0, 100.0, 260.0, 120.0),
        ];

        let groups = grouper.group(words).unwrap();
        // The new line starts above the group's bottom edge.
        assert_eq!(texts(&groups), vec![vec![vec!["Left"]], vec![vec!["Right"]]]);
    }

    #[test]
    fn test_height_difference_breaks_the_line() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        let words = vec![
            word("Big", 10.0, 100.0, 60.0, 140.0),
            word("small", 65.0, 120.0, 100.0, 140.0),
        ];

        let groups = grouper.group(words).unwrap();
        assert_eq!(texts(&groups), vec![vec![vec!["Big"]], vec![vec!["small"]]]);
    }

    #[test]
    fn test_lines_close_together_share_a_group() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        let words = vec![
            word("first", 10.0, 100.0, 60.0, 120.0),
            word("second", 10.0, 125.0, 70.0, 145.0),
        ];

        let groups = grouper.group(words).unwrap();
        assert_eq!(texts(&groups), vec![vec![vec!["first"], vec!["second"]]]);
    }

    #[test]
    fn test_vertical_gap_over_threshold_starts_new_group() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        let words = vec![
            word("above", 10.0, 100.0, 60.0, 120.0),
            word("below", 10.0, 129.0, 60.0, 149.0),
        ];

        let groups = grouper.group(words).unwrap();
        assert_eq!(texts(&groups), vec![vec![vec!["above"]], vec![vec!["below"]]]);
    }

    #[test]
    fn test_skewed_words_stay_on_one_line() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1000.0, 1000.0, &options);
        let words = vec![
            word("tilted", 10.0, 100.0, 60.0, 120.0),
            word("line", 70.0, 104.0, 110.0, 124.0),
            word("text", 120.0, 108.0, 160.0, 128.0),
        ];

        let groups = grouper.group(words).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[0].children()[0].len(), 3);
    }

    #[test]
    fn test_is_in_line_rejects_words_directly_below() {
        let thresholds = ProximityThresholds::default();
        let line = Line::with_child(word("a", 10.0, 100.0, 60.0, 120.0));
        let below = word("b", 10.0, 200.0, 60.0, 220.0);
        assert!(!is_in_line(&below, &line, &thresholds).unwrap());
    }

    #[test]
    fn test_page_size() {
        let options = GroupingOptions::default();
        let grouper = WordGrouper::new(1700.0, 2200.0, &options);
        assert_eq!(grouper.page_size(), (1700.0, 2200.0));
    }
}
