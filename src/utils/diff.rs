//! Line and word diffs between two responses.
//!
//! Both are built on the same longest-common-subsequence walk. [unified_diff] prints the familiar
//! `---`/`+++`/`@@` format; [word_diff] marks changes inline with `[-removed-]` and `{+added+}`.
//!
//! The common prefix and suffix are stripped first, so the LCS table only covers the changed middle. Its memory is
//! the product of the two middle lengths, which stays small for responses bounded by `max_new_tokens`.

use std::mem::discriminant;

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change<'a> {
    Equal(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

impl Change<'_> {
    #[inline]
    fn is_equal(&self) -> bool {
        matches!(self, Change::Equal(_))
    }
}

/// Edit script turning `old` into `new`. Deletions come before insertions at each change point.
pub fn diff_slices<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Change<'a>> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..].iter().rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let mut changes: Vec<Change<'a>> = old[..prefix].iter().map(|item| Change::Equal(*item)).collect();
    lcs_changes(&old[prefix..old.len() - suffix], &new[prefix..new.len() - suffix], &mut changes);
    changes.extend(old[old.len() - suffix..].iter().map(|item| Change::Equal(*item)));
    changes
}

fn lcs_changes<'a>(old: &[&'a str], new: &[&'a str], changes: &mut Vec<Change<'a>>) {
    let (n, m) = (old.len(), new.len());
    // lcs[i][j] is the LCS length of old[i..] and new[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            changes.push(Change::Equal(old[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            changes.push(Change::Delete(old[i]));
            i += 1;
        } else {
            changes.push(Change::Insert(new[j]));
            j += 1;
        }
    }
    changes.extend(old[i..].iter().map(|line| Change::Delete(*line)));
    changes.extend(new[j..].iter().map(|line| Change::Insert(*line)));
}

fn hunk_range(first: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", first),
        1 => format!("{}", first + 1),
        _ => format!("{},{}", first + 1, count),
    }
}

/// Unified line diff of `old` against `new` with `context` lines around each change.
///
/// Lines keep their terminators, so a `\r\n` or a missing final newline counts as a change. A last line without
/// a newline is followed by `\ No newline at end of file`. Returns an empty string only when `old == new`.
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str, context: usize) -> String {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();
    let changes = diff_slices(&old_lines, &new_lines);

    let changed: Vec<usize> = changes.iter()
        .enumerate()
        .filter(|(_, change)| !change.is_equal())
        .map(|(idx, _)| idx)
        .collect();
    if changed.is_empty() {
        return String::new();
    }

    // group change indices whose gap of equal lines is too wide to share context
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for idx in changed {
        if let Some((_, last)) = groups.last_mut() {
            if idx - *last - 1 <= 2 * context {
                *last = idx;
                continue;
            }
        }
        groups.push((idx, idx));
    }

    // line positions in old and new before each change
    let mut positions = Vec::with_capacity(changes.len());
    let (mut old_pos, mut new_pos) = (0, 0);
    for change in &changes {
        positions.push((old_pos, new_pos));
        match change {
            Change::Equal(_) => {
                old_pos += 1;
                new_pos += 1;
            }
            Change::Delete(_) => old_pos += 1,
            Change::Insert(_) => new_pos += 1,
        }
    }

    let mut out = format!("--- {}\n+++ {}\n", old_label, new_label);
    for (first, last) in groups {
        let start = first.saturating_sub(context);
        let end = (last + context).min(changes.len() - 1);
        let hunk = &changes[start..=end];
        let old_count = hunk.iter().filter(|c| !matches!(c, Change::Insert(_))).count();
        let new_count = hunk.iter().filter(|c| !matches!(c, Change::Delete(_))).count();
        let (old_first, new_first) = positions[start];
        out.push_str(&format!("@@ -{} +{} @@\n", hunk_range(old_first, old_count), hunk_range(new_first, new_count)));
        for change in hunk {
            let (marker, line) = match change {
                Change::Equal(line) => (' ', line),
                Change::Delete(line) => ('-', line),
                Change::Insert(line) => ('+', line),
            };
            out.push(marker);
            out.push_str(line);
            if !line.ends_with('\n') {
                out.push_str("\n\\ No newline at end of file\n");
            }
        }
    }
    out
}

/// Inline word diff: unchanged words as-is, runs of removed words as `[-...-]`, added as `{+...+}`.
pub fn word_diff(old: &str, new: &str) -> String {
    let old_words: Vec<&str> = old.split_whitespace().collect();
    let new_words: Vec<&str> = new.split_whitespace().collect();
    let changes = diff_slices(&old_words, &new_words);

    let mut pieces: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut run_kind: Option<Change> = None;
    for change in changes {
        let same_kind = run_kind.map_or(false, |kind| discriminant(&kind) == discriminant(&change));
        if !same_kind {
            flush_run(&mut pieces, &mut run, run_kind);
            run_kind = Some(change);
        }
        let word = match change {
            Change::Equal(word) | Change::Delete(word) | Change::Insert(word) => word,
        };
        run.push(word);
    }
    flush_run(&mut pieces, &mut run, run_kind);
    pieces.join(" ")
}

fn flush_run<'a>(pieces: &mut Vec<String>, run: &mut Vec<&'a str>, kind: Option<Change<'a>>) {
    if run.is_empty() {
        return;
    }
    let joined = run.join(" ");
    pieces.push(match kind {
        Some(Change::Delete(_)) => format!("[-{}-]", joined),
        Some(Change::Insert(_)) => format!("{{+{}+}}", joined),
        _ => joined,
    });
    run.clear();
}
