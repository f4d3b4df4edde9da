//! Context-window loading of sparse line stores.

use hunkview_diff::{DiffResult, Edit, Side, SparseFileContent};

use crate::edits::display_line;

/// Materialize the lines of one side that a diff view needs.
///
/// Every line inside an edit range is loaded, together with `context` lines
/// before and after each edit. With `context = None` the whole file is
/// loaded. Lines are stored in their [`display_line`] form.
pub fn load_sparse(
    lines: &[&str],
    edits: &[Edit],
    side: Side,
    context: Option<usize>,
) -> DiffResult<SparseFileContent> {
    let Some(context) = context else {
        return Ok(SparseFileContent::full(lines.iter().copied().map(display_line)));
    };

    let size = lines.len();
    let mut store = SparseFileContent::new(size);
    for edit in edits {
        let (begin, end) = match side {
            Side::A => (edit.begin_a, edit.end_a),
            Side::B => (edit.begin_b, edit.end_b),
        };
        let from = begin.saturating_sub(context);
        let to = end.saturating_add(context).min(size);
        for (index, text) in lines.iter().enumerate().take(to).skip(from) {
            store.insert(index, display_line(text))?;
        }
    }
    Ok(store)
}
